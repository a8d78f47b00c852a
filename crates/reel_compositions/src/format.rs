/// Group an integer's digits in threes with commas (`2840` -> `"2,840"`)
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Round a counter value to the nearest whole number, halves away from zero
pub fn round_counter(value: f32) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(980), "980");
        assert_eq!(format_thousands(2_840), "2,840");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-12_400), "-12,400");
    }

    #[test]
    fn counters_round_to_nearest() {
        assert_eq!(round_counter(1419.5), 1420);
        assert_eq!(round_counter(0.4), 0);
        assert_eq!(round_counter(f32::NAN), 0);
    }
}
