//! Easing functions for animations
//!
//! An [`Easing`] reshapes normalized progress before it is mapped onto an output range.
//! Base shapes ([`Curve`]) are combined with a direction the same way CSS and most motion
//! tools do: `Easing::Out(Curve::Cubic)` decelerates, `Easing::In(Curve::Cubic)` accelerates.

use serde::{Deserialize, Serialize};

/// Base easing shape, expressed as its ease-in form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Quad,
    Cubic,
    Quart,
    Sine,
    Expo,
    Circle,
    /// Slight wind-up before moving (overshoots below 0 on the way in)
    Back,
    Bounce,
    Elastic,
}

impl Curve {
    /// Ease-in form of the curve; `f(0) = 0`, `f(1) = 1`
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Curve::Quad => t * t,
            Curve::Cubic => t * t * t,
            Curve::Quart => t * t * t * t,
            Curve::Sine => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Curve::Expo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Curve::Circle => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Curve::Back => {
                const S: f32 = 1.70158;
                t * t * ((S + 1.0) * t - S)
            }
            Curve::Bounce => 1.0 - bounce_out(1.0 - t),
            Curve::Elastic => {
                if t <= 0.0 || t >= 1.0 {
                    return t.clamp(0.0, 1.0);
                }
                let p = 0.3;
                -(2f32.powf(10.0 * (t - 1.0)))
                    * ((t - 1.0 - p / 4.0) * std::f32::consts::TAU / p).sin()
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    In(Curve),
    Out(Curve),
    InOut(Curve),
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    pub const EASE_IN: Easing = Easing::In(Curve::Cubic);
    pub const EASE_OUT: Easing = Easing::Out(Curve::Cubic);
    pub const EASE_IN_OUT: Easing = Easing::InOut(Curve::Cubic);
    /// CSS `ease`
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// Apply the easing function to a progress value.
    ///
    /// Values outside `0.0..=1.0` are passed through the same formula, which is what an
    /// extending interpolation expects.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::In(curve) => curve.ease_in(t),
            Easing::Out(curve) => 1.0 - curve.ease_in(1.0 - t),
            Easing::InOut(curve) => {
                if t < 0.5 {
                    curve.ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - curve.ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// One axis of a unit cubic bezier with endpoints at 0 and 1, in polynomial form
#[derive(Clone, Copy)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1 as f64;
        let b = 3.0 * (p2 as f64 - p1 as f64) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn at(self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn slope(self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

const BEZIER_EPSILON: f64 = 1e-7;

/// CSS `cubic-bezier()`: solve x(s) = t for the curve parameter, then read y(s).
///
/// Newton steps first, bisection when the slope flattens out. Runs in f64 so that
/// neighbouring frames do not jitter.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t.clamp(0.0, 1.0);
    }
    let (x, y) = (BezierAxis::new(x1, x2), BezierAxis::new(y1, y2));
    let target = t as f64;
    y.at(solve_parameter(x, target)) as f32
}

fn solve_parameter(x: BezierAxis, target: f64) -> f64 {
    let mut s = target;
    for _ in 0..8 {
        let err = x.at(s) - target;
        if err.abs() < BEZIER_EPSILON {
            return s;
        }
        let slope = x.slope(s);
        if slope.abs() < BEZIER_EPSILON {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = target;
    for _ in 0..32 {
        let value = x.at(s);
        if (value - target).abs() < BEZIER_EPSILON {
            break;
        }
        if value < target {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CURVES: [Curve; 9] = [
        Curve::Quad,
        Curve::Cubic,
        Curve::Quart,
        Curve::Sine,
        Curve::Expo,
        Curve::Circle,
        Curve::Back,
        Curve::Bounce,
        Curve::Elastic,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for curve in ALL_CURVES {
            for easing in [Easing::In(curve), Easing::Out(curve), Easing::InOut(curve)] {
                assert!(easing.apply(0.0).abs() < 1e-3, "{easing:?} at 0");
                assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{easing:?} at 1");
            }
        }
        assert_eq!(Easing::EASE.apply(0.0), 0.0);
        assert_eq!(Easing::EASE.apply(1.0), 1.0);
    }

    #[test]
    fn out_cubic_decelerates() {
        let e = Easing::EASE_OUT;
        assert_eq!(e.apply(0.5), 1.0 - 0.125);
        assert!(e.apply(0.25) > 0.25);
        assert_eq!(Easing::EASE_IN.apply(0.5), 0.125);
    }

    #[test]
    fn in_out_is_symmetric() {
        let e = Easing::InOut(Curve::Quad);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.2) + e.apply(0.8) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bezier_linear_control_points() {
        let e = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((e.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn deserializes_from_config_text() {
        let e: Easing = serde_json::from_str(r#"{"out":"cubic"}"#).unwrap();
        assert_eq!(e, Easing::EASE_OUT);
        let linear: Easing = serde_json::from_str(r#""linear""#).unwrap();
        assert_eq!(linear, Easing::Linear);
    }
}
