//! Keyframe interpolation
//!
//! Maps an input value (usually a frame number) through a list of breakpoints onto an
//! output range. Breakpoints are validated once when the curve is built; sampling is total
//! and never fails, whatever the input.
//!
//! ```rust
//! use reel_animation::{Easing, Extrapolate, Interpolation};
//!
//! let fade = Interpolation::new(&[0.0, 20.0], &[0.0, 1.0])?
//!     .extrapolate_right(Extrapolate::Clamp);
//! assert_eq!(fade.sample(10.0), 0.5);
//! assert_eq!(fade.sample(500.0), 1.0);
//!
//! let slide = Interpolation::new(&[20.0, 40.0], &[30.0, 0.0])?
//!     .clamp()
//!     .easing(Easing::EASE_OUT);
//! assert_eq!(slide.sample(0.0), 30.0);
//! # Ok::<(), reel_animation::AnimationError>(())
//! ```

use reel_core::Color;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};

/// What happens to inputs outside the breakpoint range, configured per side
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Keep following the edge segment without bound
    #[default]
    Extend,
    /// Hold the boundary output
    #[serde(alias = "hold")]
    Clamp,
    /// Return the input unchanged
    Identity,
    /// Wrap the input back into the edge segment
    Wrap,
}

/// Options for the one-shot [`interpolate`] helper
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterpolateOptions {
    pub easing: Easing,
    pub extrapolate_left: Extrapolate,
    pub extrapolate_right: Extrapolate,
}

impl InterpolateOptions {
    pub fn clamped() -> Self {
        Self {
            easing: Easing::Linear,
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
        }
    }
}

/// A validated breakpoint curve producing scalars
#[derive(Clone, Debug, PartialEq)]
pub struct Interpolation {
    input: SmallVec<[f32; 4]>,
    output: SmallVec<[f32; 4]>,
    easing: Easing,
    left: Extrapolate,
    right: Extrapolate,
}

impl Interpolation {
    /// Build a curve; `input` must be non-decreasing and as long as `output`
    pub fn new(input: &[f32], output: &[f32]) -> Result<Self> {
        validate_breakpoints(input, output.len())?;
        if let Some(index) = output.iter().position(|v| !v.is_finite()) {
            return Err(AnimationError::NonFinite { index });
        }
        Ok(Self {
            input: SmallVec::from_slice(input),
            output: SmallVec::from_slice(output),
            easing: Easing::Linear,
            left: Extrapolate::Extend,
            right: Extrapolate::Extend,
        })
    }

    /// Set the easing applied to each segment's normalized progress
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn extrapolate_left(mut self, policy: Extrapolate) -> Self {
        self.left = policy;
        self
    }

    pub fn extrapolate_right(mut self, policy: Extrapolate) -> Self {
        self.right = policy;
        self
    }

    /// Clamp on both sides
    pub fn clamp(self) -> Self {
        self.extrapolate_left(Extrapolate::Clamp)
            .extrapolate_right(Extrapolate::Clamp)
    }

    pub fn options(mut self, options: InterpolateOptions) -> Self {
        self.easing = options.easing;
        self.left = options.extrapolate_left;
        self.right = options.extrapolate_right;
        self
    }

    pub fn input_range(&self) -> &[f32] {
        &self.input
    }

    pub fn output_range(&self) -> &[f32] {
        &self.output
    }

    /// Sample the curve at `x`
    pub fn sample(&self, x: f32) -> f32 {
        if self.input.len() == 1 {
            return self.output[0];
        }
        let i = segment_index(&self.input, x);
        self.sample_segment(x, i)
    }

    fn sample_segment(&self, x: f32, i: usize) -> f32 {
        let (in_min, in_max) = (self.input[i], self.input[i + 1]);
        let (out_min, out_max) = (self.output[i], self.output[i + 1]);

        let mut t = x;
        if t < in_min {
            match self.left {
                Extrapolate::Extend => {}
                Extrapolate::Clamp => return out_min,
                Extrapolate::Identity => return t,
                Extrapolate::Wrap => t = wrap(t, in_min, in_max),
            }
        }
        if t > in_max {
            match self.right {
                Extrapolate::Extend => {}
                Extrapolate::Clamp => return out_max,
                Extrapolate::Identity => return t,
                Extrapolate::Wrap => t = wrap(t, in_min, in_max),
            }
        }

        if out_min == out_max {
            return out_min;
        }
        // Zero-width segment: a step at the breakpoint
        if in_min == in_max {
            return if t <= in_min { out_min } else { out_max };
        }

        let progress = (t - in_min) / (in_max - in_min);
        let eased = self.easing.apply(progress);
        out_min + eased * (out_max - out_min)
    }
}

/// Validate and sample in one call.
///
/// Meant for setup code; per-frame code should build an [`Interpolation`] once and sample it.
pub fn interpolate(
    x: f32,
    input: &[f32],
    output: &[f32],
    options: InterpolateOptions,
) -> Result<f32> {
    Ok(Interpolation::new(input, output)?.options(options).sample(x))
}

/// A validated breakpoint curve producing colors; always clamped at both ends
#[derive(Clone, Debug, PartialEq)]
pub struct ColorInterpolation {
    input: SmallVec<[f32; 4]>,
    colors: SmallVec<[Color; 4]>,
    easing: Easing,
}

impl ColorInterpolation {
    pub fn new(input: &[f32], colors: &[Color]) -> Result<Self> {
        validate_breakpoints(input, colors.len())?;
        Ok(Self {
            input: SmallVec::from_slice(input),
            colors: SmallVec::from_slice(colors),
            easing: Easing::Linear,
        })
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn sample(&self, x: f32) -> Color {
        let last = self.input.len() - 1;
        if last == 0 || x <= self.input[0] {
            return self.colors[0];
        }
        if x >= self.input[last] {
            return self.colors[last];
        }

        let i = segment_index(&self.input, x);
        let (in_min, in_max) = (self.input[i], self.input[i + 1]);
        if in_min == in_max {
            return self.colors[i + 1];
        }
        let progress = self.easing.apply((x - in_min) / (in_max - in_min));
        self.colors[i].lerp(&self.colors[i + 1], progress)
    }
}

fn validate_breakpoints(input: &[f32], output_len: usize) -> Result<()> {
    if input.is_empty() || output_len == 0 {
        return Err(AnimationError::EmptyRange);
    }
    if input.len() != output_len {
        return Err(AnimationError::LengthMismatch {
            input: input.len(),
            output: output_len,
        });
    }
    if let Some(index) = input.iter().position(|v| !v.is_finite()) {
        return Err(AnimationError::NonFinite { index });
    }
    if let Some(index) = (1..input.len()).find(|&i| input[i] < input[i - 1]) {
        return Err(AnimationError::NotMonotonic {
            index,
            value: input[index],
        });
    }
    Ok(())
}

/// Index of the segment `[input[i], input[i + 1]]` that owns `x`.
///
/// The first interior breakpoint at or above `x` closes the segment; inputs beyond either
/// end fall into the outermost segment. Requires `input.len() >= 2`.
fn segment_index(input: &[f32], x: f32) -> usize {
    let mut i = 1;
    while i < input.len() - 1 && input[i] < x {
        i += 1;
    }
    i - 1
}

fn wrap(x: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }
    (x - min).rem_euclid(range) + min
}
