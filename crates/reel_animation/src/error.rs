//! Animation configuration errors
//!
//! Every variant is raised while a curve or timeline is being built. Sampling a built curve
//! never fails.

use thiserror::Error;

/// Invalid animation configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Interpolation needs at least one breakpoint
    #[error("interpolation needs at least one breakpoint")]
    EmptyRange,

    /// Input and output breakpoint lists differ in length
    #[error("input range has {input} breakpoints but output range has {output}")]
    LengthMismatch { input: usize, output: usize },

    /// A breakpoint or output value is NaN or infinite
    #[error("breakpoint {index} is not finite")]
    NonFinite { index: usize },

    /// Input breakpoints must be non-decreasing
    #[error("input range must be non-decreasing, but breakpoint {index} ({value}) is below its predecessor")]
    NotMonotonic { index: usize, value: f32 },

    /// Spring parameters must be strictly positive and finite
    #[error("spring {param} must be positive and finite, got {value}")]
    InvalidSpring { param: &'static str, value: f32 },

    /// A duration that must be positive was zero or negative
    #[error("{what} must be positive, got {frames} frames")]
    InvalidDuration { what: &'static str, frames: i64 },

    /// A timeline needs at least one scene
    #[error("timeline has no scenes")]
    EmptyTimeline,

    /// Transition windows would overlap each other or run past the timeline start
    #[error("transition of {length} frames does not fit around scene {index}")]
    TransitionTooLong { index: usize, length: i64 },
}

/// Result type for animation configuration
pub type Result<T> = std::result::Result<T, AnimationError>;
