//! Reel Animation
//!
//! Frame-driven animation curves and scene sequencing.
//!
//! # Features
//!
//! - **Interpolation**: keyframe ranges with easing and per-side extrapolation
//! - **Springs**: closed-form damped oscillators, sampled at any frame in any order
//! - **Stagger**: arithmetic start offsets for repeated elements
//! - **Timelines**: scenes laid end to end with transition overlays
//!
//! Every curve is validated when it is built and is a pure function of the frame afterwards.

pub mod easing;
pub mod error;
pub mod interpolate;
pub mod spring;
pub mod stagger;
pub mod timeline;

pub use easing::{Curve, Easing};
pub use error::{AnimationError, Result};
pub use interpolate::{
    interpolate, ColorInterpolation, Extrapolate, InterpolateOptions, Interpolation,
};
pub use spring::{Spring, SpringConfig, DEFAULT_SETTLE_THRESHOLD};
pub use stagger::Stagger;
pub use timeline::{
    ActiveScene, ActiveTransition, Resolved, Timeline, TimelineBuilder, Transition,
    TransitionKind,
};
