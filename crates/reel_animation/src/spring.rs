//! Spring physics animation
//!
//! Closed-form damped harmonic oscillator. A [`Spring`] describes a unit step from rest at 0
//! to a target of 1; its position at any frame is computed analytically, so frames can be
//! sampled in any order and the same frame always gives the same value.

use reel_core::Frame;
use serde::{Deserialize, Serialize};

use crate::error::{AnimationError, Result};

/// Progress distance from the target under which a spring counts as settled
pub const DEFAULT_SETTLE_THRESHOLD: f32 = 0.005;

/// Longest stretch of time scanned when measuring how long a spring takes to settle
const MAX_SETTLE_SECS: i64 = 60;

/// Separates the critically damped branch from its neighbours
const CRITICAL_EPSILON: f64 = 1e-6;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring from damping and stiffness, the order motion tools usually quote them
    pub fn damped(damping: f32, stiffness: f32) -> Self {
        Self::new(stiffness, damping, 1.0)
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// A very stiff spring with minimal oscillation
    pub fn snappy() -> Self {
        Self::new(600.0, 40.0, 1.0)
    }

    /// A slow spring with no overshoot (critically damped)
    pub fn molasses() -> Self {
        Self::new(100.0, 20.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// `ζ = c / (2√(k·m))`
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// `ω₀ = √(k/m)` in radians per second
    pub fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is critically damped (no oscillation, fastest settling)
    pub fn is_critically_damped(&self) -> bool {
        (self.damping - self.critical_damping()).abs() < 0.01
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }

    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnimationError::InvalidSpring { param, value });
            }
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    /// `damping 10, stiffness 100, mass 1`
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

/// A validated spring curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    from: f32,
    to: f32,
    delay: Frame,
    overshoot_clamping: bool,
    /// Physical seconds per elapsed second; below 1 slows the spring down
    time_scale: f64,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            from: 0.0,
            to: 1.0,
            delay: 0,
            overshoot_clamping: false,
            time_scale: 1.0,
        })
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Output range that [`Spring::value`] maps progress onto
    pub fn from_to(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Start the curve `frames` frames later
    pub fn delay(mut self, frames: Frame) -> Self {
        self.delay = frames;
        self
    }

    /// Never let progress pass the target
    pub fn overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Stretch or compress the curve so it settles after exactly `frames` frames at `fps`
    pub fn duration_in_frames(mut self, frames: Frame, fps: u32) -> Result<Self> {
        if frames <= 0 {
            return Err(AnimationError::InvalidDuration {
                what: "spring duration",
                frames,
            });
        }
        let natural = Spring {
            delay: 0,
            time_scale: 1.0,
            ..self
        }
        .settle_frames(fps, DEFAULT_SETTLE_THRESHOLD);
        if natural > 0 {
            self.time_scale = natural as f64 / frames as f64;
        }
        Ok(self)
    }

    /// Normalized progress toward the target at `frame`.
    ///
    /// Exactly 0 at or before the start, approaches 1 as the spring settles, and may exceed 1
    /// for underdamped springs unless overshoot clamping is on.
    pub fn progress(&self, frame: Frame, fps: u32) -> f32 {
        let elapsed = frame.saturating_sub(self.delay);
        if elapsed <= 0 || fps == 0 {
            return 0.0;
        }
        let t = elapsed as f64 / fps as f64 * self.time_scale;
        let progress = 1.0 + self.displacement(t);
        if self.overshoot_clamping {
            progress.min(1.0) as f32
        } else {
            progress as f32
        }
    }

    /// Progress mapped onto the `from..to` range
    pub fn value(&self, frame: Frame, fps: u32) -> f32 {
        self.from + (self.to - self.from) * self.progress(frame, fps)
    }

    /// First frame from which progress stays within `threshold` of the target.
    ///
    /// Includes the delay and any duration stretch. Springs that are still moving after a
    /// minute report the end of that minute.
    pub fn settle_frames(&self, fps: u32, threshold: f32) -> Frame {
        if fps == 0 {
            return self.delay.max(0);
        }
        let end = self
            .delay
            .max(0)
            .saturating_add(MAX_SETTLE_SECS.saturating_mul(Frame::from(fps)));
        let mut settled = end;
        for frame in (0..=end).rev() {
            if (1.0 - self.progress(frame, fps)).abs() > threshold {
                break;
            }
            settled = frame;
        }
        settled
    }

    /// Position relative to the target at `t` seconds, starting at -1 with zero velocity
    fn displacement(&self, t: f64) -> f64 {
        let k = f64::from(self.config.stiffness);
        let c = f64::from(self.config.damping);
        let m = f64::from(self.config.mass);

        let omega0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());
        let x0 = -1.0_f64;
        let v0 = 0.0_f64;

        if (zeta - 1.0).abs() < CRITICAL_EPSILON {
            (-omega0 * t).exp() * (x0 + (v0 + omega0 * x0) * t)
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            envelope
                * (x0 * (omega_d * t).cos()
                    + (v0 + zeta * omega0 * x0) / omega_d * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS: u32 = 30;

    fn spring(damping: f32, stiffness: f32) -> Spring {
        Spring::new(SpringConfig::damped(damping, stiffness)).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        let s = Spring::new(SpringConfig::default()).unwrap();
        assert_eq!(s.progress(0, FPS), 0.0);
        assert_eq!(s.progress(-15, FPS), 0.0);
        assert!(s.progress(1, FPS) > 0.0);
        assert_eq!(s.progress(10, 0), 0.0);
    }

    #[test]
    fn converges_to_one() {
        for config in [
            SpringConfig::default(),
            SpringConfig::gentle(),
            SpringConfig::wobbly(),
            SpringConfig::molasses(),
            SpringConfig::new(80.0, 12.0, 0.5),
            SpringConfig::new(100.0, 40.0, 1.0),
        ] {
            let s = Spring::new(config).unwrap();
            let p = s.progress(FPS as Frame * 30, FPS);
            assert!((p - 1.0).abs() < 1e-3, "{config:?} ended at {p}");
        }
    }

    #[test]
    fn damped_springs_never_overshoot() {
        for s in [spring(20.0, 100.0), spring(40.0, 100.0)] {
            let mut last = 0.0;
            for frame in 0..=300 {
                let p = s.progress(frame, FPS);
                assert!(p + 1e-6 >= last, "not monotone at frame {frame}");
                assert!(p <= 1.0 + 1e-6);
                last = p;
            }
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let s = spring(8.0, 150.0);
        assert!(s.config().is_underdamped());
        let peak = (0..=90).map(|f| s.progress(f, FPS)).fold(0.0, f32::max);
        assert!(peak > 1.0, "peak was {peak}");
    }

    #[test]
    fn branches_meet_at_critical_damping() {
        let critical = spring(20.0, 100.0).progress(12, FPS);
        let under = spring(19.999, 100.0).progress(12, FPS);
        let over = spring(20.001, 100.0).progress(12, FPS);
        assert!((critical - under).abs() < 1e-3);
        assert!((critical - over).abs() < 1e-3);
    }

    #[test]
    fn random_access_is_deterministic() {
        let s = spring(12.0, 80.0);
        let forward: Vec<f32> = (0..60).map(|f| s.progress(f, FPS)).collect();
        let backward: Vec<f32> = (0..60).rev().map(|f| s.progress(f, FPS)).collect();
        assert!(forward.iter().eq(backward.iter().rev()));
    }

    #[test]
    fn delay_shifts_the_curve() {
        let base = spring(8.0, 150.0);
        let delayed = base.delay(10);
        assert_eq!(delayed.progress(10, FPS), 0.0);
        for frame in 0..40 {
            assert_eq!(delayed.progress(frame + 10, FPS), base.progress(frame, FPS));
        }
    }

    #[test]
    fn extreme_frames_stay_finite() {
        for s in [
            spring(12.0, 80.0),
            spring(12.0, 80.0).delay(-5),
            spring(8.0, 150.0).delay(Frame::MAX),
            spring(40.0, 100.0).delay(Frame::MIN),
        ] {
            assert_eq!(s.progress(Frame::MIN, FPS), 0.0);
            let end = s.progress(Frame::MAX, FPS);
            assert!(end.is_finite(), "{end}");
        }
        assert!((spring(12.0, 80.0).progress(Frame::MAX, FPS) - 1.0).abs() < 1e-6);
        assert_eq!(
            spring(12.0, 80.0)
                .delay(Frame::MAX)
                .settle_frames(FPS, DEFAULT_SETTLE_THRESHOLD),
            Frame::MAX
        );
    }

    #[test]
    fn overshoot_clamping_caps_progress() {
        let s = spring(8.0, 150.0).overshoot_clamping(true);
        assert!((0..=90).all(|f| s.progress(f, FPS) <= 1.0));
    }

    #[test]
    fn value_maps_onto_range() {
        let s = spring(15.0, 80.0).from_to(200.0, 0.0);
        assert_eq!(s.value(0, FPS), 200.0);
        assert!(s.value(300, FPS).abs() < 0.1);
    }

    #[test]
    fn settle_frames_measures_the_curve() {
        let s = Spring::new(SpringConfig::default()).unwrap();
        let settled = s.settle_frames(FPS, DEFAULT_SETTLE_THRESHOLD);
        assert!(settled > 0);
        assert!((settled..settled + 120)
            .all(|f| (1.0 - s.progress(f, FPS)).abs() <= DEFAULT_SETTLE_THRESHOLD));
        assert!((1.0 - s.progress(settled - 1, FPS)).abs() > DEFAULT_SETTLE_THRESHOLD);

        assert_eq!(s.delay(7).settle_frames(FPS, DEFAULT_SETTLE_THRESHOLD), settled + 7);
    }

    #[test]
    fn duration_stretches_settling_time() {
        let s = spring(12.0, 80.0).duration_in_frames(90, FPS).unwrap();
        let p = s.progress(90, FPS);
        assert!((1.0 - p).abs() <= DEFAULT_SETTLE_THRESHOLD + 1e-4, "progress {p}");

        assert_eq!(
            spring(12.0, 80.0).duration_in_frames(0, FPS).unwrap_err(),
            AnimationError::InvalidDuration {
                what: "spring duration",
                frames: 0
            }
        );
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            Spring::new(SpringConfig::new(0.0, 10.0, 1.0)).unwrap_err(),
            AnimationError::InvalidSpring {
                param: "stiffness",
                value: 0.0
            }
        );
        assert!(Spring::new(SpringConfig::new(100.0, f32::NAN, 1.0)).is_err());
        assert!(Spring::new(SpringConfig::new(100.0, 10.0, -1.0)).is_err());
    }

    #[test]
    fn preset_damping_classes() {
        assert!(SpringConfig::molasses().is_critically_damped());
        assert!(SpringConfig::wobbly().is_underdamped());
        assert!(SpringConfig::new(100.0, 40.0, 1.0).is_overdamped());
        assert_eq!(SpringConfig::molasses().damping_ratio(), 1.0);
        assert_eq!(SpringConfig::default().natural_frequency(), 10.0);
    }

    #[test]
    fn config_deserializes_partially() {
        let config: SpringConfig = serde_json::from_str(r#"{"damping": 12, "mass": 0.5}"#).unwrap();
        assert_eq!(config, SpringConfig::new(100.0, 12.0, 0.5));
    }
}
