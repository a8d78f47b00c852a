//! Video settings shared by a composition and the renderer

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Frame index on a timeline.
///
/// Signed so that offsets before a curve's start (`frame - delay`) stay representable.
pub type Frame = i64;

/// Output settings of a composition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub duration_in_frames: Frame,
}

impl VideoConfig {
    pub fn new(fps: u32, width: u32, height: u32, duration_in_frames: Frame) -> Result<Self> {
        let config = Self {
            fps,
            width,
            height,
            duration_in_frames,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot be rendered
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(CoreError::InvalidVideo("fps must be positive".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidVideo(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.duration_in_frames <= 0 {
            return Err(CoreError::InvalidVideo(format!(
                "duration must be positive, got {} frames",
                self.duration_in_frames
            )));
        }
        Ok(())
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration_in_frames as f64 / self.fps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_settings() {
        assert!(VideoConfig::new(30, 1280, 720, 120).is_ok());
        assert!(matches!(
            VideoConfig::new(0, 1280, 720, 120),
            Err(CoreError::InvalidVideo(_))
        ));
        assert!(VideoConfig::new(30, 0, 720, 120).is_err());
        assert!(VideoConfig::new(30, 1280, 720, 0).is_err());
    }

    #[test]
    fn duration_in_seconds() {
        let config = VideoConfig::new(30, 1280, 720, 465).unwrap();
        assert!((config.duration_secs() - 15.5).abs() < 1e-9);
    }
}
