//! Staggered start offsets for repeated elements

use reel_core::Frame;
use serde::{Deserialize, Serialize};

/// Start offsets forming an arithmetic sequence: element `i` starts at `base + i * step`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stagger {
    pub base: Frame,
    pub step: Frame,
}

impl Stagger {
    pub const fn new(base: Frame, step: Frame) -> Self {
        Self { base, step }
    }

    /// Start frame of element `index`, saturating at the ends of the frame range
    pub fn start(&self, index: usize) -> Frame {
        let index = Frame::try_from(index).unwrap_or(Frame::MAX);
        self.base.saturating_add(index.saturating_mul(self.step))
    }

    /// Start frames of the first `count` elements
    pub fn starts(&self, count: usize) -> impl Iterator<Item = Frame> + '_ {
        (0..count).map(move |i| self.start(i))
    }

    /// Frame relative to element `index`'s start; negative before it begins
    pub fn local_frame(&self, frame: Frame, index: usize) -> Frame {
        frame.saturating_sub(self.start(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_offsets() {
        let stagger = Stagger::new(20, 8);
        let starts: Vec<Frame> = stagger.starts(7).collect();
        assert_eq!(starts, vec![20, 28, 36, 44, 52, 60, 68]);
        assert_eq!(stagger.local_frame(30, 1), 2);
        assert_eq!(stagger.local_frame(30, 2), -6);
    }

    #[test]
    fn zero_and_negative_steps() {
        let flat = Stagger::new(10, 0);
        assert!(flat.starts(5).all(|s| s == 10));

        let reverse = Stagger::new(30, -10);
        assert_eq!(reverse.starts(3).collect::<Vec<_>>(), vec![30, 20, 10]);
    }

    #[test]
    fn extreme_frames_saturate() {
        let stagger = Stagger::new(20, 8);
        assert_eq!(stagger.local_frame(Frame::MIN, 3), Frame::MIN);
        assert_eq!(stagger.local_frame(Frame::MAX, 0), Frame::MAX - 20);
        assert_eq!(Stagger::new(Frame::MAX - 1, 8).start(2), Frame::MAX);
        assert_eq!(Stagger::new(0, Frame::MIN).start(usize::MAX), Frame::MIN);
    }
}
