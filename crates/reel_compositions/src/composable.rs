//! Renderer boundary

use reel_core::{Frame, Layer, VideoConfig};

/// A scene that can be drawn at any frame.
///
/// Implementations hold only curves and data prepared at construction, so `render` is a pure
/// function of its arguments: the same frame always produces the same tree, and frames may be
/// requested in any order from any thread.
pub trait Composable: Send + Sync {
    /// Visual tree for `frame`, local to the composition's start
    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer;

    /// Length the scene needs when no explicit duration is configured
    fn natural_duration(&self) -> Option<Frame> {
        None
    }
}
