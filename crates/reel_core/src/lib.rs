//! Reel Core
//!
//! Plain data shared by every Reel crate:
//!
//! - **Geometry**: points, sizes, rectangles and 3D vectors
//! - **Color**: linear RGBA colors with hex/HSL constructors
//! - **Layers**: the per-frame visual tree handed to an external renderer
//! - **Video settings**: frame rate, dimensions and duration of a composition
//!
//! Nothing in this crate holds state between frames. A composition produces a fresh
//! [`Layer`] tree for every frame it is asked about.
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Brush, Color, Layer, Rect};
//!
//! let background = Layer::rect(
//!     Rect::new(0.0, 0.0, 1280.0, 720.0),
//!     Brush::Solid(Color::from_hex(0x0f172a)),
//! );
//! let frame = Layer::stack(vec![background]).with_opacity(0.5);
//! assert_eq!(frame.opacity(), 0.5);
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod video;

pub use color::Color;
pub use error::{CoreError, Result};
pub use geometry::{Point, Rect, Size, Vec3};
pub use layer::{
    AssetRef, Border, Brush, Camera, CornerRadius, FontWeight, Geometry, Gradient, GradientStop,
    Layer, LayerProperties, Light, Material, Mesh, Shadow, TextAlign, TextStyle, Transform2D,
};
pub use video::{Frame, VideoConfig};
