//! Reel Compositions
//!
//! Parameterized video scenes and the registry that names them.
//!
//! Each composition is built once from JSON props and then rendered frame by frame into a
//! [`reel_core::Layer`] tree for an external renderer. Three are registered by default:
//!
//! - `BarChart`: staggered spring bars with counting value labels
//! - `ProductLaunch`: intro, feature and call-to-action scenes joined by fades
//! - `ThreeScene`: an orbiting 3D arrangement under a circling camera
//!
//! # Example
//!
//! ```rust
//! use reel_compositions::Registry;
//!
//! let registry = Registry::with_defaults().unwrap();
//! let launch = registry.get("ProductLaunch").unwrap();
//! assert_eq!(launch.video().duration_in_frames, 465);
//!
//! let frame = launch.render_frame(120);
//! assert_eq!(frame.name(), Some("product-launch"));
//! ```

pub mod bar_chart;
pub mod composable;
pub mod config;
pub mod error;
pub mod format;
pub mod product_launch;
pub mod registry;
pub mod three_scene;

pub use bar_chart::{BarChart, BarChartProps, BarDatum, BarState};
pub use composable::Composable;
pub use config::{CompositionOverride, ReelConfig, CONFIG_FILE};
pub use error::{CompositionError, Result};
pub use format::{format_thousands, round_counter};
pub use product_launch::{FeatureProps, LaunchScene, ProductLaunch, ProductLaunchProps};
pub use registry::{
    merge_props, CompositionEntry, CompositionSpec, Factory, Registry, RegistryBuilder,
};
pub use three_scene::{ThreeScene, ThreeSceneProps};
