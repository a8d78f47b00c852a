//! Composition registry
//!
//! Compositions are registered once through a [`RegistryBuilder`], which instantiates every
//! composition's default props on the spot so that bad data fails at startup rather than on
//! the first rendered frame. The finished [`Registry`] is read-only and can be shared freely.

use std::sync::Arc;

use indexmap::IndexMap;
use reel_core::{Frame, Layer, VideoConfig};
use rustc_hash::FxBuildHasher;
use serde_json::Value;

use crate::bar_chart::{BarChart, BarChartProps};
use crate::composable::Composable;
use crate::config::{CompositionOverride, ReelConfig};
use crate::error::{CompositionError, Result};
use crate::product_launch::{ProductLaunch, ProductLaunchProps};
use crate::three_scene::{ThreeScene, ThreeSceneProps};

/// Builds a scene from (merged) props
pub type Factory = fn(Value) -> Result<Arc<dyn Composable>>;

/// Everything needed to register a composition
#[derive(Clone)]
pub struct CompositionSpec {
    pub id: String,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// `None` takes the scene's natural duration
    pub duration_in_frames: Option<Frame>,
    pub default_props: Value,
    pub factory: Factory,
}

impl CompositionSpec {
    /// 1280x720 at 30 fps with empty props
    pub fn new(id: impl Into<String>, factory: Factory) -> Self {
        Self {
            id: id.into(),
            fps: 30,
            width: 1280,
            height: 720,
            duration_in_frames: None,
            default_props: Value::Object(Default::default()),
            factory,
        }
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn duration(mut self, frames: Frame) -> Self {
        self.duration_in_frames = Some(frames);
        self
    }

    pub fn default_props(mut self, props: Value) -> Self {
        self.default_props = props;
        self
    }
}

/// A registered, instantiated composition
#[derive(Clone)]
pub struct CompositionEntry {
    id: String,
    video: VideoConfig,
    explicit_duration: Option<Frame>,
    default_props: Value,
    factory: Factory,
    scene: Arc<dyn Composable>,
}

impl std::fmt::Debug for CompositionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionEntry")
            .field("id", &self.id)
            .field("video", &self.video)
            .field("default_props", &self.default_props)
            .finish_non_exhaustive()
    }
}

impl CompositionEntry {
    fn from_spec(spec: CompositionSpec) -> Result<Self> {
        let scene = (spec.factory)(spec.default_props.clone())?;
        let duration = spec
            .duration_in_frames
            .or_else(|| scene.natural_duration())
            .ok_or_else(|| CompositionError::MissingDuration(spec.id.clone()))?;
        let video = VideoConfig::new(spec.fps, spec.width, spec.height, duration).map_err(
            |source| CompositionError::InvalidVideo {
                id: spec.id.clone(),
                source,
            },
        )?;

        Ok(Self {
            id: spec.id,
            video,
            explicit_duration: spec.duration_in_frames,
            default_props: spec.default_props,
            factory: spec.factory,
            scene,
        })
    }

    fn apply_override(self, patch: &CompositionOverride) -> Result<Self> {
        let default_props = match &patch.props {
            Some(props) => merge_props(&self.default_props, props),
            None => self.default_props,
        };
        Self::from_spec(CompositionSpec {
            id: self.id,
            fps: patch.fps.unwrap_or(self.video.fps),
            width: patch.width.unwrap_or(self.video.width),
            height: patch.height.unwrap_or(self.video.height),
            duration_in_frames: patch.duration_in_frames.or(self.explicit_duration),
            default_props,
            factory: self.factory,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn video(&self) -> &VideoConfig {
        &self.video
    }

    pub fn default_props(&self) -> &Value {
        &self.default_props
    }

    /// The scene built from the default props
    pub fn scene(&self) -> &Arc<dyn Composable> {
        &self.scene
    }

    /// Build a scene from the default props with `props` merged over them
    pub fn instantiate(&self, props: Option<&Value>) -> Result<Arc<dyn Composable>> {
        match props {
            None => Ok(Arc::clone(&self.scene)),
            Some(props) => (self.factory)(merge_props(&self.default_props, props)),
        }
    }

    /// Render `frame` of the default scene
    pub fn render_frame(&self, frame: Frame) -> Layer {
        self.scene.render(frame, &self.video)
    }
}

/// Shallow merge: top-level keys of `overrides` replace those of `defaults`.
///
/// A non-object override replaces the defaults wholesale.
pub fn merge_props(defaults: &Value, overrides: &Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(base), Value::Object(patch)) => {
            let mut merged = base.clone();
            for (key, value) in patch {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => overrides.clone(),
    }
}

/// Collects compositions before the registry is frozen
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: IndexMap<String, CompositionEntry, FxBuildHasher>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composition, instantiating its default props immediately
    pub fn register(&mut self, spec: CompositionSpec) -> Result<&mut Self> {
        if self.entries.contains_key(&spec.id) {
            return Err(CompositionError::Duplicate(spec.id));
        }
        let entry = CompositionEntry::from_spec(spec)?;
        tracing::debug!(
            "Registered composition {} ({}x{} @ {}fps, {} frames)",
            entry.id,
            entry.video.width,
            entry.video.height,
            entry.video.fps,
            entry.video.duration_in_frames
        );
        self.entries.insert(entry.id.clone(), entry);
        Ok(self)
    }

    /// Apply configuration overrides to already registered compositions
    pub fn with_overrides(&mut self, config: &ReelConfig) -> Result<&mut Self> {
        for (id, patch) in &config.compositions {
            let Some(entry) = self.entries.get(id) else {
                tracing::warn!("Configuration overrides unknown composition {}", id);
                return Err(CompositionError::NotFound(id.clone()));
            };
            let updated = entry.clone().apply_override(patch)?;
            tracing::debug!("Applied overrides to composition {}", id);
            self.entries.insert(id.clone(), updated);
        }
        Ok(self)
    }

    pub fn build(self) -> Registry {
        tracing::info!("Composition registry ready with {} entries", self.entries.len());
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable lookup of compositions by id, in registration order
#[derive(Debug)]
pub struct Registry {
    entries: IndexMap<String, CompositionEntry, FxBuildHasher>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// `BarChart`, `ProductLaunch` and `ThreeScene` with their default props
    pub fn with_defaults() -> Result<Self> {
        let mut builder = Self::builder();
        register_defaults(&mut builder)?;
        Ok(builder.build())
    }

    /// Defaults with a configuration applied on top
    pub fn with_config(config: &ReelConfig) -> Result<Self> {
        let mut builder = Self::builder();
        register_defaults(&mut builder)?.with_overrides(config)?;
        Ok(builder.build())
    }

    pub fn get(&self, id: &str) -> Result<&CompositionEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| CompositionError::NotFound(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CompositionEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn register_defaults(builder: &mut RegistryBuilder) -> Result<&mut RegistryBuilder> {
    builder
        .register(
            CompositionSpec::new("BarChart", BarChart::factory)
                .size(1280, 720)
                .duration(120)
                .default_props(serde_json::to_value(BarChartProps::sample())?),
        )?
        .register(
            CompositionSpec::new("ProductLaunch", ProductLaunch::factory)
                .size(1920, 1080)
                .default_props(serde_json::to_value(ProductLaunchProps::default())?),
        )?
        .register(
            CompositionSpec::new("ThreeScene", ThreeScene::factory)
                .size(1280, 720)
                .duration(150)
                .default_props(serde_json::to_value(ThreeSceneProps::default())?),
        )
}
