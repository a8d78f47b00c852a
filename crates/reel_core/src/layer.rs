//! Layer model for a single rendered frame
//!
//! Every composition returns a [`Layer`] tree per frame. The tree is plain data: a renderer
//! walks it, rasterizes it and never calls back into the composition.
//!
//! # Layer kinds
//!
//! - **Stack**: children composited in order (later children on top)
//! - **Rect**: a filled, optionally rounded and shadowed rectangle
//! - **Text**: a run of text laid out inside a box
//! - **Image**: a static asset resolved by the renderer
//! - **Scene3D**: a 3D scene with a camera, lights and meshes
//!
//! Opacity, 2D transform and an optional debug name live in [`LayerProperties`] on every kind.

use serde::Serialize;

use crate::color::Color;
use crate::geometry::{Point, Rect, Vec3};

// ─────────────────────────────────────────────────────────────────────────────
// Paint Types
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient type
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gradient {
    /// CSS-style linear gradient; `angle_deg` 180 runs top to bottom
    Linear {
        angle_deg: f32,
        stops: Vec<GradientStop>,
    },
    /// Radial gradient; `center` is relative to the filled rect (0.5, 0.5 = middle)
    Radial {
        center: Point,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    pub fn linear(angle_deg: f32, stops: Vec<GradientStop>) -> Self {
        Gradient::Linear { angle_deg, stops }
    }

    pub fn radial(radius: f32, stops: Vec<GradientStop>) -> Self {
        Gradient::Radial {
            center: Point::new(0.5, 0.5),
            radius,
            stops,
        }
    }
}

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}

/// Corner radii for rounded rectangles
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Round only the top corners (bar tops)
    pub fn top(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            ..Self::ZERO
        }
    }
}

impl From<f32> for CornerRadius {
    fn from(radius: f32) -> Self {
        Self::uniform(radius)
    }
}

/// Shadow configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    /// Centered glow
    pub fn glow(blur: f32, color: Color) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur,
            spread: 0.0,
            color,
        }
    }
}

/// Border stroke drawn inside a rect's edge
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

// ─────────────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────────────

/// CSS-style numeric font weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMIBOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const EXTRA_BOLD: FontWeight = FontWeight(800);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text style
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    /// Extra spacing in em
    pub letter_spacing: f32,
    pub line_height: f32,
    pub tabular_nums: bool,
    pub shadow: Option<Shadow>,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            weight: FontWeight::NORMAL,
            color,
            align: TextAlign::Left,
            letter_spacing: 0.0,
            line_height: 1.2,
            tabular_nums: false,
            shadow: None,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn letter_spacing(mut self, em: f32) -> Self {
        self.letter_spacing = em;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn tabular_nums(mut self) -> Self {
        self.tabular_nums = true;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Path of a static asset, resolved by the renderer (never read here)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 3D Scene Types
// ─────────────────────────────────────────────────────────────────────────────

/// Perspective camera looking at `target`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_deg: f32,
}

impl Camera {
    pub fn perspective(position: Vec3, target: Vec3, fov_deg: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
            fov_deg,
        }
    }
}

/// Light type for 3D scenes
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Parallel light shining from `position` toward the origin
    Directional {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
}

/// Mesh geometry primitives
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
        segments: u32,
    },
}

/// PBR-ish surface description
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub wireframe: bool,
    pub opacity: f32,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            metalness: 0.0,
            roughness: 1.0,
            wireframe: false,
            opacity: 1.0,
        }
    }

    /// Glow in the surface color
    pub fn emissive(mut self, intensity: f32) -> Self {
        self.emissive = self.color;
        self.emissive_intensity = intensity;
        self
    }

    pub fn metal(mut self, metalness: f32, roughness: f32) -> Self {
        self.metalness = metalness;
        self.roughness = roughness;
        self
    }

    pub fn wireframe(mut self, opacity: f32) -> Self {
        self.wireframe = true;
        self.opacity = opacity;
        self
    }
}

/// A positioned mesh; rotation is Euler XYZ in radians
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer
// ─────────────────────────────────────────────────────────────────────────────

/// 2D transform applied around the layer's center
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform2D {
    pub translate: Point,
    pub scale: f32,
    pub rotate_deg: f32,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translate: Point::ZERO,
        scale: 1.0,
        rotate_deg: 0.0,
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: Point::new(x, y),
            ..Self::IDENTITY
        }
    }

    pub fn scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Properties shared by every layer kind
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerProperties {
    /// Debug name; renderers ignore it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Transform2D::is_identity")]
    pub transform: Transform2D,
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self {
            name: None,
            opacity: 1.0,
            transform: Transform2D::IDENTITY,
        }
    }
}

/// A node of the per-frame visual tree
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// Children composited in order
    Stack {
        layers: Vec<Layer>,
        props: LayerProperties,
    },

    /// Filled rectangle
    Rect {
        rect: Rect,
        fill: Brush,
        corner_radius: CornerRadius,
        #[serde(skip_serializing_if = "Option::is_none")]
        shadow: Option<Shadow>,
        #[serde(skip_serializing_if = "Option::is_none")]
        border: Option<Border>,
        props: LayerProperties,
    },

    /// Text laid out inside `rect`
    Text {
        text: String,
        rect: Rect,
        style: TextStyle,
        props: LayerProperties,
    },

    /// Static image asset
    Image {
        src: AssetRef,
        rect: Rect,
        props: LayerProperties,
    },

    /// 3D scene drawn into `viewport`
    #[serde(rename = "scene_3d")]
    Scene3D {
        viewport: Rect,
        camera: Camera,
        lights: Vec<Light>,
        meshes: Vec<Mesh>,
        props: LayerProperties,
    },
}

impl Layer {
    pub fn stack(layers: Vec<Layer>) -> Self {
        Layer::Stack {
            layers,
            props: LayerProperties::default(),
        }
    }

    pub fn rect(rect: Rect, fill: impl Into<Brush>) -> Self {
        Layer::Rect {
            rect,
            fill: fill.into(),
            corner_radius: CornerRadius::ZERO,
            shadow: None,
            border: None,
            props: LayerProperties::default(),
        }
    }

    pub fn text(text: impl Into<String>, rect: Rect, style: TextStyle) -> Self {
        Layer::Text {
            text: text.into(),
            rect,
            style,
            props: LayerProperties::default(),
        }
    }

    pub fn image(src: AssetRef, rect: Rect) -> Self {
        Layer::Image {
            src,
            rect,
            props: LayerProperties::default(),
        }
    }

    pub fn scene_3d(viewport: Rect, camera: Camera, lights: Vec<Light>, meshes: Vec<Mesh>) -> Self {
        Layer::Scene3D {
            viewport,
            camera,
            lights,
            meshes,
            props: LayerProperties::default(),
        }
    }

    pub fn props(&self) -> &LayerProperties {
        match self {
            Layer::Stack { props, .. }
            | Layer::Rect { props, .. }
            | Layer::Text { props, .. }
            | Layer::Image { props, .. }
            | Layer::Scene3D { props, .. } => props,
        }
    }

    fn props_mut(&mut self) -> &mut LayerProperties {
        match self {
            Layer::Stack { props, .. }
            | Layer::Rect { props, .. }
            | Layer::Text { props, .. }
            | Layer::Image { props, .. }
            | Layer::Scene3D { props, .. } => props,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.props().opacity
    }

    pub fn name(&self) -> Option<&str> {
        self.props().name.as_deref()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.props_mut().name = Some(name.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.props_mut().opacity = opacity;
        self
    }

    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.props_mut().transform = transform;
        self
    }

    /// Set corner radius (rects only)
    pub fn with_corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        if let Layer::Rect { corner_radius, .. } = &mut self {
            *corner_radius = radius.into();
        }
        self
    }

    /// Set shadow (rects only)
    pub fn with_shadow(mut self, value: Shadow) -> Self {
        if let Layer::Rect { shadow, .. } = &mut self {
            *shadow = Some(value);
        }
        self
    }

    /// Set border (rects only)
    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        if let Layer::Rect { border, .. } = &mut self {
            *border = Some(Border { width, color });
        }
        self
    }

    pub fn children(&self) -> &[Layer] {
        match self {
            Layer::Stack { layers, .. } => layers,
            _ => &[],
        }
    }

    /// Depth-first pre-order walk
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Layer)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// First layer (depth-first) carrying `name`
    pub fn find(&self, name: &str) -> Option<&Layer> {
        if self.name() == Some(name) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// Number of layers in this subtree, including self
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.visit(&mut |_| n += 1);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Layer {
        Layer::stack(vec![
            Layer::rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE).with_name("bg"),
            Layer::stack(vec![Layer::text(
                "hi",
                Rect::new(0.0, 0.0, 10.0, 2.0),
                TextStyle::new(12.0, Color::BLACK),
            )
            .with_name("label")])
            .with_opacity(0.5),
        ])
    }

    #[test]
    fn find_walks_nested_stacks() {
        let tree = sample();
        assert_eq!(tree.count(), 4);
        let label = tree.find("label").expect("label layer");
        assert!(matches!(label, Layer::Text { text, .. } if text == "hi"));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn rect_only_builders_ignore_other_kinds() {
        let text = Layer::text("x", Rect::ZERO, TextStyle::new(10.0, Color::WHITE))
            .with_corner_radius(4.0)
            .with_shadow(Shadow::glow(2.0, Color::WHITE));
        assert_eq!(
            text,
            Layer::text("x", Rect::ZERO, TextStyle::new(10.0, Color::WHITE))
        );

        let rect = Layer::rect(Rect::ZERO, Color::BLACK).with_corner_radius(CornerRadius::top(8.0));
        match rect {
            Layer::Rect { corner_radius, .. } => {
                assert_eq!(corner_radius.top_left, 8.0);
                assert_eq!(corner_radius.bottom_left, 0.0);
            }
            other => panic!("unexpected layer {other:?}"),
        }
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(
            Layer::rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE).with_opacity(0.25),
        )
        .unwrap();
        assert_eq!(json["kind"], "rect");
        assert_eq!(json["props"]["opacity"], 0.25);
        assert!(json["props"].get("transform").is_none());
        assert!(json.get("shadow").is_none());
    }

    #[test]
    fn image_layers_pass_the_asset_path_through() {
        let logo = AssetRef::new("brand/logo.png");
        assert_eq!(logo.as_str(), "brand/logo.png");

        let layer = Layer::image(logo.clone(), Rect::new(10.0, 20.0, 64.0, 64.0)).with_name("logo");
        assert!(matches!(&layer, Layer::Image { src, .. } if *src == logo));
        assert_eq!(layer.opacity(), 1.0);

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["kind"], "image");
        assert_eq!(json["src"], "brand/logo.png");
        assert_eq!(json["rect"]["size"]["width"], 64.0);
        assert_eq!(json["props"]["name"], "logo");
    }
}
