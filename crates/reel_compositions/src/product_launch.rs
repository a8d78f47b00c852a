//! Multi-scene product launch video
//!
//! Intro title, one card per feature, then a call to action, joined by fade-to-black
//! transitions. Scene order and timing:
//!
//! | scene     | start       | length | hold |
//! |-----------|-------------|--------|------|
//! | intro     | 0           | 90     | 0    |
//! | feature k | 90 + k * 95 | 90     | 5    |
//! | cta       | 90 + n * 95 | 90     | 0    |
//!
//! With the default three features that is 465 frames.

use std::sync::Arc;

use reel_animation::{
    Easing, Extrapolate, Interpolation, Spring, SpringConfig, Timeline, Transition,
};
use reel_core::{
    Color, FontWeight, Frame, Gradient, GradientStop, Layer, Rect, Shadow, TextAlign, TextStyle,
    Transform2D, VideoConfig,
};
use serde::{Deserialize, Serialize};

use crate::composable::Composable;
use crate::error::Result;

pub const SCENE_FRAMES: Frame = 90;
pub const TRANSITION_FRAMES: Frame = 5;

/// Rough label width per character, in em; the renderer lays the text out itself
const AVG_GLYPH_WIDTH_EM: f32 = 0.55;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProps {
    pub icon: String,
    pub title: String,
    pub description: String,
    /// Hex accent color
    pub color: String,
}

impl FeatureProps {
    pub fn new(icon: &str, title: &str, description: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductLaunchProps {
    pub product_name: String,
    pub tagline: String,
    pub features: Vec<FeatureProps>,
    pub cta_text: String,
    pub cta_button: String,
}

impl Default for ProductLaunchProps {
    fn default() -> Self {
        Self {
            product_name: "Acme Pro".to_string(),
            tagline: "The future of productivity".to_string(),
            features: vec![
                FeatureProps::new(
                    "⚡",
                    "Lightning Fast",
                    "Built for speed. Every interaction feels instant.",
                    "#fbbf24",
                ),
                FeatureProps::new(
                    "🔒",
                    "Secure by Default",
                    "Enterprise-grade security without the complexity.",
                    "#22c55e",
                ),
                FeatureProps::new(
                    "🎨",
                    "Beautiful Design",
                    "Crafted with attention to every pixel.",
                    "#a855f7",
                ),
            ],
            cta_text: "Ready to transform your workflow?".to_string(),
            cta_button: "Start Free Trial →".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intro
// ─────────────────────────────────────────────────────────────────────────────

pub struct IntroScene {
    title: String,
    tagline: String,
    title_scale: Spring,
    title_fade: Interpolation,
    tagline_slide: Interpolation,
    tagline_fade: Interpolation,
    gradient_shift: Interpolation,
}

impl IntroScene {
    pub fn new(title: &str, tagline: &str) -> Result<Self> {
        Ok(Self {
            title: title.to_string(),
            tagline: tagline.to_string(),
            title_scale: Spring::new(SpringConfig::damped(12.0, 100.0))?,
            title_fade: Interpolation::new(&[0.0, 15.0], &[0.0, 1.0])?
                .extrapolate_right(Extrapolate::Clamp),
            tagline_slide: Interpolation::new(&[20.0, 40.0], &[30.0, 0.0])?
                .clamp()
                .easing(Easing::EASE_OUT),
            tagline_fade: Interpolation::new(&[20.0, 35.0], &[0.0, 1.0])?.clamp(),
            gradient_shift: Interpolation::new(&[0.0, 90.0], &[0.0, 100.0])?,
        })
    }

    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let (width, height) = (video.width_f32(), video.height_f32());
        let f = frame as f32;
        let scale = self.title_scale.progress(frame, video.fps);

        let angle = 135.0 + self.gradient_shift.sample(f) * 0.5;
        let background = Layer::rect(
            Rect::new(0.0, 0.0, width, height),
            Gradient::linear(
                angle,
                vec![
                    GradientStop::new(0.0, Color::from_hex(0x1a1a2e)),
                    GradientStop::new(0.5, Color::from_hex(0x16213e)),
                    GradientStop::new(1.0, Color::from_hex(0x0f3460)),
                ],
            ),
        )
        .with_name("background");

        let indigo = Color::from_hex(0x6366f1).with_alpha(0.3);
        let circle = Layer::rect(
            Rect::new((width - 400.0) * 0.5, (height - 400.0) * 0.5, 400.0, 400.0),
            Gradient::radial(
                0.5,
                vec![
                    GradientStop::new(0.0, indigo),
                    GradientStop::new(0.7, Color::TRANSPARENT),
                ],
            ),
        )
        .with_corner_radius(200.0)
        .with_transform(Transform2D::scale(scale * 1.5))
        .with_name("glow-circle");

        let title_line = 80.0 * 1.2;
        let tagline_line = 32.0 * 1.2;
        let top = (height - (title_line + 20.0 + tagline_line)) * 0.5;

        let title = Layer::text(
            self.title.clone(),
            Rect::new(0.0, top, width, title_line),
            TextStyle::new(80.0, Color::WHITE)
                .weight(FontWeight::EXTRA_BOLD)
                .align(TextAlign::Center)
                .letter_spacing(-0.03),
        )
        .with_transform(Transform2D::scale(scale))
        .with_opacity(self.title_fade.sample(f))
        .with_name("title");

        let tagline = Layer::text(
            self.tagline.clone(),
            Rect::new(0.0, top + title_line + 20.0, width, tagline_line),
            TextStyle::new(32.0, Color::from_hex(0xa5b4fc))
                .weight(FontWeight::MEDIUM)
                .align(TextAlign::Center),
        )
        .with_transform(Transform2D::translate(0.0, self.tagline_slide.sample(f)))
        .with_opacity(self.tagline_fade.sample(f))
        .with_name("tagline");

        Layer::stack(vec![background, circle, title, tagline])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature card
// ─────────────────────────────────────────────────────────────────────────────

const CARD_WIDTH: f32 = 700.0;
const CARD_PADDING: f32 = 60.0;
const DESCRIPTION_LINES: f32 = 2.0;

pub struct FeatureScene {
    icon: String,
    title: String,
    description: String,
    color: Color,
    slide: Spring,
    slide_offset: Interpolation,
    icon_pop: Spring,
    text_fade: Interpolation,
    accent_width: Interpolation,
}

impl FeatureScene {
    pub fn new(props: &FeatureProps) -> Result<Self> {
        Ok(Self {
            icon: props.icon.clone(),
            title: props.title.clone(),
            description: props.description.clone(),
            color: Color::parse_hex(&props.color)?,
            slide: Spring::new(SpringConfig::damped(15.0, 80.0))?,
            slide_offset: Interpolation::new(&[0.0, 1.0], &[200.0, 0.0])?,
            icon_pop: Spring::new(SpringConfig::damped(8.0, 150.0))?.delay(10),
            text_fade: Interpolation::new(&[15.0, 30.0], &[0.0, 1.0])?.clamp(),
            accent_width: Interpolation::new(&[20.0, 50.0], &[0.0, 100.0])?.clamp(),
        })
    }

    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let (width, height) = (video.width_f32(), video.height_f32());
        let f = frame as f32;

        let card_x = self
            .slide_offset
            .sample(self.slide.progress(frame, video.fps));
        let icon_scale = self.icon_pop.progress(frame, video.fps).max(0.0);
        let text_opacity = self.text_fade.sample(f);

        let icon_line = 72.0 * 1.2;
        let title_line = 48.0 * 1.2;
        let description_height = 24.0 * 1.5 * DESCRIPTION_LINES;
        let content_height =
            icon_line + 24.0 + title_line + 16.0 + description_height + 32.0 + 4.0;

        let card_w = CARD_WIDTH + 2.0 * CARD_PADDING;
        let card_h = content_height + 2.0 * CARD_PADDING;
        let card = Rect::new((width - card_w) * 0.5, (height - card_h) * 0.5, card_w, card_h);
        let left = card.x() + CARD_PADDING;
        let mut y = card.y() + CARD_PADDING;

        let mut layers = Vec::with_capacity(5);
        layers.push(
            Layer::rect(card, Color::from_hex(0x1a1a1a))
                .with_corner_radius(24.0)
                .with_shadow(Shadow::glow(60.0, self.color.with_alpha(0x30 as f32 / 255.0)))
                .with_border(1.0, self.color.with_alpha(0x40 as f32 / 255.0))
                .with_name("card"),
        );

        layers.push(
            Layer::text(
                self.icon.clone(),
                Rect::new(left, y, CARD_WIDTH, icon_line),
                TextStyle::new(72.0, Color::WHITE),
            )
            .with_transform(Transform2D::scale(icon_scale))
            .with_name("icon"),
        );
        y += icon_line + 24.0;

        layers.push(
            Layer::text(
                self.title.clone(),
                Rect::new(left, y, CARD_WIDTH, title_line),
                TextStyle::new(48.0, Color::WHITE).weight(FontWeight::BOLD),
            )
            .with_opacity(text_opacity)
            .with_name("feature-title"),
        );
        y += title_line + 16.0;

        layers.push(
            Layer::text(
                self.description.clone(),
                Rect::new(left, y, CARD_WIDTH, description_height),
                TextStyle::new(24.0, Color::from_hex(0x888888)).line_height(1.5),
            )
            .with_opacity(text_opacity)
            .with_name("description"),
        );
        y += description_height + 32.0;

        layers.push(
            Layer::rect(
                Rect::new(left, y, self.accent_width.sample(f), 4.0),
                self.color,
            )
            .with_corner_radius(2.0)
            .with_name("accent"),
        );

        Layer::stack(vec![
            Layer::rect(Rect::new(0.0, 0.0, width, height), Color::from_hex(0x0f0f0f))
                .with_name("background"),
            Layer::stack(layers)
                .with_transform(Transform2D::translate(card_x, 0.0))
                .with_name("card-group"),
        ])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Call to action
// ─────────────────────────────────────────────────────────────────────────────

pub struct CtaScene {
    text: String,
    button: String,
    text_fade: Interpolation,
    button_pop: Spring,
    glow: Interpolation,
}

impl CtaScene {
    pub fn new(text: &str, button: &str) -> Result<Self> {
        Ok(Self {
            text: text.to_string(),
            button: button.to_string(),
            text_fade: Interpolation::new(&[0.0, 20.0], &[0.0, 1.0])?
                .extrapolate_right(Extrapolate::Clamp),
            button_pop: Spring::new(SpringConfig::damped(10.0, 200.0))?.delay(25),
            glow: Interpolation::new(&[-1.0, 1.0], &[20.0, 40.0])?,
        })
    }

    /// Blur radius of the pulsing button glow
    pub fn glow_at(&self, frame: Frame) -> f32 {
        self.glow.sample((frame as f32 * 0.15).sin())
    }

    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let (width, height) = (video.width_f32(), video.height_f32());

        let text_w = 800.0_f32.min(width);
        let text_h = 56.0 * 1.3 * 2.0;
        let button_h = 28.0 * 1.2 + 2.0 * 20.0;
        let label_w = self.button.chars().count() as f32 * 28.0 * AVG_GLYPH_WIDTH_EM;
        let button_w = label_w + 2.0 * 50.0;
        let top = (height - (text_h + 50.0 + button_h)) * 0.5;
        let button_rect = Rect::new(
            (width - button_w) * 0.5,
            top + text_h + 50.0,
            button_w,
            button_h,
        );

        let button = Layer::stack(vec![
            Layer::rect(button_rect, Color::WHITE)
                .with_corner_radius(50.0)
                .with_shadow(Shadow::glow(self.glow_at(frame), Color::WHITE.with_alpha(0.5))),
            Layer::text(
                self.button.clone(),
                button_rect.inset(50.0, 20.0),
                TextStyle::new(28.0, Color::from_hex(0x764ba2))
                    .weight(FontWeight::BOLD)
                    .align(TextAlign::Center),
            ),
        ])
        .with_transform(Transform2D::scale(
            self.button_pop.progress(frame, video.fps).max(0.0),
        ))
        .with_name("button");

        Layer::stack(vec![
            Layer::rect(
                Rect::new(0.0, 0.0, width, height),
                Gradient::linear(
                    135.0,
                    vec![
                        GradientStop::new(0.0, Color::from_hex(0x667eea)),
                        GradientStop::new(1.0, Color::from_hex(0x764ba2)),
                    ],
                ),
            )
            .with_name("background"),
            Layer::text(
                self.text.clone(),
                Rect::new((width - text_w) * 0.5, top, text_w, text_h),
                TextStyle::new(56.0, Color::WHITE)
                    .weight(FontWeight::BOLD)
                    .align(TextAlign::Center)
                    .line_height(1.3),
            )
            .with_opacity(self.text_fade.sample(frame as f32))
            .with_name("cta-text"),
            button,
        ])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────────────────────────────────────

/// One scene of the launch video
pub enum LaunchScene {
    Intro(IntroScene),
    Feature(FeatureScene),
    Cta(CtaScene),
}

impl LaunchScene {
    pub fn name(&self) -> &'static str {
        match self {
            LaunchScene::Intro(_) => "intro",
            LaunchScene::Feature(_) => "feature",
            LaunchScene::Cta(_) => "cta",
        }
    }

    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        match self {
            LaunchScene::Intro(scene) => scene.render(frame, video),
            LaunchScene::Feature(scene) => scene.render(frame, video),
            LaunchScene::Cta(scene) => scene.render(frame, video),
        }
    }
}

/// The assembled launch video
pub struct ProductLaunch {
    timeline: Timeline<LaunchScene>,
}

impl ProductLaunch {
    pub fn new(props: ProductLaunchProps) -> Result<Self> {
        let mut builder = Timeline::builder().scene(
            LaunchScene::Intro(IntroScene::new(&props.product_name, &props.tagline)?),
            SCENE_FRAMES,
        );
        for feature in &props.features {
            builder = builder
                .scene(LaunchScene::Feature(FeatureScene::new(feature)?), SCENE_FRAMES)
                .hold(TRANSITION_FRAMES);
        }
        let timeline = builder
            .scene(
                LaunchScene::Cta(CtaScene::new(&props.cta_text, &props.cta_button)?),
                SCENE_FRAMES,
            )
            .transition(Transition::fade(TRANSITION_FRAMES))
            .build()?;

        Ok(Self { timeline })
    }

    /// Registry factory
    pub fn factory(props: serde_json::Value) -> Result<Arc<dyn Composable>> {
        let props: ProductLaunchProps = serde_json::from_value(props)?;
        Ok(Arc::new(Self::new(props)?))
    }

    pub fn timeline(&self) -> &Timeline<LaunchScene> {
        &self.timeline
    }
}

impl Composable for ProductLaunch {
    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let full = Rect::new(0.0, 0.0, video.width_f32(), video.height_f32());
        let resolved = self.timeline.resolve(frame);

        let overlay = |opacity: f32| {
            Layer::rect(full, Color::BLACK)
                .with_opacity(opacity)
                .with_name("transition")
        };

        let mut layers = Vec::with_capacity(4);
        let mut pending = resolved.transition;
        layers.push(Layer::rect(full, Color::BLACK).with_name("background"));
        for active in &resolved.scenes {
            layers.push(
                active
                    .scene
                    .render(active.local_frame, video)
                    .with_name(format!("{}-{}", active.scene.name(), active.index)),
            );
            // The overlay covers the outgoing scene; later scenes draw over it
            if let Some(transition) = pending.filter(|t| t.after == active.index) {
                layers.push(overlay(transition.opacity));
                pending = None;
            }
        }
        if let Some(transition) = pending {
            layers.push(overlay(transition.opacity));
        }

        Layer::stack(layers).with_name("product-launch")
    }

    fn natural_duration(&self) -> Option<Frame> {
        Some(self.timeline.total_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoConfig {
        VideoConfig::new(30, 1920, 1080, 465).unwrap()
    }

    #[test]
    fn default_props_last_465_frames() {
        let launch = ProductLaunch::new(ProductLaunchProps::default()).unwrap();
        assert_eq!(launch.natural_duration(), Some(465));
        let names: Vec<&str> = launch.timeline().scenes().map(|(.., s)| s.name()).collect();
        assert_eq!(names, ["intro", "feature", "feature", "feature", "cta"]);
    }

    #[test]
    fn duration_follows_feature_count() {
        let props = ProductLaunchProps {
            features: Vec::new(),
            ..ProductLaunchProps::default()
        };
        let launch = ProductLaunch::new(props).unwrap();
        assert_eq!(launch.natural_duration(), Some(180));
    }

    #[test]
    fn feature_colors_are_validated() {
        let mut props = ProductLaunchProps::default();
        props.features[0].color = "not-a-color".into();
        assert!(ProductLaunch::new(props).is_err());
    }

    fn layer_names(tree: &Layer) -> Vec<&str> {
        tree.children().iter().filter_map(|l| l.name()).collect()
    }

    #[test]
    fn transition_overlay_sits_above_the_outgoing_scene() {
        let launch = ProductLaunch::new(ProductLaunchProps::default()).unwrap();

        let tree = launch.render(88, &video());
        assert_eq!(layer_names(&tree), ["background", "intro-0", "transition"]);

        // feature 1 starts at 90 and draws over the fading intro
        for frame in 90..95 {
            let tree = launch.render(frame, &video());
            assert_eq!(
                layer_names(&tree),
                ["background", "intro-0", "transition", "feature-1"]
            );
        }

        // the next feature starts after its window closes, so the overlay stays on top
        let tree = launch.render(182, &video());
        assert_eq!(layer_names(&tree), ["background", "feature-1", "transition"]);

        let tree = launch.render(50, &video());
        assert!(tree.find("transition").is_none());
    }

    #[test]
    fn cta_glow_pulses_between_bounds() {
        let cta = CtaScene::new("go", "now").unwrap();
        for frame in 0..120 {
            let glow = cta.glow_at(frame);
            assert!((20.0 - 1e-3..=40.0 + 1e-3).contains(&glow), "glow {glow}");
        }
        assert_eq!(cta.glow_at(0), 30.0);
    }
}
