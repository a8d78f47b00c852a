//! Animated bar chart
//!
//! Bars rise one after another on a spring while their value counters tick up. Timing per bar:
//!
//! - bar `i` starts at `20 + i * stagger_delay`
//! - height follows a `{damping 12, stiffness 80, mass 0.5}` spring, never below zero
//! - the value counter runs from 0 to the bar's value over 30 frames
//! - value and axis labels fade in over 15 frames

use std::sync::Arc;

use reel_animation::{Easing, Extrapolate, Interpolation, Spring, SpringConfig, Stagger};
use reel_core::{
    Color, CornerRadius, FontWeight, Frame, Gradient, GradientStop, Layer, Rect, Shadow,
    TextAlign, TextStyle, Transform2D, VideoConfig,
};
use serde::{Deserialize, Serialize};

use crate::composable::Composable;
use crate::error::Result;
use crate::format::{format_thousands, round_counter};

/// Colors for bars without an explicit one, cycled by index
pub const PALETTE: [u32; 8] = [
    0x3B82F6, // blue
    0x10B981, // emerald
    0xF59E0B, // amber
    0xEF4444, // red
    0x8B5CF6, // violet
    0xEC4899, // pink
    0x06B6D4, // cyan
    0x84CC16, // lime
];

const FIRST_BAR_START: Frame = 20;
const COUNTER_FRAMES: f32 = 30.0;
const LABEL_FADE_FRAMES: f32 = 15.0;

const PADDING: f32 = 60.0;
const HEADER_MARGIN: f32 = 40.0;
const CHART_PADDING_BOTTOM: f32 = 60.0;
const BAR_GAP: f32 = 20.0;
const MAX_BAR_WIDTH: f32 = 120.0;
const MIN_VISIBLE_HEIGHT: f32 = 4.0;
const LINE_HEIGHT: f32 = 1.2;

const TITLE_SIZE: f32 = 48.0;
const SUBTITLE_SIZE: f32 = 24.0;
const SUBTITLE_MARGIN: f32 = 8.0;
const VALUE_SIZE: f32 = 28.0;
const VALUE_MARGIN: f32 = 12.0;
const LABEL_SIZE: f32 = 18.0;
const LABEL_MARGIN: f32 = 16.0;

/// One bar of input data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f32,
    /// Hex color; falls back to [`PALETTE`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarChartProps {
    pub data: Vec<BarDatum>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub show_values: bool,
    /// Frames between consecutive bar starts
    pub stagger_delay: Frame,
}

impl Default for BarChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            title: "Weekly Stats".to_string(),
            subtitle: None,
            show_values: true,
            stagger_delay: 8,
        }
    }
}

impl BarChartProps {
    /// A week of download counts, used as the registered default
    pub fn sample() -> Self {
        let week = [
            ("Mon", 1240.0),
            ("Tue", 1890.0),
            ("Wed", 2100.0),
            ("Thu", 1650.0),
            ("Fri", 2840.0),
            ("Sat", 980.0),
            ("Sun", 1120.0),
        ];
        Self {
            data: week
                .iter()
                .map(|&(label, value)| BarDatum::new(label, value))
                .collect(),
            title: "Weekly Downloads".to_string(),
            subtitle: Some("Jan 27 - Feb 2, 2026".to_string()),
            ..Self::default()
        }
    }
}

/// Animated values of one bar at one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarState {
    pub start: Frame,
    /// Share of the chart height, `100.0` for the largest value once settled
    pub height_percent: f32,
    /// Counter value as displayed
    pub value: i64,
    pub label_opacity: f32,
}

struct Bar {
    label: String,
    color: Color,
    /// `value / max`, or 0 when no value is positive
    height_fraction: f32,
    counter: Interpolation,
    label_fade: Interpolation,
}

/// Prepared bar chart scene
pub struct BarChart {
    title: String,
    subtitle: Option<String>,
    show_values: bool,
    bars: Vec<Bar>,
    stagger: Stagger,
    rise: Spring,
    title_fade: Interpolation,
    title_slide: Interpolation,
}

impl BarChart {
    pub fn new(props: BarChartProps) -> Result<Self> {
        let stagger = Stagger::new(FIRST_BAR_START, props.stagger_delay);
        let max = props
            .data
            .iter()
            .map(|d| d.value)
            .fold(f32::NEG_INFINITY, f32::max);

        let bars = props
            .data
            .into_iter()
            .enumerate()
            .map(|(index, datum)| -> Result<Bar> {
                let color = match datum.color.as_deref() {
                    Some(hex) => Color::parse_hex(hex)?,
                    None => Color::from_hex(PALETTE[index % PALETTE.len()]),
                };
                let start = stagger.start(index) as f32;
                let counter =
                    Interpolation::new(&[start, start + COUNTER_FRAMES], &[0.0, datum.value])?;
                let label_fade =
                    Interpolation::new(&[start, start + LABEL_FADE_FRAMES], &[0.0, 1.0])?;
                Ok(Bar {
                    label: datum.label,
                    color,
                    height_fraction: if max > 0.0 { (datum.value / max).max(0.0) } else { 0.0 },
                    counter: counter.clamp(),
                    label_fade: label_fade.clamp(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: props.title,
            subtitle: props.subtitle,
            show_values: props.show_values,
            bars,
            stagger,
            rise: Spring::new(SpringConfig::new(80.0, 12.0, 0.5))?,
            title_fade: Interpolation::new(&[0.0, 20.0], &[0.0, 1.0])?
                .extrapolate_right(Extrapolate::Clamp),
            title_slide: Interpolation::new(&[0.0, 20.0], &[-20.0, 0.0])?
                .extrapolate_right(Extrapolate::Clamp)
                .easing(Easing::EASE_OUT),
        })
    }

    /// Registry factory
    pub fn factory(props: serde_json::Value) -> Result<Arc<dyn Composable>> {
        let props: BarChartProps = serde_json::from_value(props)?;
        Ok(Arc::new(Self::new(props)?))
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar_state(&self, index: usize, frame: Frame, fps: u32) -> Option<BarState> {
        let bar = self.bars.get(index)?;
        let progress = self
            .rise
            .progress(self.stagger.local_frame(frame, index), fps)
            .max(0.0);
        Some(BarState {
            start: self.stagger.start(index),
            height_percent: bar.height_fraction * 100.0 * progress,
            value: round_counter(bar.counter.sample(frame as f32)),
            label_opacity: bar.label_fade.sample(frame as f32),
        })
    }

    pub fn bar_states(&self, frame: Frame, fps: u32) -> Vec<BarState> {
        (0..self.bars.len())
            .filter_map(|index| self.bar_state(index, frame, fps))
            .collect()
    }

    fn render_header(&self, frame: f32, width: f32) -> Layer {
        let text_width = (width - 2.0 * PADDING).max(0.0);
        let title_height = TITLE_SIZE * LINE_HEIGHT;

        let mut lines = vec![Layer::text(
            self.title.clone(),
            Rect::new(PADDING, PADDING, text_width, title_height),
            TextStyle::new(TITLE_SIZE, Color::WHITE)
                .weight(FontWeight::BOLD)
                .letter_spacing(-0.02),
        )
        .with_name("title")];

        if let Some(subtitle) = &self.subtitle {
            lines.push(
                Layer::text(
                    subtitle.clone(),
                    Rect::new(
                        PADDING,
                        PADDING + title_height + SUBTITLE_MARGIN,
                        text_width,
                        SUBTITLE_SIZE * LINE_HEIGHT,
                    ),
                    TextStyle::new(SUBTITLE_SIZE, Color::from_hex(0x94a3b8)),
                )
                .with_name("subtitle"),
            );
        }

        Layer::stack(lines)
            .with_name("header")
            .with_opacity(self.title_fade.sample(frame))
            .with_transform(Transform2D::translate(0.0, self.title_slide.sample(frame)))
    }

    fn render_bar(&self, index: usize, state: &BarState, layout: &ChartLayout) -> Layer {
        let bar = &self.bars[index];
        let x = layout.column_x(index);
        let width = layout.column_width;

        let mut height = layout.bar_area_height * state.height_percent / 100.0;
        if height > 0.0 {
            height = height.max(MIN_VISIBLE_HEIGHT);
        }
        let top = layout.bar_bottom - height;

        let mut column = Vec::with_capacity(4);

        if self.show_values {
            let line = VALUE_SIZE * LINE_HEIGHT;
            column.push(
                Layer::text(
                    format_thousands(state.value),
                    Rect::new(x, top - VALUE_MARGIN - line, width, line),
                    TextStyle::new(VALUE_SIZE, Color::WHITE)
                        .weight(FontWeight::SEMIBOLD)
                        .align(TextAlign::Center)
                        .tabular_nums(),
                )
                .with_name(format!("value-{index}"))
                .with_opacity(state.label_opacity),
            );
        }

        column.push(
            Layer::rect(
                Rect::new(x, top, width, height),
                Gradient::linear(
                    180.0,
                    vec![
                        GradientStop::new(0.0, bar.color),
                        GradientStop::new(1.0, bar.color.with_alpha(0x99 as f32 / 255.0)),
                    ],
                ),
            )
            .with_corner_radius(CornerRadius::top(8.0))
            .with_shadow(Shadow::glow(20.0, bar.color.with_alpha(0x40 as f32 / 255.0)))
            .with_name(format!("bar-{index}")),
        );

        column.push(
            Layer::rect(
                Rect::new(x, top, width, height * 0.5),
                Gradient::linear(
                    180.0,
                    vec![
                        GradientStop::new(0.0, Color::WHITE.with_alpha(0.2)),
                        GradientStop::new(1.0, Color::TRANSPARENT),
                    ],
                ),
            )
            .with_corner_radius(CornerRadius::top(8.0))
            .with_name(format!("shine-{index}")),
        );

        column.push(
            Layer::text(
                bar.label.clone(),
                Rect::new(
                    x,
                    layout.bar_bottom + LABEL_MARGIN,
                    width,
                    LABEL_SIZE * LINE_HEIGHT,
                ),
                TextStyle::new(LABEL_SIZE, Color::from_hex(0x94a3b8))
                    .weight(FontWeight::MEDIUM)
                    .align(TextAlign::Center),
            )
            .with_name(format!("label-{index}"))
            .with_opacity(state.label_opacity),
        );

        Layer::stack(column).with_name(format!("column-{index}"))
    }
}

impl Composable for BarChart {
    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let width = video.width_f32();
        let height = video.height_f32();

        let mut layers = Vec::with_capacity(self.bars.len() + 2);
        layers.push(
            Layer::rect(
                Rect::new(0.0, 0.0, width, height),
                Gradient::linear(
                    135.0,
                    vec![
                        GradientStop::new(0.0, Color::from_hex(0x0f172a)),
                        GradientStop::new(1.0, Color::from_hex(0x1e293b)),
                    ],
                ),
            )
            .with_name("background"),
        );
        layers.push(self.render_header(frame as f32, width));

        let layout = ChartLayout::new(
            width,
            height,
            self.bars.len(),
            self.subtitle.is_some(),
            self.show_values,
        );
        for (index, state) in self.bar_states(frame, video.fps).iter().enumerate() {
            layers.push(self.render_bar(index, state, &layout));
        }

        Layer::stack(layers).with_name("bar-chart")
    }
}

/// Column geometry: bars share the row evenly with space around each, capped in width
struct ChartLayout {
    column_width: f32,
    /// Free space around each column
    around: f32,
    bar_bottom: f32,
    bar_area_height: f32,
}

impl ChartLayout {
    fn new(width: f32, height: f32, count: usize, has_subtitle: bool, show_values: bool) -> Self {
        let mut header = TITLE_SIZE * LINE_HEIGHT;
        if has_subtitle {
            header += SUBTITLE_MARGIN + SUBTITLE_SIZE * LINE_HEIGHT;
        }
        let top = PADDING + header + HEADER_MARGIN;
        let bottom = height - PADDING - CHART_PADDING_BOTTOM;

        let label_block = LABEL_MARGIN + LABEL_SIZE * LINE_HEIGHT;
        let value_block = if show_values {
            VALUE_SIZE * LINE_HEIGHT + VALUE_MARGIN
        } else {
            0.0
        };

        let inner = (width - 2.0 * PADDING).max(0.0);
        let n = count.max(1) as f32;
        let gaps = BAR_GAP * (n - 1.0);
        let column_width = ((inner - gaps) / n).clamp(0.0, MAX_BAR_WIDTH);
        let free = (inner - n * column_width - gaps).max(0.0);

        Self {
            column_width,
            around: free / n,
            bar_bottom: bottom - label_block,
            bar_area_height: (bottom - top - label_block - value_block).max(0.0),
        }
    }

    fn column_x(&self, index: usize) -> f32 {
        PADDING + self.around * 0.5 + index as f32 * (self.column_width + BAR_GAP + self.around)
    }
}
