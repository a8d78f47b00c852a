//! 3D scene: a pulsing core, a ring of orbiting spheres and three floating cubes
//!
//! The camera circles the origin; everything is driven by the frame number alone.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

use reel_animation::{Extrapolate, Interpolation, Spring, SpringConfig, Stagger};
use reel_core::{
    Camera, Color, FontWeight, Frame, Geometry, Gradient, GradientStop, Layer, Light, Material,
    Mesh, Rect, Shadow, TextAlign, TextStyle, Vec3, VideoConfig,
};
use serde::{Deserialize, Serialize};

use crate::composable::Composable;
use crate::error::Result;

const ORBIT_COUNT: usize = 12;
const ORBIT_RADIUS: f32 = 3.0;
const ORBIT_SPEED: f32 = 0.02;
const CAMERA_DISTANCE: f32 = 5.0;

const CUBES: [(Vec3, u32); 3] = [
    (Vec3::new(-2.5, 0.5, -1.0), 0x3b82f6),
    (Vec3::new(2.5, 0.5, -1.0), 0x22c55e),
    (Vec3::new(0.0, 0.5, 2.5), 0xf59e0b),
];

const ACCENT: u32 = 0xa855f7;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeSceneProps {
    pub title: String,
}

impl Default for ThreeSceneProps {
    fn default() -> Self {
        Self {
            title: "Reel 3D".to_string(),
        }
    }
}

pub struct ThreeScene {
    title: String,
    core_scale: Spring,
    cube_pop: Spring,
    cube_delays: Stagger,
    title_fade: Interpolation,
}

impl ThreeScene {
    pub fn new(props: ThreeSceneProps) -> Result<Self> {
        Ok(Self {
            title: props.title,
            core_scale: Spring::new(SpringConfig::damped(15.0, 80.0))?,
            cube_pop: Spring::new(SpringConfig::damped(12.0, 100.0))?,
            cube_delays: Stagger::new(10, 10),
            title_fade: Interpolation::new(&[0.0, 30.0], &[0.0, 1.0])?
                .extrapolate_right(Extrapolate::Clamp),
        })
    }

    /// Registry factory
    pub fn factory(props: serde_json::Value) -> Result<Arc<dyn Composable>> {
        let props: ThreeSceneProps = serde_json::from_value(props)?;
        Ok(Arc::new(Self::new(props)?))
    }

    pub fn camera(&self, frame: Frame) -> Camera {
        let t = frame as f32 * 0.01;
        Camera::perspective(
            Vec3::new(t.sin() * CAMERA_DISTANCE, 3.0, t.cos() * CAMERA_DISTANCE),
            Vec3::ZERO,
            50.0,
        )
    }

    pub fn lights(&self) -> Vec<Light> {
        vec![
            Light::Ambient {
                color: Color::WHITE,
                intensity: 0.3,
            },
            Light::Point {
                position: Vec3::splat(10.0),
                color: Color::WHITE,
                intensity: 1.0,
            },
            Light::Point {
                position: Vec3::splat(-10.0),
                color: Color::from_hex(ACCENT),
                intensity: 0.5,
            },
            Light::Directional {
                position: Vec3::new(0.0, 5.0, 5.0),
                color: Color::WHITE,
                intensity: 0.5,
            },
        ]
    }

    /// Every mesh at `frame`: core, orbiting spheres, cubes, then the ground
    pub fn meshes(&self, frame: Frame, fps: u32) -> Vec<Mesh> {
        let mut meshes = Vec::with_capacity(1 + ORBIT_COUNT + CUBES.len() + 1);
        meshes.push(self.core(frame, fps));
        meshes.extend((0..ORBIT_COUNT).map(|index| orbiter(index, frame)));
        meshes.extend((0..CUBES.len()).map(|index| self.cube(index, frame, fps)));
        meshes.push(ground());
        meshes
    }

    fn core(&self, frame: Frame, fps: u32) -> Mesh {
        let pulse = 1.0 + (frame as f32 * 0.1).sin() * 0.1;
        let accent = Color::from_hex(ACCENT);
        Mesh::new(
            Geometry::Sphere {
                radius: 0.8,
                segments: 32,
            },
            Material::standard(accent).emissive(0.6).metal(0.9, 0.1),
        )
        .scaled(self.core_scale.progress(frame, fps) * pulse)
    }

    fn cube(&self, index: usize, frame: Frame, fps: u32) -> Mesh {
        let (home, hex) = CUBES[index];
        let local = self.cube_delays.local_frame(frame, index);
        let t = local as f32;
        let float_y = (t * 0.05).sin() * 0.2;
        let color = Color::from_hex(hex);

        Mesh::new(
            Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::standard(color).emissive(0.3).metal(0.8, 0.2),
        )
        .at(home + Vec3::new(0.0, float_y, 0.0))
        .rotated(Vec3::new(t * 0.02, t * 0.03, 0.0))
        .scaled(self.cube_pop.progress(local, fps).max(0.0))
    }
}

fn orbiter(index: usize, frame: Frame) -> Mesh {
    let f = frame as f32;
    let share = index as f32 / ORBIT_COUNT as f32;
    let angle = share * TAU + f * ORBIT_SPEED;
    let y = (f * 0.03 + index as f32).sin() * 0.3;
    let color = Color::from_hsl(share + f * 0.002, 0.8, 0.5);

    Mesh::new(
        Geometry::Sphere {
            radius: 0.15,
            segments: 16,
        },
        Material::standard(color).emissive(0.5),
    )
    .at(Vec3::new(angle.cos() * ORBIT_RADIUS, y, angle.sin() * ORBIT_RADIUS))
}

fn ground() -> Mesh {
    Mesh::new(
        Geometry::Plane {
            width: 20.0,
            height: 20.0,
            segments: 20,
        },
        Material::standard(Color::from_hex(0x1a1a2e)).wireframe(0.3),
    )
    .at(Vec3::new(0.0, -2.0, 0.0))
    .rotated(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
}

impl Composable for ThreeScene {
    fn render(&self, frame: Frame, video: &VideoConfig) -> Layer {
        let (width, height) = (video.width_f32(), video.height_f32());
        let full = Rect::new(0.0, 0.0, width, height);
        let title_line = 48.0 * 1.2;

        Layer::stack(vec![
            Layer::rect(
                full,
                Gradient::linear(
                    180.0,
                    vec![
                        GradientStop::new(0.0, Color::from_hex(0x0f0f23)),
                        GradientStop::new(1.0, Color::from_hex(0x1a1a2e)),
                    ],
                ),
            )
            .with_name("background"),
            Layer::scene_3d(
                full,
                self.camera(frame),
                self.lights(),
                self.meshes(frame, video.fps),
            )
            .with_name("scene"),
            Layer::text(
                self.title.clone(),
                Rect::new(0.0, height - 60.0 - title_line, width, title_line),
                TextStyle::new(48.0, Color::WHITE)
                    .weight(FontWeight::BOLD)
                    .align(TextAlign::Center)
                    .shadow(Shadow::glow(20.0, Color::from_hex(ACCENT).with_alpha(0.8))),
            )
            .with_opacity(self.title_fade.sample(frame as f32))
            .with_name("title"),
        ])
        .with_name("three-scene")
    }
}
