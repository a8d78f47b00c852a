//! Integration tests for curves working together
//!
//! These tests verify that:
//! - Staggered springs drive repeated elements the way a chart animates its bars
//! - Interpolations layered on spring progress stay bounded
//! - Timelines hand scenes local frames that the scene curves can consume directly

use reel_animation::{
    Easing, Extrapolate, Interpolation, Spring, SpringConfig, Stagger, Timeline, Transition,
};

const FPS: u32 = 30;

/// Test that staggered springs start one after another and all settle
#[test]
fn test_staggered_springs_settle_in_order() {
    let stagger = Stagger::new(20, 8);
    let spring = Spring::new(SpringConfig::new(80.0, 12.0, 0.5)).unwrap();

    let progress = |frame, index| spring.progress(stagger.local_frame(frame, index), FPS);

    // Nothing moves before its start
    for (index, start) in stagger.starts(7).enumerate() {
        assert_eq!(progress(start, index), 0.0);
        assert!(progress(start + 1, index) > 0.0);
    }

    // Earlier elements are further along at the same global frame
    assert!(progress(40, 0) > progress(40, 1));
    assert!(progress(40, 1) > progress(40, 2));

    // Everyone is at rest well after the last start
    for index in 0..7 {
        assert!((progress(68 + 90, index) - 1.0).abs() < 1e-3);
    }
}

/// Test that a spring-driven slide ends exactly where the mapping says
#[test]
fn test_spring_progress_through_interpolation() {
    let spring = Spring::new(SpringConfig::damped(15.0, 80.0)).unwrap();
    let slide = Interpolation::new(&[0.0, 1.0], &[200.0, 0.0]).unwrap();

    assert_eq!(slide.sample(spring.progress(0, FPS)), 200.0);
    let settled = slide.sample(spring.progress(120, FPS));
    assert!(settled.abs() < 0.5, "slide ended at {settled}");
}

/// Test that a clamped eased fade never leaves the unit range
#[test]
fn test_clamped_fade_is_bounded() {
    let fade = Interpolation::new(&[20.0, 35.0], &[0.0, 1.0])
        .unwrap()
        .easing(Easing::EASE_OUT)
        .clamp();
    for frame in -50..200 {
        let opacity = fade.sample(frame as f32);
        assert!((0.0..=1.0).contains(&opacity), "opacity {opacity} at {frame}");
    }
    assert_eq!(fade.sample(20.0), 0.0);
    assert_eq!(fade.sample(35.0), 1.0);
}

/// Test that a scene evaluated through a timeline sees the same curve as one evaluated alone
#[test]
fn test_timeline_local_frames_drive_scene_curves() {
    let title = Interpolation::new(&[0.0, 15.0], &[0.0, 1.0])
        .unwrap()
        .extrapolate_right(Extrapolate::Clamp);
    let timeline = Timeline::builder()
        .scene("intro", 90)
        .scene("feature", 90)
        .hold(5)
        .scene("cta", 90)
        .transition(Transition::fade(5))
        .build()
        .unwrap();

    let standalone: Vec<f32> = (0..30).map(|f| title.sample(f as f32)).collect();
    let sequenced: Vec<f32> = (0..30)
        .map(|f| {
            let at = timeline.resolve(90 + f);
            let primary = at.primary().unwrap();
            assert_eq!(*primary.scene, "feature");
            title.sample(primary.local_frame as f32)
        })
        .collect();
    assert_eq!(standalone, sequenced);
}

/// Test that resolving frames out of order gives the same answers
#[test]
fn test_resolution_is_order_independent() {
    let timeline = Timeline::builder()
        .scene(0u8, 40)
        .scene(1u8, 40)
        .scene(2u8, 40)
        .transition(Transition::dip(4))
        .build()
        .unwrap();

    let forward: Vec<_> = (0..120).map(|f| timeline.resolve(f)).collect();
    let mut backward: Vec<_> = (0..120).rev().map(|f| timeline.resolve(f)).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}
