//! Registry lookups, registration errors and configuration overrides

use pretty_assertions::assert_eq;
use reel_compositions::{
    BarChart, CompositionError, CompositionSpec, ReelConfig, Registry, ThreeScene,
};
use reel_core::Layer;
use serde_json::json;

#[test]
fn defaults_register_three_compositions() {
    let registry = Registry::with_defaults().unwrap();
    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, ["BarChart", "ProductLaunch", "ThreeScene"]);

    let bars = registry.get("BarChart").unwrap().video();
    assert_eq!((bars.width, bars.height, bars.fps), (1280, 720, 30));
    assert_eq!(bars.duration_in_frames, 120);

    let launch = registry.get("ProductLaunch").unwrap().video();
    assert_eq!((launch.width, launch.height), (1920, 1080));
    assert_eq!(launch.duration_in_frames, 465);

    assert_eq!(
        registry.get("ThreeScene").unwrap().video().duration_in_frames,
        150
    );
}

#[test]
fn unknown_id_is_not_found() {
    let registry = Registry::with_defaults().unwrap();
    let err = registry.get("MyComp").unwrap_err();
    assert!(matches!(err, CompositionError::NotFound(ref id) if id == "MyComp"));
    assert_eq!(
        err.to_string(),
        "no composition registered with id `MyComp`"
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut builder = Registry::builder();
    builder
        .register(CompositionSpec::new("Scene", ThreeScene::factory).duration(30))
        .unwrap();
    let err = builder
        .register(CompositionSpec::new("Scene", ThreeScene::factory).duration(60))
        .unwrap_err();
    assert!(matches!(err, CompositionError::Duplicate(ref id) if id == "Scene"));
    assert_eq!(builder.build().len(), 1);
}

#[test]
fn bad_default_props_fail_at_registration() {
    let mut builder = Registry::builder();
    let err = builder
        .register(
            CompositionSpec::new("Bars", BarChart::factory)
                .duration(60)
                .default_props(json!({"data": [{"label": "A", "value": "lots"}]})),
        )
        .unwrap_err();
    assert!(matches!(err, CompositionError::Props(_)));

    let err = builder
        .register(
            CompositionSpec::new("Bars", BarChart::factory)
                .duration(60)
                .default_props(json!({"data": [{"label": "A", "value": 1, "color": "#zz"}]})),
        )
        .unwrap_err();
    assert!(matches!(err, CompositionError::Core(_)));
}

#[test]
fn instantiate_merges_props_over_defaults() {
    let registry = Registry::with_defaults().unwrap();
    let entry = registry.get("BarChart").unwrap();

    let scene = entry
        .instantiate(Some(&json!({"title": "Monthly Revenue"})))
        .unwrap();
    let tree = scene.render(60, entry.video());
    match tree.find("title") {
        Some(Layer::Text { text, .. }) => assert_eq!(text, "Monthly Revenue"),
        other => panic!("missing title: {other:?}"),
    }
    // data was not overridden, so all seven bars remain
    assert!(tree.find("column-6").is_some());

    let unchanged = entry.instantiate(None).unwrap();
    assert_eq!(unchanged.render(60, entry.video()), entry.render_frame(60));
}

#[test]
fn config_overrides_video_and_props() {
    let config = ReelConfig::from_toml_str(
        r#"
[compositions.BarChart]
fps = 60
duration_in_frames = 240

[compositions.BarChart.props]
title = "Monthly Revenue"

[compositions.ProductLaunch.props]
features = []
"#,
    )
    .unwrap();
    let registry = Registry::with_config(&config).unwrap();

    let bars = registry.get("BarChart").unwrap();
    assert_eq!(bars.video().fps, 60);
    assert_eq!(bars.video().width, 1280);
    assert_eq!(bars.video().duration_in_frames, 240);
    assert_eq!(bars.default_props()["title"], "Monthly Revenue");
    assert_eq!(bars.default_props()["subtitle"], "Jan 27 - Feb 2, 2026");

    // natural duration follows the new feature list
    let launch = registry.get("ProductLaunch").unwrap();
    assert_eq!(launch.video().duration_in_frames, 180);
}

#[test]
fn config_for_unknown_composition_fails() {
    let config = ReelConfig::from_toml_str("[compositions.MyComp]\nfps = 24").unwrap();
    let err = Registry::with_config(&config).unwrap_err();
    assert!(matches!(err, CompositionError::NotFound(ref id) if id == "MyComp"));
}
