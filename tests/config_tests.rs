use spectrum_core::{
    ConfigError, Palette, VisualizationKind, VisualizerConfig, BAR_DEPTH,
    EXTENDED_CAMERA_POSITION, EXTENDED_HISTORY_LIMIT, FLAT_CAMERA_POSITION,
    SIMPLE_CAMERA_PITCH, SIMPLE_CAMERA_YAW,
};

#[test]
fn defaults_come_from_constants() {
    let config = VisualizerConfig::default();
    assert_eq!(config.initial_kind, VisualizationKind::Extended3D);
    assert_eq!(config.depth, BAR_DEPTH);
    assert_eq!(config.history_limit, Some(EXTENDED_HISTORY_LIMIT));
    assert_eq!(config.palette, Palette::default());
}

#[test]
fn query_selects_initial_visualization() {
    let config = VisualizerConfig::default().with_query("?viz=2d").expect("valid");
    assert_eq!(config.initial_kind, VisualizationKind::Flat2D);

    let config = VisualizerConfig::default()
        .with_query("debug=1&viz=3d")
        .expect("valid");
    assert_eq!(config.initial_kind, VisualizationKind::Simple3D);

    let config = VisualizerConfig::default().with_query("").expect("valid");
    assert_eq!(config.initial_kind, VisualizationKind::Extended3D);
}

#[test]
fn unknown_visualization_in_query_is_an_error() {
    let err = VisualizerConfig::default()
        .with_query("?viz=hologram")
        .err();
    assert_eq!(
        err,
        Some(ConfigError::UnknownVisualization("hologram".into()))
    );
}

#[test]
fn query_overrides_history_limit() {
    let config = VisualizerConfig::default()
        .with_query("?history=60")
        .expect("valid");
    assert_eq!(config.history_limit, Some(60));
    let config = VisualizerConfig::default()
        .with_query("history=off&viz=2d")
        .expect("valid");
    assert_eq!(config.history_limit, None);
    assert_eq!(config.initial_kind, VisualizationKind::Flat2D);
}

#[test]
fn zero_or_malformed_history_limit_is_rejected() {
    for value in ["0", "-3", "lots", ""] {
        let err = VisualizerConfig::default()
            .with_query(&format!("history={value}"))
            .err();
        assert_eq!(err, Some(ConfigError::InvalidHistoryLimit(value.into())));
    }
}

#[test]
fn camera_starts_at_pose_of_initial_kind() {
    let config = VisualizerConfig::default();
    let camera = config.build_camera(1.5);
    assert_eq!(camera.position(), EXTENDED_CAMERA_POSITION);
    assert_eq!(camera.aspect(), 1.5);

    let mut flat = VisualizerConfig::default();
    flat.initial_kind = VisualizationKind::Flat2D;
    let camera = flat.build_camera(1.0);
    assert_eq!(camera.position(), FLAT_CAMERA_POSITION);
    assert_eq!(camera.yaw(), 0.0);
    assert_eq!(camera.pitch(), 0.0);
}

#[test]
fn applying_a_pose_overrides_previous_orientation() {
    let config = VisualizerConfig::default();
    let mut camera = config.build_camera(1.0);
    config
        .pose_for(VisualizationKind::Simple3D)
        .apply(&mut camera);
    assert_eq!(camera.yaw(), SIMPLE_CAMERA_YAW);
    assert_eq!(camera.pitch(), SIMPLE_CAMERA_PITCH);
}
