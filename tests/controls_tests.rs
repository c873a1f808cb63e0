use glam::Vec3;
use spectrum_core::{
    is_play_pause_key, kind_for_digit, motion_for_key, CameraController, CameraMotion,
    PerspectiveCamera, VisualizationKind, VisualizerConfig, CAMERA_PITCH_LIMIT,
};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0)
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn movement_keys_map_case_insensitively() {
    for (lower, upper, motion) in [
        ("w", "W", CameraMotion::Forward),
        ("s", "S", CameraMotion::Backward),
        ("a", "A", CameraMotion::Left),
        ("d", "D", CameraMotion::Right),
        ("r", "R", CameraMotion::Up),
        ("f", "F", CameraMotion::Down),
    ] {
        assert_eq!(motion_for_key(lower), Some(motion));
        assert_eq!(motion_for_key(upper), Some(motion));
    }
    assert_eq!(motion_for_key("ArrowLeft"), Some(CameraMotion::YawLeft));
    assert_eq!(motion_for_key("ArrowDown"), Some(CameraMotion::PitchDown));
    assert_eq!(motion_for_key("q"), None);
}

#[test]
fn digits_select_visualizations() {
    assert_eq!(kind_for_digit("1"), Some(VisualizationKind::Flat2D));
    assert_eq!(kind_for_digit("2"), Some(VisualizationKind::Simple3D));
    assert_eq!(kind_for_digit("3"), Some(VisualizationKind::Extended3D));
    assert_eq!(kind_for_digit("4"), None);
    assert!(is_play_pause_key(" "));
    assert!(!is_play_pause_key("Enter"));
}

#[test]
fn held_keys_ignore_repeats_until_released() {
    let mut c = CameraController::new(1.0, 90.0);
    assert!(!c.is_active());
    assert!(c.press(CameraMotion::Forward));
    assert!(!c.press(CameraMotion::Forward));
    assert!(c.is_active());
    c.release(CameraMotion::Forward);
    assert!(!c.is_active());
    c.press(CameraMotion::Up);
    c.press(CameraMotion::YawLeft);
    c.clear();
    assert!(!c.is_active());
}

#[test]
fn forward_moves_along_heading_at_configured_speed() {
    let mut cam = camera();
    let mut c = CameraController::new(2.0, 90.0);
    c.press(CameraMotion::Forward);
    c.step(&mut cam, 0.5);
    assert!(approx(cam.position(), Vec3::new(0.0, 0.0, -1.0)));

    // Pitch does not tilt ground movement
    let mut cam = camera();
    cam.set_pitch(-30.0);
    cam.set_yaw(90.0);
    c.step(&mut cam, 1.0);
    assert!(approx(cam.position(), Vec3::new(-2.0, 0.0, 0.0)));
}

#[test]
fn combined_motion_is_normalized() {
    let mut cam = camera();
    let mut c = CameraController::new(1.0, 90.0);
    c.press(CameraMotion::Forward);
    c.press(CameraMotion::Right);
    c.press(CameraMotion::Up);
    c.step(&mut cam, 1.0);
    assert!((cam.position().length() - 1.0).abs() < 1e-5);

    // Opposite keys cancel
    let mut cam = camera();
    let mut c = CameraController::new(1.0, 90.0);
    c.press(CameraMotion::Left);
    c.press(CameraMotion::Right);
    c.step(&mut cam, 1.0);
    assert_eq!(cam.position(), Vec3::ZERO);
}

#[test]
fn turning_changes_yaw_and_clamps_pitch() {
    let mut cam = camera();
    let mut c = CameraController::new(1.0, 90.0);
    c.press(CameraMotion::YawLeft);
    c.step(&mut cam, 0.5);
    assert!((cam.yaw() - 45.0).abs() < 1e-4);
    c.release(CameraMotion::YawLeft);

    c.press(CameraMotion::PitchUp);
    c.step(&mut cam, 5.0);
    assert_eq!(cam.pitch(), CAMERA_PITCH_LIMIT);
    c.release(CameraMotion::PitchUp);
    c.press(CameraMotion::PitchDown);
    c.step(&mut cam, 5.0);
    assert_eq!(cam.pitch(), -CAMERA_PITCH_LIMIT);
}

#[test]
fn idle_or_zero_dt_leaves_camera_alone() {
    let mut cam = camera();
    let mut c = CameraController::from_config(&VisualizerConfig::default());
    c.step(&mut cam, 1.0);
    c.press(CameraMotion::Backward);
    c.step(&mut cam, 0.0);
    assert_eq!(cam.position(), Vec3::ZERO);
    assert_eq!(cam.yaw(), 0.0);
}
