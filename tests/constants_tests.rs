// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include its pure constants file directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use spectrum_core::constants as core_constants;

#[test]
#[allow(clippy::assertions_on_constants)]
fn analyser_settings_are_valid_for_webaudio() {
    // AnalyserNode rejects anything but a power of two in [32, 32768]
    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!((32..=32768).contains(&ANALYSER_FFT_SIZE));
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
    assert!(ANALYSIS_INTERVAL_MS > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_defaults_are_within_bounds() {
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}

#[test]
fn dom_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        FILE_INPUT_ID,
        PLAY_PAUSE_BUTTON_ID,
        STOP_BUTTON_ID,
        STATUS_LABEL_ID,
        TIME_LABEL_ID,
        DURATION_LABEL_ID,
        VISUALIZATION_LABEL_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_constants_have_logical_relationships() {
    use core_constants::*;
    // Viewport origin is the bottom-left corner of a centered viewport
    assert_eq!(VIEWPORT_ORIGIN.x, -VIEWPORT_WIDTH / 2.0);
    assert_eq!(VIEWPORT_ORIGIN.y, -VIEWPORT_HEIGHT / 2.0);
    assert!(BAR_DEPTH > 0.0);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(CAMERA_FOV_DEGREES > 0.0 && CAMERA_FOV_DEGREES < 180.0);
    assert!(CAMERA_PITCH_LIMIT < 90.0);
    assert!(EXTENDED_HISTORY_LIMIT > 0);
    // Every default pose starts in front of the bars
    for z in [
        FLAT_CAMERA_POSITION.z,
        SIMPLE_CAMERA_POSITION.z,
        EXTENDED_CAMERA_POSITION.z,
    ] {
        assert!(z > CAMERA_NEAR);
    }
}
