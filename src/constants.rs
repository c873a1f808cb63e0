// Web frontend tuning: DOM ids, analyser setup and render defaults.
//
// Visualization layout and camera defaults live in `spectrum_core::constants`;
// this file only holds values that are specific to the browser host.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const FILE_INPUT_ID: &str = "audio-file";
pub const PLAY_PAUSE_BUTTON_ID: &str = "btn-play-pause";
pub const STOP_BUTTON_ID: &str = "btn-stop";
pub const STATUS_LABEL_ID: &str = "status";
pub const TIME_LABEL_ID: &str = "time";
pub const DURATION_LABEL_ID: &str = "duration";
pub const VISUALIZATION_LABEL_ID: &str = "visualization";

// Analyser: fft size must be a power of two in [32, 32768]; bins = fft / 2
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ANALYSER_SMOOTHING: f64 = 0.8;

// How often a fresh spectrum frame is pulled and the bars rebuilt
pub const ANALYSIS_INTERVAL_MS: i32 = 50;

// Render defaults
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.04];

// Large frame gaps (tab in background) are clamped so camera motion does not jump
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
