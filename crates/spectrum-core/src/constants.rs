use glam::Vec3;

// Shared layout/tuning constants used by the visualizations and the web frontend.

// Frequency samples
pub const MAX_SAMPLE_VALUE: f32 = 255.0; // byte frequency data upper bound

// Scene layout (normalized viewport is 2 x 2, bottom-left at (-1, -1))
pub const VIEWPORT_WIDTH: f32 = 2.0;
pub const VIEWPORT_HEIGHT: f32 = 2.0;
pub const VIEWPORT_ORIGIN: Vec3 = Vec3::new(-1.0, -1.0, 0.0);

// Cuboid depth for both 3D variants
pub const BAR_DEPTH: f32 = 0.05;

// Default palette
pub const DEFAULT_BOTTOM_COLOR: [f32; 3] = [0.0, 1.0, 0.0]; // green
pub const DEFAULT_TOP_COLOR: [f32; 3] = [1.0, 0.0, 0.0]; // red

// Extended variant keeps this many frames of history; older frames are released
pub const EXTENDED_HISTORY_LIMIT: usize = 120;

// Camera projection
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Camera poses per variant: (position, yaw degrees, pitch degrees)
pub const FLAT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 2.5);
pub const SIMPLE_CAMERA_POSITION: Vec3 = Vec3::new(0.6, 0.4, 2.6);
pub const SIMPLE_CAMERA_YAW: f32 = 12.0;
pub const SIMPLE_CAMERA_PITCH: f32 = -8.0;
pub const EXTENDED_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.2, 2.8);
pub const EXTENDED_CAMERA_PITCH: f32 = -22.0;

// Keyboard camera movement
pub const CAMERA_MOVE_UNITS_PER_SEC: f32 = 1.5;
pub const CAMERA_TURN_DEGREES_PER_SEC: f32 = 60.0;
pub const CAMERA_PITCH_LIMIT: f32 = 89.0; // avoid flipping over the vertical
