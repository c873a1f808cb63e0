//! Runtime configuration for the visualizer, defaulted from `constants`.
//!
//! The web frontend builds one `VisualizerConfig` at startup, optionally
//! overridden from the page query string (`?viz=3d-extended&history=60`).

use crate::camera::PerspectiveCamera;
use crate::color::Palette;
use crate::constants::*;
use crate::visualization::VisualizationKind;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown visualization '{0}' (expected 2d, 3d or 3d-extended)")]
    UnknownVisualization(String),
    #[error("invalid history limit '{0}' (expected a positive frame count or 'off')")]
    InvalidHistoryLimit(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Where the camera sits when a visualization variant is selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.set_position(self.position);
        camera.set_yaw(self.yaw);
        camera.set_pitch(self.pitch);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub palette: Palette,
    pub depth: f32,
    pub simple_origin: Vec3,
    pub history_limit: Option<usize>,
    pub camera: CameraConfig,
    pub move_units_per_sec: f32,
    pub turn_degrees_per_sec: f32,
    pub initial_kind: VisualizationKind,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            depth: BAR_DEPTH,
            simple_origin: VIEWPORT_ORIGIN,
            history_limit: Some(EXTENDED_HISTORY_LIMIT),
            camera: CameraConfig::default(),
            move_units_per_sec: CAMERA_MOVE_UNITS_PER_SEC,
            turn_degrees_per_sec: CAMERA_TURN_DEGREES_PER_SEC,
            initial_kind: VisualizationKind::Extended3D,
        }
    }
}

impl VisualizerConfig {
    /// Apply overrides from a URL query string such as `?viz=2d&history=60`.
    ///
    /// Unknown keys are ignored. An unknown visualization name or a history
    /// limit that is not a positive count (or `off`) is an error.
    pub fn with_query(mut self, query: &str) -> Result<Self, ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "viz" => self.initial_kind = value.parse()?,
                "history" => self.history_limit = parse_history_limit(value)?,
                _ => {}
            }
        }
        Ok(self)
    }

    pub fn build_camera(&self, aspect: f32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(
            self.camera.fov_degrees,
            aspect,
            self.camera.near,
            self.camera.far,
        );
        self.pose_for(self.initial_kind).apply(&mut camera);
        camera
    }

    pub fn pose_for(&self, kind: VisualizationKind) -> CameraPose {
        match kind {
            VisualizationKind::Flat2D => CameraPose {
                position: FLAT_CAMERA_POSITION,
                yaw: 0.0,
                pitch: 0.0,
            },
            VisualizationKind::Simple3D => CameraPose {
                position: SIMPLE_CAMERA_POSITION,
                yaw: SIMPLE_CAMERA_YAW,
                pitch: SIMPLE_CAMERA_PITCH,
            },
            VisualizationKind::Extended3D => CameraPose {
                position: EXTENDED_CAMERA_POSITION,
                yaw: 0.0,
                pitch: EXTENDED_CAMERA_PITCH,
            },
        }
    }
}

fn parse_history_limit(value: &str) -> Result<Option<usize>, ConfigError> {
    if value == "off" {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(Some(limit)),
        _ => Err(ConfigError::InvalidHistoryLimit(value.into())),
    }
}
