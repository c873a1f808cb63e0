use crate::camera::PerspectiveCamera;
use crate::config::VisualizerConfig;
use crate::constants::CAMERA_PITCH_LIMIT;
use crate::visualization::VisualizationKind;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMotion {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

#[inline]
pub fn motion_for_key(key: &str) -> Option<CameraMotion> {
    match key {
        "w" | "W" => Some(CameraMotion::Forward),
        "s" | "S" => Some(CameraMotion::Backward),
        "a" | "A" => Some(CameraMotion::Left),
        "d" | "D" => Some(CameraMotion::Right),
        "r" | "R" => Some(CameraMotion::Up),
        "f" | "F" => Some(CameraMotion::Down),
        "ArrowLeft" => Some(CameraMotion::YawLeft),
        "ArrowRight" => Some(CameraMotion::YawRight),
        "ArrowUp" => Some(CameraMotion::PitchUp),
        "ArrowDown" => Some(CameraMotion::PitchDown),
        _ => None,
    }
}

#[inline]
pub fn kind_for_digit(key: &str) -> Option<VisualizationKind> {
    match key {
        "1" => Some(VisualizationKind::Flat2D),
        "2" => Some(VisualizationKind::Simple3D),
        "3" => Some(VisualizationKind::Extended3D),
        _ => None,
    }
}

#[inline]
pub fn is_play_pause_key(key: &str) -> bool {
    matches!(key, " " | "Spacebar")
}

/// Integrates held movement keys into camera motion each frame.
#[derive(Clone, Debug)]
pub struct CameraController {
    held: SmallVec<[CameraMotion; 8]>,
    move_units_per_sec: f32,
    turn_degrees_per_sec: f32,
}

impl CameraController {
    pub fn new(move_units_per_sec: f32, turn_degrees_per_sec: f32) -> Self {
        Self {
            held: SmallVec::new(),
            move_units_per_sec,
            turn_degrees_per_sec,
        }
    }

    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self::new(config.move_units_per_sec, config.turn_degrees_per_sec)
    }

    /// Returns false when the motion was already held (key repeat).
    pub fn press(&mut self, motion: CameraMotion) -> bool {
        if self.held.contains(&motion) {
            return false;
        }
        self.held.push(motion);
        true
    }

    pub fn release(&mut self, motion: CameraMotion) {
        self.held.retain(|m| *m != motion);
    }

    /// Drop all held keys, e.g. when the page loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.held.is_empty()
    }

    fn axis(&self, positive: CameraMotion, negative: CameraMotion) -> f32 {
        let mut v = 0.0;
        if self.held.contains(&positive) {
            v += 1.0;
        }
        if self.held.contains(&negative) {
            v -= 1.0;
        }
        v
    }

    pub fn step(&self, camera: &mut PerspectiveCamera, dt_sec: f32) {
        if self.held.is_empty() || dt_sec <= 0.0 {
            return;
        }
        let yaw = camera.yaw().to_radians();
        let ahead = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        let dir = ahead * self.axis(CameraMotion::Forward, CameraMotion::Backward)
            + camera.right() * self.axis(CameraMotion::Right, CameraMotion::Left)
            + Vec3::Y * self.axis(CameraMotion::Up, CameraMotion::Down);
        if dir.length_squared() > 0.0 {
            let delta = dir.normalize() * self.move_units_per_sec * dt_sec;
            camera.set_position(camera.position() + delta);
        }

        let turn = self.turn_degrees_per_sec * dt_sec;
        let yaw_axis = self.axis(CameraMotion::YawLeft, CameraMotion::YawRight);
        if yaw_axis != 0.0 {
            camera.set_yaw(camera.yaw() + yaw_axis * turn);
        }
        let pitch_axis = self.axis(CameraMotion::PitchUp, CameraMotion::PitchDown);
        if pitch_axis != 0.0 {
            let pitch = (camera.pitch() + pitch_axis * turn)
                .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
            camera.set_pitch(pitch);
        }
    }
}
