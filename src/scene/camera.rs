use std::f64::consts::TAU;

use glam::Vec3;

use crate::scene::error::SceneError;

pub const DEFAULT_ANGULAR_SPEED: f64 = 0.001;
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_HEIGHT: f32 = 2.0;

/// Where the renderer should look from, and at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Orbit around the y axis. The angle is a pure function of wall-clock time
/// since start, so the period does not depend on frame rate.
#[derive(Debug, Clone, Copy)]
pub struct CameraOrbit {
    angular_speed: f64,
    radius: f32,
    height: f32,
    angle: f64,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self::new(DEFAULT_ANGULAR_SPEED)
    }
}

impl CameraOrbit {
    pub fn new(angular_speed: f64) -> Self {
        Self {
            angular_speed,
            radius: DEFAULT_RADIUS,
            height: DEFAULT_HEIGHT,
            angle: 0.0,
        }
    }

    pub fn update(&mut self, elapsed_ms: f64) -> Result<(), SceneError> {
        let angle = elapsed_ms * self.angular_speed;
        if !angle.is_finite() {
            return Err(SceneError::NonFiniteElapsed(elapsed_ms));
        }
        self.angle = angle.rem_euclid(TAU);
        Ok(())
    }

    /// Radians in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn eye(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            sin as f32 * self.radius,
            self.height,
            cos as f32 * self.radius,
        )
    }

    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}
