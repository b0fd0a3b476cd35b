//! Perspective projection from world space onto terminal cells.

use glam::{Mat4, Vec3};

use crate::scene::camera::CameraTransform;

pub const FOV_Y_DEG: f32 = 45.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub col: f32,
    pub row: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_proj: Mat4,
    width: f32,
    height: f32,
}

impl Projector {
    pub fn new(camera: CameraTransform, width: u16, height: u16) -> Self {
        let width = f32::from(width.max(1));
        let height = f32::from(height.max(1));
        let aspect = width / (height * CELL_ASPECT);
        let view = Mat4::look_at_rh(camera.eye, camera.target, camera.up);
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, NEAR, FAR);
        Self {
            view_proj: proj * view,
            width,
            height,
        }
    }

    /// `None` when the point is behind the near plane. Clip-space `w` is the
    /// view-space distance along the camera's forward axis.
    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * point.extend(1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            col: (ndc.x + 1.0) * 0.5 * self.width,
            row: (1.0 - ndc.y) * 0.5 * self.height,
            depth: clip.w,
        })
    }
}
