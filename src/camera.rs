use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use log::debug;

use crate::core::controller::DragEvent;
use crate::core::display_context::DisplayContext;
use crate::traits::CameraController;

pub const DEFAULT_EYE: Vec3 = Vec3::new(5.0, 10.0, 30.0);
pub const DEFAULT_SCALE: f32 = 15.0;
const MIN_NEAR: f32 = 0.1;

/// Virtual trackball around a fixed look-at setup
///
/// The window always shows at least `[-scale, scale]` in both directions at
/// the distance of the look-at center; dragging with the left button rolls
/// the scene around that center.
#[derive(Debug, Clone)]
pub struct TrackballCamera {
    eye: Vec3,
    center: Vec3,
    up: Vec3,
    scale: f32,
    rotation: Quat,
    surface: Option<DisplayContext>,
    drag: Option<DragState>,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    anchor: Vec3,
    start: Quat,
}

impl TrackballCamera {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3, scale: f32) -> Self {
        Self {
            eye,
            center,
            up,
            scale,
            rotation: Quat::IDENTITY,
            surface: None,
            drag: None,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.center)
    }

    /// Undo all trackball rotation
    pub fn reset(&mut self) {
        self.rotation = Quat::IDENTITY;
        self.drag = None;
    }

    fn look_at(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    fn aspect(&self) -> f32 {
        self.surface.map_or(1.0, |s| s.aspect())
    }

    /// Window point onto the trackball sphere, in eye space
    fn project_to_sphere(&self, surface: DisplayContext, x: f32, y: f32) -> Vec3 {
        let size = surface.width.min(surface.height).max(1) as f32;
        let p = Vec2::new(
            (2.0 * x - surface.width as f32) / size,
            (surface.height as f32 - 2.0 * y) / size,
        );
        let d2 = p.length_squared();
        // sphere near the middle, hyperbolic sheet towards the rim
        let z = if d2 <= 0.5 {
            (1.0 - d2).sqrt()
        } else {
            0.5 / d2.sqrt()
        };
        p.extend(z).normalize()
    }

    /// Rotation expressed in eye space, moved into world space
    fn eye_to_world(&self, q: Quat) -> Quat {
        let basis = Quat::from_mat3(&Mat3::from_mat4(self.look_at()));
        basis.inverse() * q * basis
    }
}

impl Default for TrackballCamera {
    fn default() -> Self {
        Self::new(DEFAULT_EYE, Vec3::ZERO, Vec3::Y, DEFAULT_SCALE)
    }
}

impl CameraController for TrackballCamera {
    fn install_interaction(&mut self, surface: DisplayContext) {
        debug!("Trackball bound to {}x{} surface", surface.width, surface.height);
        self.surface = Some(surface);
        self.drag = None;
    }

    fn handle_drag(&mut self, event: DragEvent) -> bool {
        let Some(surface) = self.surface.filter(|s| !s.is_empty()) else {
            return false;
        };

        match event {
            DragEvent::Begin { x, y } => {
                self.drag = Some(DragState {
                    anchor: self.project_to_sphere(surface, x, y),
                    start: self.rotation,
                });
                false
            }
            DragEvent::Move { x, y } => {
                let Some(drag) = self.drag else {
                    return false;
                };
                let current = self.project_to_sphere(surface, x, y);
                let spin = Quat::from_rotation_arc(drag.anchor, current);
                self.rotation = (self.eye_to_world(spin) * drag.start).normalize();
                true
            }
            DragEvent::End => {
                self.drag = None;
                false
            }
        }
    }

    fn view_matrix(&self) -> Mat4 {
        self.look_at()
            * Mat4::from_translation(self.center)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_translation(-self.center)
    }

    fn projection_matrix(&self) -> Mat4 {
        let dist = self.distance();
        let aspect = self.aspect();
        let fov_y = 2.0 * (self.scale / (dist * aspect.min(1.0))).atan();
        let near = (dist - self.scale).max(MIN_NEAR);
        let far = dist + self.scale;
        Mat4::perspective_rh(fov_y, aspect, near, far)
    }
}
