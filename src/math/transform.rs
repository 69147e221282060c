use glam::{Mat4, Vec3};

/// Rotation matrix for `degrees` about `axis`, right-handed like the classic rotate call
///
/// A zero axis yields the identity instead of NaNs.
pub fn rotation_degrees(degrees: f32, axis: Vec3) -> Mat4 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return Mat4::IDENTITY;
    }
    Mat4::from_axis_angle(axis, degrees.to_radians())
}

/// Transform stack with post-multiplication semantics
///
/// Each operation multiplies onto the right of the current matrix, so the
/// last operation issued is the first one applied to a vertex.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    /// Current matrix
    pub fn top(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of saved scopes above the base matrix
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Restore the previous scope; returns false on underflow and leaves the base intact
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Replace the current matrix
    pub fn load(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = matrix;
        }
    }

    pub fn multiply(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * matrix;
        }
    }

    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.multiply(rotation_degrees(degrees, axis));
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    pub fn scale(&mut self, factor: Vec3) {
        self.multiply(Mat4::from_scale(factor));
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
