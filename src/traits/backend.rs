use glam::{Mat4, Vec3, Vec4};

use crate::math::Rgba;

/// Hardware-style light identifier
///
/// `Viewpoint` is the fixed light that travels with the eye; the five numbered
/// slots belong to the orbiting satellites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightSlot {
    Viewpoint,
    Light1,
    Light2,
    Light3,
    Light4,
    Light5,
}

impl LightSlot {
    pub const COUNT: usize = 6;

    pub const ALL: [LightSlot; Self::COUNT] = [
        LightSlot::Viewpoint,
        LightSlot::Light1,
        LightSlot::Light2,
        LightSlot::Light3,
        LightSlot::Light4,
        LightSlot::Light5,
    ];

    pub const fn index(self) -> usize {
        match self {
            LightSlot::Viewpoint => 0,
            LightSlot::Light1 => 1,
            LightSlot::Light2 => 2,
            LightSlot::Light3 => 3,
            LightSlot::Light4 => 4,
            LightSlot::Light5 => 5,
        }
    }
}

/// Material property targeted by `set_material`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialChannel {
    Ambient,
    Diffuse,
    Specular,
    Emission,
}

/// Light colour property targeted by `set_light_color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Ambient,
    Diffuse,
    Specular,
}

/// Immediate-mode rendering backend
///
/// Mirrors a fixed-function pipeline: primitives are submitted as triangle fans,
/// transforms post-multiply onto a stack, and lights and materials are state
/// that applies to everything emitted afterwards.
pub trait RenderBackend {
    /// Clear colour and depth
    fn clear(&mut self, color: Rgba);

    /// Normal used for subsequently emitted vertices
    fn set_normal(&mut self, normal: Vec3);

    fn begin_fan(&mut self);

    fn emit_vertex(&mut self, position: Vec3);

    fn end_fan(&mut self);

    fn push_transform(&mut self);

    fn pop_transform(&mut self);

    fn rotate(&mut self, degrees: f32, axis: Vec3);

    fn translate(&mut self, offset: Vec3);

    fn scale(&mut self, factor: Vec3);

    /// Current colour; drives ambient and diffuse reflectance (colour-material tracking)
    fn set_color(&mut self, color: Rgba);

    fn set_material(&mut self, channel: MaterialChannel, color: Rgba);

    fn set_shininess(&mut self, exponent: f32);

    fn enable_light(&mut self, slot: LightSlot);

    fn disable_light(&mut self, slot: LightSlot);

    /// Position in the current local frame; `w == 0` makes the light directional
    fn set_light_position(&mut self, slot: LightSlot, position: Vec4);

    fn set_light_color(&mut self, slot: LightSlot, channel: LightChannel, color: Rgba);

    /// Global ambient light level
    fn set_ambient_model(&mut self, color: Rgba);

    fn set_projection(&mut self, projection: Mat4);

    /// Replace the current transform with a view matrix
    fn load_view(&mut self, view: Mat4);
}
