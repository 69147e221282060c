use glam::{Vec3, Vec4};

use crate::math::Rgba;
use crate::traits::{LightChannel, LightSlot, MaterialChannel};

/// One fixed-function light, position already in eye space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub enabled: bool,
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    pub position: Vec4,
}

impl Light {
    /// Classic default state: the first light is white, the rest are black
    pub fn default_for(slot: LightSlot) -> Self {
        let (diffuse, specular) = match slot {
            LightSlot::Viewpoint => (Rgba::WHITE, Rgba::WHITE),
            _ => (Rgba::BLACK, Rgba::BLACK),
        };
        Self {
            enabled: false,
            ambient: Rgba::BLACK,
            diffuse,
            specular,
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
        }
    }

    pub fn set(&mut self, channel: LightChannel, color: Rgba) {
        match channel {
            LightChannel::Ambient => self.ambient = color,
            LightChannel::Diffuse => self.diffuse = color,
            LightChannel::Specular => self.specular = color,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    /// Unit vector from the surface point towards the light
    fn direction_from(&self, point: Vec3) -> Vec3 {
        if self.is_directional() {
            self.position.truncate().normalize_or_zero()
        } else {
            (self.position.truncate() / self.position.w - point).normalize_or_zero()
        }
    }
}

/// Front-face material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
    pub emission: Rgba,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Rgba::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Rgba::new(0.8, 0.8, 0.8, 1.0),
            specular: Rgba::BLACK,
            emission: Rgba::BLACK,
            shininess: 0.0,
        }
    }
}

impl Material {
    pub fn set(&mut self, channel: MaterialChannel, color: Rgba) {
        match channel {
            MaterialChannel::Ambient => self.ambient = color,
            MaterialChannel::Diffuse => self.diffuse = color,
            MaterialChannel::Specular => self.specular = color,
            MaterialChannel::Emission => self.emission = color,
        }
    }

    /// Colour-material tracking: the current colour feeds ambient and diffuse
    pub fn track_color(&mut self, color: Rgba) {
        self.ambient = color;
        self.diffuse = color;
    }
}

/// Default global ambient level
pub const DEFAULT_AMBIENT_MODEL: Rgba = Rgba::new(0.2, 0.2, 0.2, 1.0);

/// Evaluate the lighting equation for one vertex
///
/// `point` and `normal` are in eye space; the viewer sits at the origin.
pub fn shade(
    point: Vec3,
    normal: Vec3,
    material: &Material,
    lights: &[Light],
    ambient_model: Rgba,
) -> Rgba {
    let n = normal.normalize_or_zero();
    let to_eye = (-point).normalize_or_zero();

    let mut color = material.emission.to_vec4() + ambient_model.to_vec4() * material.ambient.to_vec4();

    for light in lights.iter().filter(|l| l.enabled) {
        let l = light.direction_from(point);
        let n_dot_l = n.dot(l).max(0.0);

        color += light.ambient.to_vec4() * material.ambient.to_vec4();
        color += light.diffuse.to_vec4() * material.diffuse.to_vec4() * n_dot_l;

        if n_dot_l > 0.0 {
            let half = (l + to_eye).normalize_or_zero();
            let factor = n.dot(half).max(0.0).powf(material.shininess);
            color += light.specular.to_vec4() * material.specular.to_vec4() * factor;
        }
    }

    let mut out = Rgba::from_vec4(color).clamped();
    out.a = material.diffuse.a;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rgba, b: Rgba) -> bool {
        (a.to_vec4() - b.to_vec4()).abs().max_element() < 1e-4
    }

    fn head_on() -> Light {
        Light {
            enabled: true,
            ..Light::default_for(LightSlot::Viewpoint)
        }
    }

    #[test]
    fn test_default_lights() {
        let first = Light::default_for(LightSlot::Viewpoint);
        assert_eq!(first.diffuse, Rgba::WHITE);
        assert!(first.is_directional());
        assert!(!first.enabled);

        let other = Light::default_for(LightSlot::Light4);
        assert!(other.diffuse.is_black());
        assert!(other.specular.is_black());
    }

    #[test]
    fn test_unlit_is_emission_plus_global_ambient() {
        let material = Material {
            emission: Rgba::opaque(0.5, 0.0, 0.0),
            ..Material::default()
        };
        let c = shade(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &material, &[], DEFAULT_AMBIENT_MODEL);
        assert!(approx(c, Rgba::opaque(0.54, 0.04, 0.04)), "got {:?}", c);
    }

    #[test]
    fn test_disabled_lights_contribute_nothing() {
        let material = Material::default();
        let light = Light::default_for(LightSlot::Viewpoint);
        let c = shade(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &material, &[light], Rgba::BLACK);
        assert!(approx(c, Rgba::BLACK), "got {:?}", c);
    }

    #[test]
    fn test_lambert_falls_off_with_angle() {
        let material = Material::default();
        let facing = shade(Vec3::ZERO, Vec3::Z, &material, &[head_on()], Rgba::BLACK);
        let tilted = shade(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 1.0),
            &material,
            &[head_on()],
            Rgba::BLACK,
        );
        let away = shade(Vec3::ZERO, -Vec3::Z, &material, &[head_on()], Rgba::BLACK);

        assert!(approx(facing, Rgba::gray(0.8)), "got {:?}", facing);
        assert!(tilted.r < facing.r && tilted.r > 0.0);
        assert!(approx(away, Rgba::BLACK));
    }

    #[test]
    fn test_specular_needs_specular_material() {
        let mut material = Material::default();
        material.track_color(Rgba::BLACK);
        material.specular = Rgba::gray(0.2);
        material.shininess = 32.0;

        let c = shade(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, &material, &[head_on()], Rgba::BLACK);
        assert!(approx(c, Rgba::gray(0.2)), "got {:?}", c);
    }

    #[test]
    fn test_positional_light_direction() {
        let mut material = Material::default();
        material.track_color(Rgba::WHITE);
        let light = Light {
            enabled: true,
            position: Vec4::new(0.0, 10.0, 0.0, 1.0),
            ..Light::default_for(LightSlot::Viewpoint)
        };

        let up = shade(Vec3::ZERO, Vec3::Y, &material, &[light], Rgba::BLACK);
        let down = shade(Vec3::ZERO, -Vec3::Y, &material, &[light], Rgba::BLACK);
        assert!(up.r > 0.99);
        assert!(down.is_black());
    }

    #[test]
    fn test_output_is_clamped() {
        let material = Material {
            emission: Rgba::opaque(3.0, 3.0, 3.0),
            ..Material::default()
        };
        let c = shade(Vec3::ZERO, Vec3::Z, &material, &[], Rgba::BLACK);
        assert_eq!(c, Rgba::WHITE);
    }
}
