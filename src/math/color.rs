use glam::Vec4;

/// RGBA colour, components nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Black with opaque alpha - the "zero" colour passed for emission, specular and ambient resets
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn gray(level: f32) -> Self {
        Self::opaque(level, level, level)
    }

    /// True when the colour channels are all zero (alpha is ignored)
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    pub fn clamped(self) -> Self {
        Self::from_vec4(self.to_vec4().clamp(Vec4::ZERO, Vec4::ONE))
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

impl From<[f32; 3]> for Rgba {
    fn from(rgb: [f32; 3]) -> Self {
        Self::opaque(rgb[0], rgb[1], rgb[2])
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(rgba: [f32; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_opaque_zero() {
        assert_eq!(Rgba::BLACK, Rgba::new(0.0, 0.0, 0.0, 1.0));
        assert!(Rgba::BLACK.is_black());
    }

    #[test]
    fn test_is_black_ignores_alpha() {
        assert!(Rgba::new(0.0, 0.0, 0.0, 0.0).is_black());
        assert!(!Rgba::opaque(0.0, 0.5, 0.0).is_black());
    }

    #[test]
    fn test_to_rgba8_rounds_and_clamps() {
        assert_eq!(Rgba::opaque(0.5, 0.0, 1.0).to_rgba8(), [128, 0, 255, 255]);
        assert_eq!(Rgba::new(1.7, -0.2, 0.25, 0.0).to_rgba8(), [255, 0, 64, 0]);
    }

    #[test]
    fn test_from_arrays() {
        assert_eq!(Rgba::from([0.1, 0.2, 0.3]), Rgba::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(Rgba::from([0.1, 0.2, 0.3, 0.4]), Rgba::new(0.1, 0.2, 0.3, 0.4));
    }
}
