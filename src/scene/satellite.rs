use glam::{Vec3, Vec4};

use crate::math::{MatrixStack, Rgba};
use crate::traits::{LightSlot, RenderBackend};

pub const SATELLITE_COUNT: usize = 5;

/// The five coloured satellites, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatelliteKind {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl SatelliteKind {
    pub const ALL: [SatelliteKind; SATELLITE_COUNT] = [
        SatelliteKind::Red,
        SatelliteKind::Green,
        SatelliteKind::Blue,
        SatelliteKind::Yellow,
        SatelliteKind::Purple,
    ];

    pub const fn index(self) -> usize {
        match self {
            SatelliteKind::Red => 0,
            SatelliteKind::Green => 1,
            SatelliteKind::Blue => 2,
            SatelliteKind::Yellow => 3,
            SatelliteKind::Purple => 4,
        }
    }

    /// Satellite bound to a 1-based number, as used by the digit keys
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub const fn light_slot(self) -> LightSlot {
        match self {
            SatelliteKind::Red => LightSlot::Light1,
            SatelliteKind::Green => LightSlot::Light2,
            SatelliteKind::Blue => LightSlot::Light3,
            SatelliteKind::Yellow => LightSlot::Light4,
            SatelliteKind::Purple => LightSlot::Light5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SatelliteKind::Red => "Red",
            SatelliteKind::Green => "Green",
            SatelliteKind::Blue => "Blue",
            SatelliteKind::Yellow => "Yellow",
            SatelliteKind::Purple => "Purple",
        }
    }
}

/// Fixed rotation about an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRotation {
    pub degrees: f32,
    pub axis: Vec3,
}

impl AxisRotation {
    pub const fn new(degrees: f32, axis: Vec3) -> Self {
        Self { degrees, axis }
    }
}

/// Closed-form orbit angle: `(direction * frame + phase) * rate` degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAngle {
    pub direction: f64,
    pub phase: f64,
    pub rate: f64,
}

impl OrbitAngle {
    pub const fn new(direction: f64, phase: f64, rate: f64) -> Self {
        Self {
            direction,
            phase,
            rate,
        }
    }

    /// Angle at `frame`, reduced into [0, 360)
    ///
    /// Evaluated in f64 so the reduction stays exact for long runs.
    pub fn degrees(&self, frame: u64) -> f32 {
        let raw = (self.direction * frame as f64 + self.phase) * self.rate;
        let deg = raw.rem_euclid(360.0) as f32;
        // rounding to f32 can land exactly on a full turn
        if deg >= 360.0 {
            0.0
        } else {
            deg
        }
    }
}

/// Time-parameterised placement of one satellite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub pre_rotation: Option<AxisRotation>,
    pub axis: Vec3,
    pub angle: OrbitAngle,
    pub offset: Vec3,
    pub tilt: Option<AxisRotation>,
    pub scale: f32,
}

impl Orbit {
    /// Issue the orbit's transform chain and place the light at the local origin
    ///
    /// The light position is set after translate and tilt but before the
    /// scale, so the light follows the satellite and ignores its size.
    pub fn apply(&self, frame: u64, slot: LightSlot, backend: &mut dyn RenderBackend) {
        if let Some(pre) = self.pre_rotation {
            backend.rotate(pre.degrees, pre.axis);
        }
        backend.rotate(self.angle.degrees(frame), self.axis);
        backend.translate(self.offset);
        if let Some(tilt) = self.tilt {
            backend.rotate(tilt.degrees, tilt.axis);
        }
        backend.set_light_position(slot, Vec4::new(0.0, 0.0, 0.0, 1.0));
        backend.scale(Vec3::splat(self.scale));
    }

    /// World-space position of the orbit's local origin at `frame`
    pub fn position(&self, frame: u64) -> Vec3 {
        let mut stack = MatrixStack::new();
        if let Some(pre) = self.pre_rotation {
            stack.rotate(pre.degrees, pre.axis);
        }
        stack.rotate(self.angle.degrees(frame), self.axis);
        stack.translate(self.offset);
        stack.top().transform_point3(Vec3::ZERO)
    }
}

/// Colours a satellite's light contributes once configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Rgba,
    pub diffuse: Rgba,
    pub specular: Rgba,
}

/// One light-emitting satellite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    pub kind: SatelliteKind,
    pub slot: LightSlot,
    pub emission: Rgba,
    pub light: LightColors,
    pub orbit: Orbit,
    pub enabled: bool,
}

impl Satellite {
    /// Descriptor for `kind` with its fixed orbit and colours, enabled
    pub fn new(kind: SatelliteKind) -> Self {
        let (emission, ambient, diffuse) = match kind {
            SatelliteKind::Red => ([0.5, 0.0, 0.0], [0.1, 0.0, 0.0], [0.5, 0.0, 0.0]),
            SatelliteKind::Green => ([0.0, 0.5, 0.0], [0.0, 0.1, 0.0], [0.0, 0.5, 0.0]),
            SatelliteKind::Blue => ([0.0, 0.0, 0.5], [0.0, 0.0, 0.2], [0.0, 0.0, 0.6]),
            SatelliteKind::Yellow => ([0.5, 0.5, 0.0], [0.1, 0.1, 0.0], [0.5, 0.5, 0.0]),
            SatelliteKind::Purple => ([0.5, 0.0, 0.5], [0.1, 0.0, 0.1], [0.5, 0.0, 0.5]),
        };

        Self {
            kind,
            slot: kind.light_slot(),
            emission: Rgba::from(emission),
            light: LightColors {
                ambient: Rgba::from(ambient),
                diffuse: Rgba::from(diffuse),
                specular: Rgba::from(diffuse),
            },
            orbit: orbit_for(kind),
            enabled: true,
        }
    }
}

fn orbit_for(kind: SatelliteKind) -> Orbit {
    match kind {
        SatelliteKind::Red => Orbit {
            pre_rotation: None,
            axis: Vec3::Y,
            angle: OrbitAngle::new(-1.0, 0.0, 1.0),
            offset: Vec3::new(10.0, 0.0, 0.0),
            tilt: Some(AxisRotation::new(90.0, Vec3::Y)),
            scale: 0.15,
        },
        SatelliteKind::Green => Orbit {
            pre_rotation: None,
            axis: Vec3::Y,
            angle: OrbitAngle::new(1.0, 100.0, 0.8743),
            offset: Vec3::new(10.0, -6.0, 0.0),
            tilt: Some(AxisRotation::new(-30.0, Vec3::Z)),
            scale: 0.25,
        },
        SatelliteKind::Blue => Orbit {
            pre_rotation: None,
            axis: Vec3::Y,
            angle: OrbitAngle::new(-1.0, -100.0, 1.3057),
            offset: Vec3::new(8.0, 0.0, 0.0),
            tilt: Some(AxisRotation::new(45.0, Vec3::Z)),
            scale: 0.25,
        },
        SatelliteKind::Yellow => Orbit {
            pre_rotation: None,
            axis: Vec3::Y,
            angle: OrbitAngle::new(-1.0, 100.0, 1.5),
            offset: Vec3::new(8.0, 0.0, 0.0),
            tilt: Some(AxisRotation::new(45.0, Vec3::Z)),
            scale: 0.25,
        },
        SatelliteKind::Purple => Orbit {
            pre_rotation: Some(AxisRotation::new(90.0, Vec3::Z)),
            axis: Vec3::Y,
            angle: OrbitAngle::new(1.0, -100.0, 1.3057),
            offset: Vec3::new(9.0, 0.0, 0.0),
            tilt: None,
            scale: 0.25,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recording::{DrawCall, RecordingBackend};

    #[test]
    fn test_kinds_map_to_distinct_slots() {
        for (i, kind) in SatelliteKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.light_slot().index(), i + 1);
        }
    }

    #[test]
    fn test_from_number() {
        assert_eq!(SatelliteKind::from_number(1), Some(SatelliteKind::Red));
        assert_eq!(SatelliteKind::from_number(5), Some(SatelliteKind::Purple));
        assert_eq!(SatelliteKind::from_number(0), None);
        assert_eq!(SatelliteKind::from_number(6), None);
    }

    #[test]
    fn test_red_angle_is_negative_frame() {
        let angle = Satellite::new(SatelliteKind::Red).orbit.angle;
        assert_eq!(angle.degrees(0), 0.0);
        assert_eq!(angle.degrees(90), 270.0);
        assert_eq!(angle.degrees(360), 0.0);
        assert_eq!(angle.degrees(720), 0.0);
    }

    #[test]
    fn test_closed_form_angles() {
        let cases: [(SatelliteKind, f64); 4] = [
            (SatelliteKind::Green, (10.0 + 100.0) * 0.8743),
            (SatelliteKind::Blue, (-10.0 - 100.0) * 1.3057),
            (SatelliteKind::Yellow, (-10.0 + 100.0) * 1.5),
            (SatelliteKind::Purple, (10.0 - 100.0) * 1.3057),
        ];
        for (kind, expected) in cases {
            let got = Satellite::new(kind).orbit.angle.degrees(10) as f64;
            let diff = (got - expected.rem_euclid(360.0)).abs();
            assert!(diff < 1e-3, "{:?}: got {}, expected {}", kind, got, expected);
        }
    }

    #[test]
    fn test_angle_stays_in_range_for_long_runs() {
        for kind in SatelliteKind::ALL {
            let angle = Satellite::new(kind).orbit.angle;
            for frame in [0, 1, 1_000, 1_000_000, u32::MAX as u64] {
                let deg = angle.degrees(frame);
                assert!((0.0..360.0).contains(&deg), "{:?} at {}: {}", kind, frame, deg);
            }
        }
    }

    #[test]
    fn test_apply_order() {
        let orbit = Satellite::new(SatelliteKind::Green).orbit;
        let mut backend = RecordingBackend::new();
        orbit.apply(0, LightSlot::Light2, &mut backend);

        let calls = backend.calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], DrawCall::Rotate { axis, .. } if axis == Vec3::Y));
        assert_eq!(calls[1], DrawCall::Translate(Vec3::new(10.0, -6.0, 0.0)));
        assert_eq!(calls[2], DrawCall::Rotate { degrees: -30.0, axis: Vec3::Z });
        assert_eq!(
            calls[3],
            DrawCall::SetLightPosition {
                slot: LightSlot::Light2,
                position: Vec4::new(0.0, 0.0, 0.0, 1.0)
            }
        );
        assert_eq!(calls[4], DrawCall::Scale(Vec3::splat(0.25)));
    }

    #[test]
    fn test_purple_pre_rotates_about_z() {
        let orbit = Satellite::new(SatelliteKind::Purple).orbit;
        let mut backend = RecordingBackend::new();
        orbit.apply(100, LightSlot::Light5, &mut backend);

        assert_eq!(backend.calls()[0], DrawCall::Rotate { degrees: 90.0, axis: Vec3::Z });
        assert_eq!(backend.calls()[1], DrawCall::Rotate { degrees: 0.0, axis: Vec3::Y });
        assert_eq!(backend.calls()[2], DrawCall::Translate(Vec3::new(9.0, 0.0, 0.0)));
        assert!(matches!(backend.calls()[3], DrawCall::SetLightPosition { .. }));
    }

    #[test]
    fn test_orbit_radius_is_constant() {
        let orbit = Satellite::new(SatelliteKind::Red).orbit;
        for frame in [0, 45, 90, 200] {
            assert!((orbit.position(frame).length() - 10.0).abs() < 1e-4);
        }
        // purple orbits in the plane perpendicular to x after the pre-rotation
        let purple = Satellite::new(SatelliteKind::Purple).orbit;
        assert!(purple.position(100).distance(Vec3::new(0.0, 9.0, 0.0)) < 1e-4);
    }

    #[test]
    fn test_colours() {
        let blue = Satellite::new(SatelliteKind::Blue);
        assert_eq!(blue.emission, Rgba::opaque(0.0, 0.0, 0.5));
        assert_eq!(blue.light.ambient, Rgba::opaque(0.0, 0.0, 0.2));
        assert_eq!(blue.light.diffuse, Rgba::opaque(0.0, 0.0, 0.6));
        assert_eq!(blue.light.specular, blue.light.diffuse);
        assert!(blue.enabled);
    }
}
