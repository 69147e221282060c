use log::{debug, info};

use super::satellite::{Satellite, SatelliteKind, SATELLITE_COUNT};
use super::toggles::{Toggle, ToggleEffect, Toggles};
use crate::math::Rgba;
use crate::star::StarSolid;
use crate::traits::{CameraController, LightChannel, LightSlot, MaterialChannel, RenderBackend};

/// Colour the solids are drawn in; lights and emission do the rest
pub const BASE_GRAY: Rgba = Rgba::gray(0.5);
/// Global ambient level while the ambient toggle is on
pub const RAISED_AMBIENT: Rgba = Rgba::gray(0.5);
/// Specular reflectivity of the central solid
pub const CENTER_SPECULAR: Rgba = Rgba::gray(0.2);
pub const SHININESS: f32 = 32.0;
/// Diffuse and specular strength of the viewpoint light
pub const VIEWPOINT_LIGHT: Rgba = Rgba::gray(0.5);

/// Central star plus five orbiting light satellites, driven by a frame counter
///
/// Rendering is a pure function of the counter and the toggle flags: nothing
/// about satellite placement is stored between frames.
#[derive(Debug, Clone)]
pub struct SceneChoreographer {
    center: StarSolid,
    satellites: [Satellite; SATELLITE_COUNT],
    frame: u64,
    ambient: bool,
    viewpoint: bool,
    animating: bool,
}

impl SceneChoreographer {
    /// Scene at frame 0 with every light on and animation running
    pub fn new() -> Self {
        Self::with_toggles(Toggles::default())
    }

    pub fn with_toggles(toggles: Toggles) -> Self {
        let satellites = SatelliteKind::ALL.map(|kind| Satellite {
            enabled: toggles.satellite(kind),
            ..Satellite::new(kind)
        });

        Self {
            center: StarSolid::new(),
            satellites,
            frame: 0,
            ambient: toggles.ambient,
            viewpoint: toggles.viewpoint,
            animating: true,
        }
    }

    /// Current light flags
    pub fn toggles(&self) -> Toggles {
        let mut toggles = Toggles {
            ambient: self.ambient,
            viewpoint: self.viewpoint,
            ..Toggles::ALL_OFF
        };
        for satellite in &self.satellites {
            toggles.set_satellite(satellite.kind, satellite.enabled);
        }
        toggles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Jump to a given frame
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn advance_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn satellite(&self, kind: SatelliteKind) -> &Satellite {
        &self.satellites[kind.index()]
    }

    /// Orbit angle of a satellite at an arbitrary frame, in [0, 360)
    pub fn satellite_angle(&self, kind: SatelliteKind, frame: u64) -> f32 {
        self.satellite(kind).orbit.angle.degrees(frame)
    }

    pub fn is_on(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Animate => self.animating,
            Toggle::Ambient => self.ambient,
            Toggle::Viewpoint => self.viewpoint,
            Toggle::Satellite(kind) => self.satellite(kind).enabled,
        }
    }

    /// Set a toggle and report what the driver should do about it
    pub fn set_toggle(&mut self, toggle: Toggle, on: bool) -> ToggleEffect {
        if self.is_on(toggle) != on {
            info!("{} {}", toggle.label(), if on { "on" } else { "off" });
        }

        match toggle {
            Toggle::Animate => {
                self.animating = on;
                return if on {
                    ToggleEffect::StartAnimation
                } else {
                    ToggleEffect::StopAnimation
                };
            }
            Toggle::Ambient => self.ambient = on,
            Toggle::Viewpoint => self.viewpoint = on,
            Toggle::Satellite(kind) => self.satellites[kind.index()].enabled = on,
        }
        ToggleEffect::Redraw
    }

    /// Flip a toggle; returns its new state
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let on = !self.is_on(toggle);
        self.set_toggle(toggle, on);
        on
    }

    /// One-time light and material setup
    pub fn configure_lights(&self, backend: &mut dyn RenderBackend) {
        backend.set_shininess(SHININESS);

        backend.set_light_color(LightSlot::Viewpoint, LightChannel::Diffuse, VIEWPOINT_LIGHT);
        backend.set_light_color(LightSlot::Viewpoint, LightChannel::Specular, VIEWPOINT_LIGHT);

        for satellite in &self.satellites {
            backend.set_light_color(satellite.slot, LightChannel::Ambient, satellite.light.ambient);
            backend.set_light_color(satellite.slot, LightChannel::Diffuse, satellite.light.diffuse);
            backend.set_light_color(satellite.slot, LightChannel::Specular, satellite.light.specular);
        }

        backend.enable_light(LightSlot::Viewpoint);
        debug!("Configured {} satellite lights", self.satellites.len());
    }

    /// Draw the satellites, then the central solid, for the current frame
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        backend.set_color(BASE_GRAY);
        backend.set_material(MaterialChannel::Specular, Rgba::BLACK);

        if self.viewpoint {
            backend.enable_light(LightSlot::Viewpoint);
        } else {
            backend.disable_light(LightSlot::Viewpoint);
        }

        for satellite in &self.satellites {
            self.render_satellite(satellite, backend);
        }

        // keep emission off the central solid
        backend.set_material(MaterialChannel::Emission, Rgba::BLACK);

        backend.set_ambient_model(if self.ambient {
            RAISED_AMBIENT
        } else {
            Rgba::BLACK
        });

        backend.set_material(MaterialChannel::Specular, CENTER_SPECULAR);

        backend.push_transform();
        self.center.render(backend);
        backend.pop_transform();
    }

    fn render_satellite(&self, satellite: &Satellite, backend: &mut dyn RenderBackend) {
        if satellite.enabled {
            backend.set_material(MaterialChannel::Emission, satellite.emission);
            backend.enable_light(satellite.slot);
        } else {
            backend.set_material(MaterialChannel::Emission, Rgba::BLACK);
            backend.disable_light(satellite.slot);
        }

        backend.push_transform();
        satellite.orbit.apply(self.frame, satellite.slot, backend);
        self.center.render(backend);
        backend.pop_transform();
    }

    /// Full frame: clear, orient the view, draw the scene
    pub fn compose_frame(&self, backend: &mut dyn RenderBackend, camera: &dyn CameraController) {
        backend.clear(Rgba::BLACK);
        camera.apply(backend);
        self.render(backend);
    }
}

impl Default for SceneChoreographer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::recording::{DrawCall, RecordingBackend};
    use crate::star::FACE_COUNT;

    fn record(scene: &SceneChoreographer) -> Vec<DrawCall> {
        let mut backend = RecordingBackend::new();
        scene.render(&mut backend);
        backend.take()
    }

    #[test]
    fn test_new_scene_defaults() {
        let scene = SceneChoreographer::new();
        assert_eq!(scene.frame(), 0);
        assert!(scene.is_animating());
        assert_eq!(scene.toggles(), Toggles::ALL_ON);
        assert_eq!(scene.satellites().len(), SATELLITE_COUNT);
    }

    #[test]
    fn test_with_toggles_round_trips_flags() {
        let mut toggles = Toggles::ALL_ON;
        toggles.blue = false;
        toggles.ambient = false;
        let scene = SceneChoreographer::with_toggles(toggles);
        assert_eq!(scene.toggles(), toggles);
        assert!(!scene.satellite(SatelliteKind::Blue).enabled);
    }

    #[test]
    fn test_advance_frame_counts() {
        let mut scene = SceneChoreographer::new();
        for _ in 0..7 {
            scene.advance_frame();
        }
        assert_eq!(scene.frame(), 7);
    }

    #[test]
    fn test_toggle_effects() {
        let mut scene = SceneChoreographer::new();
        assert_eq!(scene.set_toggle(Toggle::Animate, false), ToggleEffect::StopAnimation);
        assert_eq!(scene.set_toggle(Toggle::Animate, true), ToggleEffect::StartAnimation);
        assert_eq!(scene.set_toggle(Toggle::Ambient, false), ToggleEffect::Redraw);
        assert_eq!(
            scene.set_toggle(Toggle::Satellite(SatelliteKind::Green), false),
            ToggleEffect::Redraw
        );
        assert!(!scene.is_on(Toggle::Satellite(SatelliteKind::Green)));
    }

    #[test]
    fn test_toggle_flips() {
        let mut scene = SceneChoreographer::new();
        assert!(!scene.toggle(Toggle::Viewpoint));
        assert!(scene.toggle(Toggle::Viewpoint));
        assert!(scene.is_on(Toggle::Viewpoint));
    }

    #[test]
    fn test_render_draws_six_solids() {
        let calls = record(&SceneChoreographer::new());
        let fans = calls.iter().filter(|c| **c == DrawCall::BeginFan).count();
        assert_eq!(fans, 6 * FACE_COUNT);
    }

    #[test]
    fn test_render_prologue() {
        let calls = record(&SceneChoreographer::new());
        assert_eq!(calls[0], DrawCall::SetColor(BASE_GRAY));
        assert_eq!(
            calls[1],
            DrawCall::SetMaterial { channel: MaterialChannel::Specular, color: Rgba::BLACK }
        );
        assert_eq!(calls[2], DrawCall::EnableLight(LightSlot::Viewpoint));
        assert_eq!(
            calls[3],
            DrawCall::SetMaterial {
                channel: MaterialChannel::Emission,
                color: Rgba::opaque(0.5, 0.0, 0.0)
            }
        );
        assert_eq!(calls[4], DrawCall::EnableLight(LightSlot::Light1));
        assert_eq!(calls[5], DrawCall::PushTransform);
    }

    #[test]
    fn test_render_epilogue() {
        let calls = record(&SceneChoreographer::new());
        let solid_len = 3 * FACE_COUNT + StarSolid::new().faces().iter().map(|f| f.len()).sum::<usize>();
        let tail = &calls[calls.len() - solid_len - 5..];

        assert_eq!(
            tail[0],
            DrawCall::SetMaterial { channel: MaterialChannel::Emission, color: Rgba::BLACK }
        );
        assert_eq!(tail[1], DrawCall::SetAmbientModel(RAISED_AMBIENT));
        assert_eq!(
            tail[2],
            DrawCall::SetMaterial { channel: MaterialChannel::Specular, color: CENTER_SPECULAR }
        );
        assert_eq!(tail[3], DrawCall::PushTransform);
        assert_eq!(tail[4], DrawCall::SetNormal(glam::Vec3::Z));
        assert_eq!(calls.last(), Some(&DrawCall::PopTransform));
    }

    #[test]
    fn test_ambient_off_sets_black_model() {
        let mut scene = SceneChoreographer::new();
        scene.set_toggle(Toggle::Ambient, false);
        let calls = record(&scene);
        assert!(calls.contains(&DrawCall::SetAmbientModel(Rgba::BLACK)));
        assert!(!calls.contains(&DrawCall::SetAmbientModel(RAISED_AMBIENT)));
    }

    #[test]
    fn test_viewpoint_off_disables_once() {
        let mut scene = SceneChoreographer::new();
        scene.set_toggle(Toggle::Viewpoint, false);
        let calls = record(&scene);
        let count = calls
            .iter()
            .filter(|c| **c == DrawCall::DisableLight(LightSlot::Viewpoint))
            .count();
        assert_eq!(count, 1);
        assert!(!calls.contains(&DrawCall::EnableLight(LightSlot::Viewpoint)));
    }

    #[test]
    fn test_configure_lights() {
        let scene = SceneChoreographer::new();
        let mut backend = RecordingBackend::new();
        scene.configure_lights(&mut backend);

        let calls = backend.calls();
        assert_eq!(calls[0], DrawCall::SetShininess(SHININESS));
        assert!(calls.contains(&DrawCall::SetLightColor {
            slot: LightSlot::Light3,
            channel: LightChannel::Diffuse,
            color: Rgba::opaque(0.0, 0.0, 0.6),
        }));
        assert_eq!(
            backend.count_where(|c| matches!(c, DrawCall::SetLightColor { .. })),
            2 + 3 * SATELLITE_COUNT
        );
        assert_eq!(calls.last(), Some(&DrawCall::EnableLight(LightSlot::Viewpoint)));
    }

    #[test]
    fn test_satellite_angle() {
        let scene = SceneChoreographer::new();
        assert_eq!(scene.satellite_angle(SatelliteKind::Red, 0), 0.0);
        assert_eq!(scene.satellite_angle(SatelliteKind::Red, 10), 350.0);
        assert_eq!(scene.satellite_angle(SatelliteKind::Yellow, 100), 0.0);
    }
}
