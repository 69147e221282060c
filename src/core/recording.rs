use glam::{Mat4, Vec3, Vec4};

use crate::math::Rgba;
use crate::traits::{LightChannel, LightSlot, MaterialChannel, RenderBackend};

/// One backend call, captured verbatim
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgba),
    SetNormal(Vec3),
    BeginFan,
    EmitVertex(Vec3),
    EndFan,
    PushTransform,
    PopTransform,
    Rotate { degrees: f32, axis: Vec3 },
    Translate(Vec3),
    Scale(Vec3),
    SetColor(Rgba),
    SetMaterial { channel: MaterialChannel, color: Rgba },
    SetShininess(f32),
    EnableLight(LightSlot),
    DisableLight(LightSlot),
    SetLightPosition { slot: LightSlot, position: Vec4 },
    SetLightColor { slot: LightSlot, channel: LightChannel, color: Rgba },
    SetAmbientModel(Rgba),
    SetProjection(Mat4),
    LoadView(Mat4),
}

impl DrawCall {
    /// True for calls that change the current transform
    pub fn is_transform(&self) -> bool {
        matches!(
            self,
            DrawCall::PushTransform
                | DrawCall::PopTransform
                | DrawCall::Rotate { .. }
                | DrawCall::Translate(_)
                | DrawCall::Scale(_)
                | DrawCall::LoadView(_)
        )
    }

    /// True for calls that submit geometry
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            DrawCall::SetNormal(_) | DrawCall::BeginFan | DrawCall::EmitVertex(_) | DrawCall::EndFan
        )
    }
}

/// Backend that records calls instead of drawing
///
/// Used to inspect what a scene submits: call order, light toggling and
/// transform sequences can all be asserted on the captured list.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Hand over the recorded calls and start a fresh list
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&DrawCall) -> bool,
    {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Number of fans submitted
    pub fn fan_count(&self) -> usize {
        self.count_where(|call| *call == DrawCall::BeginFan)
    }

    fn record(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self, color: Rgba) {
        self.record(DrawCall::Clear(color));
    }

    fn set_normal(&mut self, normal: Vec3) {
        self.record(DrawCall::SetNormal(normal));
    }

    fn begin_fan(&mut self) {
        self.record(DrawCall::BeginFan);
    }

    fn emit_vertex(&mut self, position: Vec3) {
        self.record(DrawCall::EmitVertex(position));
    }

    fn end_fan(&mut self) {
        self.record(DrawCall::EndFan);
    }

    fn push_transform(&mut self) {
        self.record(DrawCall::PushTransform);
    }

    fn pop_transform(&mut self) {
        self.record(DrawCall::PopTransform);
    }

    fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.record(DrawCall::Rotate { degrees, axis });
    }

    fn translate(&mut self, offset: Vec3) {
        self.record(DrawCall::Translate(offset));
    }

    fn scale(&mut self, factor: Vec3) {
        self.record(DrawCall::Scale(factor));
    }

    fn set_color(&mut self, color: Rgba) {
        self.record(DrawCall::SetColor(color));
    }

    fn set_material(&mut self, channel: MaterialChannel, color: Rgba) {
        self.record(DrawCall::SetMaterial { channel, color });
    }

    fn set_shininess(&mut self, exponent: f32) {
        self.record(DrawCall::SetShininess(exponent));
    }

    fn enable_light(&mut self, slot: LightSlot) {
        self.record(DrawCall::EnableLight(slot));
    }

    fn disable_light(&mut self, slot: LightSlot) {
        self.record(DrawCall::DisableLight(slot));
    }

    fn set_light_position(&mut self, slot: LightSlot, position: Vec4) {
        self.record(DrawCall::SetLightPosition { slot, position });
    }

    fn set_light_color(&mut self, slot: LightSlot, channel: LightChannel, color: Rgba) {
        self.record(DrawCall::SetLightColor { slot, channel, color });
    }

    fn set_ambient_model(&mut self, color: Rgba) {
        self.record(DrawCall::SetAmbientModel(color));
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.record(DrawCall::SetProjection(projection));
    }

    fn load_view(&mut self, view: Mat4) {
        self.record(DrawCall::LoadView(view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut backend = RecordingBackend::new();
        backend.push_transform();
        backend.translate(Vec3::X);
        backend.pop_transform();

        assert_eq!(
            backend.calls(),
            &[
                DrawCall::PushTransform,
                DrawCall::Translate(Vec3::X),
                DrawCall::PopTransform,
            ]
        );
    }

    #[test]
    fn test_take_empties_the_list() {
        let mut backend = RecordingBackend::new();
        backend.begin_fan();
        backend.end_fan();

        let calls = backend.take();
        assert_eq!(calls.len(), 2);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_fan_count_and_predicates() {
        let mut backend = RecordingBackend::new();
        for _ in 0..3 {
            backend.set_normal(Vec3::Z);
            backend.begin_fan();
            backend.emit_vertex(Vec3::ZERO);
            backend.end_fan();
        }
        backend.enable_light(LightSlot::Light2);

        assert_eq!(backend.fan_count(), 3);
        assert_eq!(backend.count_where(DrawCall::is_geometry), 12);
        assert_eq!(backend.count_where(DrawCall::is_transform), 0);
        assert_eq!(
            backend.count_where(|c| *c == DrawCall::EnableLight(LightSlot::Light2)),
            1
        );
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut backend = RecordingBackend::new();
        {
            let dyn_backend: &mut dyn RenderBackend = &mut backend;
            dyn_backend.set_ambient_model(Rgba::gray(0.5));
        }
        assert_eq!(backend.calls(), &[DrawCall::SetAmbientModel(Rgba::gray(0.5))]);
    }
}
