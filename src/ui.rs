use egui::{ClippedPrimitive, Context, TexturesDelta, ViewportId};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::surface_renderer::OverlayTarget;
use crate::scene::{SatelliteKind, SceneChoreographer, Toggle, ToggleEffect};

/// Checkbox rows, top to bottom
pub const PANEL_ROWS: [&[Toggle]; 2] = [
    &[Toggle::Animate, Toggle::Ambient],
    &[
        Toggle::Viewpoint,
        Toggle::Satellite(SatelliteKind::Red),
        Toggle::Satellite(SatelliteKind::Green),
        Toggle::Satellite(SatelliteKind::Blue),
        Toggle::Satellite(SatelliteKind::Yellow),
        Toggle::Satellite(SatelliteKind::Purple),
    ],
];

/// Bottom panel with one checkbox per scene toggle and the frame counter
#[derive(Debug, Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the panel and apply changed checkboxes to the scene
    pub fn show(&self, ctx: &Context, scene: &mut SceneChoreographer) -> Vec<ToggleEffect> {
        let mut effects = Vec::new();

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            for row in PANEL_ROWS {
                ui.horizontal(|ui| {
                    for &toggle in row {
                        let mut on = scene.is_on(toggle);
                        if ui.checkbox(&mut on, toggle.label()).changed() {
                            effects.push(scene.set_toggle(toggle, on));
                        }
                    }
                });
            }
            ui.weak(format!("Frame {}", scene.frame()));
        });

        effects
    }
}

/// Tessellated overlay waiting to be painted
pub struct PreparedOverlay {
    primitives: Vec<ClippedPrimitive>,
    textures_delta: TexturesDelta,
    pixels_per_point: f32,
}

/// egui integration: input state, context and wgpu painter
pub struct UiOverlay {
    ctx: Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiOverlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer =
            egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Returns true when egui consumed the event
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one UI frame
    pub fn prepare<F>(&mut self, window: &Window, build: F) -> PreparedOverlay
    where
        F: FnMut(&Context),
    {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, build);
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        PreparedOverlay {
            primitives,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Record the overlay pass on top of the frame
    pub fn paint(&mut self, target: OverlayTarget<'_>, prepared: PreparedOverlay) {
        for (id, delta) in &prepared.textures_delta.set {
            self.renderer
                .update_texture(target.device, target.queue, *id, delta);
        }

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: target.size,
            pixels_per_point: prepared.pixels_per_point,
        };

        self.renderer.update_buffers(
            target.device,
            target.queue,
            target.encoder,
            &prepared.primitives,
            &screen,
        );

        {
            let mut render_pass = target
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Overlay Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &prepared.primitives, &screen);
        }

        for id in &prepared.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rows_cover_every_toggle_once() {
        let listed: Vec<Toggle> = PANEL_ROWS.iter().flat_map(|row| row.iter().copied()).collect();
        let unique: HashSet<_> = listed.iter().collect();
        assert_eq!(listed.len(), Toggle::ALL.len());
        assert_eq!(unique.len(), Toggle::ALL.len());
    }

    #[test]
    fn test_panel_without_input_changes_nothing() {
        let ctx = Context::default();
        let panel = ControlPanel::new();
        let mut scene = SceneChoreographer::new();
        let mut effects = Vec::new();

        let _ = ctx.run(Default::default(), |ctx| {
            effects = panel.show(ctx, &mut scene);
        });

        assert!(effects.is_empty());
        assert_eq!(scene.toggles(), crate::scene::Toggles::ALL_ON);
    }
}
