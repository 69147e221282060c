use log::{debug, info};
use serde::Serialize;

use crate::config::AppConfig;
use crate::core::display_context::DisplayContext;
use crate::core::rasterizer::SoftwareBackend;
use crate::core::recording::RecordingBackend;
use crate::scene::SceneChoreographer;
use crate::traits::CameraController;

/// What one offscreen frame produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub frame: u64,
    pub draw_calls: usize,
    pub triangles: usize,
    pub lit_pixels: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessReport {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<FrameStats>,
    pub total_draw_calls: usize,
    pub total_triangles: usize,
}

/// Render `frames` frames without a window
///
/// Every frame is both recorded and rasterised. The frame counter only
/// advances when the config starts with animation on.
pub fn run(config: &AppConfig, frames: u32) -> HeadlessReport {
    let context = DisplayContext::new(config.window.width, config.window.height);
    let mut scene = SceneChoreographer::with_toggles(config.toggles);
    if !config.animation.start_animating {
        scene.set_toggle(crate::scene::Toggle::Animate, false);
    }

    let mut camera = config.camera.camera();
    camera.install_interaction(context);

    let mut software = SoftwareBackend::from_context(&context);
    let mut recorder = RecordingBackend::new();
    scene.configure_lights(&mut software);
    scene.configure_lights(&mut recorder);
    recorder.take();

    info!(
        "Rendering {} frames offscreen at {}x{}",
        frames, context.width, context.height
    );

    let mut stats = Vec::with_capacity(frames as usize);
    for _ in 0..frames {
        scene.compose_frame(&mut recorder, &camera);
        scene.compose_frame(&mut software, &camera);

        let frame = FrameStats {
            frame: scene.frame(),
            draw_calls: recorder.take().len(),
            triangles: software.triangles_drawn(),
            lit_pixels: software.lit_pixel_count(),
        };
        debug!("{:?}", frame);
        stats.push(frame);

        if scene.is_animating() {
            scene.advance_frame();
        }
    }

    HeadlessReport {
        width: context.width,
        height: context.height,
        total_draw_calls: stats.iter().map(|s| s.draw_calls).sum(),
        total_triangles: stats.iter().map(|s| s.triangles).sum(),
        frames: stats,
    }
}
