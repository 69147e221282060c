use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use crate::camera::TrackballCamera;
use crate::config::AppConfig;
use crate::core::clock::Clock;
use crate::core::controller::Button;
use crate::core::input_adapter::{InputAction, WinitController};
use crate::core::rasterizer::SoftwareBackend;
use crate::core::surface_renderer::{PresentError, SurfaceRenderer};
use crate::core::timer::AnimationTimer;
use crate::scene::{SatelliteKind, SceneChoreographer, Toggle, ToggleEffect};
use crate::traits::CameraController;
use crate::ui::{ControlPanel, UiOverlay};

/// Keyboard shortcut for a toggle, if the button has one
pub fn toggle_for_button(button: Button) -> Option<Toggle> {
    match button {
        Button::Space => Some(Toggle::Animate),
        Button::KeyA => Some(Toggle::Ambient),
        Button::KeyV => Some(Toggle::Viewpoint),
        _ => button
            .digit()
            .and_then(SatelliteKind::from_number)
            .map(Toggle::Satellite),
    }
}

/// Window, animation timer and scene wired together on the event loop thread
pub struct App {
    config: AppConfig,
    scene: SceneChoreographer,
    camera: TrackballCamera,
    timer: AnimationTimer,
    clock: Clock,
    input: WinitController,
    panel: ControlPanel,
    backend: SoftwareBackend,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    overlay: Option<UiOverlay>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut scene = SceneChoreographer::with_toggles(config.toggles);
        if !config.animation.start_animating {
            scene.set_toggle(Toggle::Animate, false);
        }

        Self {
            scene,
            camera: config.camera.camera(),
            timer: config.animation.timer(),
            clock: Clock::new(),
            input: WinitController::new(),
            panel: ControlPanel::new(),
            backend: SoftwareBackend::new(config.window.width, config.window.height),
            window: None,
            renderer: None,
            overlay: None,
            config,
        }
    }

    pub fn scene(&self) -> &SceneChoreographer {
        &self.scene
    }

    pub fn timer(&self) -> &AnimationTimer {
        &self.timer
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn apply_effect(&mut self, effect: ToggleEffect) {
        match effect {
            ToggleEffect::Redraw => {}
            ToggleEffect::StartAnimation => {
                // drop the time spent paused
                self.clock.tick();
                self.timer.start();
            }
            ToggleEffect::StopAnimation => self.timer.stop(),
        }
        self.request_redraw();
    }

    /// React to one input action; returns true when the app should exit
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Pressed(Button::Escape) => return true,
            InputAction::Pressed(Button::MouseRight) => {
                self.camera.reset();
                self.request_redraw();
            }
            InputAction::Pressed(button) => {
                if let Some(toggle) = toggle_for_button(button) {
                    let on = !self.scene.is_on(toggle);
                    let effect = self.scene.set_toggle(toggle, on);
                    self.apply_effect(effect);
                }
            }
            InputAction::Drag(event) => {
                if self.camera.handle_drag(event) {
                    self.request_redraw();
                }
            }
        }
        false
    }

    /// Advance the frame counter by however many timer ticks are due
    pub fn update(&mut self) -> u32 {
        let delta = self.clock.tick();
        let due = self.timer.tick(delta);
        for _ in 0..due {
            self.scene.advance_frame();
        }
        if due > 0 {
            self.request_redraw();
        }
        due
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        renderer.resize(width, height);

        let context = renderer.context();
        self.backend.resize(context.width, context.height);
        self.camera.install_interaction(context);
        self.request_redraw();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer), Some(overlay)) = (
            self.window.as_ref(),
            self.renderer.as_ref(),
            self.overlay.as_mut(),
        ) else {
            return;
        };

        self.scene.compose_frame(&mut self.backend, &self.camera);

        let scene = &mut self.scene;
        let panel = &self.panel;
        let mut effects = Vec::new();
        let prepared = overlay.prepare(window, |ctx| effects.extend(panel.show(ctx, scene)));

        let result = renderer.present(self.backend.as_bytes(), |target| {
            overlay.paint(target, prepared)
        });

        match result {
            Ok(()) => {}
            Err(PresentError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("Surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(PresentError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Frame skipped: {}", e),
        }

        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let renderer = SurfaceRenderer::new(window.clone())?;
        let overlay = UiOverlay::new(
            &window,
            renderer.gpu().device(),
            renderer.surface_format(),
        );

        let context = renderer.context();
        self.backend.resize(context.width, context.height);
        self.scene.configure_lights(&mut self.backend);
        self.camera.install_interaction(context);

        if self.scene.is_animating() {
            self.clock.tick();
            self.timer.start();
        }

        info!(
            "Controls: Space animate, 1-5 satellites, A ambient, V viewpoint, drag to rotate, right click to reset, Escape to quit"
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.overlay = Some(overlay);
        self.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                error!("Failed to initialize window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(overlay), Some(window)) = (&mut self.overlay, &self.window) {
            if overlay.on_window_event(window, &event) {
                self.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Some(action) = self.input.process_event(&event) {
                    if self.handle_action(action) {
                        event_loop.exit();
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.update();

        match self.timer.time_until_next() {
            Some(wait) => event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + wait)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
