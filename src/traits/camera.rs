use glam::Mat4;

use super::backend::RenderBackend;
use crate::core::controller::DragEvent;
use crate::core::display_context::DisplayContext;

/// View orientation collaborator
///
/// Applied once per frame before the scene is drawn; mouse interaction is
/// bound to a surface once at setup and rebound when the surface resizes.
pub trait CameraController {
    /// Bind drag input to a surface of the given size
    fn install_interaction(&mut self, surface: DisplayContext);

    /// Feed one drag event; returns true when the view changed
    fn handle_drag(&mut self, event: DragEvent) -> bool;

    fn view_matrix(&self) -> Mat4;

    fn projection_matrix(&self) -> Mat4;

    /// Load projection and view into the backend
    fn apply(&self, backend: &mut dyn RenderBackend) {
        backend.set_projection(self.projection_matrix());
        backend.load_view(self.view_matrix());
    }
}
