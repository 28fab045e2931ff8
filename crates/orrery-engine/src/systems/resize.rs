//! View/resize binding: keeps camera projection and output surface in step
//! with the host viewport. Idempotent; safe to call on every resize event.

use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::traits::{Renderer, Viewport};
use crate::systems::controls::OrbitControls;

/// Apply a new viewport size. Returns false (and changes nothing) for a
/// zero-area viewport, e.g. a collapsed container.
pub fn apply_resize<R: Renderer>(
    viewport: &Viewport,
    camera: &mut PerspectiveCamera,
    controls: &mut OrbitControls,
    renderer: &mut R,
) -> bool {
    if !viewport.is_usable() {
        log::debug!("resize ignored: {}x{}", viewport.width, viewport.height);
        return false;
    }
    camera.set_aspect(viewport.aspect());
    camera.update_projection_matrix();
    renderer.resize(
        viewport.width.round() as u32,
        viewport.height.round() as u32,
        viewport.pixel_ratio,
    );
    controls.set_element_height(viewport.height);
    log::debug!(
        "resize: {}x{} @{}x",
        viewport.width,
        viewport.height,
        viewport.pixel_ratio
    );
    true
}
