//! Renderer trait for GPU backends.
//!
//! The engine owns the scene graph and decides what is drawn; a `Renderer`
//! owns every GPU-resident resource. Geometry and materials are created from
//! descriptors and referred to by handle until disposed. The web bridge
//! implements this by recording commands for the TypeScript renderer; tests
//! use the headless implementation.

use super::camera::CameraUniform;
use super::instance::DrawInstance;
use super::resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle};
use crate::systems::lighting::LightState;

/// Output surface size in CSS pixels plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// A viewport needs a positive area to be mountable.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backing-store size in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        (
            (self.width * ratio).round() as u32,
            (self.height * ratio).round() as u32,
        )
    }
}

/// Renderer trait for GPU backends.
///
/// Every handle returned by `create_*` must be passed to the matching
/// `dispose_*` exactly once. Drawing a disposed handle is a programming error.
pub trait Renderer {
    /// Backend identifier (e.g., "headless", "commands").
    fn backend(&self) -> &'static str;

    /// Attach the output surface to the host container.
    fn attach(&mut self, viewport: &Viewport);

    /// Detach and release the output surface.
    fn detach(&mut self);

    fn create_geometry(&mut self, desc: &GeometryDesc) -> GeometryHandle;

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle;

    fn dispose_geometry(&mut self, handle: GeometryHandle);

    fn dispose_material(&mut self, handle: MaterialHandle);

    /// Resize the output surface. `width`/`height` are CSS pixels.
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// One instance per drawable node, in scene order.
    pub instances: &'a [DrawInstance],
    pub camera: CameraUniform,
    pub lighting: &'a LightState,
    /// Background color (linear RGB).
    pub clear_color: [f32; 3],
}
