use std::collections::HashMap;

use super::resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle};
use super::traits::{FrameData, Renderer, Viewport};

/// Renderer with no GPU behind it. Tracks resource lifetimes and the last
/// frame so tests can assert on what would have been drawn.
///
/// Drawing, or disposing, a handle that is not live panics: that can only
/// happen if a frame ran against a torn-down scene.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_handle: u32,
    geometries: HashMap<GeometryHandle, GeometryDesc>,
    materials: HashMap<MaterialHandle, MaterialDesc>,
    viewport: Option<Viewport>,
    surface_size: (u32, u32),
    frames_drawn: u64,
    last_instance_count: usize,
    total_created: usize,
    total_disposed: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Backing-store size from the last `resize`.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Live geometry + material count.
    pub fn live_resources(&self) -> usize {
        self.geometries.len() + self.materials.len()
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&GeometryDesc> {
        self.geometries.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&MaterialDesc> {
        self.materials.get(&handle)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn last_instance_count(&self) -> usize {
        self.last_instance_count
    }

    pub fn total_created(&self) -> usize {
        self.total_created
    }

    pub fn total_disposed(&self) -> usize {
        self.total_disposed
    }
}

impl Renderer for HeadlessRenderer {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn attach(&mut self, viewport: &Viewport) {
        self.viewport = Some(*viewport);
        self.surface_size = viewport.physical_size();
    }

    fn detach(&mut self) {
        self.viewport = None;
        self.surface_size = (0, 0);
    }

    fn create_geometry(&mut self, desc: &GeometryDesc) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.geometries.insert(handle, desc.clone());
        self.total_created += 1;
        handle
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, *desc);
        self.total_created += 1;
        handle
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) {
        if self.geometries.remove(&handle).is_none() {
            panic!("geometry {:?} disposed twice or never created", handle);
        }
        self.total_disposed += 1;
    }

    fn dispose_material(&mut self, handle: MaterialHandle) {
        if self.materials.remove(&handle).is_none() {
            panic!("material {:?} disposed twice or never created", handle);
        }
        self.total_disposed += 1;
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        let viewport = Viewport::new(width as f32, height as f32, pixel_ratio);
        self.surface_size = viewport.physical_size();
        if self.viewport.is_some() {
            self.viewport = Some(viewport);
        }
    }

    fn draw(&mut self, frame: &FrameData) {
        assert!(self.viewport.is_some(), "draw called on a detached renderer");
        for instance in frame.instances {
            let geometry = instance.geometry_handle();
            let material = instance.material_handle();
            if !self.geometries.contains_key(&geometry) {
                panic!("draw references disposed geometry {:?}", geometry);
            }
            if !self.materials.contains_key(&material) {
                panic!("draw references disposed material {:?}", material);
            }
        }
        self.frames_drawn += 1;
        self.last_instance_count = frame.instances.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::descriptor::Color;
    use crate::renderer::camera::PerspectiveCamera;
    use crate::renderer::instance::DrawInstance;
    use crate::systems::lighting::LightState;
    use glam::Mat4;

    fn sphere() -> GeometryDesc {
        GeometryDesc::Sphere { radius: 1.0, width_segments: 8, height_segments: 8 }
    }

    #[test]
    fn create_and_dispose_tracks_live_set() {
        let mut r = HeadlessRenderer::new();
        let g = r.create_geometry(&sphere());
        let m = r.create_material(&MaterialDesc::standard(Color::WHITE));
        assert_eq!(r.live_resources(), 2);
        r.dispose_geometry(g);
        r.dispose_material(m);
        assert_eq!(r.live_resources(), 0);
        assert_eq!(r.total_created(), 2);
        assert_eq!(r.total_disposed(), 2);
    }

    #[test]
    #[should_panic(expected = "disposed twice")]
    fn double_dispose_panics() {
        let mut r = HeadlessRenderer::new();
        let g = r.create_geometry(&sphere());
        r.dispose_geometry(g);
        r.dispose_geometry(g);
    }

    #[test]
    #[should_panic(expected = "disposed geometry")]
    fn drawing_disposed_resource_panics() {
        let mut r = HeadlessRenderer::new();
        r.attach(&Viewport::new(800.0, 600.0, 1.0));
        let g = r.create_geometry(&sphere());
        let m = r.create_material(&MaterialDesc::standard(Color::WHITE));
        r.dispose_geometry(g);
        let instances = [DrawInstance::new(Mat4::IDENTITY, g, m)];
        let lights = LightState::new();
        r.draw(&FrameData {
            instances: &instances,
            camera: PerspectiveCamera::default().uniform(),
            lighting: &lights,
            clear_color: [0.0; 3],
        });
    }

    #[test]
    fn attach_resize_detach() {
        let mut r = HeadlessRenderer::new();
        r.attach(&Viewport::new(800.0, 600.0, 2.0));
        assert!(r.is_attached());
        assert_eq!(r.surface_size(), (1600, 1200));
        r.resize(1024, 768, 1.0);
        assert_eq!(r.surface_size(), (1024, 768));
        assert_eq!(r.viewport().map(|v| v.width), Some(1024.0));
        r.detach();
        assert!(!r.is_attached());
    }
}
