//! Renderer that forwards resource management to a foreign renderer.
//!
//! Resource lifetimes are recorded as serialisable commands, drained by the
//! host once per frame. Draws are packed into the shared frame buffer
//! described by `ProtocolLayout`.

use std::collections::HashSet;

use serde::Serialize;

use super::protocol::ProtocolLayout;
use crate::renderer::resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle};
use crate::renderer::traits::{FrameData, Renderer, Viewport};

/// One resource operation for the host renderer to replay, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ResourceCommand {
    #[serde(rename_all = "camelCase")]
    Attach { width: f32, height: f32, pixel_ratio: f32 },
    Detach,
    CreateGeometry { handle: GeometryHandle, desc: GeometryDesc },
    CreateMaterial { handle: MaterialHandle, desc: MaterialDesc },
    DisposeGeometry { handle: GeometryHandle },
    DisposeMaterial { handle: MaterialHandle },
    #[serde(rename_all = "camelCase")]
    Resize { width: u32, height: u32, pixel_ratio: f32 },
}

pub struct CommandRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    commands: Vec<ResourceCommand>,
    next_handle: u32,
    live_geometries: HashSet<GeometryHandle>,
    live_materials: HashSet<MaterialHandle>,
    frame_counter: u64,
    attached: bool,
}

impl CommandRenderer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let buffer = layout.allocate();
        Self {
            layout,
            buffer,
            commands: Vec::with_capacity(64),
            next_handle: 0,
            live_geometries: HashSet::new(),
            live_materials: HashSet::new(),
            frame_counter: 0,
            attached: false,
        }
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Take the commands recorded since the last drain.
    pub fn drain_commands(&mut self) -> Vec<ResourceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the frame buffer for zero-copy reads from JS.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn live_resources(&self) -> usize {
        self.live_geometries.len() + self.live_materials.len()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Renderer for CommandRenderer {
    fn backend(&self) -> &'static str {
        "commands"
    }

    fn attach(&mut self, viewport: &Viewport) {
        self.attached = true;
        self.commands.push(ResourceCommand::Attach {
            width: viewport.width,
            height: viewport.height,
            pixel_ratio: viewport.pixel_ratio,
        });
    }

    fn detach(&mut self) {
        self.attached = false;
        self.commands.push(ResourceCommand::Detach);
    }

    fn create_geometry(&mut self, desc: &GeometryDesc) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.live_geometries.insert(handle);
        self.commands.push(ResourceCommand::CreateGeometry {
            handle,
            desc: desc.clone(),
        });
        handle
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.live_materials.insert(handle);
        self.commands.push(ResourceCommand::CreateMaterial { handle, desc: *desc });
        handle
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) {
        if !self.live_geometries.remove(&handle) {
            panic!("geometry {:?} disposed twice or never created", handle);
        }
        self.commands.push(ResourceCommand::DisposeGeometry { handle });
    }

    fn dispose_material(&mut self, handle: MaterialHandle) {
        if !self.live_materials.remove(&handle) {
            panic!("material {:?} disposed twice or never created", handle);
        }
        self.commands.push(ResourceCommand::DisposeMaterial { handle });
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.commands.push(ResourceCommand::Resize {
            width,
            height,
            pixel_ratio,
        });
    }

    fn draw(&mut self, frame: &FrameData) {
        for instance in frame.instances {
            let geometry = instance.geometry_handle();
            let material = instance.material_handle();
            if !self.live_geometries.contains(&geometry) || !self.live_materials.contains(&material) {
                panic!("draw references disposed resource ({:?}, {:?})", geometry, material);
            }
        }
        self.frame_counter += 1;
        self.layout.write_frame(&mut self.buffer, self.frame_counter, frame);
    }
}
