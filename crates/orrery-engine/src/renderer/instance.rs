use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::resources::{GeometryHandle, MaterialHandle};

/// Per-draw data written to the shared buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// World matrix, column-major.
    pub model: [f32; 16],
    /// Geometry handle (as f32).
    pub geometry: f32,
    /// Material handle (as f32).
    pub material: f32,
    pub _pad: [f32; 2],
}

impl DrawInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: Mat4, geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            model: model.to_cols_array(),
            geometry: geometry.0 as f32,
            material: material.0 as f32,
            _pad: [0.0; 2],
        }
    }

    pub fn geometry_handle(&self) -> GeometryHandle {
        GeometryHandle(self.geometry as u32)
    }

    pub fn material_handle(&self) -> MaterialHandle {
        MaterialHandle(self.material as u32)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array(&self.model)
    }
}

/// Draw list rebuilt every frame.
pub struct RenderBuffer {
    pub instances: Vec<DrawInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view for copying into the shared buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
