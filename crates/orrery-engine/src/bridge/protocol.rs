/// Shared frame buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]  view-projection (16, column-major) + eye (4)
/// [Instances: max_instances × 20 floats]
/// [Lights: max_lights × 8 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use serde::{Deserialize, Serialize};

use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::DrawInstance;
use crate::renderer::traits::FrameData;
use crate::systems::lighting::LIGHT_FLOATS;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LIGHTS: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_PROTOCOL_VERSION: usize = 6;
pub const HEADER_CLEAR_R: usize = 7;
pub const HEADER_CLEAR_G: usize = 8;
pub const HEADER_CLEAR_B: usize = 9;
pub const HEADER_AMBIENT_R: usize = 10;
pub const HEADER_AMBIENT_G: usize = 11;
pub const HEADER_AMBIENT_B: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section (fixed wire format).
pub const CAMERA_FLOATS: usize = 20;

/// Floats per draw instance (fixed wire format).
pub const INSTANCE_FLOATS: usize = DrawInstance::FLOATS;

/// Buffer capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtocolConfig {
    pub max_instances: usize,
    pub max_lights: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_instances: 256,
            max_lights: 4,
        }
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let light_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let buffer_total_floats = light_data_offset + max_lights * LIGHT_FLOATS;

        Self {
            max_instances,
            max_lights,
            camera_offset,
            instance_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &ProtocolConfig) -> Self {
        Self::new(config.max_instances, config.max_lights)
    }

    /// A zeroed buffer with the capacities written into the header.
    pub fn allocate(&self) -> Vec<f32> {
        let mut buf = vec![0.0; self.buffer_total_floats];
        buf[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        buf[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf
    }

    /// Write one frame into `buf` (allocated by `allocate`). Instances and
    /// lights beyond capacity are dropped with a warning.
    pub fn write_frame(&self, buf: &mut [f32], frame_counter: u64, frame: &FrameData) {
        debug_assert_eq!(buf.len(), self.buffer_total_floats);

        let instance_count = frame.instances.len().min(self.max_instances);
        if instance_count < frame.instances.len() {
            log::warn!(
                "protocol: {} instances exceed capacity {}",
                frame.instances.len(),
                self.max_instances
            );
        }
        let lights = frame.lighting.as_floats();
        let light_count = frame.lighting.count().min(self.max_lights);

        buf[HEADER_FRAME_COUNTER] = frame_counter as f32;
        buf[HEADER_INSTANCE_COUNT] = instance_count as f32;
        buf[HEADER_LIGHT_COUNT] = light_count as f32;
        let [r, g, b] = frame.clear_color;
        buf[HEADER_CLEAR_R] = r;
        buf[HEADER_CLEAR_G] = g;
        buf[HEADER_CLEAR_B] = b;
        let [r, g, b] = frame.lighting.ambient();
        buf[HEADER_AMBIENT_R] = r;
        buf[HEADER_AMBIENT_G] = g;
        buf[HEADER_AMBIENT_B] = b;

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref::<CameraUniform>(&frame.camera));
        buf[self.camera_offset..self.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

        let instances: &[f32] = bytemuck::cast_slice(&frame.instances[..instance_count]);
        buf[self.instance_data_offset..self.instance_data_offset + instances.len()].copy_from_slice(instances);

        let lights = &lights[..light_count * LIGHT_FLOATS];
        buf[self.light_data_offset..self.light_data_offset + lights.len()].copy_from_slice(lights);
    }
}
