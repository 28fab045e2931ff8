//! Point lights and ambient term for the lit materials.
//!
//! The scene carries one light per emissive body (the central star). Its
//! position is taken from the owning scene node every frame, so a light
//! always sits where its body is.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::bodies::descriptor::Color;

/// A 3D point light with position, color, intensity and falloff range.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light has no effect; 0 means infinite.
    pub range: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Active lights and ambient color for the scene.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: [1.0, 1.0, 1.0],
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color (default: white = no darkening).
    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = color.to_array();
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Flat float view for the shared buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lights)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Floats per point light on the wire.
pub const LIGHT_FLOATS: usize = 8;
