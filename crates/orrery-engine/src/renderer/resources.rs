//! GPU-resident resource descriptors and handles.
//!
//! The engine never touches GPU memory itself: it asks the `Renderer` to
//! allocate a geometry or material from a descriptor and keeps the returned
//! handle. Every handle must be disposed exactly once.

use glam::Vec3;
use serde::Serialize;

use crate::bodies::descriptor::Color;

/// Handle to a renderer-owned geometry buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GeometryHandle(pub u32);

/// Handle to a renderer-owned material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MaterialHandle(pub u32);

/// Shape to tessellate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GeometryDesc {
    /// UV sphere centred on the local origin.
    #[serde(rename_all = "camelCase")]
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Flat annulus in the local XY plane.
    #[serde(rename_all = "camelCase")]
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
    /// Point cloud, one vertex per point.
    Points { positions: Vec<[f32; 3]> },
}

impl GeometryDesc {
    pub fn points(positions: &[Vec3]) -> Self {
        GeometryDesc::Points {
            positions: positions.iter().map(|p| p.to_array()).collect(),
        }
    }

    /// Bounding-sphere radius around the local origin.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            GeometryDesc::Sphere { radius, .. } => *radius,
            GeometryDesc::Ring { outer_radius, .. } => *outer_radius,
            GeometryDesc::Points { positions } => positions
                .iter()
                .map(|p| Vec3::from_array(*p).length())
                .fold(0.0, f32::max),
        }
    }
}

/// Which face(s) of a primitive are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKind {
    /// Lit by scene lights (diffuse/specular).
    Standard,
    /// Unlit flat color.
    Basic,
    /// Screen-facing points.
    Points,
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDesc {
    pub kind: MaterialKind,
    pub color: Color,
    /// Self-illumination color; black means none.
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
    /// Point size in world units (points materials only).
    pub point_size: f32,
}

impl MaterialDesc {
    pub fn standard(color: Color) -> Self {
        Self {
            kind: MaterialKind::Standard,
            color,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            point_size: 0.0,
        }
    }

    pub fn emissive(color: Color, emissive: Color, intensity: f32) -> Self {
        Self {
            emissive,
            emissive_intensity: intensity,
            ..Self::standard(color)
        }
    }

    pub fn basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::Basic,
            ..Self::standard(color)
        }
    }

    pub fn points(color: Color, size: f32) -> Self {
        Self {
            kind: MaterialKind::Points,
            point_size: size,
            transparent: true,
            ..Self::standard(color)
        }
    }

    /// Semi-transparent with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }
}
