//! Celestial body descriptors, the authoritative data model.
//!
//! Serialized with camelCase keys so saved configurations stay readable by
//! the TypeScript UI. Colors travel as `#RRGGBB` strings.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::error::RegistryError;

/// Linear RGB color (0.0–1.0 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color: {s}"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Self-illumination of the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    pub color: Color,
    pub intensity: f32,
}

/// Flat annulus around a ringed body, in body-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Color,
}

/// One celestial body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub id: BodyId,
    pub name: String,
    /// Visual radius.
    pub radius: f32,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Emission>,
    /// Radians added to the spin angle every frame.
    pub rotation_speed: f32,
    /// Distance from the origin; zero only for the central body.
    pub orbit_distance: f32,
    /// Radians per second of wall-clock time; zero for the central body.
    pub orbit_speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<RingSpec>,
}

impl BodyDescriptor {
    /// A non-central body with no rings.
    pub fn planet(
        id: &str,
        name: &str,
        radius: f32,
        color: Color,
        rotation_speed: f32,
        orbit_distance: f32,
        orbit_speed: f32,
    ) -> Self {
        Self {
            id: BodyId::new(id),
            name: name.to_string(),
            radius,
            color,
            emissive: None,
            rotation_speed,
            orbit_distance,
            orbit_speed,
            rings: None,
        }
    }

    /// A central body sitting at the origin.
    pub fn star(id: &str, name: &str, radius: f32, color: Color, emission: Emission, rotation_speed: f32) -> Self {
        Self {
            id: BodyId::new(id),
            name: name.to_string(),
            radius,
            color,
            emissive: Some(emission),
            rotation_speed,
            orbit_distance: 0.0,
            orbit_speed: 0.0,
            rings: None,
        }
    }

    pub fn with_rings(mut self, rings: RingSpec) -> Self {
        self.rings = Some(rings);
        self
    }

    /// The central body is the one that does not orbit.
    pub fn is_central(&self) -> bool {
        self.orbit_distance == 0.0 && self.orbit_speed == 0.0
    }

    /// Check the descriptor's own invariants (not collection-level ones).
    pub fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |property: &'static str, reason: &str| RegistryError::InvalidValue {
            body: self.id.to_string(),
            property,
            reason: reason.to_string(),
        };

        if self.id.as_str().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius", "must be a positive number"));
        }
        if !(self.rotation_speed.is_finite() && self.rotation_speed >= 0.0) {
            return Err(invalid("rotationSpeed", "must be non-negative"));
        }
        if !(self.orbit_distance.is_finite() && self.orbit_distance >= 0.0) {
            return Err(invalid("orbitDistance", "must be non-negative"));
        }
        if !(self.orbit_speed.is_finite() && self.orbit_speed >= 0.0) {
            return Err(invalid("orbitSpeed", "must be non-negative"));
        }
        if self.orbit_distance == 0.0 && self.orbit_speed != 0.0 {
            return Err(invalid("orbitDistance", "an orbiting body needs a positive distance"));
        }
        if let Some(emission) = &self.emissive {
            if !(emission.intensity.is_finite() && emission.intensity >= 0.0) {
                return Err(invalid("emissiveIntensity", "must be non-negative"));
            }
        }
        if let Some(rings) = &self.rings {
            if !(rings.inner_radius < rings.outer_radius) {
                return Err(invalid("rings", "inner radius must be below outer radius"));
            }
            if !(rings.inner_radius > self.radius) {
                return Err(invalid("rings", "rings must clear the body radius"));
            }
        }
        Ok(())
    }
}
