use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::types::BodyId;
use crate::bodies::descriptor::{BodyDescriptor, Color, Emission, RingSpec};
use crate::error::RegistryError;

/// Editable descriptor fields, named as the property editor names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyProperty {
    Name,
    Radius,
    Color,
    RotationSpeed,
    OrbitDistance,
    OrbitSpeed,
    EmissiveIntensity,
    RingsInnerRadius,
    RingsOuterRadius,
    RingsColor,
}

impl BodyProperty {
    pub fn name(self) -> &'static str {
        match self {
            BodyProperty::Name => "name",
            BodyProperty::Radius => "radius",
            BodyProperty::Color => "color",
            BodyProperty::RotationSpeed => "rotationSpeed",
            BodyProperty::OrbitDistance => "orbitDistance",
            BodyProperty::OrbitSpeed => "orbitSpeed",
            BodyProperty::EmissiveIntensity => "emissiveIntensity",
            BodyProperty::RingsInnerRadius => "ringsInnerRadius",
            BodyProperty::RingsOuterRadius => "ringsOuterRadius",
            BodyProperty::RingsColor => "ringsColor",
        }
    }
}

impl FromStr for BodyProperty {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => BodyProperty::Name,
            "radius" => BodyProperty::Radius,
            "color" => BodyProperty::Color,
            "rotationSpeed" => BodyProperty::RotationSpeed,
            "orbitDistance" => BodyProperty::OrbitDistance,
            "orbitSpeed" => BodyProperty::OrbitSpeed,
            "emissiveIntensity" => BodyProperty::EmissiveIntensity,
            "ringsInnerRadius" => BodyProperty::RingsInnerRadius,
            "ringsOuterRadius" => BodyProperty::RingsOuterRadius,
            "ringsColor" => BodyProperty::RingsColor,
            other => return Err(RegistryError::UnknownProperty(other.to_string())),
        })
    }
}

/// A value written by the property editor.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f32),
    Text(String),
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

/// What changed in the registry. Drained by the engine to drive reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryChange {
    /// The whole collection was swapped (configuration load).
    Replaced,
    /// A single field on a single body was patched.
    PropertyChanged { body: BodyId, property: BodyProperty },
}

/// Ordered collection of body descriptors.
///
/// Single writer (the editing UI through the engine), many readers (scene
/// builder, animation). Edits are copy-on-write on the shared `Arc`, so a
/// snapshot handed to a store never observes later edits.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Arc<Vec<BodyDescriptor>>,
    version: u64,
    changes: Vec<RegistryChange>,
}

impl BodyRegistry {
    /// Create a registry from a validated collection.
    pub fn new(bodies: Vec<BodyDescriptor>) -> Result<Self, RegistryError> {
        validate_collection(&bodies)?;
        Ok(Self {
            bodies: Arc::new(bodies),
            version: 0,
            changes: Vec::new(),
        })
    }

    /// Monotonic counter, bumped on every successful change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Cheap shared handle to the current collection.
    pub fn snapshot(&self) -> Arc<Vec<BodyDescriptor>> {
        Arc::clone(&self.bodies)
    }

    pub fn bodies(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.bodies.iter()
    }

    pub fn get(&self, id: &BodyId) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.get(id).is_some()
    }

    /// The body sitting at the origin. Always present in a valid collection.
    pub fn central(&self) -> Option<&BodyDescriptor> {
        self.bodies.iter().find(|b| b.is_central())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Replace one field on one body. The patched collection is validated
    /// before it is committed; on error nothing changes.
    pub fn set_property(
        &mut self,
        id: &BodyId,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), RegistryError> {
        let property: BodyProperty = property.parse()?;
        let index = self
            .bodies
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| RegistryError::UnknownBody(id.to_string()))?;

        let mut patched = self.bodies[index].clone();
        apply_property(&mut patched, property, value)?;
        patched.validate()?;
        let was_central = self.bodies[index].is_central();
        if was_central != patched.is_central() {
            // Exactly one body may sit at the origin.
            return Err(RegistryError::InvalidValue {
                body: id.to_string(),
                property: property.name(),
                reason: if was_central {
                    "the central body cannot be given an orbit".to_string()
                } else {
                    "an orbiting body needs a positive orbit distance".to_string()
                },
            });
        }

        Arc::make_mut(&mut self.bodies)[index] = patched;
        self.version += 1;
        self.changes.push(RegistryChange::PropertyChanged {
            body: id.clone(),
            property,
        });
        log::debug!("registry: {}.{} updated (v{})", id, property.name(), self.version);
        Ok(())
    }

    /// Swap the whole collection (e.g. after loading a saved configuration).
    pub fn replace_all(&mut self, bodies: Vec<BodyDescriptor>) -> Result<(), RegistryError> {
        validate_collection(&bodies)?;
        self.bodies = Arc::new(bodies);
        self.version += 1;
        self.changes.push(RegistryChange::Replaced);
        log::info!("registry: replaced with {} bodies (v{})", self.bodies.len(), self.version);
        Ok(())
    }

    /// Take pending change notifications.
    pub fn drain_changes(&mut self) -> Vec<RegistryChange> {
        std::mem::take(&mut self.changes)
    }
}

fn number(property: BodyProperty, value: &PropertyValue) -> Result<f32, RegistryError> {
    match value {
        PropertyValue::Number(v) => Ok(*v),
        PropertyValue::Text(_) => Err(RegistryError::WrongType {
            property: property.name(),
            expected: "number",
        }),
    }
}

fn text(property: BodyProperty, value: PropertyValue) -> Result<String, RegistryError> {
    match value {
        PropertyValue::Text(s) => Ok(s),
        PropertyValue::Number(_) => Err(RegistryError::WrongType {
            property: property.name(),
            expected: "text",
        }),
    }
}

fn color(body: &BodyDescriptor, property: BodyProperty, value: PropertyValue) -> Result<Color, RegistryError> {
    let s = text(property, value)?;
    Color::parse(&s).ok_or_else(|| RegistryError::InvalidValue {
        body: body.id.to_string(),
        property: property.name(),
        reason: format!("not a #RRGGBB color: {s}"),
    })
}

fn rings_mut<'a>(body: &'a mut BodyDescriptor, property: BodyProperty) -> Result<&'a mut RingSpec, RegistryError> {
    let id = body.id.to_string();
    body.rings.as_mut().ok_or(RegistryError::InvalidValue {
        body: id,
        property: property.name(),
        reason: "body has no rings".to_string(),
    })
}

fn apply_property(
    body: &mut BodyDescriptor,
    property: BodyProperty,
    value: PropertyValue,
) -> Result<(), RegistryError> {
    match property {
        BodyProperty::Name => body.name = text(property, value)?,
        BodyProperty::Radius => body.radius = number(property, &value)?,
        BodyProperty::Color => body.color = color(body, property, value)?,
        BodyProperty::RotationSpeed => body.rotation_speed = number(property, &value)?,
        BodyProperty::OrbitDistance => body.orbit_distance = number(property, &value)?,
        BodyProperty::OrbitSpeed => body.orbit_speed = number(property, &value)?,
        BodyProperty::EmissiveIntensity => {
            if !body.is_central() {
                return Err(RegistryError::InvalidValue {
                    body: body.id.to_string(),
                    property: property.name(),
                    reason: "only the central body emits".to_string(),
                });
            }
            let intensity = number(property, &value)?;
            let base = body.color;
            let emission = body.emissive.get_or_insert(Emission { color: base, intensity });
            emission.intensity = intensity;
        }
        BodyProperty::RingsInnerRadius => {
            let v = number(property, &value)?;
            rings_mut(body, property)?.inner_radius = v;
        }
        BodyProperty::RingsOuterRadius => {
            let v = number(property, &value)?;
            rings_mut(body, property)?.outer_radius = v;
        }
        BodyProperty::RingsColor => {
            let c = color(body, property, value)?;
            rings_mut(body, property)?.color = c;
        }
    }
    Ok(())
}

/// Collection-level invariants: non-empty, unique ids, exactly one central
/// body, every descriptor well-formed.
pub fn validate_collection(bodies: &[BodyDescriptor]) -> Result<(), RegistryError> {
    if bodies.is_empty() {
        return Err(RegistryError::Empty);
    }
    let mut seen = HashSet::with_capacity(bodies.len());
    for body in bodies {
        if !seen.insert(&body.id) {
            return Err(RegistryError::DuplicateId(body.id.to_string()));
        }
        body.validate()?;
    }
    let central = bodies.iter().filter(|b| b.is_central()).count();
    if central != 1 {
        return Err(RegistryError::CentralBodyCount(central));
    }
    Ok(())
}
