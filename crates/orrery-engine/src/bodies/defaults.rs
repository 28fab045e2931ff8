//! Default solar system, the collection the engine starts with.
//!
//! Distances and sizes are exaggerated for readability, not to scale.

use crate::bodies::descriptor::{BodyDescriptor, Color, Emission, RingSpec};

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_ID: &str = "sun";
pub const SUN_RADIUS: f32 = 5.0;
pub const SUN_COLOR: u32 = 0xFDB813;
pub const SUN_EMISSIVE_INTENSITY: f32 = 1.0;
pub const SUN_ROTATION_SPEED: f32 = 0.001;

// ── Saturn's rings ───────────────────────────────────────────────────

pub const SATURN_RING_INNER: f32 = 2.7;
pub const SATURN_RING_OUTER: f32 = 5.0;
pub const SATURN_RING_COLOR: u32 = 0xA59377;

/// Sun plus the eight planets, in build order.
pub fn default_bodies() -> Vec<BodyDescriptor> {
    let sun_color = Color::from_hex(SUN_COLOR);
    vec![
        BodyDescriptor::star(
            SUN_ID,
            "Sun",
            SUN_RADIUS,
            sun_color,
            Emission { color: sun_color, intensity: SUN_EMISSIVE_INTENSITY },
            SUN_ROTATION_SPEED,
        ),
        //                    id         name       radius color                      spin   dist  speed
        BodyDescriptor::planet("mercury", "Mercury", 0.38, Color::from_hex(0xB5B5B5), 0.004, 10.0, 0.02),
        BodyDescriptor::planet("venus",   "Venus",   0.95, Color::from_hex(0xE6C073), 0.002, 15.0, 0.015),
        BodyDescriptor::planet("earth",   "Earth",   1.0,  Color::from_hex(0x4B77BE), 0.01,  20.0, 0.01),
        BodyDescriptor::planet("mars",    "Mars",    0.53, Color::from_hex(0xC1440E), 0.008, 25.0, 0.008),
        BodyDescriptor::planet("jupiter", "Jupiter", 2.5,  Color::from_hex(0xE3A857), 0.04,  35.0, 0.006),
        BodyDescriptor::planet("saturn",  "Saturn",  2.2,  Color::from_hex(0xC9AB68), 0.038, 45.0, 0.005)
            .with_rings(RingSpec {
                inner_radius: SATURN_RING_INNER,
                outer_radius: SATURN_RING_OUTER,
                color: Color::from_hex(SATURN_RING_COLOR),
            }),
        BodyDescriptor::planet("uranus",  "Uranus",  1.8,  Color::from_hex(0x75CEE5), 0.03,  55.0, 0.004),
        BodyDescriptor::planet("neptune", "Neptune", 1.7,  Color::from_hex(0x3D56B2), 0.032, 65.0, 0.003),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::registry::validate_collection;

    #[test]
    fn defaults_are_valid() {
        let bodies = default_bodies();
        assert_eq!(bodies.len(), 9);
        assert!(validate_collection(&bodies).is_ok());
    }

    #[test]
    fn sun_comes_first_and_is_central() {
        let bodies = default_bodies();
        assert_eq!(bodies[0].id, SUN_ID);
        assert!(bodies[0].is_central());
        assert!(bodies[1..].iter().all(|b| b.orbit_distance > 0.0));
    }

    #[test]
    fn only_saturn_has_rings() {
        let ringed: Vec<_> = default_bodies()
            .into_iter()
            .filter(|b| b.rings.is_some())
            .map(|b| b.id.0)
            .collect();
        assert_eq!(ringed, vec!["saturn".to_string()]);
    }
}
