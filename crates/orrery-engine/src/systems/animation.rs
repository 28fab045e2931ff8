//! Orbital kinematics.
//!
//! Orbits are circular and parameterised by absolute elapsed time, never
//! integrated: the angle at time `t` is `t × orbitSpeed`, so a speed edit
//! takes effect on the next frame and frame timing cannot cause drift.
//! Angles are evaluated in f64; elapsed seconds since the epoch are large.

use std::f64::consts::TAU;

use glam::Vec3;

use crate::bodies::descriptor::BodyDescriptor;
use crate::core::scene::Scene;
use crate::systems::builder::SceneBinding;

/// Angular position in [0, 2π) after `elapsed` seconds.
pub fn orbital_angle(elapsed: f64, orbit_speed: f32) -> f64 {
    (elapsed * orbit_speed as f64).rem_euclid(TAU)
}

/// Position on a circle of radius `distance` in the XZ plane.
pub fn orbital_position(distance: f32, angle: f64) -> Vec3 {
    let d = distance as f64;
    Vec3::new((d * angle.cos()) as f32, 0.0, (d * angle.sin()) as f32)
}

/// Spin one step. Kept in [0, 2π).
pub fn advance_rotation(angle: f32, rotation_speed: f32) -> f32 {
    (angle + rotation_speed).rem_euclid(std::f32::consts::TAU)
}

/// Write this frame's transforms into the scene: spin every bound body and
/// place every orbiting body from absolute time.
pub fn animate(bodies: &[BodyDescriptor], binding: &SceneBinding, scene: &mut Scene, elapsed: f64) {
    for body in bodies {
        let Some(bound) = binding.get(&body.id) else {
            continue;
        };
        let Some(node) = scene.get_mut(bound.primitive) else {
            continue;
        };

        let rotation = &mut node.transform.rotation;
        rotation.y = advance_rotation(rotation.y, body.rotation_speed);

        if !body.is_central() {
            let angle = orbital_angle(elapsed, body.orbit_speed);
            node.transform.translation = orbital_position(body.orbit_distance, angle);
        }
    }
}
