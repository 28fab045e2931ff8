use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::camera::PerspectiveCamera;

/// Orbit-controls tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per frame when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 0.7,
            zoom_speed: 0.8,
            min_distance: 20.0,
            max_distance: 150.0,
        }
    }
}

/// Keeps the polar angle off the poles so `look_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-6;
/// Rotation below this is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit camera controller: spherical coordinates around a target.
///
/// Pointer drags and wheel ticks accumulate pending deltas; `update` applies
/// them to the camera once per frame. With damping on, each update applies a
/// fraction of the pending rotation and decays the rest, so motion eases out
/// over the following frames.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub config: ControlsConfig,
    target: Vec3,
    /// Pending azimuth change (radians).
    delta_theta: f32,
    /// Pending polar change (radians).
    delta_phi: f32,
    /// Pending distance multiplier.
    scale: f32,
    /// Element height in CSS pixels; drag distance is relative to it.
    element_height: f32,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            target: Vec3::ZERO,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            element_height: 1.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the pivot. The camera keeps its position and turns to face it on
    /// the next update.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_element_height(&mut self, height: f32) {
        if height > 0.0 {
            self.element_height = height;
        }
    }

    /// Rotate by a pointer drag of (dx, dy) CSS pixels.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32) {
        let per_pixel = TAU / self.element_height * self.config.rotate_speed;
        self.delta_theta -= dx * per_pixel;
        self.delta_phi -= dy * per_pixel;
    }

    /// Zoom by one wheel event. Negative delta (scroll up) moves closer.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.config.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Whether rotation is still easing out.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > SETTLE_EPSILON || self.delta_phi.abs() > SETTLE_EPSILON
    }

    /// Apply one step to the camera. Returns true if pending input was applied.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let active = self.is_moving() || (self.scale - 1.0).abs() > f32::EPSILON;
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let fraction = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };
        theta += self.delta_theta * fraction;
        phi = (phi + self.delta_phi * fraction).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.scale).clamp(self.config.min_distance, self.config.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + new_offset;
        camera.look_at(self.target);

        if self.config.enable_damping {
            self.delta_theta *= 1.0 - self.config.damping_factor;
            self.delta_phi *= 1.0 - self.config.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        active
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 30.0, 80.0);
        cam
    }

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        let moved = controls.update(&mut cam);
        assert!(!moved);
        assert!((cam.position - Vec3::new(0.0, 30.0, 80.0)).length() < 1e-3);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn distance_is_clamped() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        for _ in 0..200 {
            controls.zoom_by_wheel(-100.0);
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - 20.0).abs() < 1e-3);
        for _ in 0..200 {
            controls.zoom_by_wheel(100.0);
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn damped_rotation_eases_out() {
        let mut controls = OrbitControls::default();
        controls.set_element_height(600.0);
        let mut cam = camera();
        controls.rotate_by_pixels(100.0, 0.0);

        let start = cam.position;
        controls.update(&mut cam);
        let first_step = (cam.position - start).length();
        assert!(first_step > 0.0);
        assert!(controls.is_moving());

        let before = cam.position;
        controls.update(&mut cam);
        let second_step = (cam.position - before).length();
        assert!(second_step < first_step);

        // Distance to the target never changes while rotating.
        assert!((cam.position.length() - start.length()).abs() < 1e-2);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut controls = OrbitControls::new(ControlsConfig {
            enable_damping: false,
            ..Default::default()
        });
        controls.set_element_height(600.0);
        let mut cam = camera();
        controls.rotate_by_pixels(50.0, 0.0);
        assert!(controls.update(&mut cam));
        assert!(!controls.is_moving());
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn polar_angle_never_reaches_pole() {
        let mut controls = OrbitControls::new(ControlsConfig {
            enable_damping: false,
            ..Default::default()
        });
        controls.set_element_height(100.0);
        let mut cam = camera();
        controls.rotate_by_pixels(0.0, 1000.0);
        controls.update(&mut cam);
        let offset = cam.position - controls.target();
        assert!(offset.x.abs() + offset.z.abs() > 0.0);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn retarget_keeps_position() {
        let mut controls = OrbitControls::default();
        let mut cam = camera();
        controls.set_target(Vec3::new(20.0, 0.0, 0.0));
        controls.update(&mut cam);
        assert_eq!(cam.target, Vec3::new(20.0, 0.0, 0.0));
        assert!((cam.position - Vec3::new(0.0, 30.0, 80.0)).length() < 1e-3);
    }
}
