//! Click-to-select: pointer position to body id via a camera ray.
//!
//! Only body spheres are candidates. Rings, orbit guides and the starfield
//! never block or win a pick.

use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::builder::SceneBinding;

/// Host element rectangle in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle at the client origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Convert a client-space pointer position to normalized device coordinates.
///
/// NDC range: [-1, 1] where:
/// - X: -1 = left edge, +1 = right edge
/// - Y: +1 = top edge, -1 = bottom edge (screen y grows down)
///
/// Returns `None` for a degenerate rectangle.
pub fn pointer_to_ndc(x: f32, y: f32, rect: &ViewportRect) -> Option<Vec2> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (x - rect.left) / rect.width * 2.0 - 1.0,
        -((y - rect.top) / rect.height) * 2.0 + 1.0,
    ))
}

/// A ray hit on a body.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    /// Distance from the camera along the ray.
    pub distance: f32,
}

/// Nearest body under the pointer, if any.
pub fn pick(
    x: f32,
    y: f32,
    rect: &ViewportRect,
    camera: &PerspectiveCamera,
    scene: &Scene,
    binding: &SceneBinding,
) -> Option<PickHit> {
    let ndc = pointer_to_ndc(x, y, rect)?;
    let ray = camera.ray_from_ndc(ndc);

    let mut best: Option<PickHit> = None;
    for bound in binding.bodies() {
        let Some(world) = scene.world_matrix(bound.primitive) else {
            continue;
        };
        let (scale, _, center) = world.to_scale_rotation_translation();
        let radius = bound.radius * scale.max_element();
        let Some(distance) = ray.intersect_sphere(center, radius) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(PickHit {
                body: bound.body.clone(),
                distance,
            });
        }
    }

    if let Some(hit) = &best {
        log::debug!("pick: {} at {:.2}", hit.body, hit.distance);
    }
    best
}

/// Body id under the pointer, or `None` for empty space.
pub fn resolve(
    x: f32,
    y: f32,
    rect: &ViewportRect,
    camera: &PerspectiveCamera,
    scene: &Scene,
    binding: &SceneBinding,
) -> Option<BodyId> {
    pick(x, y, rect, camera, scene, binding).map(|hit| hit.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::bodies::defaults::default_bodies;
    use crate::bodies::descriptor::{BodyDescriptor, Color, Emission};
    use crate::renderer::headless::HeadlessRenderer;
    use crate::systems::builder::{SceneBuilder, SceneStyle};

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, W / H, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 30.0, 80.0);
        cam
    }

    /// Client coordinates of a world point.
    fn screen_of(cam: &PerspectiveCamera, rect: &ViewportRect, p: Vec3) -> (f32, f32) {
        let ndc = cam.project(p);
        (
            rect.left + (ndc.x + 1.0) / 2.0 * rect.width,
            rect.top + (1.0 - ndc.y) / 2.0 * rect.height,
        )
    }

    fn built(bodies: &[BodyDescriptor]) -> (Scene, SceneBinding) {
        let style = SceneStyle::default();
        let mut scene = Scene::new();
        let mut renderer = HeadlessRenderer::new();
        let binding = SceneBuilder::new(&style).build(None, bodies, 1, &mut scene, &mut renderer);
        (scene, binding)
    }

    #[test]
    fn ndc_corners_and_center() {
        let rect = ViewportRect::new(100.0, 50.0, W, H);
        assert_eq!(pointer_to_ndc(100.0, 50.0, &rect), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(900.0, 650.0, &rect), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(500.0, 350.0, &rect), Some(Vec2::ZERO));
        assert_eq!(pointer_to_ndc(0.0, 0.0, &ViewportRect::sized(0.0, H)), None);
    }

    #[test]
    fn click_on_body_returns_its_id() {
        let (scene, binding) = built(&default_bodies());
        let cam = camera();
        let rect = ViewportRect::new(10.0, 20.0, W, H);

        let (x, y) = screen_of(&cam, &rect, Vec3::new(20.0, 0.0, 0.0));
        let hit = resolve(x, y, &rect, &cam, &scene, &binding);
        assert_eq!(hit, Some(BodyId::new("earth")));

        let (x, y) = screen_of(&cam, &rect, Vec3::ZERO);
        assert_eq!(resolve(x, y, &rect, &cam, &scene, &binding), Some(BodyId::new("sun")));
    }

    #[test]
    fn empty_space_returns_none() {
        let (scene, binding) = built(&default_bodies());
        let cam = camera();
        let rect = ViewportRect::sized(W, H);
        // Top-left corner looks at the sky.
        assert_eq!(resolve(1.0, 1.0, &rect, &cam, &scene, &binding), None);
    }

    #[test]
    fn nearest_of_overlapping_bodies_wins() {
        // Two bodies on the line of sight; the closer one must win.
        let sun = BodyDescriptor::star(
            "sun",
            "Sun",
            1.0,
            Color::WHITE,
            Emission { color: Color::WHITE, intensity: 1.0 },
            0.0,
        );
        let near = BodyDescriptor::planet("near", "Near", 2.0, Color::WHITE, 0.0, 40.0, 0.1);
        let far = BodyDescriptor::planet("far", "Far", 2.0, Color::WHITE, 0.0, 10.0, 0.1);
        let (mut scene, binding) = built(&[sun, far, near]);

        // Put both on the z axis in front of a camera looking down -z.
        for (id, z) in [("near", 40.0), ("far", 10.0)] {
            let prim = binding.get(&BodyId::new(id)).unwrap().primitive;
            scene.get_mut(prim).unwrap().transform.translation = Vec3::new(0.0, 0.0, z);
        }
        let mut cam = PerspectiveCamera::new(75.0, W / H, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 0.0, 80.0);
        let rect = ViewportRect::sized(W, H);

        let hit = pick(W / 2.0, H / 2.0, &rect, &cam, &scene, &binding).unwrap();
        assert_eq!(hit.body, BodyId::new("near"));
        assert!((hit.distance - 38.0).abs() < 1e-3);
    }

    #[test]
    fn rings_are_not_pickable() {
        let (scene, binding) = built(&default_bodies());
        let cam = camera();
        let rect = ViewportRect::sized(W, H);
        // Saturn sits at (45, 0, 0); a point on its ring just outside the sphere.
        let (x, y) = screen_of(&cam, &rect, Vec3::new(45.0 + 4.5, 0.0, 0.0));
        let hit = resolve(x, y, &rect, &cam, &scene, &binding);
        assert_ne!(hit, Some(BodyId::new("saturn")));
    }
}
