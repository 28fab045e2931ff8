use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// A ray in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere, if
    /// any lies in front of the origin.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere.
        let far = -b + sqrt_d;
        (far >= 0.0).then_some(far)
    }
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// Eye position (xyz) + padding.
    pub eye: [f32; 4],
}

/// Perspective camera looking at a target point.
///
/// The projection matrix is cached; changing any lens parameter marks it
/// dirty and `update_projection_matrix` recomputes it.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    aspect: f32,
    projection: Mat4,
    projection_dirty: bool,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Change the aspect ratio (width / height) and mark the projection stale.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.projection_dirty = true;
        }
    }

    pub fn needs_projection_update(&self) -> bool {
        self.projection_dirty
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far);
        self.projection_dirty = false;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates ([-1, 1] on both axes, y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        Ray::new(self.position, far - self.position)
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 30.0, 80.0);
        cam
    }

    #[test]
    fn set_aspect_marks_projection_dirty() {
        let mut cam = camera();
        assert!(!cam.needs_projection_update());
        cam.set_aspect(1.0);
        assert!(cam.needs_projection_update());
        cam.update_projection_matrix();
        assert!(!cam.needs_projection_update());
        assert_eq!(cam.aspect(), 1.0);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = camera();
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert!((cam.aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert!(!cam.needs_projection_update());
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let ndc = cam.project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
    }

    #[test]
    fn ray_through_projected_point_hits_it() {
        let cam = camera();
        let point = Vec3::new(20.0, 0.0, 0.0);
        let ndc = cam.project(point);
        let ray = cam.ray_from_ndc(ndc.truncate());
        assert!(ray.intersect_sphere(point, 0.5).is_some());
    }

    #[test]
    fn sphere_intersection_distances() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        // Behind the origin
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
        // Origin inside
        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        assert!((inside.intersect_sphere(Vec3::ZERO, 3.0).unwrap() - 3.0).abs() < 1e-5);
    }
}
