use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::api::types::PrimitiveId;
use crate::renderer::resources::{GeometryHandle, MaterialHandle};

/// What a scene node represents. Picking only ever looks at `Body` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Body,
    Ring,
    OrbitGuide,
    Starfield,
    Light,
}

/// Local transform relative to the parent node (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles (radians), applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

/// One node of the scene graph. Drawable when it carries both a geometry and
/// a material.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: PrimitiveId,
    pub kind: NodeKind,
    pub parent: Option<PrimitiveId>,
    pub transform: Transform,
    pub geometry: Option<GeometryHandle>,
    pub material: Option<MaterialHandle>,
}

impl Node {
    pub fn new(id: PrimitiveId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            parent: None,
            transform: Transform::default(),
            geometry: None,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_parent(mut self, parent: PrimitiveId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, geometry: GeometryHandle, material: MaterialHandle) -> Self {
        self.geometry = Some(geometry);
        self.material = Some(material);
        self
    }

    pub fn is_drawable(&self) -> bool {
        self.geometry.is_some() && self.material.is_some()
    }
}

/// Scene graph storage using a flat Vec with parent links.
/// Designed for small node counts (tens, not millions).
pub struct Scene {
    nodes: Vec<Node>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generate the next unique primitive ID.
    pub fn next_id(&mut self) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) -> PrimitiveId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Remove a node and all of its descendants. Returns the removed nodes,
    /// parent first.
    pub fn despawn(&mut self, id: PrimitiveId) -> Vec<Node> {
        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(idx) = self.nodes.iter().position(|n| n.id == current) {
                let node = self.nodes.remove(idx);
                pending.extend(self.nodes.iter().filter(|n| n.parent == Some(current)).map(|n| n.id));
                removed.push(node);
            }
        }
        removed
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: PrimitiveId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn children(&self, id: PrimitiveId) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.parent == Some(id))
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// World matrix: parent chain composed root-first.
    pub fn world_matrix(&self, id: PrimitiveId) -> Option<Mat4> {
        let mut node = self.get(id)?;
        let mut matrix = node.transform.matrix();
        while let Some(parent_id) = node.parent {
            node = self.get(parent_id)?;
            matrix = node.transform.matrix() * matrix;
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: PrimitiveId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.w_axis.truncate())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.next_id();
        scene.spawn(Node::new(id, NodeKind::Body).with_translation(Vec3::new(10.0, 0.0, 0.0)));
        let n = scene.get(id).unwrap();
        assert_eq!(n.transform.translation, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn despawn_removes_descendants() {
        let mut scene = Scene::new();
        let body = scene.next_id();
        let ring = scene.next_id();
        let other = scene.next_id();
        scene.spawn(Node::new(body, NodeKind::Body));
        scene.spawn(Node::new(ring, NodeKind::Ring).with_parent(body));
        scene.spawn(Node::new(other, NodeKind::OrbitGuide));

        let removed = scene.despawn(body);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].id, body);
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(other));
    }

    #[test]
    fn child_inherits_parent_translation() {
        let mut scene = Scene::new();
        let body = scene.next_id();
        let light = scene.next_id();
        scene.spawn(Node::new(body, NodeKind::Body).with_translation(Vec3::new(5.0, 0.0, 0.0)));
        scene.spawn(
            Node::new(light, NodeKind::Light)
                .with_parent(body)
                .with_translation(Vec3::new(0.0, 1.0, 0.0)),
        );
        let pos = scene.world_position(light).unwrap();
        assert!((pos - Vec3::new(5.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn transform_rotation_about_x() {
        let t = Transform {
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
            ..Default::default()
        };
        // A ring lying in local XY ends up in world XZ.
        let p = t.matrix().transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn drawable_requires_mesh() {
        let node = Node::new(PrimitiveId(1), NodeKind::Light);
        assert!(!node.is_drawable());
        let node = Node::new(PrimitiveId(2), NodeKind::Body).with_mesh(GeometryHandle(1), MaterialHandle(1));
        assert!(node.is_drawable());
    }
}
