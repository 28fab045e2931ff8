use crate::bodies::descriptor::Color;
use crate::core::scene::Scene;
use crate::renderer::instance::{DrawInstance, RenderBuffer};
use crate::systems::builder::SceneBinding;
use crate::systems::lighting::LightState;

/// Build the draw list from the scene: one instance per drawable node, in
/// scene order, carrying its world matrix.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    for node in scene.iter() {
        if !node.is_drawable() {
            continue;
        }
        let (Some(geometry), Some(material)) = (node.geometry, node.material) else {
            continue;
        };
        let Some(world) = scene.world_matrix(node.id) else {
            continue;
        };
        buffer.push(DrawInstance::new(world, geometry, material));
    }
}

/// Refresh the light list: each bound light sits at its node's current
/// world position.
pub fn collect_lights(scene: &Scene, binding: Option<&SceneBinding>, ambient: Color, lights: &mut LightState) {
    lights.clear();
    lights.set_ambient(ambient);
    let Some(binding) = binding else {
        return;
    };
    for (node, light) in binding.lights() {
        if let Some(pos) = scene.world_position(*node) {
            lights.add(light.with_pos(pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use crate::api::types::BodyId;
    use crate::bodies::defaults::default_bodies;
    use crate::core::scene::NodeKind;
    use crate::renderer::headless::HeadlessRenderer;
    use crate::systems::builder::{SceneBuilder, SceneStyle};

    #[test]
    fn every_mesh_node_is_drawn_once() {
        let bodies = default_bodies();
        let style = SceneStyle::default();
        let mut scene = Scene::new();
        let mut renderer = HeadlessRenderer::new();
        let _binding = SceneBuilder::new(&style).build(None, &bodies, 1, &mut scene, &mut renderer);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &mut buffer);
        // Light nodes carry no mesh.
        let expected = scene.len() - scene.count_kind(NodeKind::Light);
        assert_eq!(buffer.instance_count() as usize, expected);
    }

    #[test]
    fn instances_carry_world_translation() {
        let bodies = default_bodies();
        let style = SceneStyle::default();
        let mut scene = Scene::new();
        let mut renderer = HeadlessRenderer::new();
        let binding = SceneBuilder::new(&style).build(None, &bodies, 1, &mut scene, &mut renderer);

        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &mut buffer);
        let earth = binding.get(&BodyId::new("earth")).unwrap();
        let node = scene.get(earth.primitive).unwrap();
        let inst = buffer
            .instances
            .iter()
            .find(|i| Some(i.geometry_handle()) == node.geometry)
            .unwrap();
        assert_eq!(inst.model_matrix().w_axis.truncate(), Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn lights_follow_their_node() {
        let bodies = default_bodies();
        let style = SceneStyle::default();
        let mut scene = Scene::new();
        let mut renderer = HeadlessRenderer::new();
        let binding = SceneBuilder::new(&style).build(None, &bodies, 1, &mut scene, &mut renderer);

        let mut lights = LightState::new();
        collect_lights(&scene, Some(&binding), Color::from_hex(0x333333), &mut lights);
        assert_eq!(lights.count(), 1);
        let light = lights.iter().next().unwrap();
        assert_eq!(light.position(), Vec3::ZERO);
        assert_eq!(light.intensity, 1.5);

        collect_lights(&scene, None, Color::BLACK, &mut lights);
        assert_eq!(lights.count(), 0);
        assert_eq!(lights.ambient(), [0.0; 3]);
    }
}
