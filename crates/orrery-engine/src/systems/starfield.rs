use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::Rng;
use crate::bodies::descriptor::Color;
use crate::core::scene::{Node, NodeKind, Scene};
use crate::api::types::PrimitiveId;
use crate::renderer::resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle};
use crate::renderer::traits::Renderer;

/// Starfield backdrop parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarfieldConfig {
    /// Number of stars.
    pub count: usize,
    /// Edge length of the sampling cube centred on the origin.
    pub spread: f32,
    /// No star lies within this distance of the origin.
    pub exclusion_radius: f32,
    pub point_size: f32,
    pub color: Color,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            spread: 500.0,
            exclusion_radius: 100.0,
            point_size: 0.1,
            color: Color::WHITE,
            seed: 0x5EED_5EED,
        }
    }
}

/// Cap on rejected samples per accepted star.
const MAX_ATTEMPTS_PER_STAR: usize = 64;

/// Scatter `config.count` points uniformly in the cube, outside the
/// exclusion sphere. Deterministic for a given seed.
pub fn generate_positions(config: &StarfieldConfig) -> Vec<Vec3> {
    let mut rng = Rng::new(config.seed);
    let half = config.spread / 2.0;
    let min_sq = config.exclusion_radius * config.exclusion_radius;
    let mut positions = Vec::with_capacity(config.count);
    let mut attempts = 0;
    let max_attempts = config.count.saturating_mul(MAX_ATTEMPTS_PER_STAR);

    while positions.len() < config.count && attempts < max_attempts {
        attempts += 1;
        let p = Vec3::new(rng.spread(half), rng.spread(half), rng.spread(half));
        if p.length_squared() > min_sq {
            positions.push(p);
        }
    }

    if positions.len() < config.count {
        log::warn!(
            "starfield: only {} of {} stars fit outside radius {}",
            positions.len(),
            config.count,
            config.exclusion_radius
        );
    }
    positions
}

/// The live starfield: one point-cloud node and its two GPU resources.
/// Built once at mount, disposed at unmount.
#[derive(Debug)]
pub struct Starfield {
    pub node: PrimitiveId,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub count: usize,
}

impl Starfield {
    pub fn build<R: Renderer>(config: &StarfieldConfig, scene: &mut Scene, renderer: &mut R) -> Self {
        let positions = generate_positions(config);
        let geometry = renderer.create_geometry(&GeometryDesc::points(&positions));
        let material = renderer.create_material(&MaterialDesc::points(config.color, config.point_size));
        let node = scene.next_id();
        scene.spawn(Node::new(node, NodeKind::Starfield).with_mesh(geometry, material));
        log::debug!("starfield: {} stars", positions.len());
        Self {
            node,
            geometry,
            material,
            count: positions.len(),
        }
    }

    pub fn dispose<R: Renderer>(self, scene: &mut Scene, renderer: &mut R) {
        scene.despawn(self.node);
        renderer.dispose_geometry(self.geometry);
        renderer.dispose_material(self.material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::headless::HeadlessRenderer;

    fn small() -> StarfieldConfig {
        StarfieldConfig {
            count: 500,
            ..Default::default()
        }
    }

    #[test]
    fn every_star_outside_exclusion_and_inside_cube() {
        let config = small();
        let stars = generate_positions(&config);
        assert_eq!(stars.len(), 500);
        for p in &stars {
            assert!(p.length() > config.exclusion_radius);
            assert!(p.abs().max_element() <= config.spread / 2.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = generate_positions(&small());
        let b = generate_positions(&small());
        assert_eq!(a, b);
        let c = generate_positions(&StarfieldConfig { seed: 9, ..small() });
        assert_ne!(a, c);
    }

    #[test]
    fn impossible_exclusion_gives_up() {
        let config = StarfieldConfig {
            count: 10,
            spread: 10.0,
            exclusion_radius: 100.0,
            ..Default::default()
        };
        assert!(generate_positions(&config).is_empty());
    }

    #[test]
    fn build_and_dispose_balance_resources() {
        let mut scene = Scene::new();
        let mut renderer = HeadlessRenderer::new();
        let field = Starfield::build(&small(), &mut scene, &mut renderer);
        assert_eq!(scene.count_kind(NodeKind::Starfield), 1);
        assert_eq!(renderer.live_resources(), 2);
        assert_eq!(field.count, 500);
        field.dispose(&mut scene, &mut renderer);
        assert!(scene.is_empty());
        assert_eq!(renderer.live_resources(), 0);
    }
}
