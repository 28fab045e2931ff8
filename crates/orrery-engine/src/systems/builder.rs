//! Scene reconciliation: body collection in, scene nodes and GPU resources out.
//!
//! A `SceneBinding` is the lookup table from body id to the nodes built for
//! it. It is a value object tied to one registry version. The scene owns the
//! nodes and the renderer owns the resources; the binding only remembers
//! which ones it created so `dispose` can release exactly those.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, PrimitiveId};
use crate::bodies::descriptor::{BodyDescriptor, Color};
use crate::core::scene::{Node, NodeKind, Scene};
use crate::renderer::resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle};
use crate::renderer::traits::Renderer;
use crate::systems::lighting::PointLight;

/// Point light carried by the central body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SunLightConfig {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
}

impl Default for SunLightConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.5,
            range: 300.0,
        }
    }
}

/// Tessellation and styling for built primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneStyle {
    pub sphere_segments: u32,
    pub ring_segments: u32,
    pub orbit_guide_segments: u32,
    /// Orbit guide annulus spans distance ± this.
    pub orbit_guide_half_width: f32,
    pub orbit_guide_color: Color,
    pub orbit_guide_opacity: f32,
    pub ring_opacity: f32,
    pub sun_light: SunLightConfig,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            sphere_segments: 32,
            ring_segments: 64,
            orbit_guide_segments: 128,
            orbit_guide_half_width: 0.1,
            orbit_guide_color: Color::from_hex(0x444444),
            orbit_guide_opacity: 0.2,
            ring_opacity: 0.8,
            sun_light: SunLightConfig::default(),
        }
    }
}

/// Nodes built for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundBody {
    pub body: BodyId,
    /// The pickable sphere.
    pub primitive: PrimitiveId,
    /// Visual radius the sphere was built with.
    pub radius: f32,
    pub ring: Option<PrimitiveId>,
    pub orbit_guide: Option<PrimitiveId>,
    pub light: Option<PrimitiveId>,
}

/// Body id → built primitives, valid for one registry version.
#[derive(Debug)]
pub struct SceneBinding {
    version: u64,
    bodies: Vec<BoundBody>,
    lights: Vec<(PrimitiveId, PointLight)>,
    geometries: Vec<GeometryHandle>,
    materials: Vec<MaterialHandle>,
}

impl SceneBinding {
    /// Registry version this binding was built from.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn bodies(&self) -> &[BoundBody] {
        &self.bodies
    }

    pub fn get(&self, id: &BodyId) -> Option<&BoundBody> {
        self.bodies.iter().find(|b| &b.body == id)
    }

    /// Which body a primitive belongs to. Only body spheres resolve.
    pub fn body_for_primitive(&self, primitive: PrimitiveId) -> Option<&BodyId> {
        self.bodies
            .iter()
            .find(|b| b.primitive == primitive)
            .map(|b| &b.body)
    }

    /// Light nodes and their light parameters.
    pub fn lights(&self) -> &[(PrimitiveId, PointLight)] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of GPU resources owned by this binding.
    pub fn resource_count(&self) -> usize {
        self.geometries.len() + self.materials.len()
    }

    /// Remove every node this binding built and release its resources.
    pub fn dispose<R: Renderer>(self, scene: &mut Scene, renderer: &mut R) {
        for bound in &self.bodies {
            // Children (ring, light) go with the body.
            scene.despawn(bound.primitive);
            if let Some(guide) = bound.orbit_guide {
                scene.despawn(guide);
            }
        }
        for geometry in self.geometries {
            renderer.dispose_geometry(geometry);
        }
        for material in self.materials {
            renderer.dispose_material(material);
        }
        log::debug!("binding v{} disposed ({} bodies)", self.version, self.bodies.len());
    }
}

/// Builds scene bindings from body collections.
pub struct SceneBuilder<'a> {
    style: &'a SceneStyle,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(style: &'a SceneStyle) -> Self {
        Self { style }
    }

    /// Build a binding for `bodies`, in collection order. A previous binding
    /// is disposed first.
    pub fn build<R: Renderer>(
        &self,
        previous: Option<SceneBinding>,
        bodies: &[BodyDescriptor],
        version: u64,
        scene: &mut Scene,
        renderer: &mut R,
    ) -> SceneBinding {
        if let Some(previous) = previous {
            previous.dispose(scene, renderer);
        }

        let mut binding = SceneBinding {
            version,
            bodies: Vec::with_capacity(bodies.len()),
            lights: Vec::new(),
            geometries: Vec::new(),
            materials: Vec::new(),
        };

        for body in bodies {
            let bound = self.build_body(body, &mut binding, scene, renderer);
            binding.bodies.push(bound);
        }

        log::info!("scene built: v{} with {} bodies", version, binding.bodies.len());
        binding
    }

    fn build_body<R: Renderer>(
        &self,
        body: &BodyDescriptor,
        binding: &mut SceneBinding,
        scene: &mut Scene,
        renderer: &mut R,
    ) -> BoundBody {
        let style = self.style;
        let central = body.is_central();

        let geometry = renderer.create_geometry(&GeometryDesc::Sphere {
            radius: body.radius,
            width_segments: style.sphere_segments,
            height_segments: style.sphere_segments,
        });
        let material = if central {
            let (emissive, intensity) = match &body.emissive {
                Some(e) => (e.color, e.intensity),
                None => (body.color, 1.0),
            };
            MaterialDesc::emissive(body.color, emissive, intensity)
        } else {
            MaterialDesc::standard(body.color)
        };
        let material = renderer.create_material(&material);
        binding.geometries.push(geometry);
        binding.materials.push(material);

        let primitive = scene.next_id();
        let start = Vec3::new(body.orbit_distance, 0.0, 0.0);
        scene.spawn(
            Node::new(primitive, NodeKind::Body)
                .with_translation(start)
                .with_mesh(geometry, material),
        );

        let mut bound = BoundBody {
            body: body.id.clone(),
            primitive,
            radius: body.radius,
            ring: None,
            orbit_guide: None,
            light: None,
        };

        if central {
            let light = scene.next_id();
            scene.spawn(Node::new(light, NodeKind::Light).with_parent(primitive));
            let sun = &style.sun_light;
            binding
                .lights
                .push((light, PointLight::new(start, sun.color, sun.intensity, sun.range)));
            bound.light = Some(light);
        }

        if let Some(rings) = &body.rings {
            let geometry = renderer.create_geometry(&GeometryDesc::Ring {
                inner_radius: rings.inner_radius,
                outer_radius: rings.outer_radius,
                segments: style.ring_segments,
            });
            let material = renderer.create_material(
                &MaterialDesc::basic(rings.color)
                    .with_opacity(style.ring_opacity)
                    .double_sided(),
            );
            binding.geometries.push(geometry);
            binding.materials.push(material);

            let ring = scene.next_id();
            scene.spawn(
                Node::new(ring, NodeKind::Ring)
                    .with_parent(primitive)
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(geometry, material),
            );
            bound.ring = Some(ring);
        }

        if !central {
            let half = style.orbit_guide_half_width;
            let geometry = renderer.create_geometry(&GeometryDesc::Ring {
                inner_radius: (body.orbit_distance - half).max(0.0),
                outer_radius: body.orbit_distance + half,
                segments: style.orbit_guide_segments,
            });
            let material = renderer.create_material(
                &MaterialDesc::basic(style.orbit_guide_color)
                    .with_opacity(style.orbit_guide_opacity)
                    .double_sided(),
            );
            binding.geometries.push(geometry);
            binding.materials.push(material);

            // Scene root, so it does not spin with the body.
            let guide = scene.next_id();
            scene.spawn(
                Node::new(guide, NodeKind::OrbitGuide)
                    .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
                    .with_mesh(geometry, material),
            );
            bound.orbit_guide = Some(guide);
        }

        bound
    }
}
