use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, EngineEvent, Selection};
use crate::bodies::descriptor::{BodyDescriptor, Color};
use crate::bodies::registry::{BodyRegistry, PropertyValue};
use crate::bridge::protocol::ProtocolConfig;
use crate::core::frame::FrameScheduler;
use crate::core::scene::Scene;
use crate::core::time::Clock;
use crate::error::{EngineError, RegistryError, StoreError};
use crate::input::queue::{InputEvent, InputQueue, PointerGesture, PointerTracker};
use crate::persistence::status::{SaveStatus, SaveTracker};
use crate::persistence::store::{ConfigId, ConfigurationStore};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::{FrameData, Renderer, Viewport};
use crate::systems::animation::animate;
use crate::systems::builder::{SceneBinding, SceneBuilder, SceneStyle};
use crate::systems::controls::{ControlsConfig, OrbitControls};
use crate::systems::lighting::LightState;
use crate::systems::picking::{self, ViewportRect};
use crate::systems::render::{build_render_buffer, collect_lights};
use crate::systems::resize::apply_resize;
use crate::systems::starfield::{Starfield, StarfieldConfig};

/// Perspective camera setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Start position; the camera looks at the origin.
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 30.0, 80.0),
        }
    }
}

/// Engine configuration. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub clear_color: Color,
    pub ambient: Color,
    pub controls: ControlsConfig,
    pub style: SceneStyle,
    pub starfield: StarfieldConfig,
    pub protocol: ProtocolConfig,
    /// Pointer travel (CSS pixels) beyond which a press becomes a drag.
    pub drag_threshold: f32,
    /// Seconds a successful save stays visible.
    pub save_status_reset: f64,
    /// Whether clicking empty space clears the selection.
    pub clear_selection_on_miss: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            clear_color: Color::from_hex(0x050714),
            ambient: Color::from_hex(0x333333),
            controls: ControlsConfig::default(),
            style: SceneStyle::default(),
            starfield: StarfieldConfig::default(),
            protocol: ProtocolConfig::default(),
            drag_threshold: 5.0,
            save_status_reset: 2.0,
            clear_selection_on_miss: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Where the engine is in its mount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    /// Surface attached, no scene built yet.
    Mounted,
    /// Surface attached and a binding is live.
    SceneBuilt,
}

/// The solar system engine.
///
/// Owns every piece of mutable runtime state: registry, scene, camera,
/// controls, the live binding and the frame scheduler. The host drives it by
/// calling `frame()` once per display refresh while `frame()` keeps returning
/// true, and by feeding input events.
///
/// Ordering guarantees:
/// - Every rebuild and the unmount cancel the pending frame before any
///   resource is disposed.
/// - Within a frame: input, then reconciliation, then kinematics, then
///   controls, then render.
pub struct Engine<R: Renderer, C: Clock> {
    config: EngineConfig,
    renderer: R,
    clock: C,
    registry: BodyRegistry,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    binding: Option<SceneBinding>,
    starfield: Option<Starfield>,
    scheduler: FrameScheduler,
    input: InputQueue,
    pointer: PointerTracker,
    selection: Selection,
    events: Vec<EngineEvent>,
    lights: LightState,
    render_buffer: RenderBuffer,
    rect: ViewportRect,
    pixel_ratio: f32,
    save: SaveTracker,
    mounted: bool,
}

impl<R: Renderer, C: Clock> Engine<R, C> {
    /// Create an unmounted engine over `bodies`.
    pub fn new(config: EngineConfig, bodies: Vec<BodyDescriptor>, renderer: R, clock: C) -> Result<Self, EngineError> {
        let registry = BodyRegistry::new(bodies)?;

        let cam = &config.camera;
        let mut camera = PerspectiveCamera::new(cam.fov, 1.0, cam.near, cam.far);
        camera.position = cam.position;
        camera.look_at(Vec3::ZERO);

        Ok(Self {
            controls: OrbitControls::new(config.controls.clone()),
            pointer: PointerTracker::new(config.drag_threshold),
            save: SaveTracker::new(config.save_status_reset),
            config,
            renderer,
            clock,
            registry,
            scene: Scene::new(),
            camera,
            binding: None,
            starfield: None,
            scheduler: FrameScheduler::new(),
            input: InputQueue::new(),
            selection: Selection::None,
            events: Vec::new(),
            lights: LightState::new(),
            render_buffer: RenderBuffer::new(),
            rect: ViewportRect::default(),
            pixel_ratio: 1.0,
            mounted: false,
        })
    }

    // -- Lifecycle --

    /// Attach to a host element occupying `rect` and build the scene.
    ///
    /// A zero-sized element is a precondition failure: nothing is attached
    /// or allocated.
    pub fn mount(&mut self, rect: ViewportRect, pixel_ratio: f32) -> Result<(), EngineError> {
        if self.mounted {
            return Err(EngineError::AlreadyMounted);
        }
        let viewport = Viewport::new(rect.width, rect.height, pixel_ratio);
        if !viewport.is_usable() {
            return Err(EngineError::NoContainer {
                width: rect.width,
                height: rect.height,
            });
        }

        self.rect = rect;
        self.pixel_ratio = pixel_ratio;
        self.renderer.attach(&viewport);
        apply_resize(&viewport, &mut self.camera, &mut self.controls, &mut self.renderer);
        self.starfield = Some(Starfield::build(
            &self.config.starfield,
            &mut self.scene,
            &mut self.renderer,
        ));
        self.mounted = true;
        log::info!(
            "engine mounted on {} ({}x{})",
            self.renderer.backend(),
            rect.width,
            rect.height
        );

        self.rebuild();
        Ok(())
    }

    /// Stop the frame chain, release every resource and detach the surface.
    /// Safe to call when already unmounted.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.cancel();
        if let Some(binding) = self.binding.take() {
            binding.dispose(&mut self.scene, &mut self.renderer);
        }
        if let Some(starfield) = self.starfield.take() {
            starfield.dispose(&mut self.scene, &mut self.renderer);
        }
        self.renderer.detach();
        self.input.clear();
        self.pointer = PointerTracker::new(self.config.drag_threshold);
        self.mounted = false;
        log::info!("engine unmounted");
    }

    pub fn state(&self) -> LifecycleState {
        match (self.mounted, self.binding.is_some()) {
            (false, _) => LifecycleState::Unmounted,
            (true, false) => LifecycleState::Mounted,
            (true, true) => LifecycleState::SceneBuilt,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Tear down the current binding and build one for the current registry
    /// version. The pending frame is revoked first and re-requested after.
    fn rebuild(&mut self) {
        self.scheduler.cancel();
        let previous = self.binding.take();
        let bodies = self.registry.snapshot();
        let version = self.registry.version();
        let binding = SceneBuilder::new(&self.config.style).build(
            previous,
            &bodies,
            version,
            &mut self.scene,
            &mut self.renderer,
        );
        self.registry.drain_changes();
        self.events.push(EngineEvent::SceneRebuilt {
            version,
            bodies: binding.len(),
        });
        self.binding = Some(binding);
        self.scheduler.request();
    }

    /// Rebuild if the registry moved past the live binding.
    fn reconcile(&mut self) {
        if !self.mounted {
            return;
        }
        let stale = self
            .binding
            .as_ref()
            .map_or(true, |b| b.version() != self.registry.version());
        if stale {
            self.rebuild();
        }
    }

    // -- Frame loop --

    /// Run one frame if one is pending. Returns whether another frame was
    /// requested; the host stops calling once this is false.
    pub fn frame(&mut self) -> bool {
        if !self.mounted || self.scheduler.take_pending().is_none() {
            return false;
        }

        for event in self.input.drain() {
            self.handle_input(event);
        }
        self.reconcile();

        let now = self.clock.now();
        self.save.tick(now);

        if let Some(binding) = &self.binding {
            animate(self.registry.bodies(), binding, &mut self.scene, now);
        }
        self.controls.update(&mut self.camera);
        self.render();

        self.scheduler.request();
        true
    }

    fn render(&mut self) {
        collect_lights(&self.scene, self.binding.as_ref(), self.config.ambient, &mut self.lights);
        build_render_buffer(&self.scene, &mut self.render_buffer);
        self.renderer.draw(&FrameData {
            instances: &self.render_buffer.instances,
            camera: self.camera.uniform(),
            lighting: &self.lights,
            clear_color: self.config.clear_color.to_array(),
        });
    }

    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    // -- Input --

    /// Queue an event for the start of the next frame.
    /// Queue an event for the next frame. Dropped while unmounted so nothing
    /// from a previous session leaks into the next mount.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.mounted {
            log::debug!("input dropped while unmounted: {:?}", event);
            return;
        }
        self.input.push(event);
    }

    /// Apply an event now. Ignored while unmounted.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.mounted {
            log::debug!("input ignored while unmounted: {:?}", event);
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.pointer.down(x, y),
            InputEvent::PointerMove { x, y } => {
                if let PointerGesture::Drag { dx, dy } = self.pointer.moved(x, y) {
                    self.controls.rotate_by_pixels(dx, dy);
                }
            }
            InputEvent::PointerUp { x, y } => {
                if let PointerGesture::Click { x, y } = self.pointer.up(x, y) {
                    self.click(x, y);
                }
            }
            InputEvent::Wheel { delta_y } => self.controls.zoom_by_wheel(delta_y),
            InputEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => {
                let viewport = Viewport::new(width, height, pixel_ratio);
                if apply_resize(&viewport, &mut self.camera, &mut self.controls, &mut self.renderer) {
                    self.rect.width = width;
                    self.rect.height = height;
                    self.pixel_ratio = pixel_ratio;
                }
            }
        }
    }

    /// Update where the host element sits in client coordinates (e.g. after
    /// scrolling). Size changes go through `InputEvent::Resize`.
    pub fn set_viewport_origin(&mut self, left: f32, top: f32) {
        self.rect.left = left;
        self.rect.top = top;
    }

    pub fn viewport_rect(&self) -> ViewportRect {
        self.rect
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Resolve a click at client (x, y) and update the selection.
    fn click(&mut self, x: f32, y: f32) -> Option<BodyId> {
        let binding = self.binding.as_ref()?;
        let hit = picking::resolve(x, y, &self.rect, &self.camera, &self.scene, binding);
        match &hit {
            Some(id) => self.set_selection(Selection::Body(id.clone())),
            None if self.config.clear_selection_on_miss => self.set_selection(Selection::None),
            None => {}
        }
        hit
    }

    /// Body under client (x, y), without touching the selection.
    pub fn pick(&self, x: f32, y: f32) -> Option<BodyId> {
        let binding = self.binding.as_ref()?;
        picking::resolve(x, y, &self.rect, &self.camera, &self.scene, binding)
    }

    // -- Selection --

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select a body from the UI.
    pub fn select(&mut self, id: &BodyId) -> Result<(), EngineError> {
        if !self.registry.contains(id) {
            return Err(RegistryError::UnknownBody(id.to_string()).into());
        }
        self.set_selection(Selection::Body(id.clone()));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Selection::None);
    }

    fn set_selection(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        // The pivot moves to the body; the camera itself stays put.
        if let (Some(id), Some(binding)) = (selection.body(), self.binding.as_ref()) {
            if let Some(pos) = binding
                .get(id)
                .and_then(|bound| self.scene.world_position(bound.primitive))
            {
                self.controls.set_target(pos);
            }
        }
        log::debug!("selection: {:?}", selection);
        self.selection = selection.clone();
        self.events.push(EngineEvent::SelectionChanged(selection));
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Body editing --

    /// Patch one field of one body. A mounted scene is rebuilt at once.
    pub fn set_property(
        &mut self,
        id: &BodyId,
        property: &str,
        value: PropertyValue,
    ) -> Result<(), EngineError> {
        if let Err(e) = self.registry.set_property(id, property, value) {
            log::warn!("rejected edit {}.{}: {}", id, property, e);
            return Err(e.into());
        }
        self.reconcile();
        Ok(())
    }

    /// Replace the whole collection. On error nothing changes.
    pub fn load_configuration(&mut self, bodies: Vec<BodyDescriptor>) -> Result<(), EngineError> {
        if let Err(e) = self.registry.replace_all(bodies) {
            log::warn!("rejected configuration: {}", e);
            return Err(e.into());
        }
        let gone = self
            .selection
            .body()
            .is_some_and(|id| !self.registry.contains(id));
        if gone {
            self.set_selection(Selection::None);
        }
        self.reconcile();
        Ok(())
    }

    // -- Persistence --

    /// Save the current collection under `name`, tracking the status
    /// indicator. The scene is never affected.
    pub fn save_configuration<S: ConfigurationStore>(
        &mut self,
        store: &mut S,
        name: &str,
    ) -> Result<ConfigId, StoreError> {
        self.save.begin();
        let bodies = self.registry.snapshot();
        match store.save(name, &bodies) {
            Ok(id) => {
                self.save.succeed(self.clock.now());
                log::info!("configuration saved: {} ({})", name.trim(), id);
                Ok(id)
            }
            Err(e) => {
                log::warn!("saving configuration failed: {}", e);
                self.save.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch a saved configuration and load it. A failed fetch leaves the
    /// registry and the scene untouched.
    pub fn load_from_store<S: ConfigurationStore>(&mut self, store: &S, id: &ConfigId) -> Result<(), EngineError> {
        let saved = store.fetch_by_id(id).map_err(|e| {
            log::warn!("loading configuration {} failed: {}", id, e);
            EngineError::from(e)
        })?;
        log::info!("loading configuration '{}' ({})", saved.name, id);
        self.load_configuration(saved.bodies)
    }

    pub fn save_status(&self) -> &SaveStatus {
        self.save.status()
    }

    // -- Accessors --

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn binding(&self) -> Option<&SceneBinding> {
        self.binding.as_ref()
    }

    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// World position of a body's sphere, if bound.
    pub fn body_position(&self, id: &BodyId) -> Option<Vec3> {
        let bound = self.binding.as_ref()?.get(id)?;
        self.scene.world_position(bound.primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::defaults::default_bodies;
    use crate::core::time::ManualClock;
    use crate::persistence::memory::MemoryStore;
    use crate::renderer::headless::HeadlessRenderer;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    fn config() -> EngineConfig {
        EngineConfig {
            starfield: StarfieldConfig {
                count: 50,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn engine() -> Engine<HeadlessRenderer, ManualClock> {
        Engine::new(config(), default_bodies(), HeadlessRenderer::new(), ManualClock::new()).unwrap()
    }

    fn mounted() -> Engine<HeadlessRenderer, ManualClock> {
        let mut e = engine();
        e.mount(ViewportRect::sized(W, H), 1.0).unwrap();
        e
    }

    fn screen_of(e: &Engine<HeadlessRenderer, ManualClock>, p: Vec3) -> (f32, f32) {
        let ndc = e.camera().project(p);
        let rect = e.viewport_rect();
        (
            rect.left + (ndc.x + 1.0) / 2.0 * rect.width,
            rect.top + (1.0 - ndc.y) / 2.0 * rect.height,
        )
    }

    fn click(e: &mut Engine<HeadlessRenderer, ManualClock>, x: f32, y: f32) {
        e.handle_input(InputEvent::PointerDown { x, y });
        e.handle_input(InputEvent::PointerUp { x, y });
    }

    #[test]
    fn default_config_matches_scene_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.camera.position, Vec3::new(0.0, 30.0, 80.0));
        assert_eq!(c.ambient, Color::from_hex(0x333333));
        assert_eq!(c.controls.min_distance, 20.0);
        assert!(!c.clear_selection_on_miss);
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let c = EngineConfig::from_json(r#"{"dragThreshold": 8, "camera": {"fov": 60}}"#).unwrap();
        assert_eq!(c.drag_threshold, 8.0);
        assert_eq!(c.camera.fov, 60.0);
        assert_eq!(c.camera.far, 1000.0);
        assert_eq!(c.starfield.count, 10_000);
    }

    #[test]
    fn mount_requires_a_sized_container() {
        let mut e = engine();
        let err = e.mount(ViewportRect::sized(0.0, H), 1.0);
        assert!(matches!(err, Err(EngineError::NoContainer { .. })));
        assert_eq!(e.state(), LifecycleState::Unmounted);
        assert!(!e.renderer().is_attached());
        assert_eq!(e.renderer().live_resources(), 0);
    }

    #[test]
    fn mount_builds_scene_and_schedules_a_frame() {
        let mut e = mounted();
        assert_eq!(e.state(), LifecycleState::SceneBuilt);
        assert!(e.is_frame_pending());
        assert_eq!(e.binding().unwrap().len(), 9);
        assert!((e.camera().aspect() - W / H).abs() < 1e-6);
        assert!(matches!(e.mount(ViewportRect::sized(W, H), 1.0), Err(EngineError::AlreadyMounted)));
        assert!(e.frame());
        assert_eq!(e.renderer().frames_drawn(), 1);
    }

    #[test]
    fn unmount_releases_everything_and_stops_frames() {
        let mut e = mounted();
        e.frame();
        e.unmount();
        assert_eq!(e.state(), LifecycleState::Unmounted);
        assert_eq!(e.renderer().live_resources(), 0);
        assert!(e.scene().is_empty());
        assert!(!e.is_frame_pending());
        assert!(!e.frame());
        assert_eq!(e.renderer().frames_drawn(), 1);
        // Second unmount is a no-op.
        e.unmount();
    }

    #[test]
    fn input_pushed_while_unmounted_is_dropped() {
        let mut e = mounted();
        e.frame();
        let earth = e.body_position(&BodyId::new("earth")).unwrap();
        let (x, y) = screen_of(&e, earth);
        e.unmount();

        e.push_input(InputEvent::PointerDown { x, y });
        e.push_input(InputEvent::PointerUp { x, y });
        e.mount(ViewportRect::sized(W, H), 1.0).unwrap();
        e.frame();
        assert_eq!(e.selection(), &Selection::None);
        assert!(e.drain_events().iter().all(|ev| !matches!(ev, EngineEvent::SelectionChanged(_))));
    }

    #[test]
    fn frame_uses_clock_for_orbits() {
        let mut e = mounted();
        e.clock_mut().set(std::f64::consts::PI / 0.01);
        e.frame();
        let earth = e.body_position(&BodyId::new("earth")).unwrap();
        assert!((earth - Vec3::new(-20.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn set_property_rebuilds_immediately() {
        let mut e = mounted();
        let before = e.binding().unwrap().version();
        e.set_property(&BodyId::new("mars"), "radius", PropertyValue::Number(1.2)).unwrap();
        let binding = e.binding().unwrap();
        assert_eq!(binding.version(), before + 1);
        assert_eq!(binding.get(&BodyId::new("mars")).unwrap().radius, 1.2);
        assert!(e.is_frame_pending());
        assert!(e
            .drain_events()
            .iter()
            .any(|ev| matches!(ev, EngineEvent::SceneRebuilt { .. })));
    }

    #[test]
    fn rejected_edit_changes_nothing() {
        let mut e = mounted();
        let version = e.binding().unwrap().version();
        assert!(e.set_property(&BodyId::new("mars"), "radius", PropertyValue::Number(-3.0)).is_err());
        assert_eq!(e.binding().unwrap().version(), version);
        assert_eq!(e.registry().version(), version);
    }

    #[test]
    fn click_selects_body_and_retargets_pivot() {
        let mut e = mounted();
        e.frame();
        let earth = e.body_position(&BodyId::new("earth")).unwrap();
        let (x, y) = screen_of(&e, earth);
        click(&mut e, x, y);
        assert_eq!(e.selection(), &Selection::Body(BodyId::new("earth")));
        assert_eq!(e.controls().target(), earth);
        assert!(e
            .drain_events()
            .contains(&EngineEvent::SelectionChanged(Selection::Body(BodyId::new("earth")))));
    }

    #[test]
    fn miss_keeps_selection_unless_configured() {
        let mut e = mounted();
        e.select(&BodyId::new("mars")).unwrap();
        click(&mut e, 1.0, 1.0);
        assert_eq!(e.selection(), &Selection::Body(BodyId::new("mars")));

        let mut e = Engine::new(
            EngineConfig {
                clear_selection_on_miss: true,
                ..config()
            },
            default_bodies(),
            HeadlessRenderer::new(),
            ManualClock::new(),
        )
        .unwrap();
        e.mount(ViewportRect::sized(W, H), 1.0).unwrap();
        e.select(&BodyId::new("mars")).unwrap();
        click(&mut e, 1.0, 1.0);
        assert!(e.selection().is_none());
    }

    #[test]
    fn drag_rotates_instead_of_picking() {
        let mut e = mounted();
        e.frame();
        let start = e.camera().position;
        let (x, y) = screen_of(&e, Vec3::ZERO);
        e.push_input(InputEvent::PointerDown { x, y });
        e.push_input(InputEvent::PointerMove { x: x + 60.0, y });
        e.push_input(InputEvent::PointerUp { x: x + 60.0, y });
        e.frame();
        assert!(e.selection().is_none());
        assert!((e.camera().position - start).length() > 1e-3);
    }

    #[test]
    fn select_unknown_body_is_rejected() {
        let mut e = mounted();
        assert!(e.select(&BodyId::new("pluto")).is_err());
        assert!(e.selection().is_none());
    }

    #[test]
    fn resize_updates_camera_and_surface() {
        let mut e = mounted();
        e.handle_input(InputEvent::Resize {
            width: 1000.0,
            height: 500.0,
            pixel_ratio: 2.0,
        });
        assert!((e.camera().aspect() - 2.0).abs() < 1e-6);
        assert_eq!(e.renderer().surface_size(), (2000, 1000));
        assert_eq!(e.viewport_rect().width, 1000.0);

        // Collapsed container: ignored.
        e.handle_input(InputEvent::Resize {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 2.0,
        });
        assert!((e.camera().aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn load_configuration_resets_missing_selection() {
        let mut e = mounted();
        e.select(&BodyId::new("neptune")).unwrap();
        let bodies: Vec<_> = default_bodies().into_iter().filter(|b| b.id != "neptune").collect();
        e.load_configuration(bodies).unwrap();
        assert!(e.selection().is_none());
        assert_eq!(e.binding().unwrap().len(), 8);
    }

    #[test]
    fn invalid_configuration_leaves_scene_untouched() {
        let mut e = mounted();
        let version = e.binding().unwrap().version();
        assert!(e.load_configuration(Vec::new()).is_err());
        assert_eq!(e.binding().unwrap().version(), version);
        assert_eq!(e.registry().len(), 9);
    }

    #[test]
    fn save_status_follows_engine_clock() {
        let mut e = mounted();
        let mut store = MemoryStore::new();
        e.clock_mut().set(100.0);
        let id = e.save_configuration(&mut store, "  Mine ").unwrap();
        assert_eq!(e.save_status(), &SaveStatus::Success);
        e.clock_mut().set(103.0);
        e.frame();
        assert_eq!(e.save_status(), &SaveStatus::Idle);

        assert!(e.save_configuration(&mut store, "   ").is_err());
        assert!(matches!(e.save_status(), SaveStatus::Error(_)));

        e.set_property(&BodyId::new("earth"), "radius", PropertyValue::Number(3.0)).unwrap();
        e.load_from_store(&store, &id).unwrap();
        assert_eq!(e.registry().get(&BodyId::new("earth")).unwrap().radius, 1.0);
    }

    #[test]
    fn failed_fetch_keeps_registry() {
        let mut e = mounted();
        let store = MemoryStore::new();
        let version = e.registry().version();
        let err = e.load_from_store(&store, &ConfigId::from("missing"));
        assert!(matches!(err, Err(EngineError::Store(_))));
        assert_eq!(e.registry().version(), version);
    }
}
