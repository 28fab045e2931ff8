use serde::Serialize;

use orrery_engine::{
    default_bodies, BodyDescriptor, BodyId, CommandRenderer, ConfigId, ConfigurationStore, Engine, EngineConfig,
    EngineError, EngineEvent, InputEvent, ManualClock, ProtocolLayout, PropertyValue, Selection, StoreResponse,
    ViewportRect,
};

/// Engine wired to the command renderer and a configuration store.
///
/// The crate root keeps one of these in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly. The clock is fed from the host on every frame.
pub struct EngineRunner<S: ConfigurationStore> {
    engine: Engine<CommandRenderer, ManualClock>,
    store: S,
}

/// Engine events in the shape the host UI consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    SelectionChanged { body: Option<String> },
    SceneRebuilt { version: u64, bodies: usize },
}

impl From<EngineEvent> for HostEvent {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::SelectionChanged(selection) => HostEvent::SelectionChanged {
                body: selection.body().map(|id| id.to_string()),
            },
            EngineEvent::SceneRebuilt { version, bodies } => HostEvent::SceneRebuilt { version, bodies },
        }
    }
}

impl<S: ConfigurationStore> EngineRunner<S> {
    pub fn new(config: EngineConfig, store: S) -> Result<Self, EngineError> {
        let layout = ProtocolLayout::from_config(&config.protocol);
        let engine = Engine::new(config, default_bodies(), CommandRenderer::new(layout), ManualClock::new())?;
        Ok(Self { engine, store })
    }

    pub fn engine(&self) -> &Engine<CommandRenderer, ManualClock> {
        &self.engine
    }

    pub fn mount(&mut self, rect: ViewportRect, pixel_ratio: f32) -> Result<(), EngineError> {
        self.engine.mount(rect, pixel_ratio)
    }

    pub fn unmount(&mut self) {
        self.engine.unmount();
    }

    /// Run one frame at wall-clock `now_ms` (milliseconds since the epoch).
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.engine.clock_mut().set(now_ms / 1000.0);
        self.engine.frame()
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.engine.push_input(event);
    }

    pub fn set_viewport_origin(&mut self, left: f32, top: f32) {
        self.engine.set_viewport_origin(left, top);
    }

    pub fn set_property(&mut self, id: &str, property: &str, value: PropertyValue) -> Result<(), EngineError> {
        self.engine.set_property(&BodyId::new(id), property, value)
    }

    pub fn select(&mut self, id: Option<&str>) -> Result<(), EngineError> {
        match id {
            Some(id) => self.engine.select(&BodyId::new(id)),
            None => {
                self.engine.clear_selection();
                Ok(())
            }
        }
    }

    pub fn selected_body(&self) -> Option<String> {
        match self.engine.selection() {
            Selection::Body(id) => Some(id.to_string()),
            Selection::None => None,
        }
    }

    /// Descriptor of the selected body, for the property panel.
    pub fn selected_descriptor(&self) -> Option<&BodyDescriptor> {
        let id = self.engine.selection().body()?;
        self.engine.registry().get(id)
    }

    pub fn bodies_json(&self) -> String {
        to_json(self.engine.registry().bodies())
    }

    pub fn selected_descriptor_json(&self) -> String {
        to_json(&self.selected_descriptor())
    }

    // ---- Persistence ----

    pub fn save(&mut self, name: &str) -> StoreResponse {
        StoreResponse::from_result(self.engine.save_configuration(&mut self.store, name), StoreResponse::saved)
    }

    pub fn list(&self) -> StoreResponse {
        StoreResponse::from_result(self.store.list_all(), StoreResponse::listed)
    }

    /// Load a saved configuration into the engine. On success the envelope
    /// carries the loaded bodies.
    pub fn load(&mut self, id: &str) -> StoreResponse {
        match self.engine.load_from_store(&self.store, &ConfigId::from(id)) {
            Ok(()) => StoreResponse::fetched(self.engine.registry().bodies().to_vec()),
            Err(e) => StoreResponse::failed(e),
        }
    }

    pub fn save_status_json(&self) -> String {
        to_json(self.engine.save_status())
    }

    // ---- Host queues ----

    pub fn drain_commands_json(&mut self) -> String {
        let commands = self.engine.renderer_mut().drain_commands();
        to_json(&commands)
    }

    pub fn drain_events_json(&mut self) -> String {
        let events: Vec<HostEvent> = self.engine.drain_events().into_iter().map(HostEvent::from).collect();
        to_json(&events)
    }

    // ---- Pointer accessors for zero-copy buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.engine.renderer().buffer_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.engine.renderer().layout().buffer_total_floats as u32
    }

    pub fn max_instances(&self) -> u32 {
        self.engine.renderer().layout().max_instances as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.engine.renderer().layout().max_lights as u32
    }

    pub fn frame_counter(&self) -> f64 {
        self.engine.renderer().frame_counter() as f64
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialization failed: {}", e);
        "null".to_string()
    })
}
