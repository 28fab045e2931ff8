pub mod api;
pub mod bodies;
pub mod bridge;
pub mod core;
pub mod error;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::engine::{CameraConfig, Engine, EngineConfig, LifecycleState};
pub use api::types::{BodyId, EngineEvent, PrimitiveId, Selection};
pub use bodies::{default_bodies, BodyDescriptor, BodyRegistry, Color, Emission, PropertyValue, RingSpec};
pub use bridge::{CommandRenderer, ProtocolConfig, ProtocolLayout, ResourceCommand};
pub use core::frame::{FrameHandle, FrameScheduler};
pub use core::scene::{NodeKind, Scene};
pub use core::time::{Clock, ManualClock, SystemClock};
pub use error::{EngineError, RegistryError, StoreError};
pub use input::{InputEvent, InputQueue};
pub use persistence::{
    ConfigId, ConfigSummary, ConfigurationSet, ConfigurationStore, JsonFileStore, MemoryStore, SaveStatus,
    SavedConfiguration, StoreResponse,
};
pub use renderer::{HeadlessRenderer, PerspectiveCamera, Renderer, Viewport};
pub use systems::{SceneBinding, SceneStyle, StarfieldConfig, ViewportRect};
