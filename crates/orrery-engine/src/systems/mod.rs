pub mod animation;
pub mod builder;
pub mod controls;
pub mod lighting;
pub mod picking;
pub mod render;
pub mod resize;
pub mod rng;
pub mod starfield;

pub use builder::{BoundBody, SceneBinding, SceneBuilder, SceneStyle, SunLightConfig};
pub use controls::{ControlsConfig, OrbitControls};
pub use lighting::{LightState, PointLight};
pub use picking::{PickHit, ViewportRect};
pub use starfield::{Starfield, StarfieldConfig};
