pub mod camera;
pub mod headless;
pub mod instance;
pub mod resources;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{CameraUniform, PerspectiveCamera, Ray};
pub use headless::HeadlessRenderer;
pub use instance::{DrawInstance, RenderBuffer};
pub use resources::{GeometryDesc, GeometryHandle, MaterialDesc, MaterialHandle, MaterialKind, Side};
pub use traits::{FrameData, Renderer, Viewport};
