pub mod defaults;
pub mod descriptor;
pub mod registry;

pub use defaults::default_bodies;
pub use descriptor::{BodyDescriptor, Color, Emission, RingSpec};
pub use registry::{BodyProperty, BodyRegistry, PropertyValue, RegistryChange};
