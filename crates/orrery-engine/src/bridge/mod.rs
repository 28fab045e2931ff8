pub mod commands;
pub mod protocol;

pub use commands::{CommandRenderer, ResourceCommand};
pub use protocol::{ProtocolConfig, ProtocolLayout};
