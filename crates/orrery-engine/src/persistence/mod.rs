pub mod json_file;
pub mod memory;
pub mod response;
pub mod status;
pub mod store;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use response::StoreResponse;
pub use status::{SaveStatus, SaveTracker};
pub use store::{validate_name, ConfigId, ConfigSummary, ConfigurationSet, ConfigurationStore, SavedConfiguration};
