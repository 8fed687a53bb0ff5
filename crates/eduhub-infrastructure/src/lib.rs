pub mod config_service;
pub mod file_profile_store;
pub mod local_identity_provider;
pub mod memory_profile_store;
pub mod paths;
pub mod storage;

mod dto;

pub use crate::config_service::ConfigService;
pub use crate::file_profile_store::FileProfileStore;
pub use crate::local_identity_provider::LocalIdentityProvider;
pub use crate::memory_profile_store::InMemoryProfileStore;
pub use crate::paths::EduhubPaths;
