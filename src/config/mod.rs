//! Configuration types
//!
//! - `PreferenceConfig` - where the default preference file lives
//! - `HostRuntime` - per-user data directory lookup for embedding storage

mod host;
mod types;

pub use host::{AppDataDir, HostRuntime};
pub use types::{
    DEFAULT_EMBEDDING_FILE, DEFAULT_FILE_EXT, PreferenceConfig, PreferenceConfigBuilder,
};
