//! # user-settings - key-value user preferences
//!
//! A small library for persisting user preferences as a flat JSON object of
//! string values, with the same operations available in three calling
//! conventions.
//!
//! ## Features
//!
//! - **Key-value states**: `has_key`, `get_state`, `set_state`, `delete_key`
//!   and their multi-key variants
//! - **Whole documents**: `serialize`, `deserialize` and `delete_file`
//! - **Per-call files**: every operation takes an optional file name, resolved
//!   next to the default preference file
//! - **Embedding storage**: derive the default file from the host
//!   application's data directory
//! - **Fail-open I/O**: a missing file is created, a corrupt one is reset, and
//!   I/O failures read as `{}` or `false`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use user_settings::Preferences;
//!
//! let prefs = Preferences::builder()
//!     .preference_file_dir("~/.config/my-app")
//!     .file_name("Settings")
//!     .build();
//!
//! prefs.set_state("theme", "dark", None)?;
//! prefs.set_states([("width", 800), ("height", 600)], None)?;
//!
//! assert_eq!(prefs.get_state("theme", "light", None)?, "dark");
//! assert_eq!(
//!     prefs.get_states(&["width", "depth"], None)?,
//!     vec!["800", "undefined"]
//! );
//! # Ok::<(), user_settings::Error>(())
//! ```
//!
//! ## Calling Conventions
//!
//! | Blocking | Async (`async` feature) | Callback |
//! |----------|-------------------------|----------|
//! | `get_state` | `get_state_async` | `get_state_with` |
//! | `set_state` | `set_state_async` | `set_state_with` |
//! | ... | ... | ... |
//!
//! Argument errors (empty keys, blank file names, non-object documents) and
//! path errors are returned by the call itself in every convention. The async
//! and callback variants only ever defer file I/O.
//!
//! ```rust,no_run
//! # #[cfg(feature = "async")]
//! # async fn example() -> user_settings::Result<()> {
//! use user_settings::Preferences;
//!
//! let prefs = Preferences::defaults();
//! let saved = prefs.set_state_async("theme", "dark", None)?.await;
//!
//! prefs.get_state_with("theme", "light", None, |theme| {
//!     println!("theme = {}", theme.unwrap_or_default());
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Default Path
//!
//! The default preference file is sealed the first time it is known: either
//! at construction when a directory and file name are configured, on the
//! first operation in embedding mode, or through
//! [`Preferences::set_default_preference_file_path`]. Once sealed it never
//! changes.

mod error;
mod manager;
mod sync;

pub mod config;
pub mod document;
pub mod resolver;
pub mod storage;
pub mod store;

// Re-exports from core
pub use error::{Error, Result};
#[cfg(feature = "async")]
pub use manager::BoxFuture;
pub use manager::{Preferences, PreferencesBuilder};
pub use storage::{JsonStorage, StorageBackend};
pub use store::FileStore;

pub use document::{Document, UNDEFINED, render_value};
pub use resolver::{PathResolver, SealedPath, join_relative, normalize};

// Re-exports from config
pub use config::{
    AppDataDir, DEFAULT_EMBEDDING_FILE, DEFAULT_FILE_EXT, HostRuntime, PreferenceConfig,
    PreferenceConfigBuilder,
};
