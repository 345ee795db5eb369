//! Common test utilities for user-settings integration tests
//!
//! Provides a temp-dir backed fixture and helpers for inspecting the
//! preference file on disk.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;
use user_settings::Preferences;

/// Base name of the default preference file used by the fixture
pub const FILE_NAME: &str = "Settings";

// =============================================================================
// Test Fixture
// =============================================================================

/// A preferences instance whose default file lives in a fresh temp directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub prefs: Preferences,
}

impl TestFixture {
    /// Create a new test fixture with a directory-configured default path
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let prefs = Preferences::builder()
            .preference_file_dir(temp_dir.path())
            .file_name(FILE_NAME)
            .build();

        Self { temp_dir, prefs }
    }

    /// Create a fixture with nothing configured, so the default path can be
    /// set explicitly
    pub fn unconfigured() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let prefs = Preferences::builder().build();

        Self { temp_dir, prefs }
    }

    /// Create a fixture whose default path comes from a fake host runtime
    /// rooted in the temp directory
    pub fn embedded() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");
        let prefs = Preferences::builder()
            .use_embedding_storage(true)
            .host_runtime(move || -> std::io::Result<PathBuf> { Ok(data_dir.clone()) })
            .build();

        Self { temp_dir, prefs }
    }

    /// Path of the default preference file
    pub fn settings_path(&self) -> PathBuf {
        self.temp_dir.path().join(format!("{FILE_NAME}.json"))
    }

    /// Path of a file next to the default one
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.temp_dir.path().join(file_name)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read the raw settings JSON file content
pub fn read_settings_file(fixture: &TestFixture) -> Option<serde_json::Value> {
    read_json(&fixture.settings_path())
}

/// Read and parse any JSON file, `None` if missing or unparseable
pub fn read_json(path: &std::path::Path) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Check if a key exists in the settings JSON file
pub fn key_exists_in_file(fixture: &TestFixture, key: &str) -> bool {
    read_settings_file(fixture)
        .map(|json| json.get(key).is_some())
        .unwrap_or(false)
}
