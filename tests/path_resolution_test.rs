//! Path Resolution Integration Tests
//!
//! Default path sealing and embedding storage:
//! - Explicit default path is set at most once
//! - Directory configuration seals at construction
//! - Embedding storage derives the path from the host runtime on first use
//! - Optional files resolve next to the default file

mod common;

use common::TestFixture;
use std::fs;
use std::io;
use std::path::PathBuf;
use user_settings::{Error, Preferences, normalize};

// =============================================================================
// Explicit Default Path
// =============================================================================

#[test]
fn test_set_default_path_twice_fails() {
    let fixture = TestFixture::unconfigured();
    let file = fixture.path_of("Prefs.json");
    fs::write(&file, "{}").unwrap();

    assert_eq!(
        fixture.prefs.set_default_preference_file_path(&file).unwrap(),
        file
    );
    let err = fixture
        .prefs
        .set_default_preference_file_path(&file)
        .unwrap_err();
    assert!(matches!(err, Error::UnModifiableState(_)));
}

#[test]
fn test_explicit_default_path_is_used_by_operations() {
    let fixture = TestFixture::unconfigured();
    let file = fixture.path_of("Prefs.json");
    fs::write(&file, r#"{"seeded":"yes"}"#).unwrap();

    fixture.prefs.set_default_preference_file_path(&file).unwrap();
    assert_eq!(fixture.prefs.get_state("seeded", "no", None).unwrap(), "yes");

    // Optional files land in the same directory
    fixture.prefs.set_state("k", "v", Some("Side.json")).unwrap();
    assert!(fixture.path_of("Side.json").exists());
}

#[test]
fn test_set_default_path_rejects_non_files() {
    let fixture = TestFixture::unconfigured();

    let err = fixture
        .prefs
        .set_default_preference_file_path(fixture.temp_dir.path())
        .unwrap_err();
    assert!(matches!(err, Error::IllegalState(_)));

    let err = fixture
        .prefs
        .set_default_preference_file_path(fixture.path_of("missing.json"))
        .unwrap_err();
    assert!(matches!(err, Error::IllegalState(_)));

    // Nothing got sealed, a valid file is still accepted
    let file = fixture.path_of("Valid.json");
    fs::write(&file, "{}").unwrap();
    assert!(fixture.prefs.set_default_preference_file_path(&file).is_ok());
}

#[test]
fn test_set_default_path_on_configured_instance_fails() {
    let fixture = TestFixture::new();
    let file = fixture.path_of("Other.json");
    fs::write(&file, "{}").unwrap();

    let err = fixture
        .prefs
        .set_default_preference_file_path(&file)
        .unwrap_err();
    assert!(matches!(err, Error::UnModifiableState(_)));
    assert_eq!(
        fixture.prefs.default_preference_file_path().unwrap(),
        fixture.settings_path()
    );
}

#[test]
fn test_unconfigured_operations_fail_initialization() {
    let fixture = TestFixture::unconfigured();

    assert!(
        fixture
            .prefs
            .get_state("k", "d", None)
            .unwrap_err()
            .is_initialization_error()
    );
    assert!(
        fixture
            .prefs
            .default_preference_file_path()
            .unwrap_err()
            .is_initialization_error()
    );
}

// =============================================================================
// Directory Configuration
// =============================================================================

#[test]
fn test_file_ext_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::builder()
        .preference_file_dir(dir.path())
        .file_name("Prefs")
        .file_ext(".conf")
        .build();

    assert_eq!(
        prefs.default_preference_file_path().unwrap(),
        dir.path().join("Prefs.conf")
    );
    prefs.set_state("k", "v", None).unwrap();
    assert!(dir.path().join("Prefs.conf").exists());
}

#[test]
#[allow(deprecated)]
fn test_deprecated_full_file_name_still_works() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::builder()
        .preference_file_dir(dir.path())
        .preference_file_name("Legacy.json")
        .build();

    assert_eq!(
        prefs.default_preference_file_path().unwrap(),
        dir.path().join("Legacy.json")
    );
}

#[test]
fn test_default_path_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::builder()
        .preference_file_dir(dir.path().join("a/./b/.."))
        .file_name("Settings")
        .build();

    assert_eq!(
        prefs.default_preference_file_path().unwrap(),
        normalize(&dir.path().join("a/Settings.json"))
    );
}

#[test]
fn test_optional_path_with_parent_segments() {
    let fixture = TestFixture::new();

    fixture
        .prefs
        .set_state("k", "v", Some("sub/../Flat.json"))
        .unwrap();
    assert!(fixture.path_of("Flat.json").exists());
    assert_eq!(
        fixture.prefs.last_optional_file_path(),
        Some(normalize(&fixture.path_of("Flat.json")))
    );
}

// =============================================================================
// Embedding Storage
// =============================================================================

#[test]
fn test_embedding_storage_uses_host_data_dir() {
    let fixture = TestFixture::embedded();
    let expected = fixture.temp_dir.path().join("data/Settings.json");

    assert!(fixture.prefs.is_using_embedding_storage());
    assert!(fixture.prefs.set_state("k", "v", None).unwrap());
    assert!(expected.exists());
    assert_eq!(fixture.prefs.default_preference_file_path().unwrap(), expected);
}

#[test]
fn test_embedding_file_path_before_first_use() {
    let fixture = TestFixture::embedded();
    fixture.prefs.set_embedding_file_path("/conf/user.json");
    assert_eq!(
        fixture.prefs.embedding_file_path(),
        PathBuf::from("/conf/user.json")
    );

    fixture.prefs.set_state("k", "v", None).unwrap();
    assert!(fixture.temp_dir.path().join("data/conf/user.json").exists());

    // Sealed now
    fixture.prefs.set_embedding_file_path("ignored.json");
    assert_eq!(
        fixture.prefs.default_preference_file_path().unwrap(),
        fixture.temp_dir.path().join("data/conf/user.json")
    );
}

#[test]
fn test_unavailable_host_runtime_fails_lazily() {
    let prefs = Preferences::builder()
        .use_embedding_storage(true)
        .host_runtime(|| -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no host"))
        })
        .build();

    let err = prefs.has_key("k", None).unwrap_err();
    assert!(err.is_initialization_error());
    assert!(err.to_string().contains("no host"));
}

#[test]
fn test_disabling_embedding_before_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::builder()
        .preference_file_dir(dir.path())
        .file_name("Settings")
        .use_embedding_storage(true)
        .host_runtime(|| -> io::Result<PathBuf> { Err(io::ErrorKind::NotFound.into()) })
        .build();

    prefs.set_use_embedding_storage(false);
    prefs.set_state("k", "v", None).unwrap();
    assert!(dir.path().join("Settings.json").exists());
}

#[test]
fn test_defaults_is_lazy() {
    // Construction never touches the host runtime or the disk
    let prefs = Preferences::defaults();
    assert!(prefs.is_using_embedding_storage());
    assert!(prefs.resolver().sealed().is_none());
}
