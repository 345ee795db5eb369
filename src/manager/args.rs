//! Argument checks shared by every calling convention
//!
//! These run before any I/O is started, so malformed calls fail immediately
//! even on the async and callback paths.

use crate::document::Document;
use crate::error::{Error, Result};
use serde_json::Value;

pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::IllegalArgument("key must be a non-empty string".into()));
    }
    Ok(())
}

pub(crate) fn check_keys<K: AsRef<str>>(keys: &[K]) -> Result<()> {
    for (index, key) in keys.iter().enumerate() {
        if key.as_ref().is_empty() {
            return Err(Error::IllegalArgument(format!(
                "key at index {index} must be a non-empty string"
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_pairs(states: &[(String, String)]) -> Result<()> {
    if let Some((index, _)) = states.iter().enumerate().find(|(_, (k, _))| k.is_empty()) {
        return Err(Error::IllegalArgument(format!(
            "state at index {index} has an empty key"
        )));
    }
    Ok(())
}

/// A serialized document must be a JSON object
pub(crate) fn check_document(document: &Value) -> Result<Document> {
    document.as_object().cloned().ok_or_else(|| {
        Error::IllegalArgument("preference document must be a JSON object".into())
    })
}

pub(crate) fn check_file_name(optional_file_name: Option<&str>) -> Result<()> {
    match optional_file_name {
        Some(name) if name.trim().is_empty() => Err(Error::IllegalArgument(
            "optional file name must not be blank".into(),
        )),
        _ => Ok(()),
    }
}
