use super::{Preferences, args};
use crate::document::{self, Document};
use crate::error::Result;

use log::debug;
use serde_json::Value;
use std::fmt::Display;

impl Preferences {
    /// Check whether `key` is present in the preference file.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` or `optional_file_name` is malformed, or if
    /// no preference file path is available.
    pub fn has_key(&self, key: &str, optional_file_name: Option<&str>) -> Result<bool> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        Ok(document::has_key(&self.store.read(&path), key))
    }

    /// Get the value stored under `key`, or `default_value` rendered as a
    /// string if it was never set.
    ///
    /// # Errors
    ///
    /// Same as [`Preferences::has_key`].
    pub fn get_state(
        &self,
        key: &str,
        default_value: impl Display,
        optional_file_name: Option<&str>,
    ) -> Result<String> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let doc = self.store.read(&path);
        Ok(document::get_state(&doc, key, &default_value.to_string()))
    }

    /// Get the values stored under `keys`, in order.
    ///
    /// Keys that were never set come back as `"undefined"`.
    ///
    /// # Errors
    ///
    /// Returns an error if any key is empty, or the path cannot be resolved.
    pub fn get_states<K: AsRef<str>>(
        &self,
        keys: &[K],
        optional_file_name: Option<&str>,
    ) -> Result<Vec<String>> {
        args::check_keys(keys)?;
        let path = self.prepare(optional_file_name)?;
        Ok(document::get_states(&self.store.read(&path), keys))
    }

    /// Store `value` (rendered as a string) under `key`.
    ///
    /// Returns whether the file was written.
    ///
    /// # Errors
    ///
    /// Same as [`Preferences::has_key`]. Write failures are reported as
    /// `Ok(false)`.
    pub fn set_state(
        &self,
        key: &str,
        value: impl Display,
        optional_file_name: Option<&str>,
    ) -> Result<bool> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;

        let mut doc = self.store.read(&path);
        document::insert_state(&mut doc, key, value.to_string());
        Ok(self.store.write(&path, &doc))
    }

    /// Store several key/value pairs with a single write.
    ///
    /// Returns the values written in iteration order, or an empty list if
    /// the file could not be written.
    ///
    /// # Errors
    ///
    /// Returns an error if any key is empty, or the path cannot be resolved.
    pub fn set_states<I, K, V>(
        &self,
        states: I,
        optional_file_name: Option<&str>,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        let states = document::stringify_pairs(states);
        args::check_pairs(&states)?;
        let path = self.prepare(optional_file_name)?;

        let mut doc = self.store.read(&path);
        let inserted = document::insert_states(&mut doc, &states);
        if self.store.write(&path, &doc) {
            Ok(inserted)
        } else {
            Ok(Vec::new())
        }
    }

    /// Remove `key` from the preference file.
    ///
    /// Removing a key that is not present is a successful no-op.
    ///
    /// # Errors
    ///
    /// Same as [`Preferences::has_key`].
    pub fn delete_key(&self, key: &str, optional_file_name: Option<&str>) -> Result<bool> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;

        let mut doc = self.store.read(&path);
        if !document::remove_key(&mut doc, key) {
            debug!("Key {key} not present, nothing to delete");
            return Ok(true);
        }
        Ok(self.store.write(&path, &doc))
    }

    /// Replace the whole preference document.
    ///
    /// # Errors
    ///
    /// Returns an error if `document` is not a JSON object, or the path
    /// cannot be resolved.
    pub fn serialize(&self, document: &Value, optional_file_name: Option<&str>) -> Result<bool> {
        let doc = args::check_document(document)?;
        let path = self.prepare(optional_file_name)?;
        Ok(self.store.write(&path, &doc))
    }

    /// Read the whole preference document as compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    pub fn deserialize(&self, optional_file_name: Option<&str>) -> Result<String> {
        let path = self.prepare(optional_file_name)?;
        to_json_text(&self.store.read(&path))
    }

    /// Delete the preference file.
    ///
    /// Returns `false` if the file did not exist or could not be removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    pub fn delete_file(&self, optional_file_name: Option<&str>) -> Result<bool> {
        let path = self.prepare(optional_file_name)?;
        Ok(self.store.delete(&path))
    }
}

/// Compact JSON text of a document, independent of the storage formatting
pub(super) fn to_json_text(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string(doc)?)
}
