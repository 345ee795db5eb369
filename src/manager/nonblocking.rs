//! Async operations
//!
//! Every `*_async` method checks its arguments and resolves the target path
//! before returning. The returned future only performs file I/O and never
//! fails; `?` on the method call is where errors surface.
//!
//! ```rust,no_run
//! # async fn run(prefs: &user_settings::Preferences) -> user_settings::Result<()> {
//! let saved = prefs.set_state_async("theme", "dark", None)?.await;
//! let theme = prefs.get_state_async("theme", "light", None)?.await;
//! # Ok(())
//! # }
//! ```

use super::blocking::to_json_text;
use super::{Preferences, args};
use crate::document;
use crate::error::Result;

use log::{debug, warn};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;

/// A boxed, `Send` future that owns everything it touches
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

impl Preferences {
    /// Async counterpart of [`Preferences::has_key`]
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are malformed or no path is
    /// available; the future itself cannot fail.
    pub fn has_key_async(
        &self,
        key: &str,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<bool>> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();

        Ok(Box::pin(async move {
            let doc = store.read_async(&path).await;
            document::has_key(&doc, &key)
        }))
    }

    /// Async counterpart of [`Preferences::get_state`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_async`].
    pub fn get_state_async(
        &self,
        key: &str,
        default_value: impl Display,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<String>> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();
        let default_value = default_value.to_string();

        Ok(Box::pin(async move {
            let doc = store.read_async(&path).await;
            document::get_state(&doc, &key, &default_value)
        }))
    }

    /// Async counterpart of [`Preferences::get_states`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_async`].
    pub fn get_states_async<K: AsRef<str>>(
        &self,
        keys: &[K],
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<Vec<String>>> {
        args::check_keys(keys)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();

        Ok(Box::pin(async move {
            let doc = store.read_async(&path).await;
            document::get_states(&doc, &keys)
        }))
    }

    /// Async counterpart of [`Preferences::set_state`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_async`].
    pub fn set_state_async(
        &self,
        key: &str,
        value: impl Display,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<bool>> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();
        let value = value.to_string();

        Ok(Box::pin(async move {
            let mut doc = store.read_async(&path).await;
            document::insert_state(&mut doc, &key, value);
            store.write_async(&path, &doc).await
        }))
    }

    /// Async counterpart of [`Preferences::set_states`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_async`].
    pub fn set_states_async<I, K, V>(
        &self,
        states: I,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<Vec<String>>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        let states = document::stringify_pairs(states);
        args::check_pairs(&states)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();

        Ok(Box::pin(async move {
            let mut doc = store.read_async(&path).await;
            let inserted = document::insert_states(&mut doc, &states);
            if store.write_async(&path, &doc).await {
                inserted
            } else {
                Vec::new()
            }
        }))
    }

    /// Async counterpart of [`Preferences::delete_key`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_async`].
    pub fn delete_key_async(
        &self,
        key: &str,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<bool>> {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();

        Ok(Box::pin(async move {
            let mut doc = store.read_async(&path).await;
            if !document::remove_key(&mut doc, &key) {
                debug!("Key {key} not present, nothing to delete");
                return true;
            }
            store.write_async(&path, &doc).await
        }))
    }

    /// Async counterpart of [`Preferences::serialize`]
    ///
    /// # Errors
    ///
    /// Returns an error if `document` is not a JSON object, or no path is
    /// available.
    pub fn serialize_async(
        &self,
        document: &Value,
        optional_file_name: Option<&str>,
    ) -> Result<BoxFuture<bool>> {
        let doc = args::check_document(document)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();

        Ok(Box::pin(async move { store.write_async(&path, &doc).await }))
    }

    /// Async counterpart of [`Preferences::deserialize`]
    ///
    /// # Errors
    ///
    /// Returns an error if no path is available.
    pub fn deserialize_async(&self, optional_file_name: Option<&str>) -> Result<BoxFuture<String>> {
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();

        Ok(Box::pin(async move {
            let doc = store.read_async(&path).await;
            to_json_text(&doc).unwrap_or_else(|e| {
                warn!("{e}");
                "{}".to_string()
            })
        }))
    }

    /// Async counterpart of [`Preferences::delete_file`]
    ///
    /// # Errors
    ///
    /// Returns an error if no path is available.
    pub fn delete_file_async(&self, optional_file_name: Option<&str>) -> Result<BoxFuture<bool>> {
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();

        Ok(Box::pin(async move { store.delete_async(&path).await }))
    }
}
