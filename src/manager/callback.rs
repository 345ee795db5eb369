//! Completion-notified operations
//!
//! Every `*_with` method validates its arguments and resolves the target
//! path on the calling thread, then runs the file work on a worker thread
//! and passes the outcome to `callback`. Errors that can be detected up
//! front are returned directly and the callback is never invoked.

use super::blocking::to_json_text;
use super::{Preferences, args};
use crate::document;
use crate::error::Result;

use log::debug;
use serde_json::Value;
use std::fmt::Display;
use std::thread::JoinHandle;

impl Preferences {
    /// Callback counterpart of [`Preferences::has_key`]
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are malformed or no path is
    /// available.
    pub fn has_key_with<F>(
        &self,
        key: &str,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let key = key.to_string();

        Ok(self.store.read_with(path, move |doc| {
            callback(doc.map(|doc| document::has_key(&doc, &key)));
        }))
    }

    /// Callback counterpart of [`Preferences::get_state`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_with`].
    pub fn get_state_with<F>(
        &self,
        key: &str,
        default_value: impl Display,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<String>) + Send + 'static,
    {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let key = key.to_string();
        let default_value = default_value.to_string();

        Ok(self.store.read_with(path, move |doc| {
            callback(doc.map(|doc| document::get_state(&doc, &key, &default_value)));
        }))
    }

    /// Callback counterpart of [`Preferences::get_states`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_with`].
    pub fn get_states_with<K, F>(
        &self,
        keys: &[K],
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        K: AsRef<str>,
        F: FnOnce(Result<Vec<String>>) + Send + 'static,
    {
        args::check_keys(keys)?;
        let path = self.prepare(optional_file_name)?;
        let keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();

        Ok(self.store.read_with(path, move |doc| {
            callback(doc.map(|doc| document::get_states(&doc, &keys)));
        }))
    }

    /// Callback counterpart of [`Preferences::set_state`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_with`].
    pub fn set_state_with<F>(
        &self,
        key: &str,
        value: impl Display,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();
        let value = value.to_string();

        Ok(self.store.read_with(path.clone(), move |doc| {
            callback(doc.map(|mut doc| {
                document::insert_state(&mut doc, &key, value);
                store.write(&path, &doc)
            }));
        }))
    }

    /// Callback counterpart of [`Preferences::set_states`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_with`].
    pub fn set_states_with<I, K, V, F>(
        &self,
        states: I,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
        F: FnOnce(Result<Vec<String>>) + Send + 'static,
    {
        let states = document::stringify_pairs(states);
        args::check_pairs(&states)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();

        Ok(self.store.read_with(path.clone(), move |doc| {
            callback(doc.map(|mut doc| {
                let inserted = document::insert_states(&mut doc, &states);
                if store.write(&path, &doc) {
                    inserted
                } else {
                    Vec::new()
                }
            }));
        }))
    }

    /// Callback counterpart of [`Preferences::delete_key`]
    ///
    /// # Errors
    ///
    /// See [`Preferences::has_key_with`].
    pub fn delete_key_with<F>(
        &self,
        key: &str,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        args::check_key(key)?;
        let path = self.prepare(optional_file_name)?;
        let store = self.store.clone();
        let key = key.to_string();

        Ok(self.store.read_with(path.clone(), move |doc| {
            callback(doc.map(|mut doc| {
                if !document::remove_key(&mut doc, &key) {
                    debug!("Key {key} not present, nothing to delete");
                    return true;
                }
                store.write(&path, &doc)
            }));
        }))
    }

    /// Callback counterpart of [`Preferences::serialize`]
    ///
    /// # Errors
    ///
    /// Returns an error if `document` is not a JSON object, or no path is
    /// available.
    pub fn serialize_with<F>(
        &self,
        document: &Value,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        let doc = args::check_document(document)?;
        let path = self.prepare(optional_file_name)?;
        Ok(self.store.write_with(path, doc, callback))
    }

    /// Callback counterpart of [`Preferences::deserialize`]
    ///
    /// # Errors
    ///
    /// Returns an error if no path is available.
    pub fn deserialize_with<F>(
        &self,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<String>) + Send + 'static,
    {
        let path = self.prepare(optional_file_name)?;
        Ok(self.store.read_with(path, move |doc| {
            callback(doc.and_then(|doc| to_json_text(&doc)));
        }))
    }

    /// Callback counterpart of [`Preferences::delete_file`]
    ///
    /// # Errors
    ///
    /// Returns an error if no path is available.
    pub fn delete_file_with<F>(
        &self,
        optional_file_name: Option<&str>,
        callback: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<bool>) + Send + 'static,
    {
        let path = self.prepare(optional_file_name)?;
        Ok(self.store.delete_with(path, callback))
    }
}

#[cfg(test)]
mod tests {
    use crate::Preferences;
    use serde_json::json;
    use std::sync::mpsc;
    use tempfile::{TempDir, tempdir};

    fn prefs() -> (TempDir, Preferences) {
        let dir = tempdir().unwrap();
        let prefs = Preferences::builder()
            .preference_file_dir(dir.path())
            .file_name("Settings")
            .build();
        (dir, prefs)
    }

    #[test]
    fn test_set_then_get_with() {
        let (_dir, prefs) = prefs();

        let (tx, rx) = mpsc::channel();
        prefs
            .set_state_with("theme", "dark", None, move |res| {
                tx.send(res.unwrap()).unwrap();
            })
            .unwrap()
            .join()
            .unwrap();
        assert!(rx.recv().unwrap());

        let (tx, rx) = mpsc::channel();
        prefs
            .get_state_with("theme", "light", None, move |res| {
                tx.send(res.unwrap()).unwrap();
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), "dark");
    }

    #[test]
    fn test_argument_error_skips_callback() {
        let (_dir, prefs) = prefs();

        let (tx, rx) = mpsc::channel::<bool>();
        let result = prefs.has_key_with("", None, move |res| {
            tx.send(res.unwrap()).unwrap();
        });

        assert!(result.unwrap_err().is_argument_error());
        // The sender was dropped without sending
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_states_and_delete_key_with() {
        let (_dir, prefs) = prefs();

        let (tx, rx) = mpsc::channel();
        prefs
            .set_states_with([("a", 1), ("b", 2)], None, move |res| {
                tx.send(res.unwrap()).unwrap();
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), vec!["1", "2"]);

        let (tx, rx) = mpsc::channel();
        prefs
            .delete_key_with("a", None, move |res| tx.send(res.unwrap()).unwrap())
            .unwrap()
            .join()
            .unwrap();
        assert!(rx.recv().unwrap());

        let (tx, rx) = mpsc::channel();
        prefs
            .get_states_with(&["a", "b"], None, move |res| {
                tx.send(res.unwrap()).unwrap();
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), vec!["undefined", "2"]);
    }

    #[test]
    fn test_serialize_deserialize_delete_with() {
        let (dir, prefs) = prefs();

        let (tx, rx) = mpsc::channel();
        prefs
            .serialize_with(&json!({"k": "v"}), None, move |res| {
                tx.send(res.unwrap()).unwrap();
            })
            .unwrap()
            .join()
            .unwrap();
        assert!(rx.recv().unwrap());

        let (tx, rx) = mpsc::channel();
        prefs
            .deserialize_with(None, move |res| tx.send(res.unwrap()).unwrap())
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), r#"{"k":"v"}"#);

        let (tx, rx) = mpsc::channel();
        prefs
            .delete_file_with(None, move |res| tx.send(res.unwrap()).unwrap())
            .unwrap()
            .join()
            .unwrap();
        assert!(rx.recv().unwrap());
        assert!(!dir.path().join("Settings.json").exists());
    }
}
