/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use yaml_value::path;

use crate::error::ConfigError;
use crate::mode::{KeyTree, ReadMode, WriteMode};
use crate::options::{ConfigBuilder, ConfigOptions};

/// A YAML document on disk together with its in-memory contents cache.
///
/// Reads take a [`ReadMode`] and mutators a [`WriteMode`]; both default to the
/// handle's always-update policy. Mutators only mark the handle as changed when
/// the cache really changed.
///
/// Failures never panic or propagate out of the boolean API: a failed save
/// leaves the cache and the changed flag as they were, a failed reload empties
/// the cache.
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    contents: Mapping,
    changed: bool,
    nested_separator: String,
    always_update: bool,
}

impl Config {
    /// Creates a handle with empty contents and writes them to `path`.
    ///
    /// Existing file contents are overwritten, call [`Config::reload`] to read
    /// a file instead.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        ConfigBuilder::new(path).build()
    }

    /// Creates a handle holding `contents` and writes them to `path`.
    pub fn with_contents(path: impl Into<PathBuf>, contents: Mapping) -> Result<Self, ConfigError> {
        ConfigBuilder::new(path).contents(contents).build()
    }

    pub fn builder(path: impl Into<PathBuf>) -> ConfigBuilder {
        ConfigBuilder::new(path)
    }

    pub(crate) fn create(path: PathBuf, contents: Mapping, options: ConfigOptions) -> Result<Self, ConfigError> {
        let mut config = Config {
            path,
            contents,
            changed: false,
            nested_separator: options.nested_separator,
            always_update: options.always_update,
        };
        config.try_save()?;
        info!("Created config file {}", config.path.display());
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points the handle at another file. No I/O happens until the next save or reload.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn nested_separator(&self) -> &str {
        &self.nested_separator
    }

    pub fn set_nested_separator(&mut self, separator: impl Into<String>) -> Result<(), ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::SeparatorEmpty);
        }
        self.nested_separator = separator;
        Ok(())
    }

    pub fn is_always_updated(&self) -> bool {
        self.always_update
    }

    pub fn set_always_updated(&mut self, always_update: bool) {
        self.always_update = always_update;
    }

    // Reads

    /// Returns the value at top-level `key`, or `default` if it is absent.
    pub fn get(&mut self, key: &str, default: impl Into<Value>, mode: ReadMode) -> Value {
        self.refresh(mode);
        match self.contents.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Returns the value at a nested key such as `server.port`, or `default` as
    /// soon as a segment is missing. `separator` overrides the handle's one.
    pub fn get_nested(&mut self, key: &str, default: impl Into<Value>, separator: Option<&str>, mode: ReadMode) -> Value {
        self.refresh(mode);
        let segments = self.segments(key, separator);
        match path::lookup(&self.contents, &segments) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Deserializes the value at a nested key into `T`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if the key is absent
    /// * `Err(ConfigError::Deserialize)` if the value does not convert to `T`
    pub fn get_nested_as<T: DeserializeOwned>(&mut self, key: &str, mode: ReadMode) -> Result<Option<T>, ConfigError> {
        self.refresh(mode);
        let segments = self.segments(key, None);
        match path::lookup(&self.contents, &segments) {
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|source| ConfigError::Deserialize { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Resolves every key of a batch into one flat mapping.
    ///
    /// Groups are flattened in order, so a key listed twice keeps the value of
    /// its last occurrence.
    pub fn get_contents(&mut self, keys: &[KeyTree], default: impl Into<Value>, mode: ReadMode) -> Mapping {
        self.refresh(mode);
        let default = default.into();
        let mut result = Mapping::new();
        for key in KeyTree::flatten(keys) {
            let value = self.contents.get(key).cloned().unwrap_or_else(|| default.clone());
            result.insert(Value::String(key.to_string()), value);
        }
        result
    }

    pub fn exists(&mut self, key: &str, mode: ReadMode) -> bool {
        self.refresh(mode);
        self.contents.contains_key(key)
    }

    pub fn exists_nested(&mut self, key: &str, separator: Option<&str>, mode: ReadMode) -> bool {
        self.refresh(mode);
        let segments = self.segments(key, separator);
        path::lookup(&self.contents, &segments).is_some()
    }

    pub fn exists_contents(&mut self, keys: &[KeyTree], mode: ReadMode) -> HashMap<String, bool> {
        self.refresh(mode);
        KeyTree::flatten(keys)
            .into_iter()
            .map(|key| (key.to_string(), self.contents.contains_key(key)))
            .collect()
    }

    /// Returns the whole contents cache.
    pub fn get_all(&mut self, mode: ReadMode) -> &Mapping {
        self.refresh(mode);
        &self.contents
    }

    pub fn is_empty(&mut self, mode: ReadMode) -> bool {
        self.refresh(mode);
        self.contents.is_empty()
    }

    // Writes
    //
    // The `bool` returned by `set*` and `remove_all` is false only when an
    // immediate persist was requested and failed.

    pub fn set(&mut self, key: &str, value: impl Into<Value>, mode: WriteMode) -> bool {
        let value = value.into();
        if self.contents.get(key) == Some(&value) {
            return true;
        }
        self.contents.insert(Value::String(key.to_string()), value);
        self.mark_changed(mode)
    }

    /// Assigns `value` at a nested key, creating missing levels as mappings.
    ///
    /// A scalar or sequence sitting on the path is replaced by a mapping.
    pub fn set_nested(&mut self, key: &str, value: impl Into<Value>, separator: Option<&str>, mode: WriteMode) -> bool {
        let segments = self.segments(key, separator);
        if !path::insert(&mut self.contents, &segments, value.into()) {
            return true;
        }
        self.mark_changed(mode)
    }

    /// Deep-merges `contents` into the cache.
    pub fn set_contents(&mut self, contents: Mapping, mode: WriteMode) -> bool {
        if !path::merge(&mut self.contents, contents) {
            return true;
        }
        self.mark_changed(mode)
    }

    /// Replaces the whole cache with `contents`.
    pub fn set_all(&mut self, contents: Mapping, mode: WriteMode) -> bool {
        if self.contents == contents {
            return true;
        }
        self.contents = contents;
        self.mark_changed(mode)
    }

    // The remove* results report what was removed, not whether it was persisted.
    // A failed immediate persist is logged and leaves `has_changed()` true.

    /// Removes a top-level key. Returns false, and changes nothing, if it was absent.
    pub fn remove(&mut self, key: &str, mode: WriteMode) -> bool {
        if self.contents.shift_remove(key).is_none() {
            return false;
        }
        self.persist_removal(key, mode);
        true
    }

    /// Removes the value at a nested key if the whole path resolves.
    pub fn remove_nested(&mut self, key: &str, separator: Option<&str>, mode: WriteMode) -> bool {
        let segments = self.segments(key, separator);
        if path::remove(&mut self.contents, &segments).is_none() {
            return false;
        }
        self.persist_removal(key, mode);
        true
    }

    /// Removes every key of a batch and reports, per key, whether it was removed.
    pub fn remove_contents(&mut self, keys: &[KeyTree], mode: WriteMode) -> HashMap<String, bool> {
        let mut result: HashMap<String, bool> = HashMap::new();
        for key in KeyTree::flatten(keys) {
            let removed = self.contents.shift_remove(key).is_some();
            *result.entry(key.to_string()).or_insert(false) |= removed;
        }
        let removed: Vec<&str> = result.iter().filter(|(_, removed)| **removed).map(|(key, _)| key.as_str()).collect();
        if !removed.is_empty() {
            let keys = removed.join(", ");
            self.persist_removal(&keys, mode);
        }
        result
    }

    pub fn remove_all(&mut self, mode: WriteMode) -> bool {
        self.set_all(Mapping::new(), mode)
    }

    // Persistence

    /// Writes the contents cache to the file. Returns false on failure.
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Writes the contents cache to the file.
    ///
    /// On error the cache and the changed flag are left untouched.
    pub fn try_save(&mut self) -> Result<(), ConfigError> {
        let yaml = self.contents_yaml()?;
        fs::write(&self.path, yaml).map_err(|source| ConfigError::Io { path: self.path.clone(), source })?;
        self.changed = false;
        debug!("Saved config file {}", self.path.display());
        Ok(())
    }

    /// Replaces the contents cache with the file's contents. Returns false on
    /// failure, in which case the cache is now empty.
    pub fn reload(&mut self) -> bool {
        match self.try_reload() {
            Ok(()) => true,
            Err(e) => {
                warn!("{}, contents cleared", e);
                false
            }
        }
    }

    /// Replaces the contents cache with the file's contents.
    ///
    /// On error the cache is reset to an empty mapping, never left stale.
    pub fn try_reload(&mut self) -> Result<(), ConfigError> {
        self.changed = false;
        match read_document(&self.path) {
            Ok(contents) => {
                self.contents = contents;
                debug!("Reloaded config file {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                self.contents = Mapping::new();
                Err(e)
            }
        }
    }

    /// Saves, then reloads. The reload is skipped if the save failed.
    pub fn update(&mut self) -> bool {
        self.save() && self.reload()
    }

    pub fn try_update(&mut self) -> Result<(), ConfigError> {
        self.try_save()?;
        self.try_reload()
    }

    /// Renders the contents cache exactly as [`Config::save`] writes it.
    pub fn contents_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&self.contents).map_err(ConfigError::Serialize)
    }

    fn refresh(&mut self, mode: ReadMode) {
        if mode.should_reload(self.always_update) {
            self.reload();
        }
    }

    fn mark_changed(&mut self, mode: WriteMode) -> bool {
        self.changed = true;
        if mode.should_persist(self.always_update) {
            return self.update();
        }
        true
    }

    fn persist_removal(&mut self, key: &str, mode: WriteMode) {
        if !self.mark_changed(mode) {
            warn!("Removed '{}' but failed to persist {}", key, self.path.display());
        }
    }

    fn segments<'k>(&self, key: &'k str, separator: Option<&str>) -> Vec<&'k str> {
        path::split_key(key, separator.unwrap_or(self.nested_separator.as_str()))
    }
}

fn read_document(path: &Path) -> Result<Mapping, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(&text).map_err(|e| ConfigError::parse(path.to_path_buf(), e))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
            found: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
