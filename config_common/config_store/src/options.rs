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

use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Mapping;

use crate::error::ConfigError;
use crate::store::Config;

pub const DEFAULT_NESTED_SEPARATOR: &str = ".";

/// Handle settings a host can load from its own configuration.
///
/// ```yaml
/// nested_separator: "::"
/// always_update: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigOptions {
    /// Separator used to split nested keys
    #[serde(default = "default_nested_separator")]
    pub nested_separator: String,
    /// Whether mutators persist and reads reload unless told otherwise
    #[serde(default)]
    pub always_update: bool,
}

fn default_nested_separator() -> String {
    DEFAULT_NESTED_SEPARATOR.to_string()
}

impl Default for ConfigOptions {
    fn default() -> Self {
        ConfigOptions {
            nested_separator: default_nested_separator(),
            always_update: false,
        }
    }
}

impl ConfigOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nested_separator.is_empty() {
            return Err(ConfigError::SeparatorEmpty);
        }
        Ok(())
    }
}

/// Builder for [`Config`] handles with non-default settings.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    path: PathBuf,
    contents: Mapping,
    options: ConfigOptions,
}

impl ConfigBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigBuilder {
            path: path.into(),
            contents: Mapping::new(),
            options: ConfigOptions::default(),
        }
    }

    /// Initial contents written to the file when the handle is built.
    pub fn contents(mut self, contents: Mapping) -> Self {
        self.contents = contents;
        self
    }

    pub fn nested_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.nested_separator = separator.into();
        self
    }

    pub fn always_update(mut self, always_update: bool) -> Self {
        self.options.always_update = always_update;
        self
    }

    pub fn options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the handle and writes the initial contents to its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is empty or the file cannot be written.
    pub fn build(self) -> Result<Config, ConfigError> {
        self.options.validate()?;
        Config::create(self.path, self.contents, self.options)
    }
}
