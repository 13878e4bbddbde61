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

use config_store::{Config, ReadMode};
use serde::Deserialize;

pub const DEFAULT_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S:%3f)} {l} [{M}:{L}] - {m}{n}";

/// Logging settings, usually kept under a `logging` key of a plugin config.
///
/// ```yaml
/// logging:
///   level: debug
///   file:
///     log_directory: logs
///     log_file_name: plugin.log
///   loggers:
///     - path_prefix: config_store
///       level: warn
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Rolling file output; logs go to the console when absent
    #[serde(default)]
    pub file: Option<LogFileConfig>,
    /// Per-module level overrides
    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogFileConfig {
    pub log_directory: String,
    pub log_file_name: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_max_zip_count")]
    pub max_zip_count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggerConfig {
    pub path_prefix: String,
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_zip_count() -> u32 {
    6
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
            pattern: default_pattern(),
            file: None,
            loggers: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Reads the logging settings stored under `key` of a config document.
    ///
    /// A missing key yields the default settings.
    pub fn from_store(store: &mut Config, key: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(store.get_nested_as::<LogConfig>(key, ReadMode::Policy)?.unwrap_or_default())
    }

    pub fn get_logger_config(&self, path_prefix: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| path_prefix.starts_with(&l.path_prefix))
    }
}
