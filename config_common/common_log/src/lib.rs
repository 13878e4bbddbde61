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

pub mod config;
pub mod logger;

use std::sync::OnceLock;

use config_store::Config;

use crate::config::LogConfig;
use crate::logger::Logger;

// Re-export log macros for convenient use in other modules
pub use log::{debug, error, info, trace, warn};

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Initialize logging system with config
///
/// # Example
/// ```no_run
/// use common_log::config::LogConfig;
///
/// common_log::init_with_config(&LogConfig::default()).expect("Failed to initialize logger");
/// log::info!("Logger initialized");
/// ```
pub fn init_with_config(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".into());
    }
    let logger = Logger::new_from_config(config)?;
    if LOGGER.set(logger).is_err() {
        return Err("Logger already initialized".into());
    }
    Ok(())
}

/// Initialize logging system from the settings stored under `key` of a config document
///
/// # Example
/// ```no_run
/// use config_store::Config;
///
/// let mut store = Config::new("plugin_config.yml").expect("Failed to create config");
/// store.reload();
/// common_log::init_from_store(&mut store, "logging").expect("Failed to initialize logger");
/// ```
pub fn init_from_store(store: &mut Config, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = LogConfig::from_store(store, key)?;
    init_with_config(&config)
}

/// Apply new settings to the installed logger
pub fn reconfigure(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    match LOGGER.get() {
        Some(logger) => logger.reconfigure(config),
        None => Err("Logger not initialized".into()),
    }
}
