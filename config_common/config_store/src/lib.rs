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

//! YAML configuration document store.
//!
//! A [`Config`] wraps one file path and an in-memory copy of the document it
//! holds (the contents cache). Values are read and written through flat keys,
//! separator-delimited nested keys such as `server.port`, or batches of keys,
//! and the cache is written back to disk only when the caller asks for it or
//! when the handle's always-update policy says so.
//!
//! # Features
//!
//! * Flat, nested and batch accessors over `serde_yaml::Value`
//! * Create-on-write nested assignment and guarded nested removal
//! * Dirty tracking through [`Config::has_changed`]
//! * Boolean persistence results, with `try_*` variants exposing [`ConfigError`]
//!
//! Each handle assumes it is the only writer of its file. There is no locking
//! and no atomic rename on save.
//!
//! # Example
//!
//! ```no_run
//! use config_store::{Config, ReadMode, Value, WriteMode};
//!
//! let mut config = Config::new("plugin_config.yml").expect("Failed to create config");
//! config.set_nested("server.port", 19132, None, WriteMode::Defer);
//! assert_eq!(config.get_nested("server.port", 0, None, ReadMode::Cached), Value::from(19132));
//! assert!(config.update());
//! ```

pub mod error;
pub mod mode;
pub mod options;
pub mod store;

pub use error::ConfigError;
pub use mode::{KeyTree, ReadMode, WriteMode};
pub use options::{ConfigBuilder, ConfigOptions, DEFAULT_NESTED_SEPARATOR};
pub use store::Config;

pub use serde_yaml::{Mapping, Value};

/// Version of the document store library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
