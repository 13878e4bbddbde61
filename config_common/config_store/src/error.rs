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

//! Error types for the document store
//!
//! Most store operations report failure as a boolean and log the cause. The
//! `try_*` operations return these errors directly.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written
    #[error("Failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML. Line and column are 1-based, 0 when unknown
    #[error("Failed to parse config file {} at line {line}, column {column}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to serialize config contents: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// The document parsed, but its top level is not a mapping
    #[error("Config file {} must hold a mapping at the top level, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A typed accessor found a value that does not convert to the requested type
    #[error("Value at key '{key}' has an unexpected type: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Nested key separator must not be empty")]
    SeparatorEmpty,
}

impl ConfigError {
    pub(crate) fn parse(path: PathBuf, err: serde_yaml::Error) -> Self {
        let (line, column) = err.location().map(|loc| (loc.line(), loc.column())).unwrap_or((0, 0));
        ConfigError::Parse {
            path,
            line,
            column,
            message: err.to_string(),
        }
    }
}
