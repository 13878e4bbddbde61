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

//! Per-call read and write modes, and batch key lists.

/// How a read treats the contents cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Reload first only when the handle is always-updated.
    #[default]
    Policy,
    /// Read the contents cache as it is.
    Cached,
    /// Reload the file before reading.
    Reload,
}

impl ReadMode {
    pub(crate) fn should_reload(self, always_update: bool) -> bool {
        match self {
            ReadMode::Policy => always_update,
            ReadMode::Cached => false,
            ReadMode::Reload => true,
        }
    }
}

/// When a mutation is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Persist only when the handle is always-updated.
    #[default]
    Policy,
    /// Save and reload right after the mutation.
    Persist,
    /// Keep the mutation in memory until the next save or update.
    Defer,
}

impl WriteMode {
    pub(crate) fn should_persist(self, always_update: bool) -> bool {
        match self {
            WriteMode::Policy => always_update,
            WriteMode::Persist => true,
            WriteMode::Defer => false,
        }
    }
}

/// One entry of a batch key list: a key, or a nested group of entries.
///
/// ```
/// use config_store::KeyTree;
///
/// let keys: Vec<KeyTree> = vec!["motd".into(), vec!["port", "name"].into()];
/// assert_eq!(KeyTree::flatten(&keys), vec!["motd", "port", "name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTree {
    Key(String),
    Group(Vec<KeyTree>),
}

impl KeyTree {
    /// Collects every key in depth-first order.
    pub fn flatten(keys: &[KeyTree]) -> Vec<&str> {
        let mut out = Vec::new();
        for key in keys {
            key.collect_into(&mut out);
        }
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            KeyTree::Key(key) => out.push(key),
            KeyTree::Group(group) => {
                for key in group {
                    key.collect_into(out);
                }
            }
        }
    }
}

impl From<&str> for KeyTree {
    fn from(key: &str) -> Self {
        KeyTree::Key(key.to_string())
    }
}

impl From<String> for KeyTree {
    fn from(key: String) -> Self {
        KeyTree::Key(key)
    }
}

impl<T: Into<KeyTree>> From<Vec<T>> for KeyTree {
    fn from(group: Vec<T>) -> Self {
        KeyTree::Group(group.into_iter().map(Into::into).collect())
    }
}
