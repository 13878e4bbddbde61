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

//! Path traversal over YAML mappings.
//!
//! A nested key such as `server.port` is split on a separator into segments and
//! resolved one mapping level at a time. Only mappings are descended into; a
//! scalar or sequence met before the last segment ends the walk.

use serde_yaml::{Mapping, Value};

/// Splits a nested key into its traversal segments.
///
/// An empty separator disables nesting and yields the whole key as one segment.
pub fn split_key<'a>(key: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![key];
    }
    key.split(separator).collect()
}

/// Returns the value at `segments`, or `None` if any segment is missing.
pub fn lookup<'a>(root: &'a Mapping, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(*first)?;
    for segment in rest {
        current = current.as_mapping()?.get(*segment)?;
    }
    Some(current)
}

/// Assigns `value` at `segments`, creating intermediate mappings on the way.
///
/// Intermediate values that are not mappings are replaced by empty mappings.
/// Returns `true` if the mapping was modified.
pub fn insert(root: &mut Mapping, segments: &[&str], value: Value) -> bool {
    let Some((leaf, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in parents {
        if !matches!(current.get(*segment), Some(Value::Mapping(_))) {
            current.insert(Value::String(segment.to_string()), Value::Mapping(Mapping::new()));
        }
        current = match current.get_mut(*segment) {
            Some(Value::Mapping(child)) => child,
            _ => return false,
        };
    }

    if current.get(*leaf) == Some(&value) {
        return false;
    }
    current.insert(Value::String(leaf.to_string()), value);
    true
}

/// Removes and returns the value at `segments`.
///
/// The whole path is resolved before anything is touched, so a path that only
/// partially exists leaves every ancestor as it was.
pub fn remove(root: &mut Mapping, segments: &[&str]) -> Option<Value> {
    lookup(root, segments)?;

    let (leaf, parents) = segments.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get_mut(*segment)?.as_mapping_mut()?;
    }
    current.shift_remove(*leaf)
}

/// Deep-merges `source` into `target`.
///
/// Mappings present on both sides are merged recursively, any other value from
/// `source` replaces the one in `target`. Returns `true` if `target` changed.
pub fn merge(target: &mut Mapping, source: Mapping) -> bool {
    let mut changed = false;
    for (key, value) in source {
        if let Some(existing) = target.get_mut(&key) {
            match (existing, value) {
                (Value::Mapping(existing), Value::Mapping(incoming)) => {
                    changed |= merge(existing, incoming);
                }
                (existing, value) => {
                    if *existing != value {
                        *existing = value;
                        changed = true;
                    }
                }
            }
            continue;
        }
        target.insert(key, value);
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("a.b.c", "."), vec!["a", "b", "c"]);
        assert_eq!(split_key("a::b", "::"), vec!["a", "b"]);
        assert_eq!(split_key("plain", "."), vec!["plain"]);
        assert_eq!(split_key("a.b", ""), vec!["a.b"]);
    }

    #[test]
    fn test_lookup_missing_at_any_depth() {
        let root = doc("a:\n  b:\n    c: 1\n");
        assert_eq!(lookup(&root, &["a", "b", "c"]), Some(&Value::from(1)));
        assert!(lookup(&root, &["x"]).is_none());
        assert!(lookup(&root, &["a", "x"]).is_none());
        assert!(lookup(&root, &["a", "b", "c", "d"]).is_none());
        assert!(lookup(&root, &[]).is_none());
    }

    #[test]
    fn test_insert_creates_intermediate_mappings() {
        let mut root = Mapping::new();
        assert!(insert(&mut root, &["a", "b", "c"], Value::from(5)));
        assert_eq!(root, doc("a:\n  b:\n    c: 5\n"));
    }

    #[test]
    fn test_insert_replaces_scalar_intermediate() {
        let mut root = doc("a: 1\n");
        assert!(insert(&mut root, &["a", "b"], Value::from("x")));
        assert_eq!(root, doc("a:\n  b: x\n"));
    }

    #[test]
    fn test_insert_same_value_is_not_a_change() {
        let mut root = doc("a:\n  b: 2\n");
        assert!(!insert(&mut root, &["a", "b"], Value::from(2)));
        assert!(insert(&mut root, &["a", "b"], Value::from(3)));
    }

    #[test]
    fn test_remove_leaf_keeps_siblings() {
        let mut root = doc("a:\n  b: 1\n  c: 2\n");
        assert_eq!(remove(&mut root, &["a", "b"]), Some(Value::from(1)));
        assert_eq!(root, doc("a:\n  c: 2\n"));
    }

    #[test]
    fn test_remove_keeps_sibling_order() {
        let mut root = doc("s:\n  a: 1\n  b: 2\n  c: 3\n");
        remove(&mut root, &["s", "a"]);
        let order: Vec<&str> = lookup(&root, &["s"])
            .and_then(Value::as_mapping)
            .map(|m| m.keys().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        assert_eq!(order, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_partial_path_leaves_ancestors() {
        let mut root = doc("a:\n  b: 1\n");
        assert!(remove(&mut root, &["a", "x", "y"]).is_none());
        assert!(remove(&mut root, &["a", "b", "c"]).is_none());
        assert_eq!(root, doc("a:\n  b: 1\n"));
    }

    #[test]
    fn test_merge_is_recursive() {
        let mut target = doc("server:\n  port: 1\n  name: old\nmotd: hi\n");
        let source = doc("server:\n  name: new\n  max: 10\n");
        assert!(merge(&mut target, source));
        assert_eq!(target, doc("server:\n  port: 1\n  name: new\n  max: 10\nmotd: hi\n"));
    }

    #[test]
    fn test_merge_replaces_non_mapping_values() {
        let mut target = doc("list: [1, 2]\nnested: 3\n");
        assert!(merge(&mut target, doc("list: [3]\nnested:\n  a: 1\n")));
        assert_eq!(target, doc("list: [3]\nnested:\n  a: 1\n"));
        assert!(!merge(&mut target, doc("list: [3]\n")));
    }
}
