// Field path collection from sample JSON documents
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

use serde_json::Value as JsonValue;

use super::FieldPath;

/// Default maximum nesting depth explored by the collector
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default bound on the number of collected paths
pub const DEFAULT_MAX_PATHS: usize = 300;

/// Derives the distinct leaf paths of a JSON document in dot notation.
///
/// Arrays contribute no path segment: only their first element is explored,
/// under the prefix of the array itself. Objects contribute one segment per
/// key. Anything that is neither an object nor an array (including `null`)
/// is a leaf.
///
/// Collection stops descending once the depth exceeds `max_depth` or the
/// number of collected paths exceeds `max_paths`. Both limits are checked
/// when entering a value, so a single wide object may overshoot `max_paths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCollector {
    max_depth: usize,
    max_paths: usize,
}

impl PathCollector {
    /// Create a collector with the given limits
    pub fn new(max_depth: usize, max_paths: usize) -> Self {
        PathCollector { max_depth, max_paths }
    }

    /// Collect the leaf paths of a document
    pub fn collect(&self, value: &JsonValue) -> HashSet<FieldPath> {
        let mut paths = HashSet::new();
        self.collect_into(value, "", &mut paths, 0);
        paths
    }

    /// Collect the leaf paths of a document, sorted for display
    pub fn collect_sorted(&self, value: &JsonValue) -> Vec<FieldPath> {
        let mut paths: Vec<FieldPath> = self.collect(value).into_iter().collect();
        paths.sort();
        paths
    }

    fn collect_into(
        &self,
        value: &JsonValue,
        prefix: &str,
        paths: &mut HashSet<FieldPath>,
        depth: usize,
    ) {
        if depth > self.max_depth || paths.len() > self.max_paths {
            return;
        }

        match value {
            JsonValue::Array(items) => {
                if let Some(first) = items.first() {
                    self.collect_into(first, prefix, paths, depth + 1);
                }
            }
            JsonValue::Object(obj) => {
                for (key, nested) in obj {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };

                    if nested.is_object() || nested.is_array() {
                        self.collect_into(nested, &path, paths, depth + 1);
                    } else {
                        paths.insert(path);
                    }
                }
            }
            _ => {}
        }
    }
}

impl Default for PathCollector {
    fn default() -> Self {
        PathCollector::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_PATHS)
    }
}
