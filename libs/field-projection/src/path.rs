//! Dotted field path constants and helpers.

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Pattern segment matching exactly one path segment.
pub const SINGLE_WILDCARD: &str = "*";

/// Trailing pattern segment keeping a whole subtree unfiltered.
pub const DOUBLE_WILDCARD: &str = "**";

/// Record identity field, retained regardless of the whitelist.
pub const ID_FIELD: &str = "_id";

/// Builds the full key of `name` below `prefix`.
///
/// An empty prefix denotes the top level of a record.
pub fn full_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }

    let mut key = String::with_capacity(prefix.len() + 1 + name.len());
    key.push_str(prefix);
    key.push(SEPARATOR);
    key.push_str(name);
    key
}

/// Returns the `<key>.**` pattern rooted at `key`.
pub fn deep_wildcard_of(key: &str) -> String {
    full_key(key, DOUBLE_WILDCARD)
}

/// Splits a path or pattern into its segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR)
}
