use std::collections::HashSet;

use crate::path::{deep_wildcard_of, DOUBLE_WILDCARD, SEPARATOR};

/// Immutable set of whitelist patterns.
///
/// Patterns are dotted paths whose segments are literal field names, `*`, or
/// a trailing `**`. The set performs no syntax validation; malformed patterns
/// simply never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhitelistSet {
    patterns: HashSet<String>,
}

impl WhitelistSet {
    /// Creates a set holding exactly the given patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a comma separated field list.
    ///
    /// Entries are trimmed and empty entries dropped. Every entry also adds
    /// all of its non-empty left prefixes, so `a.b.c` yields `a.b.c`, `a.b`
    /// and `a`. Without the prefixes a top-down walk would remove `a` before
    /// ever reaching `a.b.c`.
    pub fn from_field_list(list: &str) -> Self {
        let mut patterns = HashSet::new();

        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            patterns.insert(entry.to_string());

            let mut current = entry;
            while let Some(idx) = current.rfind(SEPARATOR) {
                current = &current[..idx];
                if !current.is_empty() {
                    patterns.insert(current.to_string());
                }
            }
        }

        Self { patterns }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    /// True when the set holds the bare `**` pattern, which exempts whole
    /// records from projection.
    pub fn is_exempt(&self) -> bool {
        self.patterns.contains(DOUBLE_WILDCARD)
    }

    /// True when the set holds the `<key>.**` pattern.
    pub fn has_deep_wildcard(&self, key: &str) -> bool {
        self.patterns.contains(&deep_wildcard_of(key))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for WhitelistSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
