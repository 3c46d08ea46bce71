use serde_json::Value;
use tracing::{debug, trace};

use crate::matcher::{matches_with, MatchStrategy};
use crate::path::{full_key, ID_FIELD};
use crate::whitelist::WhitelistSet;
use crate::Record;

/// Prunes records down to the fields allowed by a whitelist.
///
/// A field survives when its full key is the reserved key, is literally in
/// the whitelist, or matches a wildcard pattern. Nested records are projected
/// recursively unless a `<key>.**` pattern keeps them whole. Records inside
/// arrays share the path of the array field.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    whitelist: WhitelistSet,
    reserved_key: String,
    strategy: MatchStrategy,
}

impl ProjectionEngine {
    pub fn new(whitelist: WhitelistSet) -> Self {
        Self {
            whitelist,
            reserved_key: ID_FIELD.to_string(),
            strategy: MatchStrategy::Auto,
        }
    }

    /// Replaces the default `_id` reserved key.
    pub fn with_reserved_key(mut self, reserved_key: impl Into<String>) -> Self {
        self.reserved_key = reserved_key.into();
        self
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn whitelist(&self) -> &WhitelistSet {
        &self.whitelist
    }

    pub fn reserved_key(&self) -> &str {
        &self.reserved_key
    }

    /// Projects `record` in place.
    pub fn project(&self, record: &mut Record) {
        if self.whitelist.is_exempt() {
            debug!("whitelist contains '**', record left untouched");
            return;
        }

        let fields_removed = self.walker().project_at("", record);
        debug!(fields_removed = fields_removed, "projection completed");
    }

    /// Projects `value` in place if it is an object; other values are left
    /// as they are.
    pub fn project_value(&self, value: &mut Value) {
        if let Value::Object(record) = value {
            self.project(record);
        }
    }

    fn walker(&self) -> Walker<'_> {
        Walker {
            whitelist: &self.whitelist,
            reserved_key: &self.reserved_key,
            strategy: self.strategy,
        }
    }
}

/// Projects `record`, whose fields live below `prefix`, against `whitelist`.
///
/// Pass an empty prefix for a top-level record.
pub fn project(prefix: &str, record: &mut Record, whitelist: &WhitelistSet, reserved_key: &str) {
    let walker = Walker {
        whitelist,
        reserved_key,
        strategy: MatchStrategy::Auto,
    };
    walker.project_at(prefix, record);
}

struct Walker<'a> {
    whitelist: &'a WhitelistSet,
    reserved_key: &'a str,
    strategy: MatchStrategy,
}

impl Walker<'_> {
    /// Returns the number of fields removed at this level and below.
    fn project_at(&self, prefix: &str, record: &mut Record) -> usize {
        if self.whitelist.is_exempt() {
            return 0;
        }

        let mut removed = 0;

        // retain keeps the order of surviving entries and visits each once.
        record.retain(|name, value| {
            let key = full_key(prefix, name);

            if !self.is_retained(&key) {
                trace!(field = %key, "removing field outside whitelist");
                removed += 1;
                return false;
            }

            removed += self.descend(&key, value);
            true
        });

        removed
    }

    fn is_retained(&self, key: &str) -> bool {
        key == self.reserved_key
            || self.whitelist.contains(key)
            || matches_with(key, self.whitelist, self.strategy)
    }

    fn descend(&self, key: &str, value: &mut Value) -> usize {
        match value {
            Value::Object(nested) => {
                if self.whitelist.has_deep_wildcard(key) {
                    trace!(field = %key, "subtree kept by deep wildcard");
                    0
                } else {
                    self.project_at(key, nested)
                }
            }
            Value::Array(items) => items
                .iter_mut()
                .map(|item| match item {
                    Value::Object(nested) => self.project_at(key, nested),
                    _ => 0,
                })
                .sum(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
        }
    }
}
