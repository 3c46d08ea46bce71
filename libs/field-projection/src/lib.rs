//! Whitelist field projection for nested JSON records.
//!
//! This crate prunes a tree-structured record (objects, arrays, scalars) down
//! to the fields named by a whitelist of dotted path patterns. Patterns may use
//! `*` to match exactly one path segment and a trailing `**` to keep an entire
//! subtree unfiltered. The record identity field `_id` is always retained.
//!
//! ## Usage
//!
//! ```rust
//! use field_projection::{ProjectionEngine, WhitelistSet};
//! use serde_json::json;
//!
//! let whitelist = WhitelistSet::from_field_list("name, address.city");
//! let engine = ProjectionEngine::new(whitelist);
//!
//! let mut record = json!({
//!     "_id": 7,
//!     "name": "Alice",
//!     "email": "alice@example.com",
//!     "address": { "city": "Berlin", "street": "Hauptstr. 1" }
//! });
//! engine.project_value(&mut record);
//!
//! assert_eq!(
//!     record,
//!     json!({ "_id": 7, "name": "Alice", "address": { "city": "Berlin" } })
//! );
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod matcher;
pub mod path;
pub mod pipeline;
pub mod whitelist;

pub use config::{ConfigError, ProjectionSettings, ProjectionType};
pub use document::{ProjectionTarget, SinkDocument};
pub use engine::{project, ProjectionEngine};
pub use matcher::{matches, MatchStrategy};
pub use path::{DOUBLE_WILDCARD, ID_FIELD, SEPARATOR, SINGLE_WILDCARD};
pub use pipeline::{ProjectionPipeline, WhitelistProjector};
pub use whitelist::WhitelistSet;

/// Ordered field-name-to-value mapping processed by the engine.
pub type Record = serde_json::Map<String, serde_json::Value>;
