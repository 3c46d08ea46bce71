pub mod bench_support;

// Re-export crates used by benches and property tests
pub use field_projection;
pub use rand;
pub use serde_json;
