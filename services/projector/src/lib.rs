pub mod config;
pub mod stream;

pub use config::ProjectorConfig;
pub use stream::{run, StreamStats};
