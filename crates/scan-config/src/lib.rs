//! scan-config
//!
//! Persistent dashboard preferences and feed runtime options.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{ClockMode, Config};
