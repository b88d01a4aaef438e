//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → ClientConfig
//!     → merged with command-line flags (flags win)
//!     → ConnectionOptions / endpoint / display mode
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is valid
//! - Credential pairing is checked after merging, by the transport builder

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, ProxyError};
pub use schema::{ClientConfig, ConnectionConfig, OutputConfig};
