//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! ConnectionOptions (CLI flags merged with config file)
//!     → builder.rs (validate proxy + credentials, build reqwest client)
//!     → Transport (immutable, owned by the exchange client)
//! ```
//!
//! # Design Decisions
//! - Validation happens before the client exists; no I/O here
//! - Credentials apply to every host, since a run talks to one endpoint
//! - Environment proxy settings apply unless explicitly disabled

pub mod builder;

pub use builder::{build, ConnectionOptions, Credentials, ProxyTarget, Transport};
