//! TAXII message exchange client library.

pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod messages;
pub mod observability;
pub mod transport;
pub mod variant;

pub use error::ClientError;
pub use exchange::{ExchangeClient, ExchangeError};
pub use messages::{Message, MessageFamily};
pub use transport::{ConnectionOptions, Transport};
