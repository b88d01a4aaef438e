//! Request/response exchange pipeline.
//!
//! # Data Flow
//! ```text
//! Message
//!     → xml::serialize        (SerializationFailed, nothing sent)
//!     → observer (Request)
//!     → HTTP POST via Transport (TransportFailure: network or non-2xx)
//!     → xml::deserialize      (MalformedResponse, raw body kept)
//!     → observer (Response)
//!     → Message
//! ```

pub mod client;
pub mod error;

pub use client::ExchangeClient;
pub use error::{ExchangeError, TransportCause};
