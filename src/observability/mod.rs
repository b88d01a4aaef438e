//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! exchange client
//!     → report.rs  (messages to stdout, XML or text)
//!     → logging.rs (structured events to stderr)
//! ```

pub mod logging;
pub mod report;

pub use report::{DisplayMode, Direction, ExchangeObserver, Reporter};
