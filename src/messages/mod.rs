//! Protocol messages and their encodings.
//!
//! # Data Flow
//! ```text
//! Message (typed, family-tagged)
//!     → xml.rs  (serialize / deserialize / pretty print)
//!     → text.rs (human-readable rendering for reports)
//! ```
//!
//! # Design Decisions
//! - One message model shared by both protocol versions
//! - family.rs supplies per-version namespace, vocabulary and HTTP headers
//! - A status message is an ordinary message, even when it reports a failure

pub mod family;
pub mod model;
pub mod text;
pub mod xml;

pub use family::MessageFamily;
pub use model::{InformationSource, Message, MessageBody, ServiceInstance, Status};
pub use xml::BindingError;
