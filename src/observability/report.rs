//! Request/response reporting.
//!
//! The exchange client hands every outbound and inbound message to an
//! [`ExchangeObserver`]. The CLI uses [`Reporter`], which prints each message
//! in the display mode the user picked. Formatting is best effort: a message
//! that cannot be pretty-printed as XML falls back to text.

use std::fmt;

use crate::messages::{text, xml, Message};

/// How messages are shown in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Indented XML, as sent on the wire.
    Xml,
    /// Human-readable summary.
    #[default]
    Text,
}

/// Which leg of the exchange a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Request => write!(f, "Request"),
            Direction::Response => write!(f, "Response"),
        }
    }
}

/// Receives messages as they pass through an exchange.
pub trait ExchangeObserver: Send + Sync {
    fn observe(&self, direction: Direction, message: &Message);
}

/// Format a message for display. Never fails.
pub fn format_message(mode: DisplayMode, message: &Message) -> String {
    match mode {
        DisplayMode::Text => text::render(message),
        DisplayMode::Xml => match xml::to_pretty_string(message) {
            Ok(xml) => xml,
            Err(e) => {
                tracing::warn!(error = %e, "Could not format message as XML, showing text");
                text::render(message)
            }
        },
    }
}

/// Prints messages to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    mode: DisplayMode,
}

impl Reporter {
    pub fn new(mode: DisplayMode) -> Self {
        Self { mode }
    }
}

impl ExchangeObserver for Reporter {
    fn observe(&self, direction: Direction, message: &Message) {
        println!("{}:", direction);
        println!("{}", format_message(self.mode, message));
    }
}
