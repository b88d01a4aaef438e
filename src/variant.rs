//! Client variants.
//!
//! Each variant pairs a message family with the request it sends and the
//! service path it talks to by default. Defaults are plain values joined onto
//! a base URL supplied by the caller.

use rand::Rng;
use url::Url;

use crate::messages::{Message, MessageFamily};

/// Base URL used when neither the command line nor the config file names one.
pub const DEFAULT_BASE_URL: &str = "http://taxiitest.mitre.org/services/";

/// Upper bound (inclusive) for generated message ids.
const MAX_MESSAGE_ID: u32 = 100_000;

/// The closed set of supported clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientVariant {
    Discovery10,
    Discovery11,
    FeedInformation10,
    CollectionInformation11,
}

impl ClientVariant {
    pub fn family(self) -> MessageFamily {
        match self {
            ClientVariant::Discovery10 | ClientVariant::FeedInformation10 => {
                MessageFamily::Taxii10
            }
            ClientVariant::Discovery11 | ClientVariant::CollectionInformation11 => {
                MessageFamily::Taxii11
            }
        }
    }

    /// Service path relative to the base URL.
    pub fn service_path(self) -> &'static str {
        match self {
            ClientVariant::Discovery10 | ClientVariant::Discovery11 => "discovery/",
            ClientVariant::FeedInformation10 => "feed-management/",
            ClientVariant::CollectionInformation11 => "collection-management/",
        }
    }

    pub fn default_endpoint(self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(self.service_path())
    }

    /// Build the request this variant sends.
    pub fn request(self, message_id: impl Into<String>) -> Message {
        match self {
            ClientVariant::Discovery10 | ClientVariant::Discovery11 => {
                Message::discovery_request(self.family(), message_id)
            }
            ClientVariant::FeedInformation10 | ClientVariant::CollectionInformation11 => {
                Message::information_request(self.family(), message_id)
            }
        }
    }
}

/// Random message id in `0..=100000`.
pub fn generate_message_id() -> String {
    rand::thread_rng().gen_range(0..=MAX_MESSAGE_ID).to_string()
}
