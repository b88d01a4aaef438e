//! Top-level error type for a client run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::exchange::ExchangeError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}
