//! Exchange error definitions.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::messages::BindingError;

/// Why the HTTP leg of an exchange failed.
#[derive(Debug, Error)]
pub enum TransportCause {
    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: StatusCode, body: String },
}

/// Errors that can occur during one exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The outbound message could not be encoded. Nothing was sent.
    #[error("failed to serialize outbound message: {0}")]
    SerializationFailed(#[source] BindingError),

    /// The request did not produce a 2xx response.
    #[error("exchange with {endpoint} failed: {cause}")]
    TransportFailure {
        endpoint: Url,
        #[source]
        cause: TransportCause,
    },

    /// A 2xx response whose body is not a recognised protocol message.
    #[error("response from {endpoint} is not a recognised message: {source}")]
    MalformedResponse {
        endpoint: Url,
        body: Vec<u8>,
        #[source]
        source: BindingError,
    },
}

impl ExchangeError {
    /// HTTP status of a failed exchange, when the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ExchangeError::TransportFailure {
                cause: TransportCause::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body kept for diagnostics.
    pub fn response_body(&self) -> Option<&[u8]> {
        match self {
            ExchangeError::TransportFailure {
                cause: TransportCause::Status { body, .. },
                ..
            } => Some(body.as_bytes()),
            ExchangeError::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}
