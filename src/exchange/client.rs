//! Exchange client: one message out, one message back.
//!
//! # Responsibilities
//! - Encode the outbound message before touching the network
//! - POST it once with the family's HTTP binding headers
//! - Classify the outcome as transport failure, malformed reply or message
//!
//! # Design Decisions
//! - No retries; callers may retry a whole exchange since nothing is retained
//! - A status message reporting failure is returned as a normal message

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::exchange::error::{ExchangeError, TransportCause};
use crate::messages::{xml, Message};
use crate::observability::{Direction, ExchangeObserver};
use crate::transport::Transport;

const XML_MEDIA_TYPE: &str = "application/xml";

/// Sends protocol messages over a configured transport.
pub struct ExchangeClient {
    transport: Transport,
    observer: Arc<dyn ExchangeObserver>,
}

impl ExchangeClient {
    pub fn new(transport: Transport, observer: Arc<dyn ExchangeObserver>) -> Self {
        Self { transport, observer }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Send `outbound` to `endpoint` and return the decoded reply.
    pub async fn exchange(
        &self,
        endpoint: &Url,
        outbound: &Message,
    ) -> Result<Message, ExchangeError> {
        let payload = xml::serialize(outbound).map_err(ExchangeError::SerializationFailed)?;
        self.observer.observe(Direction::Request, outbound);

        let family = outbound.family;
        tracing::debug!(
            endpoint = %endpoint,
            message = outbound.element_name(),
            message_id = %outbound.message_id,
            bytes = payload.len(),
            "Sending message"
        );

        let network = |e| ExchangeError::TransportFailure {
            endpoint: endpoint.clone(),
            cause: TransportCause::Network(e),
        };

        let response = self
            .transport
            .post(endpoint)
            .header(CONTENT_TYPE, XML_MEDIA_TYPE)
            .header(ACCEPT, XML_MEDIA_TYPE)
            .header("X-TAXII-Content-Type", family.content_binding())
            .header("X-TAXII-Accept", family.content_binding())
            .header("X-TAXII-Protocol", family.protocol_binding(endpoint.scheme()))
            .header("X-TAXII-Services", family.services_binding())
            .body(payload)
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(network)?;
        tracing::debug!(
            endpoint = %endpoint,
            status = %status,
            bytes = body.len(),
            "Response received"
        );

        if !status.is_success() {
            return Err(ExchangeError::TransportFailure {
                endpoint: endpoint.clone(),
                cause: TransportCause::Status {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                },
            });
        }

        let inbound = xml::deserialize(&body).map_err(|source| ExchangeError::MalformedResponse {
            endpoint: endpoint.clone(),
            body: body.to_vec(),
            source,
        })?;

        if inbound.in_response_to.as_deref() != Some(outbound.message_id.as_str()) {
            tracing::debug!(
                expected = %outbound.message_id,
                actual = ?inbound.in_response_to,
                "Reply does not reference the request message id"
            );
        }

        self.observer.observe(Direction::Response, &inbound);
        Ok(inbound)
    }
}
