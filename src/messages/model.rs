//! Typed protocol messages.

use crate::messages::family::MessageFamily;

/// Status type reported by a successful status message.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// A protocol message of either family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub family: MessageFamily,
    pub message_id: String,
    /// Set on every response; names the request being answered.
    pub in_response_to: Option<String>,
    pub body: MessageBody,
}

/// Message payloads understood by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    DiscoveryRequest,
    DiscoveryResponse { services: Vec<ServiceInstance> },
    /// Feed information (1.0) or collection information (1.1) request.
    InformationRequest,
    InformationResponse { sources: Vec<InformationSource> },
    Status(Status),
}

/// A service advertised by a discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceInstance {
    pub service_type: String,
    pub service_version: String,
    pub available: Option<bool>,
    pub protocol_binding: String,
    pub address: String,
    pub message_bindings: Vec<String>,
    pub message: Option<String>,
}

/// A feed (1.0) or collection (1.1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InformationSource {
    pub name: String,
    pub available: Option<bool>,
    pub description: Option<String>,
    pub polling_addresses: Vec<String>,
}

/// Status message payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub status_type: String,
    pub message: Option<String>,
}

impl Message {
    pub fn discovery_request(family: MessageFamily, message_id: impl Into<String>) -> Self {
        Self::request(family, message_id, MessageBody::DiscoveryRequest)
    }

    pub fn information_request(family: MessageFamily, message_id: impl Into<String>) -> Self {
        Self::request(family, message_id, MessageBody::InformationRequest)
    }

    fn request(family: MessageFamily, message_id: impl Into<String>, body: MessageBody) -> Self {
        Self {
            family,
            message_id: message_id.into(),
            in_response_to: None,
            body,
        }
    }

    /// XML local name of the root element for this message.
    pub fn element_name(&self) -> &'static str {
        match &self.body {
            MessageBody::DiscoveryRequest => "Discovery_Request",
            MessageBody::DiscoveryResponse { .. } => "Discovery_Response",
            MessageBody::InformationRequest => self.family.information_request(),
            MessageBody::InformationResponse { .. } => self.family.information_response(),
            MessageBody::Status(_) => "Status_Message",
        }
    }

    pub fn is_response(&self) -> bool {
        !matches!(
            self.body,
            MessageBody::DiscoveryRequest | MessageBody::InformationRequest
        )
    }

    /// True for a status message whose status type is anything but success.
    ///
    /// A fault is still a well-formed reply; interpreting it is up to the caller.
    pub fn is_fault(&self) -> bool {
        match &self.body {
            MessageBody::Status(status) => !status.status_type.eq_ignore_ascii_case(STATUS_SUCCESS),
            _ => false,
        }
    }
}
