//! Protocol message families.
//!
//! A family fixes the XML namespace, the element vocabulary and the HTTP
//! binding headers for one protocol version. Everything else about a message
//! is shared, so the binding and the exchange pipeline stay family-agnostic.

use std::fmt;

/// Supported protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageFamily {
    /// TAXII 1.0 XML binding (feeds).
    Taxii10,
    /// TAXII 1.1 XML binding (collections).
    Taxii11,
}

impl MessageFamily {
    pub const ALL: [MessageFamily; 2] = [MessageFamily::Taxii10, MessageFamily::Taxii11];

    /// XML namespace of the message binding.
    pub fn namespace(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "http://taxii.mitre.org/messages/taxii_xml_binding-1",
            MessageFamily::Taxii11 => "http://taxii.mitre.org/messages/taxii_xml_binding-1.1",
        }
    }

    /// Prefix used when writing elements.
    pub fn prefix(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "taxii",
            MessageFamily::Taxii11 => "taxii_11",
        }
    }

    pub fn from_namespace(namespace: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.namespace() == namespace)
    }

    /// Root element of an information request.
    pub fn information_request(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "Feed_Information_Request",
            MessageFamily::Taxii11 => "Collection_Information_Request",
        }
    }

    /// Root element of an information response.
    pub fn information_response(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "Feed_Information_Response",
            MessageFamily::Taxii11 => "Collection_Information_Response",
        }
    }

    /// Element describing one information source (a feed or a collection).
    pub fn source_element(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "Feed",
            MessageFamily::Taxii11 => "Collection",
        }
    }

    /// Attribute naming an information source.
    pub fn source_name_attribute(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "FeedName",
            MessageFamily::Taxii11 => "CollectionName",
        }
    }

    /// Value of the `X-TAXII-Content-Type` header.
    pub fn content_binding(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "urn:taxii.mitre.org:message:xml:1.0",
            MessageFamily::Taxii11 => "urn:taxii.mitre.org:message:xml:1.1",
        }
    }

    /// Value of the `X-TAXII-Services` header.
    pub fn services_binding(self) -> &'static str {
        match self {
            MessageFamily::Taxii10 => "urn:taxii.mitre.org:services:1.0",
            MessageFamily::Taxii11 => "urn:taxii.mitre.org:services:1.1",
        }
    }

    /// Value of the `X-TAXII-Protocol` header for the given URL scheme.
    pub fn protocol_binding(self, scheme: &str) -> &'static str {
        if scheme.eq_ignore_ascii_case("https") {
            "urn:taxii.mitre.org:protocol:https:1.0"
        } else {
            "urn:taxii.mitre.org:protocol:http:1.0"
        }
    }
}

impl fmt::Display for MessageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageFamily::Taxii10 => write!(f, "TAXII 1.0"),
            MessageFamily::Taxii11 => write!(f, "TAXII 1.1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_lookup() {
        for family in MessageFamily::ALL {
            assert_eq!(MessageFamily::from_namespace(family.namespace()), Some(family));
        }
        assert_eq!(MessageFamily::from_namespace("urn:unknown"), None);
    }

    #[test]
    fn test_vocabulary_differs_per_family() {
        assert_eq!(MessageFamily::Taxii10.information_request(), "Feed_Information_Request");
        assert_eq!(MessageFamily::Taxii11.source_element(), "Collection");
        assert_eq!(
            MessageFamily::Taxii11.protocol_binding("HTTPS"),
            "urn:taxii.mitre.org:protocol:https:1.0"
        );
    }
}
