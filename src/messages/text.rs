//! Human-readable rendering of messages.

use std::fmt::Write;

use crate::messages::model::{InformationSource, Message, MessageBody, ServiceInstance};

/// Render a message as indented text.
pub fn render(message: &Message) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_into(&mut out, message);
    out
}

fn render_into(out: &mut String, message: &Message) -> std::fmt::Result {
    writeln!(out, "=== {} ({}) ===", message.element_name(), message.family)?;
    writeln!(out, "  Message ID: {}", message.message_id)?;
    if let Some(id) = &message.in_response_to {
        writeln!(out, "  In Response To: {}", id)?;
    }

    match &message.body {
        MessageBody::DiscoveryRequest | MessageBody::InformationRequest => {}
        MessageBody::DiscoveryResponse { services } => {
            writeln!(out, "  Services: {}", services.len())?;
            for service in services {
                render_service(out, service)?;
            }
        }
        MessageBody::InformationResponse { sources } => {
            let label = message.family.source_element();
            writeln!(out, "  {}s: {}", label, sources.len())?;
            for source in sources {
                render_source(out, label, source)?;
            }
        }
        MessageBody::Status(status) => {
            writeln!(out, "  Status Type: {}", status.status_type)?;
            if let Some(text) = &status.message {
                writeln!(out, "  Message: {}", text)?;
            }
        }
    }
    Ok(())
}

fn render_service(out: &mut String, service: &ServiceInstance) -> std::fmt::Result {
    writeln!(out, "  === Service Instance ===")?;
    writeln!(out, "    Service Type: {}", service.service_type)?;
    writeln!(out, "    Service Version: {}", service.service_version)?;
    if let Some(available) = service.available {
        writeln!(out, "    Available: {}", available)?;
    }
    writeln!(out, "    Protocol Binding: {}", service.protocol_binding)?;
    writeln!(out, "    Address: {}", service.address)?;
    for binding in &service.message_bindings {
        writeln!(out, "    Message Binding: {}", binding)?;
    }
    if let Some(text) = &service.message {
        writeln!(out, "    Message: {}", text)?;
    }
    Ok(())
}

fn render_source(out: &mut String, label: &str, source: &InformationSource) -> std::fmt::Result {
    writeln!(out, "  === {} ===", label)?;
    writeln!(out, "    Name: {}", source.name)?;
    if let Some(available) = source.available {
        writeln!(out, "    Available: {}", available)?;
    }
    if let Some(text) = &source.description {
        writeln!(out, "    Description: {}", text)?;
    }
    for address in &source.polling_addresses {
        writeln!(out, "    Polling Address: {}", address)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::family::MessageFamily;
    use crate::messages::model::Status;

    #[test]
    fn test_render_request() {
        let text = render(&Message::information_request(MessageFamily::Taxii10, "42"));
        assert!(text.starts_with("=== Feed_Information_Request (TAXII 1.0) ==="));
        assert!(text.contains("Message ID: 42"));
        assert!(!text.contains("In Response To"));
    }

    #[test]
    fn test_render_feeds_and_status() {
        let response = Message {
            family: MessageFamily::Taxii10,
            message_id: "5".into(),
            in_response_to: Some("42".into()),
            body: MessageBody::InformationResponse {
                sources: vec![InformationSource {
                    name: "alerts".into(),
                    available: Some(true),
                    description: None,
                    polling_addresses: vec![],
                }],
            },
        };
        let text = render(&response);
        assert!(text.contains("Feeds: 1"));
        assert!(text.contains("Name: alerts"));
        assert!(text.contains("In Response To: 42"));

        let status = Message {
            body: MessageBody::Status(Status {
                status_type: "FAILURE".into(),
                message: Some("down".into()),
            }),
            ..response
        };
        let text = render(&status);
        assert!(text.contains("Status Type: FAILURE"));
        assert!(text.contains("Message: down"));
    }
}
