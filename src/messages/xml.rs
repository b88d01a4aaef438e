//! XML binding for protocol messages.
//!
//! Messages are mapped onto a small element tree which is then written or read
//! with quick-xml. All elements of a message live in its family's namespace;
//! attributes are unqualified.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::Writer;
use thiserror::Error;

use crate::messages::family::MessageFamily;
use crate::messages::model::{InformationSource, Message, MessageBody, ServiceInstance, Status};

/// Errors raised while encoding or decoding a message.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("message id must not be empty")]
    MissingMessageId,

    #[error("{element} must name the request it answers (InResponseTo)")]
    MissingInResponseTo { element: &'static str },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error while writing XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid XML content: {0}")]
    Content(String),

    #[error("document has no root element")]
    Empty,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("document ends inside <{0}>")]
    Unclosed(String),

    #[error("unrecognised message namespace '{0}'")]
    UnknownNamespace(String),

    #[error("unrecognised {family} message <{name}>")]
    UnknownMessage { family: MessageFamily, name: String },

    #[error("<{element}> is missing {what} '{name}'")]
    Missing {
        element: String,
        what: &'static str,
        name: &'static str,
    },

    #[error("invalid boolean '{0}'")]
    InvalidBool(String),
}

/// Serialize a message to compact XML bytes.
pub fn serialize(message: &Message) -> Result<Vec<u8>, BindingError> {
    let root = encode(message)?;
    let mut writer = Writer::new(Vec::new());
    write_document(&mut writer, message.family, &root)?;
    Ok(writer.into_inner())
}

/// Serialize a message to indented XML for diagnostics.
pub fn to_pretty_string(message: &Message) -> Result<String, BindingError> {
    let root = encode(message)?;
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_document(&mut writer, message.family, &root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| BindingError::Content(e.to_string()))
}

/// Parse XML bytes into a message of either family.
pub fn deserialize(bytes: &[u8]) -> Result<Message, BindingError> {
    let root = parse_tree(bytes)?;
    decode(root)
}

#[derive(Debug, Default)]
struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    fn with_optional_attr(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }

    fn with_text_child(mut self, name: &str, text: &str) -> Self {
        let mut child = Element::new(name);
        child.text = text.to_string();
        self.children.push(child);
        self
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn required_attr(&self, key: &'static str) -> Result<&str, BindingError> {
        self.attr(key).ok_or_else(|| BindingError::Missing {
            element: self.name.clone(),
            what: "attribute",
            name: key,
        })
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn child_text(&self, name: &str) -> Option<String> {
        self.children_named(name).next().map(|c| c.text.clone())
    }

    fn required_child_text(&self, name: &'static str) -> Result<String, BindingError> {
        self.child_text(name).ok_or_else(|| BindingError::Missing {
            element: self.name.clone(),
            what: "element",
            name,
        })
    }
}

fn encode(message: &Message) -> Result<Element, BindingError> {
    if message.message_id.trim().is_empty() {
        return Err(BindingError::MissingMessageId);
    }
    let in_response_to = message.in_response_to.as_deref().filter(|id| !id.is_empty());
    if message.is_response() && in_response_to.is_none() {
        return Err(BindingError::MissingInResponseTo {
            element: message.element_name(),
        });
    }

    let mut root = Element::new(message.element_name())
        .with_attr("MessageId", message.message_id.as_str())
        .with_optional_attr("InResponseTo", in_response_to);

    match &message.body {
        MessageBody::DiscoveryRequest | MessageBody::InformationRequest => {}
        MessageBody::DiscoveryResponse { services } => {
            root.children = services.iter().map(encode_service).collect();
        }
        MessageBody::InformationResponse { sources } => {
            root.children = sources
                .iter()
                .map(|s| encode_source(message.family, s))
                .collect();
        }
        MessageBody::Status(status) => {
            root = root.with_attr("StatusType", status.status_type.as_str());
            if let Some(text) = &status.message {
                root = root.with_text_child("Message", text);
            }
        }
    }
    Ok(root)
}

fn encode_service(service: &ServiceInstance) -> Element {
    let mut el = Element::new("Service_Instance")
        .with_attr("ServiceType", service.service_type.as_str())
        .with_attr("ServiceVersion", service.service_version.as_str())
        .with_optional_attr("Available", service.available.map(|b| b.to_string()))
        .with_text_child("Protocol_Binding", &service.protocol_binding)
        .with_text_child("Address", &service.address);
    for binding in &service.message_bindings {
        el = el.with_text_child("Message_Binding", binding);
    }
    if let Some(text) = &service.message {
        el = el.with_text_child("Message", text);
    }
    el
}

fn encode_source(family: MessageFamily, source: &InformationSource) -> Element {
    let mut el = Element::new(family.source_element())
        .with_attr(family.source_name_attribute(), source.name.as_str())
        .with_optional_attr("Available", source.available.map(|b| b.to_string()));
    if let Some(text) = &source.description {
        el = el.with_text_child("Description", text);
    }
    for address in &source.polling_addresses {
        el = el.with_text_child("Polling_Address", address);
    }
    el
}

fn write_document<W: std::io::Write>(
    writer: &mut Writer<W>,
    family: MessageFamily,
    root: &Element,
) -> Result<(), BindingError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(writer, family.prefix(), root, Some(family.namespace()))
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    prefix: &str,
    element: &Element,
    namespace: Option<&str>,
) -> Result<(), BindingError> {
    let qname = format!("{prefix}:{}", element.name);
    let mut start = BytesStart::new(qname.as_str());
    if let Some(ns) = namespace {
        let xmlns = format!("xmlns:{prefix}");
        start.push_attribute((xmlns.as_str(), ns));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, prefix, child, None)?;
    }
    writer.write_event(Event::End(BytesEnd::new(qname.as_str())))?;
    Ok(())
}

fn parse_tree(bytes: &[u8]) -> Result<Element, BindingError> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = match resolved {
            ResolveResult::Bound(Namespace(ns)) => Some(String::from_utf8_lossy(ns).into_owned()),
            _ => None,
        };

        match event {
            Event::Start(start) => stack.push(open_element(namespace, &start)?),
            Event::Empty(start) => {
                let element = open_element(namespace, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // quick-xml has already checked that the names match.
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| BindingError::Content(e.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(BindingError::Unclosed(open.name));
    }
    root.ok_or(BindingError::Empty)
}

fn open_element(
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, BindingError> {
    let mut element = Element::new(&String::from_utf8_lossy(start.local_name().as_ref()));
    element.namespace = namespace;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| BindingError::Content(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| BindingError::Content(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), BindingError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(BindingError::MultipleRoots),
    }
    Ok(())
}

fn decode(root: Element) -> Result<Message, BindingError> {
    let namespace = root.namespace.clone().unwrap_or_default();
    let family = MessageFamily::from_namespace(&namespace)
        .ok_or_else(|| BindingError::UnknownNamespace(namespace.clone()))?;

    let body = match root.name.as_str() {
        "Discovery_Request" => MessageBody::DiscoveryRequest,
        "Discovery_Response" => MessageBody::DiscoveryResponse {
            services: root
                .children_named("Service_Instance")
                .map(decode_service)
                .collect::<Result<_, _>>()?,
        },
        "Status_Message" => MessageBody::Status(Status {
            status_type: root.required_attr("StatusType")?.to_string(),
            message: root.child_text("Message"),
        }),
        name if name == family.information_request() => MessageBody::InformationRequest,
        name if name == family.information_response() => MessageBody::InformationResponse {
            sources: root
                .children_named(family.source_element())
                .map(|el| decode_source(family, el))
                .collect::<Result<_, _>>()?,
        },
        other => {
            return Err(BindingError::UnknownMessage {
                family,
                name: other.to_string(),
            })
        }
    };

    let message = Message {
        family,
        message_id: root.required_attr("MessageId")?.to_string(),
        in_response_to: root.attr("InResponseTo").map(str::to_string),
        body,
    };
    if message.is_response() && message.in_response_to.is_none() {
        return Err(BindingError::Missing {
            element: root.name,
            what: "attribute",
            name: "InResponseTo",
        });
    }
    Ok(message)
}

fn decode_service(el: &Element) -> Result<ServiceInstance, BindingError> {
    Ok(ServiceInstance {
        service_type: el.required_attr("ServiceType")?.to_string(),
        service_version: el.required_attr("ServiceVersion")?.to_string(),
        available: el.attr("Available").map(parse_bool).transpose()?,
        protocol_binding: el.required_child_text("Protocol_Binding")?,
        address: el.required_child_text("Address")?,
        message_bindings: el
            .children_named("Message_Binding")
            .map(|c| c.text.clone())
            .collect(),
        message: el.child_text("Message"),
    })
}

fn decode_source(family: MessageFamily, el: &Element) -> Result<InformationSource, BindingError> {
    let name = el.attr(family.source_name_attribute()).ok_or_else(|| BindingError::Missing {
        element: el.name.clone(),
        what: "attribute",
        name: family.source_name_attribute(),
    })?;
    Ok(InformationSource {
        name: name.to_string(),
        available: el.attr("Available").map(parse_bool).transpose()?,
        description: el.child_text("Description"),
        polling_addresses: el
            .children_named("Polling_Address")
            .map(|c| c.text.clone())
            .collect(),
    })
}

fn parse_bool(value: &str) -> Result<bool, BindingError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(BindingError::InvalidBool(other.to_string())),
    }
}
