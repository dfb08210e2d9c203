//! Notification body decoding.
//!
//! The provider delivers the message payload in one of three body formats,
//! selected at subscription time: XML (the default), JSON, or SIMPLIFIED
//! (the body is the message). Decoding is a pure function over the verified
//! body bytes and never runs before the signature check passes.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use thiserror::Error;

/// Body format of an inbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Xml,
    Json,
    Simplified,
}

impl ContentFormat {
    /// Parse a provider wire name (`XML`, `JSON`, `SIMPLIFIED`).
    ///
    /// Unrecognized names return `None`; callers keep their previous setting
    /// rather than erroring.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "XML" => Some(Self::Xml),
            "JSON" => Some(Self::Json),
            "SIMPLIFIED" => Some(Self::Simplified),
            _ => None,
        }
    }

    /// The provider wire name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Xml => "XML",
            Self::Json => "JSON",
            Self::Simplified => "SIMPLIFIED",
        }
    }
}

impl Default for ContentFormat {
    fn default() -> Self {
        Self::Xml
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notification body could not be decoded in the selected format.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("notification body is not well-formed XML")]
    MalformedXml,

    #[error("notification XML has no Message element")]
    XmlMessageMissing,

    #[error("notification body is not a JSON object with a Message string: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct JsonNotification {
    #[serde(rename = "Message")]
    message: String,
}

/// Extract the message payload from a verified notification body.
pub fn parse_message(body: &[u8], format: ContentFormat) -> Result<String, DecodeError> {
    match format {
        ContentFormat::Xml => parse_xml_message(body),
        ContentFormat::Json => {
            let doc: JsonNotification = serde_json::from_slice(body)?;
            Ok(doc.message)
        }
        ContentFormat::Simplified => Ok(String::from_utf8_lossy(body).into_owned()),
    }
}

/// Pull the text of the first `Message` element out of an XML document.
///
/// Works whether `Message` is the document root or a child of a
/// `Notification` wrapper. A truncated document (open elements at EOF)
/// is malformed even when a `Message` element was already seen.
fn parse_xml_message(body: &[u8]) -> Result<String, DecodeError> {
    let text = String::from_utf8_lossy(body);
    let mut reader = Reader::from_str(&text);

    let mut depth: usize = 0;
    let mut inside_message = false;
    let mut message: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                if message.is_none() && e.local_name().as_ref() == b"Message" {
                    inside_message = true;
                    message = Some(String::new());
                }
            }
            Ok(Event::Empty(e)) => {
                if message.is_none() && e.local_name().as_ref() == b"Message" {
                    message = Some(String::new());
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1).ok_or(DecodeError::MalformedXml)?;
                inside_message = false;
            }
            Ok(Event::Text(t)) if inside_message => {
                let unescaped = t.unescape().map_err(|_| DecodeError::MalformedXml)?;
                if let Some(msg) = message.as_mut() {
                    msg.push_str(&unescaped);
                }
            }
            Ok(Event::CData(t)) if inside_message => {
                if let Some(msg) = message.as_mut() {
                    msg.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::Eof) => {
                if depth != 0 {
                    return Err(DecodeError::MalformedXml);
                }
                break;
            }
            Ok(_) => {}
            Err(_) => return Err(DecodeError::MalformedXml),
        }
    }

    message.ok_or(DecodeError::XmlMessageMissing)
}
