//! Topic push receiver: authenticate, integrity-check, decode.
//!
//! `TopicReceiver` runs one inbound notification through the full
//! sequence: canonicalize signing headers → fetch signing certificate →
//! verify the RSA signature → check the content-md5 digest when supplied →
//! decode the body in the selected format. Every failure is terminal for
//! the request; nothing is retried and nothing is cached across calls.
//!
//! The body format is an explicit per-call parameter with a configured
//! default. The receiver itself is immutable after construction, so
//! concurrent requests can share one instance freely.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use md5::{Digest, Md5};
use tracing::{info, warn};

use crate::auth::{self, CertificateSource};
use crate::error::ReceiveError;
use crate::message::{self, ContentFormat};
use crate::request::InboundRequest;

/// Receives and authenticates topic push notifications.
pub struct TopicReceiver {
    certs: Arc<dyn CertificateSource>,
    default_format: ContentFormat,
}

impl TopicReceiver {
    pub fn new(certs: Arc<dyn CertificateSource>, default_format: ContentFormat) -> Self {
        Self {
            certs,
            default_format,
        }
    }

    /// Format used when `get_message` is called without an override.
    pub fn default_format(&self) -> ContentFormat {
        self.default_format
    }

    /// Extract the verified message from one inbound request.
    ///
    /// `format` overrides the configured default for this call only.
    ///
    /// # Errors
    ///
    /// - [`ReceiveError::SignatureInvalid`] (401): missing date header,
    ///   certificate fetch failure, or signature mismatch. The body is
    ///   never decoded on this path.
    /// - [`ReceiveError::ContentIntegrity`] (400): a content-md5 header was
    ///   supplied and does not match the body digest.
    /// - [`ReceiveError::Decode`] (500): the body could not be parsed in
    ///   the selected format.
    pub async fn get_message(
        &self,
        req: &InboundRequest<'_>,
        format: Option<ContentFormat>,
    ) -> Result<String, ReceiveError> {
        let format = format.unwrap_or(self.default_format);

        info!(
            method = req.method,
            uri = req.uri,
            body_length = req.body.len(),
            format = %format,
            "notification_received"
        );

        auth::check_topic_signature(req, self.certs.as_ref()).await?;

        if let Some(supplied) = req.header("content-md5") {
            let computed = content_md5(req.body);
            if supplied != computed {
                warn!(
                    supplied = supplied,
                    computed = %computed,
                    "notification_content_md5_mismatch"
                );
                return Err(ReceiveError::ContentIntegrity);
            }
        }

        let message = message::parse_message(req.body, format)?;

        info!(message_length = message.len(), "notification_accepted");

        Ok(message)
    }
}

/// Digest of the body in the provider's content-md5 form: base64 of the
/// lowercase-hex MD5 of the raw bytes.
pub fn content_md5(body: &[u8]) -> String {
    BASE64_STANDARD.encode(hex::encode(Md5::digest(body)))
}
