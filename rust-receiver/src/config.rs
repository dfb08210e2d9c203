//! Configuration module for environment variable parsing.

use std::env;

use tracing::warn;

use crate::message::ContentFormat;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Timeout in milliseconds for the signing-certificate fetch
    pub cert_fetch_timeout_ms: u64,

    /// Default body format for inbound notifications
    pub content_format: ContentFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            cert_fetch_timeout_ms: env::var("CERT_FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),

            content_format: parse_content_format("NOTIFY_CONTENT_FORMAT"),
        }
    }
}

/// Parse a content format name from the environment, defaulting to XML.
///
/// Unrecognized names are ignored with a warning: an invalid value never
/// replaces a working default.
fn parse_content_format(name: &str) -> ContentFormat {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return ContentFormat::default(),
    };

    match ContentFormat::from_name(&raw) {
        Some(format) => format,
        None => {
            warn!(env_var = name, value = %raw, "Unrecognized content format, using default");
            ContentFormat::default()
        }
    }
}
