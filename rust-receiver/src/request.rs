//! Borrowed view of an inbound HTTP request.
//!
//! The HTTP server layer owns the request; the authenticator only needs a
//! read-only window onto the pieces that participate in signing: method,
//! URI, headers, and the raw body bytes.

use axum::http::HeaderMap;

/// Read-only view of one inbound push notification request.
///
/// Header names are case-insensitive: `HeaderMap` normalizes names to
/// lower-case at ingestion, so every lookup happens against a single
/// canonical spelling.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    /// HTTP method as received (`POST` for provider pushes).
    pub method: &'a str,
    /// Request URI: path plus query string, unmodified.
    pub uri: &'a str,
    /// All request headers.
    pub headers: &'a HeaderMap,
    /// Raw request body bytes.
    pub body: &'a [u8],
}

impl<'a> InboundRequest<'a> {
    pub fn new(method: &'a str, uri: &'a str, headers: &'a HeaderMap, body: &'a [u8]) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// Look up a header value as a string, `None` if absent or not UTF-8.
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
