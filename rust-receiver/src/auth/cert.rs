//! Signing-certificate retrieval.
//!
//! The provider references its public signing certificate through the
//! `x-mns-signing-cert-url` header, whose value is the base64-encoded URL of
//! the certificate. The fetch is a plain GET with a bounded timeout: no
//! caching, no retries, and the response body is returned unmodified.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use thiserror::Error;
use tracing::info;

/// Failure retrieving the signing certificate.
///
/// Kept distinct from a signature mismatch so the receiver can log which
/// stage broke, even though both collapse to the same 401 outward.
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("signing certificate URL header is missing")]
    UrlHeaderMissing,

    #[error("signing certificate URL is not valid base64: {0}")]
    UrlEncoding(#[from] base64::DecodeError),

    #[error("signing certificate URL is not valid UTF-8")]
    UrlNotUtf8,

    #[error("signing certificate fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("signing certificate endpoint returned HTTP {0}")]
    Status(u16),
}

/// Source of signing-certificate material.
///
/// The production implementation fetches over HTTP; tests substitute a
/// static in-memory source so no verification path touches the network.
#[async_trait]
pub trait CertificateSource: Send + Sync {
    /// Retrieve the certificate text published at `url`.
    async fn fetch(&self, url: &str) -> Result<String, CertificateError>;
}

/// Decode the base64-encoded certificate URL carried in the request header.
pub fn decode_cert_url(header_value: &str) -> Result<String, CertificateError> {
    let raw = BASE64_STANDARD.decode(header_value.trim())?;
    String::from_utf8(raw).map_err(|_| CertificateError::UrlNotUtf8)
}

/// HTTP certificate fetcher with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpCertificateFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpCertificateFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl CertificateSource for HttpCertificateFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CertificateError> {
        info!(url = url, "signing_cert_fetch_start");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CertificateError::Status(status.as_u16()));
        }

        let body = response.text().await?;

        info!(
            url = url,
            status_code = status.as_u16(),
            body_length = body.len(),
            "signing_cert_fetch_complete"
        );

        Ok(body)
    }
}
