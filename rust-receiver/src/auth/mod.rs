//! Topic push authentication.
//!
//! Every inbound notification is authenticated before its body is looked at:
//! canonicalize the signing headers, fetch the provider's signing
//! certificate, and verify the RSA signature carried in `authorization`.
//!
//! All failure modes collapse to one outward 401, but they are kept apart
//! internally so logs say which stage rejected the request.

pub mod canonical;
pub mod cert;
pub mod verify;

use thiserror::Error;
use tracing::{info, warn};

use crate::request::InboundRequest;

pub use canonical::{canonical_string, MNS_HEADER_PREFIX, SIGNATURE_HEADER, SIGNING_CERT_URL_HEADER};
pub use cert::{decode_cert_url, CertificateError, CertificateSource, HttpCertificateFetcher};

/// Why signature verification rejected a request.
///
/// Diagnostic detail only: callers map every variant to the same 401.
#[derive(Debug, Error)]
pub enum VerifyFailure {
    #[error("date header is missing")]
    MissingDate,

    #[error("signing certificate unavailable: {0}")]
    CertificateFetch(#[from] CertificateError),

    #[error("signature does not match canonical request")]
    SignatureMismatch,
}

/// Check the topic signature of one inbound request.
///
/// Performs the full authentication sequence: canonical string, certificate
/// fetch (one outbound GET, no caching), RSA verification. The body is never
/// consulted here; only headers, method, and URI participate.
pub async fn check_topic_signature(
    req: &InboundRequest<'_>,
    certs: &dyn CertificateSource,
) -> Result<(), VerifyFailure> {
    let canonical = match canonical_string(req) {
        Some(c) => c,
        None => {
            warn!("topic_signature_missing_date");
            return Err(VerifyFailure::MissingDate);
        }
    };

    let cert_url_header = req
        .header(SIGNING_CERT_URL_HEADER)
        .ok_or(CertificateError::UrlHeaderMissing)?;
    let cert_url = decode_cert_url(cert_url_header)?;
    let certificate = certs.fetch(&cert_url).await?;

    let signature = req.header(SIGNATURE_HEADER).unwrap_or("");

    if verify::verify(&canonical, signature, &certificate) {
        info!("topic_signature_verified");
        Ok(())
    } else {
        warn!("topic_signature_mismatch");
        Err(VerifyFailure::SignatureMismatch)
    }
}
