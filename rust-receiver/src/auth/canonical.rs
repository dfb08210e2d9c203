//! Canonical string construction for topic signature verification.
//!
//! The provider signs a deterministic text rebuilt from request metadata:
//!
//! ```text
//! METHOD
//! content-md5
//! content-type
//! date
//! x-mns-name:value        (all x-mns-* headers, sorted by name)
//! ...
//! request URI
//! ```
//!
//! Any drift from the provider's construction (ordering, casing, missing
//! lines) makes verification fail, so this module is deliberately literal.

use crate::request::InboundRequest;

/// Header-name prefix marking headers that participate in signing.
pub const MNS_HEADER_PREFIX: &str = "x-mns-";

/// Header carrying the base64-encoded URL of the signing certificate.
pub const SIGNING_CERT_URL_HEADER: &str = "x-mns-signing-cert-url";

/// Header carrying the base64-encoded request signature.
pub const SIGNATURE_HEADER: &str = "authorization";

/// Build the canonical string the provider signed.
///
/// Returns `None` when the `date` header is absent; the request cannot have
/// a valid signature without it, so verification fails without retrievable
/// detail beyond the missing header.
pub fn canonical_string(req: &InboundRequest<'_>) -> Option<String> {
    let date = req.header("date")?;

    let content_md5 = req.header("content-md5").unwrap_or("");
    let content_type = req.header("content-type").unwrap_or("");

    Some(format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        req.method.to_uppercase(),
        content_md5,
        content_type,
        date,
        canonicalized_mns_headers(req),
        req.uri,
    ))
}

/// Collect all `x-mns-*` headers as `name:value` lines, sorted byte-wise
/// ascending by name.
///
/// A request with no provider headers yields an empty block; the line for
/// the block is still present in the canonical string.
fn canonicalized_mns_headers(req: &InboundRequest<'_>) -> String {
    let mut selected: Vec<(&str, &str)> = req
        .headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with(MNS_HEADER_PREFIX))
        .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or("")))
        .collect();

    selected.sort_by(|a, b| a.0.cmp(b.0));

    selected
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}
