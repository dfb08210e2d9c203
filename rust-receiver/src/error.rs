//! Receiver error taxonomy and HTTP status mapping.

use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::VerifyFailure;
use crate::message::DecodeError;

/// Why a notification was not accepted.
///
/// Each variant maps to exactly one HTTP status, so callers that answer the
/// provider directly can translate without inspecting further. Callers that
/// prefer propagation just bubble the error.
#[derive(Debug, Error)]
pub enum ReceiveError {
    /// Header signature verification failed (missing date header,
    /// certificate fetch failure, or signature mismatch).
    #[error("request signature rejected: {0}")]
    SignatureInvalid(#[from] VerifyFailure),

    /// The supplied content-md5 header does not match the request body.
    #[error("content-md5 header does not match request body")]
    ContentIntegrity,

    /// The verified body could not be decoded in the selected format.
    #[error("notification decode failed: {0}")]
    Decode(#[from] DecodeError),
}

impl ReceiveError {
    /// HTTP status answered to the provider for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SignatureInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::ContentIntegrity => StatusCode::BAD_REQUEST,
            Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
