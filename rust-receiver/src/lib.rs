//! MNS Receiver - authenticated webhook receiver for topic push notifications.
//!
//! This library accepts push notifications from a message-topic service and
//! refuses anything it cannot prove came from the provider:
//!
//! ```text
//! HTTP request → canonical string → fetch signing cert → RSA verify
//!              → content-md5 check → decode (XML/JSON/SIMPLIFIED) → message
//! ```
//!
//! Any failure short-circuits to a single HTTP status: 401 for signature
//! problems, 400 for a body-digest mismatch, 500 for a decode failure.

pub mod auth;
pub mod config;
pub mod error;
pub mod message;
pub mod receiver;
pub mod request;
pub mod web;

// Re-export commonly used types
pub use auth::{CertificateSource, HttpCertificateFetcher, VerifyFailure};
pub use config::Config;
pub use error::ReceiveError;
pub use message::{ContentFormat, DecodeError};
pub use receiver::TopicReceiver;
pub use request::InboundRequest;
pub use web::AppState;
