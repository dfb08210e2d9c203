//! Web server module for receiving topic push notifications.
//!
//! This module provides a thin web server that:
//! - Receives push notifications from the messaging provider
//! - Verifies the request signature against the provider's signing cert
//! - Decodes the notification body and answers with the mapped status

pub mod handlers;

pub use handlers::{health, topic_notification, AppState, HealthResponse, NotificationResponse};
