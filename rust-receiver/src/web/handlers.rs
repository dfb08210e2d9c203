//! Notification endpoint handlers.
//!
//! The notification handler does exactly one thing per request:
//! 1. Run the request through the topic receiver (verify, then decode)
//! 2. Answer with the status the outcome maps to
//!
//! What happens to an accepted message afterwards is the caller's concern;
//! this server echoes it in the response envelope and logs it.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::receiver::TopicReceiver;
use crate::request::InboundRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub receiver: Arc<TopicReceiver>,
}

impl AppState {
    pub fn new(receiver: TopicReceiver) -> Self {
        Self {
            receiver: Arc::new(receiver),
        }
    }
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Notification response envelope.
#[derive(Serialize)]
pub struct NotificationResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Topic push notification endpoint.
///
/// Status mapping:
/// - 401: header signature verification failed (body never decoded)
/// - 400: content-md5 header mismatched the body
/// - 500: verified body could not be decoded
/// - 200: message extracted
pub async fn topic_notification(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let req = InboundRequest::new(method.as_str(), path_and_query, &headers, &body);

    match state.receiver.get_message(&req, None).await {
        Ok(message) => {
            info!(message_length = message.len(), "notification_ok");
            (
                StatusCode::OK,
                Json(NotificationResponse {
                    status: "ok",
                    message: Some(message),
                }),
            )
        }
        Err(e) => {
            warn!(error = %e, status_code = e.status_code().as_u16(), "notification_rejected");
            (
                e.status_code(),
                Json(NotificationResponse {
                    status: "rejected",
                    message: None,
                }),
            )
        }
    }
}
