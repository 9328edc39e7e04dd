//! HTTP handlers for the relay API
//!
//! - POST /api/send/email — relay an e-mail, `{ ok, id }`
//! - POST /api/send/sms   — relay an SMS, `{ ok, sid }`
//! - GET  /api/health     — liveness, `{ ok }`
//!
//! Every failure is answered with `{ "error": "<message>" }` and the status
//! code of the underlying [`Error`].

use super::service::RelayService;
use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for relay handlers
#[derive(Clone)]
pub struct RelayState {
    pub service: Arc<RelayService>,
}

/// Body of both send endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryRequest {
    pub to: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmailSent {
    ok: bool,
    id: String,
}

#[derive(Debug, Serialize)]
struct SmsSent {
    ok: bool,
    sid: String,
}

#[derive(Debug, Serialize)]
struct Health {
    ok: bool,
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Create the relay router
pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/api/send/email", post(send_email))
        .route("/api/send/sms", post(send_sms))
        .route("/api/health", get(health))
        .with_state(state)
}

/// Unwrap the body; an unreadable body counts as missing fields
fn fields(body: Result<Json<DeliveryRequest>, JsonRejection>) -> (String, String) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Unreadable relay request body: {}", rejection);
            DeliveryRequest::default()
        }
    };
    (
        request.to.unwrap_or_default(),
        request.message.unwrap_or_default(),
    )
}

/// POST /api/send/email
async fn send_email(
    State(state): State<RelayState>,
    body: Result<Json<DeliveryRequest>, JsonRejection>,
) -> Result<Json<EmailSent>, Error> {
    let (to, message) = fields(body);
    let id = state.service.send_email(&to, &message).await?;
    Ok(Json(EmailSent { ok: true, id }))
}

/// POST /api/send/sms
async fn send_sms(
    State(state): State<RelayState>,
    body: Result<Json<DeliveryRequest>, JsonRejection>,
) -> Result<Json<SmsSent>, Error> {
    let (to, message) = fields(body);
    let sid = state.service.send_sms(&to, &message).await?;
    Ok(Json(SmsSent { ok: true, sid }))
}

/// GET /api/health
async fn health() -> impl IntoResponse {
    Json(Health { ok: true })
}
