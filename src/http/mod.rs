use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::state::AppState;

mod profiles;
mod query;
mod variations;

pub fn router(state: AppState) -> Router {
    assert!(
        state.start_time.elapsed() < Duration::from_secs(86_400),
        "Application uptime exceeds 24 hours before router creation"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let variations_router = variations::router().with_state(state.clone());
    let profiles_router = profiles::router()
        .merge(query::router())
        .with_state(state.clone());
    Router::new()
        .route("/health", get(health_live))
        .route("/health/ready", get(health_ready))
        .nest("/variations", variations_router)
        .nest("/profiles", profiles_router)
        .layer(cors)
        .with_state(state)
}

async fn health_live(State(state): State<AppState>) -> Result<Json<HealthResponse>, HttpError> {
    let uptime = state.start_time.elapsed().as_secs();
    assert!(
        uptime <= 31_536_000,
        "Uptime exceeds one year without restart"
    );
    let response = HealthResponse {
        status: "live",
        uptime_seconds: uptime,
    };
    Ok(Json(response))
}

async fn health_ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, HttpError> {
    state
        .database
        .ping()
        .await
        .map_err(|err| HttpError::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()))?;

    let verifier_timeout_ms = u64::try_from(state.verifier.timeout().as_millis())
        .expect("Verifier timeout exceeds u64 bounds");

    let response = ReadyResponse {
        status: "ready",
        verifier_timeout_ms,
        cache_entries: CacheSummary {
            variations: state.cache.variations.entry_count(),
        },
    };
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
    verifier_timeout_ms: u64,
    cache_entries: CacheSummary,
}

#[derive(Debug, Serialize)]
struct CacheSummary {
    variations: u64,
}

/// Request-boundary error. Renders either the canonical
/// `{"error": true, "errorMessage": ...}` body or, for verifier rejections,
/// the external payload unmodified.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    payload: ErrorPayload,
}

#[derive(Debug)]
enum ErrorPayload {
    Message(String),
    Raw(Value),
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self {
            status,
            payload: ErrorPayload::Message(message),
        }
    }

    pub fn passthrough(status: StatusCode, payload: Value) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        Self {
            status,
            payload: ErrorPayload::Raw(payload),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self.payload {
            ErrorPayload::Message(message) => {
                info!("HTTP error: {message}");
                let body = Json(ErrorBody {
                    error: true,
                    error_message: message,
                });
                (self.status, body).into_response()
            }
            ErrorPayload::Raw(value) => {
                info!("HTTP error passthrough: {value}");
                (self.status, Json(value)).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: bool,
    #[serde(rename = "errorMessage")]
    error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_uses_canonical_field_names() {
        let body = ErrorBody {
            error: true,
            error_message: "nope".to_string(),
        };
        let value = serde_json::to_value(&body).expect("serialize error body");
        assert_eq!(value["error"], true);
        assert_eq!(value["errorMessage"], "nope");
        assert!(value.get("error_message").is_none());
    }
}
