mod handlers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::error::Error;
use crate::Connector;

/// Build the HTTP router over a shared connector.
pub fn build_router(connector: Arc<Connector>) -> Router {
    Router::new()
        .route("/", get(handlers::app_config))
        .route("/logo", get(handlers::logo))
        .route("/validate", post(handlers::validate_account))
        .route("/oauth2/v1/authorize", post(handlers::authorize))
        .route("/oauth2/v1/access_token", post(handlers::access_token))
        .route("/api/v1/synchronizer/config", post(handlers::sync_config))
        .route("/api/v1/synchronizer/schema", post(handlers::schema))
        .route(
            "/api/v1/synchronizer/filter/validate",
            post(handlers::validate_filters),
        )
        .route("/api/v1/synchronizer/data", post(handlers::data))
        .with_state(connector)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    try_later: bool,
}

/// Error response: every failure path turns into exactly one of these.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            Error::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Error::Upstream(_) => StatusCode::BAD_REQUEST,
            Error::Auth(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self.0);
        } else {
            log::debug!("Responding {status}: {}", self.0);
        }
        let body = ErrorBody {
            message: self.0.to_string(),
            try_later: self.0.is_rate_limited(),
        };
        (status, Json(body)).into_response()
    }
}
