use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ApiError;
use crate::descriptor::{self, AppConfig, Field, SyncConfig};
use crate::error::Error;
use crate::oauth::{AccountFields, TokenSet, ValidatedAccount};
use crate::sync::{SyncRequest, SyncResponse};
use crate::Connector;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Unwrap a JSON body, turning axum's rejection into our error body.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError(Error::BadRequest(e.body_text())))
}

pub(super) async fn app_config() -> Json<AppConfig> {
    Json(descriptor::app_config())
}

pub(super) async fn logo(State(connector): State<Arc<Connector>>) -> Result<Response, ApiError> {
    let svg = connector.logo().await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

#[derive(Debug, Deserialize)]
pub(super) struct ValidateAccountRequest {
    #[serde(default)]
    fields: AccountFields,
}

pub(super) async fn validate_account(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<ValidateAccountRequest>, JsonRejection>,
) -> ApiResult<ValidatedAccount> {
    let req = body(payload)?;
    Ok(Json(connector.oauth().validate(&req.fields).await?))
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorizeRequest {
    callback_uri: String,
    #[serde(default)]
    state: String,
}

#[derive(Debug, Serialize)]
pub(super) struct AuthorizeResponse {
    redirect_uri: String,
}

pub(super) async fn authorize(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<AuthorizeRequest>, JsonRejection>,
) -> ApiResult<AuthorizeResponse> {
    let req = body(payload)?;
    let redirect_uri = connector
        .oauth()
        .authorize_url(&req.callback_uri, &req.state)?;
    Ok(Json(AuthorizeResponse { redirect_uri }))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CallbackFields {
    #[serde(default)]
    callback_uri: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccessTokenRequest {
    #[serde(default)]
    fields: CallbackFields,
    code: String,
}

pub(super) async fn access_token(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<AccessTokenRequest>, JsonRejection>,
) -> ApiResult<TokenSet> {
    let req = body(payload)?;
    let tokens = connector
        .oauth()
        .exchange_code(&req.code, &req.fields.callback_uri)
        .await?;
    Ok(Json(tokens))
}

pub(super) async fn sync_config() -> Json<SyncConfig> {
    Json(descriptor::sync_config())
}

#[derive(Debug, Deserialize)]
pub(super) struct TypesRequest {
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    filter: Option<Map<String, Value>>,
}

pub(super) async fn schema(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<TypesRequest>, JsonRejection>,
) -> ApiResult<BTreeMap<&'static str, BTreeMap<&'static str, Field>>> {
    let req = body(payload)?;
    Ok(Json(connector.schema(&req.types)))
}

pub(super) async fn validate_filters(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<TypesRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let req = body(payload)?;
    connector.validate_filters(&req.types, &req.filter.unwrap_or_default())?;
    Ok(Json(Value::Null))
}

pub(super) async fn data(
    State(connector): State<Arc<Connector>>,
    payload: Result<Json<SyncRequest>, JsonRejection>,
) -> ApiResult<SyncResponse> {
    let req = body(payload)?;
    Ok(Json(connector.synchronize(&req).await?))
}
