use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::authenticator::errors::RegistryError;

pub mod health_check;
pub mod list_authenticators;
pub mod reload_authenticators;
pub mod reorder_authenticators;

pub const SUCCESSFUL_REORDER: &str = "Successfully reordered";
pub const SUCCESSFUL_RELOAD: &str = "Successfully reloaded";

/// Seconds a client should wait before retrying after lock contention
const RETRY_AFTER_SECONDS: u64 = 1;

/// Representation requested through the `Accept` header.
///
/// The first of `application/json` or `text/plain` listed wins; anything
/// else, including a missing header, gets JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
}

impl ResponseFormat {
    pub fn from_accept(accept: &str) -> Self {
        accept
            .split(',')
            .filter_map(|range| range.split(';').next())
            .map(str::trim)
            .find_map(|media_type| match media_type {
                "application/json" => Some(Self::Json),
                "text/plain" => Some(Self::Text),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_accept)
            .unwrap_or_default())
    }
}

/// Response data that also has a plain text rendering.
pub trait PlainText {
    fn to_plain_text(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}

impl MessageResponseData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl PlainText for MessageResponseData {
    fn to_plain_text(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T: Serialize + PartialEq + PlainText> {
    status: StatusCode,
    format: ResponseFormat,
    data: T,
}

impl<T: Serialize + PartialEq + PlainText> ApiSuccess<T> {
    pub fn new(status: StatusCode, format: ResponseFormat, data: T) -> Self {
        ApiSuccess {
            status,
            format,
            data,
        }
    }
}

impl<T: Serialize + PartialEq + PlainText> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => {
                (self.status, Json(ApiResponseBody::new(self.status, self.data))).into_response()
            }
            ResponseFormat::Text => (self.status, self.data.to_plain_text()).into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    ServiceUnavailable(String),
    // Transient, the client is told when to come back
    Retryable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Retryable(msg) => {
                let mut response = (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ApiResponseBody::new_error(
                        StatusCode::SERVICE_UNAVAILABLE,
                        msg,
                    )),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECONDS));
                return response;
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::IndexOutOfRange { .. } => ApiError::BadRequest(err.to_string()),
            RegistryError::InvalidReload(_) => ApiError::InternalServerError(err.to_string()),
            RegistryError::LockContentionTimeout(_) => ApiError::Retryable(err.to_string()),
            RegistryError::NotInitialized => ApiError::ServiceUnavailable(err.to_string()),
        }
    }
}

/// JSON body: `status_code` next to the fields of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
