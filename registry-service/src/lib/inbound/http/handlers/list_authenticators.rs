use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::PlainText;
use super::ResponseFormat;
use crate::authenticator::models::AuthenticatorSnapshot;
use crate::authenticator::ports::AuthenticatorServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_authenticators(
    State(state): State<AppState>,
    format: ResponseFormat,
) -> Result<ApiSuccess<ListAuthenticatorsResponseData>, ApiError> {
    state
        .authenticator_service
        .list_authenticators()
        .await
        .map_err(ApiError::from)
        .map(|ref snapshot| ApiSuccess::new(StatusCode::OK, format, snapshot.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAuthenticatorsResponseData {
    pub authenticators: AuthenticatorListData,
    pub count: usize,
    pub generation: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatorListData {
    pub authenticator: Vec<AuthenticatorData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatorData {
    pub index: usize,
    pub name: String,
}

impl From<&AuthenticatorSnapshot> for ListAuthenticatorsResponseData {
    fn from(snapshot: &AuthenticatorSnapshot) -> Self {
        let authenticator = snapshot
            .iter()
            .map(|entry| AuthenticatorData {
                index: entry.position,
                name: entry.name.to_string(),
            })
            .collect();

        Self {
            authenticators: AuthenticatorListData { authenticator },
            count: snapshot.len(),
            generation: snapshot.generation(),
            updated_at: snapshot.updated_at(),
        }
    }
}

impl PlainText for ListAuthenticatorsResponseData {
    fn to_plain_text(&self) -> String {
        let mut text: String = self
            .authenticators
            .authenticator
            .iter()
            .map(|entry| format!("{}: {}\n", entry.index, entry.name))
            .collect();
        text.push_str(&format!("count: {}\n", self.count));
        text
    }
}
