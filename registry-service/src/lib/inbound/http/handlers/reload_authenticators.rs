use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use super::ResponseFormat;
use super::SUCCESSFUL_RELOAD;
use crate::authenticator::ports::AuthenticatorServicePort;
use crate::inbound::http::middleware::AuthenticatedOperator;
use crate::inbound::http::router::AppState;

/// Rebuild the chain from the authenticators file.
pub async fn reload_authenticators(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    format: ResponseFormat,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let snapshot = state
        .authenticator_service
        .reload_authenticators()
        .await?;

    tracing::info!(
        operator = %operator.subject,
        authenticators = snapshot.len(),
        generation = snapshot.generation(),
        "Authenticators reloaded by operator"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        format,
        MessageResponseData::new(format!(
            "{} {} authenticators",
            SUCCESSFUL_RELOAD,
            snapshot.len()
        )),
    ))
}
