use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use super::ResponseFormat;
use super::SUCCESSFUL_REORDER;
use crate::authenticator::ports::AuthenticatorServicePort;
use crate::inbound::http::middleware::AuthenticatedOperator;
use crate::inbound::http::router::AppState;

/// Swap the authenticators at two positions.
pub async fn reorder_authenticators(
    State(state): State<AppState>,
    Extension(operator): Extension<AuthenticatedOperator>,
    positions: Result<Path<(i64, i64)>, PathRejection>,
    format: ResponseFormat,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let Path((first, second)) =
        positions.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let snapshot = state
        .authenticator_service
        .reorder_authenticators(first, second)
        .await?;

    tracing::info!(
        operator = %operator.subject,
        first,
        second,
        generation = snapshot.generation(),
        "Authenticators reordered by operator"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        format,
        MessageResponseData::new(format!(
            "{} authenticators at positions {} and {}",
            SUCCESSFUL_REORDER, first, second
        )),
    ))
}
