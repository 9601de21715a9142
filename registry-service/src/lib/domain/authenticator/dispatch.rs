//! Request-time walk over the authenticator chain.
//!
//! The service hosts and administers the chain; request authentication
//! happens in the embedding application, which takes a snapshot from the
//! shared `AuthenticatorRegistry` and calls [`authenticate`] with it.

use auth::Authentication;
use auth::AuthenticationError;

use super::models::AuthenticatorSnapshot;

/// Walk a snapshot and authenticate with the first provider that accepts.
///
/// Providers that do not support the credential kind are skipped. When every
/// supporting provider rejects the credential, the last rejection is returned.
///
/// # Arguments
/// * `snapshot` - Chain captured from the registry
/// * `authentication` - Unauthenticated request
///
/// # Returns
/// The request marked authenticated by the first accepting provider
///
/// # Errors
/// * `NoProviderSupports` - No provider in the chain supports the credential kind
/// * Any rejection from the last supporting provider
pub async fn authenticate(
    snapshot: &AuthenticatorSnapshot,
    authentication: Authentication,
) -> Result<Authentication, AuthenticationError> {
    let kind = authentication.kind();
    let mut last_error = None;

    for entry in snapshot {
        let provider = entry.provider();
        if !provider.supports(kind) {
            continue;
        }

        match provider.authenticate(authentication.clone()).await {
            Ok(result) => {
                tracing::debug!(
                    authenticator = %entry.name,
                    position = entry.position,
                    generation = snapshot.generation(),
                    "Credential accepted"
                );
                return Ok(result);
            }
            Err(e) => {
                tracing::debug!(
                    authenticator = %entry.name,
                    position = entry.position,
                    error = %e,
                    "Credential rejected"
                );
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(AuthenticationError::NoProviderSupports(kind)))
}
