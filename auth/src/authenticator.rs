use async_trait::async_trait;

use crate::authentication::Authentication;
use crate::authentication::CredentialKind;
use crate::jwt::JwtError;

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Bad credentials")]
    BadCredentials,

    #[error("Credential kind not supported: {0}")]
    UnsupportedCredential(CredentialKind),

    #[error("No authenticator supports credential kind: {0}")]
    NoProviderSupports(CredentialKind),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

/// Provider that attempts to validate a credential.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Whether this provider can handle a credential kind.
    ///
    /// The dispatcher only calls `authenticate` on providers returning true.
    fn supports(&self, kind: CredentialKind) -> bool;

    /// Attempt to validate an authentication request.
    ///
    /// # Arguments
    /// * `authentication` - Request carrying the presented credential
    ///
    /// # Returns
    /// The request marked authenticated with its principal
    ///
    /// # Errors
    /// * `BadCredentials` - Credential was checked and rejected
    /// * `UnsupportedCredential` - Credential kind not handled by this provider
    /// * `Token` - Token could not be decoded or validated
    async fn authenticate(
        &self,
        authentication: Authentication,
    ) -> Result<Authentication, AuthenticationError>;
}

/// Pluggable authenticator capability.
///
/// Registries store authenticators as trait objects and never depend on
/// concrete kinds.
pub trait Authenticator: Send + Sync + 'static {
    /// Provider consulted during an authentication attempt.
    fn provider(&self) -> &dyn AuthenticationProvider;
}
