use async_trait::async_trait;

use crate::authentication::Authentication;
use crate::authentication::Credential;
use crate::authentication::CredentialKind;
use crate::authenticator::AuthenticationError;
use crate::authenticator::AuthenticationProvider;
use crate::authenticator::Authenticator;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Authenticates bearer tokens signed with a shared secret.
///
/// The token subject becomes the principal.
pub struct JwtAuthenticator {
    jwt_handler: JwtHandler,
}

impl JwtAuthenticator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
        }
    }
}

#[async_trait]
impl AuthenticationProvider for JwtAuthenticator {
    fn supports(&self, kind: CredentialKind) -> bool {
        kind == CredentialKind::BearerToken
    }

    async fn authenticate(
        &self,
        authentication: Authentication,
    ) -> Result<Authentication, AuthenticationError> {
        let token = match &authentication.credential {
            Credential::BearerToken(token) => token,
            other => return Err(AuthenticationError::UnsupportedCredential(other.kind())),
        };

        let claims: Claims = self.jwt_handler.decode(token)?;
        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        Ok(authentication.authenticated(subject))
    }
}

impl Authenticator for JwtAuthenticator {
    fn provider(&self) -> &dyn AuthenticationProvider {
        self
    }
}
