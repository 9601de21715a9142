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
use crate::jwt::SECURITY_TOKEN_KEY_CLAIM;

/// Authenticates long-lived security tokens.
///
/// A security token is a JWT signed with its own secret that must carry
/// both a subject and a `security-token-key` claim.
pub struct SecurityTokenAuthenticator {
    jwt_handler: JwtHandler,
}

impl SecurityTokenAuthenticator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
        }
    }
}

#[async_trait]
impl AuthenticationProvider for SecurityTokenAuthenticator {
    fn supports(&self, kind: CredentialKind) -> bool {
        kind == CredentialKind::SecurityToken
    }

    async fn authenticate(
        &self,
        authentication: Authentication,
    ) -> Result<Authentication, AuthenticationError> {
        let token = match &authentication.credential {
            Credential::SecurityToken(token) => token,
            other => return Err(AuthenticationError::UnsupportedCredential(other.kind())),
        };

        let claims: Claims = self.jwt_handler.decode(token)?;
        if claims.security_token_key().is_none() {
            return Err(JwtError::MissingClaim(SECURITY_TOKEN_KEY_CLAIM.to_string()).into());
        }
        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        Ok(authentication.authenticated(subject))
    }
}

impl Authenticator for SecurityTokenAuthenticator {
    fn provider(&self) -> &dyn AuthenticationProvider {
        self
    }
}
