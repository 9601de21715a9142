use std::sync::Arc;

use async_trait::async_trait;
use auth::Authentication;
use auth::AuthenticationError;
use auth::AuthenticationProvider;
use auth::Authenticator;
use auth::CredentialKind;

use super::models::AuthenticatorRegistration;
use super::models::QualifiedName;

/// Authenticator that accepts every credential of the kinds it supports.
pub struct StubAuthenticator {
    principal: String,
    kinds: Vec<CredentialKind>,
    accept: bool,
}

impl StubAuthenticator {
    pub fn accepting(principal: &str, kinds: &[CredentialKind]) -> Self {
        Self {
            principal: principal.to_string(),
            kinds: kinds.to_vec(),
            accept: true,
        }
    }

    pub fn rejecting(kinds: &[CredentialKind]) -> Self {
        Self {
            principal: String::new(),
            kinds: kinds.to_vec(),
            accept: false,
        }
    }
}

#[async_trait]
impl AuthenticationProvider for StubAuthenticator {
    fn supports(&self, kind: CredentialKind) -> bool {
        self.kinds.contains(&kind)
    }

    async fn authenticate(
        &self,
        authentication: Authentication,
    ) -> Result<Authentication, AuthenticationError> {
        if self.accept {
            Ok(authentication.authenticated(&self.principal))
        } else {
            Err(AuthenticationError::BadCredentials)
        }
    }
}

impl Authenticator for StubAuthenticator {
    fn provider(&self) -> &dyn AuthenticationProvider {
        self
    }
}

pub fn registration(name: &str) -> AuthenticatorRegistration {
    AuthenticatorRegistration::new(
        QualifiedName::new(name).unwrap(),
        Arc::new(StubAuthenticator::accepting(
            name,
            &[CredentialKind::UsernamePassword],
        )),
    )
}

pub fn registrations(names: &[&str]) -> Vec<AuthenticatorRegistration> {
    names.iter().map(|name| registration(name)).collect()
}
