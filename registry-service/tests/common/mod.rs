use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authentication;
use auth::AuthenticationError;
use auth::AuthenticationProvider;
use auth::Authenticator;
use auth::Claims;
use auth::CredentialKind;
use auth::JwtHandler;
use registry_service::authenticator::ports::AuthenticatorServicePort;
use registry_service::authenticator::registry::AuthenticatorRegistry;
use registry_service::authenticator::service::AuthenticatorService;
use registry_service::inbound::http::router::create_router;
use registry_service::outbound::configuration::AuthenticatorCatalog;
use registry_service::outbound::configuration::ConfigAuthenticatorLoader;
use tempfile::NamedTempFile;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub const INITIAL_AUTHENTICATORS: &str = r#"
[[authenticators]]
name = "OrientDbAuthenticator"
kind = "stub"

[[authenticators]]
name = "LdapAuthenticator"
kind = "stub"
"#;

/// Authenticator accepting any username and password, named after its entry
pub struct StubAuthenticator {
    principal: String,
}

impl StubAuthenticator {
    pub fn new(principal: &str) -> Self {
        Self {
            principal: principal.to_string(),
        }
    }
}

#[async_trait]
impl AuthenticationProvider for StubAuthenticator {
    fn supports(&self, kind: CredentialKind) -> bool {
        kind == CredentialKind::UsernamePassword
    }

    async fn authenticate(
        &self,
        authentication: Authentication,
    ) -> Result<Authentication, AuthenticationError> {
        Ok(authentication.authenticated(&self.principal))
    }
}

impl Authenticator for StubAuthenticator {
    fn provider(&self) -> &dyn AuthenticationProvider {
        self
    }
}

pub fn catalog() -> AuthenticatorCatalog {
    AuthenticatorCatalog::with_builtin().register("stub", |settings| {
        Ok(Arc::new(StubAuthenticator::new(&settings.name)) as Arc<dyn Authenticator>)
    })
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    authenticators_file: NamedTempFile,
}

impl TestApp {
    /// Spawn the application with the two initial authenticators loaded
    pub async fn spawn() -> Self {
        Self::spawn_with(INITIAL_AUTHENTICATORS).await
    }

    /// Spawn the application with `authenticators` as the authenticators file
    pub async fn spawn_with(authenticators: &str) -> Self {
        let authenticators_file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create authenticators file");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let registry = Arc::new(AuthenticatorRegistry::new(Duration::from_secs(2)));
        let loader = Arc::new(ConfigAuthenticatorLoader::new(
            authenticators_file.path(),
            catalog(),
        ));
        let authenticator_service =
            Arc::new(AuthenticatorService::new(registry, loader));

        let app = Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            authenticators_file,
        };

        app.write_authenticators(authenticators);
        if let Err(e) = authenticator_service.reload_authenticators().await {
            tracing::warn!(error = %e, "Test application started uninitialized");
        }

        let router = create_router(authenticator_service, Arc::new(JwtHandler::new(JWT_SECRET)));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        app
    }

    /// Replace the authenticators file; applied on the next reload
    pub fn write_authenticators(&self, content: &str) {
        std::fs::write(self.authenticators_file.path(), content)
            .expect("Failed to write authenticators file");
    }

    pub fn create_test_token(&self) -> String {
        self.jwt_handler
            .encode(&Claims::for_subject("admin", 1))
            .expect("Failed to create test token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(self.create_test_token())
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(self.create_test_token())
    }
}
