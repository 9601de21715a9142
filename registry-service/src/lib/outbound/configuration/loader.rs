use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use config::Config as ConfigBuilder;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use super::catalog::AuthenticatorCatalog;
use super::catalog::AuthenticatorSettings;
use crate::authenticator::errors::LoaderError;
use crate::authenticator::models::AuthenticatorRegistration;
use crate::authenticator::models::QualifiedName;
use crate::authenticator::ports::AuthenticatorLoader;

#[derive(Debug, Deserialize)]
struct AuthenticatorsFile {
    #[serde(default)]
    authenticators: Vec<AuthenticatorSettings>,
}

/// Loads the authenticator chain from a TOML file.
///
/// The file is re-read on every call so edits take effect on the next
/// reload. Entries keep their file order; disabled entries are skipped.
///
/// ```toml
/// [[authenticators]]
/// name = "JwtAuthenticator"
/// kind = "jwt"
/// secret = "..."
/// ```
#[derive(Debug, Clone)]
pub struct ConfigAuthenticatorLoader {
    path: PathBuf,
    catalog: AuthenticatorCatalog,
}

impl ConfigAuthenticatorLoader {
    pub fn new(path: impl Into<PathBuf>, catalog: AuthenticatorCatalog) -> Self {
        Self {
            path: path.into(),
            catalog,
        }
    }

    fn build(
        &self,
        settings: Vec<AuthenticatorSettings>,
    ) -> Result<Vec<AuthenticatorRegistration>, LoaderError> {
        let mut registrations = Vec::with_capacity(settings.len());
        let mut seen = HashSet::new();

        for entry in settings.into_iter().filter(|entry| entry.enabled) {
            let name = QualifiedName::new(entry.name.as_str())?;
            if !seen.insert(name.as_str().to_string()) {
                return Err(LoaderError::Configuration(format!(
                    "authenticator {} is declared more than once",
                    name
                )));
            }

            let authenticator = self.catalog.build(&entry)?;
            tracing::debug!(name = %name, kind = %entry.kind, "Authenticator built");
            registrations.push(AuthenticatorRegistration::new(name, authenticator));
        }

        if registrations.is_empty() {
            return Err(LoaderError::Empty);
        }

        Ok(registrations)
    }
}

fn read_settings(path: &Path) -> Result<Vec<AuthenticatorSettings>, LoaderError> {
    let file: AuthenticatorsFile = ConfigBuilder::builder()
        .add_source(File::from(path).format(FileFormat::Toml))
        .build()
        .and_then(|configuration| configuration.try_deserialize())
        .map_err(|e| LoaderError::Configuration(e.to_string()))?;

    Ok(file.authenticators)
}

#[async_trait]
impl AuthenticatorLoader for ConfigAuthenticatorLoader {
    async fn load(&self) -> Result<Vec<AuthenticatorRegistration>, LoaderError> {
        let path = self.path.clone();
        let settings = tokio::task::spawn_blocking(move || read_settings(&path))
            .await
            .map_err(|e| LoaderError::Configuration(e.to_string()))??;

        let registrations = self.build(settings)?;
        tracing::info!(
            path = %self.path.display(),
            authenticators = registrations.len(),
            "Authenticators loaded from configuration"
        );

        Ok(registrations)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use auth::Authenticator;
    use auth::CredentialKind;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::authenticator::fixtures::StubAuthenticator;

    fn catalog() -> AuthenticatorCatalog {
        AuthenticatorCatalog::with_builtin().register("stub", |settings| {
            Ok(Arc::new(StubAuthenticator::accepting(
                &settings.name,
                &[CredentialKind::UsernamePassword],
            )) as Arc<dyn Authenticator>)
        })
    }

    fn authenticators_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    fn names(registrations: &[AuthenticatorRegistration]) -> Vec<&str> {
        registrations
            .iter()
            .map(|registration| registration.name.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_load_keeps_file_order() {
        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "PasswordAuthenticator"
            kind = "stub"

            [[authenticators]]
            name = "JwtAuthenticator"
            kind = "jwt"
            secret = "secret_key_at_least_32_bytes_long!"

            [[authenticators]]
            name = "SecurityTokenAuthenticator"
            kind = "security_token"
            secret = "secret_key_at_least_32_bytes_long!"

            [[authenticators]]
            name = "LdapAuthenticator"
            kind = "stub"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());

        let registrations = loader.load().await.expect("Load failed");
        assert_eq!(
            names(&registrations),
            vec![
                "PasswordAuthenticator",
                "JwtAuthenticator",
                "SecurityTokenAuthenticator",
                "LdapAuthenticator",
            ]
        );
    }

    #[tokio::test]
    async fn test_load_skips_disabled_entries() {
        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "OrientDbAuthenticator"
            kind = "stub"
            enabled = false

            [[authenticators]]
            name = "LdapAuthenticator"
            kind = "stub"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());

        let registrations = loader.load().await.unwrap();
        assert_eq!(names(&registrations), vec!["LdapAuthenticator"]);
    }

    #[tokio::test]
    async fn test_load_rereads_file() {
        let mut file = authenticators_file(
            r#"
            [[authenticators]]
            name = "First"
            kind = "stub"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());
        assert_eq!(names(&loader.load().await.unwrap()), vec!["First"]);

        file.write_all(
            br#"
            [[authenticators]]
            name = "Second"
            kind = "stub"
            "#,
        )
        .unwrap();
        assert_eq!(
            names(&loader.load().await.unwrap()),
            vec!["First", "Second"]
        );
    }

    #[tokio::test]
    async fn test_load_without_enabled_entries_is_empty() {
        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "Disabled"
            kind = "stub"
            enabled = false
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());

        assert_eq!(loader.load().await.unwrap_err(), LoaderError::Empty);

        let file = authenticators_file("");
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());
        assert_eq!(loader.load().await.unwrap_err(), LoaderError::Empty);
    }

    #[tokio::test]
    async fn test_load_unknown_kind() {
        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "KerberosAuthenticator"
            kind = "kerberos"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());

        assert!(matches!(
            loader.load().await,
            Err(LoaderError::UnknownKind { kind, .. }) if kind == "kerberos"
        ));
    }

    #[tokio::test]
    async fn test_load_rejects_duplicates_and_blank_names() {
        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "Twice"
            kind = "stub"

            [[authenticators]]
            name = "Twice"
            kind = "stub"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());
        assert!(matches!(
            loader.load().await,
            Err(LoaderError::Configuration(_))
        ));

        let file = authenticators_file(
            r#"
            [[authenticators]]
            name = "   "
            kind = "stub"
            "#,
        );
        let loader = ConfigAuthenticatorLoader::new(file.path(), catalog());
        assert!(matches!(
            loader.load().await,
            Err(LoaderError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = ConfigAuthenticatorLoader::new("/nonexistent/authenticators.toml", catalog());

        assert!(matches!(
            loader.load().await,
            Err(LoaderError::Configuration(_))
        ));
    }
}
