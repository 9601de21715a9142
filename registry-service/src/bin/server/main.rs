use std::sync::Arc;

use auth::JwtHandler;
use registry_service::authenticator::ports::AuthenticatorServicePort;
use registry_service::authenticator::registry::AuthenticatorRegistry;
use registry_service::authenticator::service::AuthenticatorService;
use registry_service::config::Config;
use registry_service::inbound::http::router::create_router;
use registry_service::outbound::configuration::AuthenticatorCatalog;
use registry_service::outbound::configuration::ConfigAuthenticatorLoader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registry_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "registry-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        authenticators_file = %config.registry.authenticators_file.display(),
        lock_timeout_ms = config.registry.lock_timeout_ms,
        "Configuration loaded"
    );

    let catalog = AuthenticatorCatalog::with_builtin();
    tracing::info!(kinds = ?catalog.kinds(), "Authenticator catalog ready");

    let loader = Arc::new(ConfigAuthenticatorLoader::new(
        config.registry.authenticators_file.clone(),
        catalog,
    ));
    let registry = Arc::new(AuthenticatorRegistry::new(config.registry.lock_timeout()));
    let authenticator_service = Arc::new(AuthenticatorService::new(registry, loader));

    // Stay up on a bad file so an operator can fix it and reload
    if let Err(e) = authenticator_service.reload_authenticators().await {
        tracing::error!(error = %e, "Initial authenticator load failed, registry not initialized");
    }

    let jwt_handler = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator_service, jwt_handler);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
