use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health_check::health_check;
use super::handlers::list_authenticators::list_authenticators;
use super::handlers::reload_authenticators::reload_authenticators;
use super::handlers::reorder_authenticators::reorder_authenticators;
use super::middleware::authenticate as auth_middleware;
use crate::authenticator::service::AuthenticatorService;
use crate::outbound::configuration::ConfigAuthenticatorLoader;

#[derive(Clone)]
pub struct AppState {
    pub authenticator_service: Arc<AuthenticatorService<ConfigAuthenticatorLoader>>,
    pub jwt_handler: Arc<JwtHandler>,
}

pub fn create_router(
    authenticator_service: Arc<AuthenticatorService<ConfigAuthenticatorLoader>>,
    jwt_handler: Arc<JwtHandler>,
) -> Router {
    let state = AppState {
        authenticator_service,
        jwt_handler,
    };

    let public_routes = Router::new().route("/health", get(health_check));

    let configuration_routes = Router::new()
        .route("/authenticators", get(list_authenticators))
        .route("/authenticators/", get(list_authenticators))
        .route(
            "/authenticators/reorder/:first/:second",
            put(reorder_authenticators),
        )
        .route("/authenticators/reload", put(reload_authenticators))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .nest("/api/configuration", configuration_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
