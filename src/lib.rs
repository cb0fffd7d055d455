//! Job and hackathon listing backend.
//!
//! Industry accounts register and log in to receive a JWT; the token gates
//! creating and editing listings, while browsing listings is public.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, get_service, post};
use handlers::{http, listings};
use models::{Hackathon, Job};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the full application: routes, static assets and the request pipeline
/// (trace → CORS → authentication gate → route policy). Used by main and by
/// integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/industry/register", post(auth::register))
        .route("/industry/login", post(auth::login))
        .route("/me", get(auth::current_user));

    let index = state.static_dir().join("index.html");

    axum::Router::new()
        .route("/health", get(http::health))
        .route("/test", get(http::test_endpoint))
        .route("/error", get(http::error_page))
        .route_service("/", get_service(ServeFile::new(&index)))
        .route_service("/index.html", get_service(ServeFile::new(&index)))
        .nest_service("/static", ServeDir::new(state.static_dir()))
        .nest("/auth", auth_routes)
        .nest("/hackathons", listings::routes::<Hackathon>())
        .nest("/jobs", listings::routes::<Job>())
        .fallback(http::not_found)
        .with_state(state.clone())
        .layer(axum::middleware::from_fn_with_state(
            state.policy.clone(),
            middleware::authorize,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.tokens().clone(),
            middleware::authenticate,
        ))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}
