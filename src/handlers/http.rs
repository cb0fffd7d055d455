//! Shared state and the small utility endpoints: health, test, error.

use axum::{http::StatusCode, Json};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::db::StoreHandle;
use crate::middleware::policy::RoutePolicy;
use crate::services::{AccountService, ListingService};

/// Shared application state for handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenCodec,
    pub accounts: AccountService,
    pub listings: ListingService,
    pub policy: Arc<RoutePolicy>,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Wire services over `store` with the standard route policy.
    pub fn new(store: StoreHandle, tokens: TokenCodec) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), tokens.clone()),
            listings: ListingService::new(store),
            tokens,
            policy: Arc::new(RoutePolicy::standard()),
            static_dir: PathBuf::from("static"),
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn tokens(&self) -> &TokenCodec {
        &self.tokens
    }
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
    pub fn listings(&self) -> &ListingService {
        &self.listings
    }
    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

/// GET /health: liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "jobs" })),
    )
}

/// GET /test
pub async fn test_endpoint() -> &'static str {
    "Jobs backend is running"
}

/// GET /error: generic error document for clients redirected here.
pub async fn error_page() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An unexpected error occurred" })),
    )
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
