//! CORS policy: any origin, credentials allowed.

use axum::http::{header, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Origins and request headers are mirrored rather than wildcarded, since
/// browsers refuse `*` together with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(true)
}
