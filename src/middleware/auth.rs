//! Authentication gate: binds a request identity from a valid bearer token.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::auth::{Identity, TokenCodec};
use crate::error::AppError;

/// Middleware: decode `Authorization: Bearer <token>` and, when valid, store an
/// [`Identity`] in the request extensions.
///
/// Never rejects. A missing, malformed or expired token leaves the request
/// anonymous; the route policy decides whether anonymous access is allowed.
pub async fn authenticate(
    State(tokens): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request.headers().typed_get::<Authorization<Bearer>>();

    if let Some(Authorization(bearer)) = bearer {
        if request.extensions().get::<Identity>().is_none() {
            match tokens.decode(bearer.token()) {
                Ok(claims) => {
                    let identity = Identity::from_claims(claims);
                    debug!(user_id = %identity.user_id, user_type = %identity.user_type, "identity bound");
                    request.extensions_mut().insert(identity);
                }
                Err(e) => {
                    warn!(error = %e, path = %request.uri().path(), "could not authenticate bearer token");
                }
            }
        }
    }

    next.run(request).await
}

/// Extractor: the caller bound by [`authenticate`]; rejects with 401 when anonymous.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Extractor: the caller if one was bound, otherwise `None`.
#[derive(Clone, Debug)]
pub struct MaybeUser(pub Option<Identity>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Identity>().cloned()))
    }
}
