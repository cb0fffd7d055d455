//! Listing HTTP handlers, generic over the listing kind.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::{AuthUser, MaybeUser};
use crate::models::listing::{Listing, ListingDocument, ListingInput};

/// Routes for one listing kind, to be nested under its collection path.
pub fn routes<T: Listing>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route("/my", get(list_mine::<T>))
        .route(
            "/:id",
            get(get_one::<T>).put(update::<T>).delete(remove::<T>),
        )
        .route("/:id/toggle-status", patch(toggle_status::<T>))
}

/// GET /{kind}
pub async fn list<T: Listing>(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListingDocument<T>>>, AppError> {
    Ok(Json(state.listings().list_public::<T>().await?))
}

/// GET /{kind}/my
pub async fn list_mine<T: Listing>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<ListingDocument<T>>>, AppError> {
    Ok(Json(state.listings().list_owned::<T>(&caller).await?))
}

/// GET /{kind}/:id
pub async fn get_one<T: Listing>(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingDocument<T>>, AppError> {
    Ok(Json(state.listings().get::<T>(id, viewer.as_ref()).await?))
}

/// POST /{kind}
pub async fn create<T: Listing>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(input): Json<ListingInput<T>>,
) -> Result<(StatusCode, Json<ListingDocument<T>>), AppError> {
    let doc = state.listings().create(&caller, input).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// PUT /{kind}/:id
pub async fn update<T: Listing>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ListingInput<T>>,
) -> Result<Json<ListingDocument<T>>, AppError> {
    Ok(Json(state.listings().update(&caller, id, input).await?))
}

/// PATCH /{kind}/:id/toggle-status
pub async fn toggle_status<T: Listing>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ListingDocument<T>>, AppError> {
    Ok(Json(state.listings().toggle::<T>(&caller, id).await?))
}

/// DELETE /{kind}/:id: soft delete.
pub async fn remove<T: Listing>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.listings().disable::<T>(&caller, id).await?;
    Ok(Json(json!({ "ok": true })))
}
