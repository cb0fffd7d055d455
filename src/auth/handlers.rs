//! Account HTTP handlers: industry register/login, current user.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, PlainError};
use crate::handlers::http::AppState;
use crate::middleware::auth::MaybeUser;
use crate::services::CurrentIdentity;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: String,
    pub picture: String,
}

/// POST /auth/industry/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<&'static str, PlainError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .accounts()
        .register_industry(&body.company_name, &body.email, &body.password)
        .await?;

    Ok("Industry registered successfully")
}

/// POST /auth/industry/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, PlainError> {
    let (token, account) = state
        .accounts()
        .login_industry(&body.email, &body.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: UserInfo {
            id: account.id.to_string(),
            name: account.name.unwrap_or_else(|| account.email.clone()),
            email: account.email,
            user_type: account.user_type.to_string(),
            picture: account.picture_url.unwrap_or_default(),
        },
        message: "Login successful",
    }))
}

/// GET /auth/me
pub async fn current_user(
    State(state): State<AppState>,
    MaybeUser(identity): MaybeUser,
) -> Json<CurrentIdentity> {
    Json(state.accounts().current_identity(identity.as_ref()).await)
}
