//! Account use cases: industry registration, industry login, current identity.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::auth::{AuthAppService, Identity, TokenCodec};
use crate::db::StoreHandle;
use crate::error::{AppError, AppResult};
use crate::models::account::{Account, NewAccount, UserType};

/// Response of `GET /auth/me`. Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIdentity {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl CurrentIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct AccountService {
    store: StoreHandle,
    tokens: TokenCodec,
}

impl AccountService {
    pub fn new(store: StoreHandle, tokens: TokenCodec) -> Self {
        Self { store, tokens }
    }

    #[instrument(skip(self, password))]
    pub async fn register_industry(
        &self,
        company_name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<Account> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(AppError::Validation("Company name is required".to_string()));
        }
        let email = AuthAppService::normalize_email(email);
        AuthAppService::validate_email(&email)?;

        if self.store.account_find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = AuthAppService::hash_password(password)?;
        let account = self
            .store
            .account_create(NewAccount {
                name: Some(company_name.to_string()),
                email,
                password_hash,
                user_type: UserType::Industry,
                picture_url: None,
            })
            .await?;
        info!(account_id = %account.id, "industry account registered");
        Ok(account)
    }

    /// Verify credentials of an industry account and mint a token for it.
    #[instrument(skip(self, password))]
    pub async fn login_industry(&self, email: &str, password: &str) -> AppResult<(String, Account)> {
        let email = AuthAppService::normalize_email(email);
        let account = self
            .store
            .account_find_by_email(&email)
            .await?
            .ok_or_else(|| {
                debug!("login rejected: unknown email");
                AppError::Unauthorized("Invalid email".to_string())
            })?;

        if account.user_type != UserType::Industry {
            debug!(user_type = %account.user_type, "login rejected: wrong account type");
            return Err(AppError::Unauthorized(
                "Account is not an industry account".to_string(),
            ));
        }

        if !AuthAppService::verify_password(password, &account.password_hash) {
            debug!("login rejected: password mismatch");
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        let token = self
            .tokens
            .issue(&account.email, &account.id.to_string(), account.user_type)?;
        info!(account_id = %account.id, "industry login");
        Ok((token, account))
    }

    /// Resolve the caller for `/auth/me`. Never fails: any store error
    /// collapses to an anonymous answer.
    pub async fn current_identity(&self, identity: Option<&Identity>) -> CurrentIdentity {
        let Some(identity) = identity else {
            return CurrentIdentity::anonymous();
        };

        match self.store.account_find_by_email(&identity.email).await {
            Ok(Some(account)) => CurrentIdentity {
                authenticated: true,
                name: Some(account.name.unwrap_or_else(|| account.email.clone())),
                email: Some(account.email),
                picture: Some(account.picture_url.unwrap_or_default()),
                user_type: Some(account.user_type.to_string()),
            },
            Ok(None) => CurrentIdentity {
                authenticated: true,
                email: Some(identity.email.clone()),
                user_type: Some(non_empty_or_applicant(&identity.user_type)),
                ..Default::default()
            },
            Err(e) => {
                warn!(error = %e, "could not resolve current identity");
                CurrentIdentity::anonymous()
            }
        }
    }
}

fn non_empty_or_applicant(user_type: &str) -> String {
    if user_type.is_empty() {
        UserType::Applicant.to_string()
    } else {
        user_type.to_string()
    }
}
