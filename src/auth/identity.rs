//! Request-scoped identity bound by the authentication gate.

use super::jwt::Claims;
use crate::models::account::UserType;

/// Role granted to every token-authenticated principal.
pub const ROLE_USER: &str = "USER";

pub const ATTR_USER_EMAIL: &str = "userEmail";
pub const ATTR_USER_ID: &str = "userId";
pub const ATTR_USER_TYPE: &str = "userType";

/// Verified caller of the current request. Lives in the request extensions
/// for the lifetime of that request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Principal name; always the email.
    pub subject: String,
    pub role: &'static str,
    pub email: String,
    pub user_id: String,
    pub user_type: String,
}

impl Identity {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            role: ROLE_USER,
            email: claims.sub,
            user_id: claims.user_id,
            user_type: claims.user_type,
        }
    }

    /// Look up one of the named request attributes (`userEmail`, `userId`, `userType`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            ATTR_USER_EMAIL => Some(&self.email),
            ATTR_USER_ID => Some(&self.user_id),
            ATTR_USER_TYPE => Some(&self.user_type),
            _ => None,
        }
    }

    pub fn has_type(&self, user_type: UserType) -> bool {
        self.user_type == user_type.as_str()
    }
}
