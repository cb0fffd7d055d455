//! Token codec: JWT issue and validation.

use crate::error::{AppError, AppResult};
use crate::models::account::UserType;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String, // email
    pub user_id: String,
    pub user_type: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}

/// Signs and verifies bearer tokens with a fixed HMAC secret and lifetime.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self::with_ttl(secret, Duration::hours(ttl_hours))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, email: &str, user_id: &str, user_type: UserType) -> AppResult<String> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Jwt("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: email.to_string(),
            user_id: user_id.to_string(),
            user_type: user_type.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| AppError::Jwt(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AppError::Jwt(e.to_string()))?;
        if data.claims.sub.is_empty() {
            return Err(AppError::Jwt("token has no subject".to_string()));
        }
        Ok(data.claims)
    }
}
