//! Account records and user types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of account. Stored and carried in tokens as the upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Applicant,
    Industry,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Applicant => "APPLICANT",
            UserType::Industry => "INDUSTRY",
            UserType::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPLICANT" => Ok(UserType::Applicant),
            "INDUSTRY" => Ok(UserType::Industry),
            "ADMIN" => Ok(UserType::Admin),
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// Stored account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create an account; id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub picture_url: Option<String>,
}
