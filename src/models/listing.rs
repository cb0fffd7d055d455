//! Listing documents: the shared envelope around hackathon and job fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Named document collection in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Hackathons,
    Jobs,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Hackathons => "hackathons",
            Collection::Jobs => "jobs",
        }
    }
}

/// Where an event or job takes place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Online,
    Offline,
    Hybrid,
}

/// Kind-specific fields of a listing. Implementors are stored as the JSON
/// body of a document in [`Listing::COLLECTION`].
pub trait Listing: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Human-readable kind, used in error messages.
    const LABEL: &'static str;

    fn validate(&self) -> AppResult<()>;
}

/// A stored listing as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDocument<T> {
    pub id: Uuid,
    pub owner_id: String,
    pub enabled: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: T,
}

/// Request body for create and update: the kind's fields plus an optional
/// `enabled` flag (drafts are saved with `enabled: false`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListingInput<T> {
    #[serde(flatten)]
    pub fields: T,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Shared check: a non-blank title.
pub(crate) fn require_title(label: &str, title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(format!("{} title is required", label)));
    }
    Ok(())
}

/// Parses `YYYY-MM-DD` (or the date part of an RFC 3339 timestamp).
/// Free-form values such as "TBA" yield `None`.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
