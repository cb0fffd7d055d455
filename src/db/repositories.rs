//! Store contract and its PostgreSQL implementation: accounts, listing documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

use super::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::account::{Account, NewAccount};
use crate::models::listing::Collection;

const PG_UNIQUE_VIOLATION: &str = "23505";

/// A listing document as persisted: envelope columns plus an opaque JSON body.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    pub owner_id: String,
    pub enabled: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub owner_id: String,
    pub enabled: bool,
    pub body: serde_json::Value,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct DocumentUpdate {
    pub body: Option<serde_json::Value>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentQuery {
    /// Publicly visible documents.
    Enabled,
    /// Every document owned by the account, enabled or not.
    OwnedBy(String),
}

/// Persistence contract shared by the PostgreSQL and in-memory stores.
///
/// Lists are returned newest first. `account_create` fails with
/// [`AppError::Conflict`] when the email is already taken.
#[async_trait]
pub trait Store: Send + Sync {
    async fn account_create(&self, account: NewAccount) -> AppResult<Account>;
    async fn account_find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    async fn document_insert(
        &self,
        collection: Collection,
        doc: NewDocument,
    ) -> AppResult<StoredDocument>;
    async fn document_get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> AppResult<Option<StoredDocument>>;
    async fn documents_list(
        &self,
        collection: Collection,
        query: DocumentQuery,
    ) -> AppResult<Vec<StoredDocument>>;
    async fn document_update(
        &self,
        collection: Collection,
        id: Uuid,
        update: DocumentUpdate,
    ) -> AppResult<Option<StoredDocument>>;
    async fn document_record_view(&self, collection: Collection, id: Uuid) -> AppResult<()>;
}

pub type StoreHandle = Arc<dyn Store>;

// ---- Rows ----

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: Option<String>,
    email: String,
    password_hash: String,
    user_type: String,
    picture_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let user_type = row
            .user_type
            .parse()
            .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
        Ok(Account {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            user_type,
            picture_url: row.picture_url,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    owner_id: String,
    enabled: bool,
    views: i64,
    body: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id,
            owner_id: row.owner_id,
            enabled: row.enabled,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
            body: row.body.0,
        }
    }
}

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, user_type, picture_url, created_at";
const DOCUMENT_COLUMNS: &str = "id, owner_id, enabled, views, body, created_at, updated_at";

/// PostgreSQL-backed store. Listings share one `documents` table keyed by collection.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn account_create(&self, account: NewAccount) -> AppResult<Account> {
        let sql = format!(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, user_type, picture_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.user_type.as_str())
            .bind(&account.picture_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db)
                    if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
                {
                    AppError::Conflict("Email already registered".to_string())
                }
                other => AppError::Db(other),
            })?;
        row.try_into()
    }

    async fn account_find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Account::try_from).transpose()
    }

    async fn document_insert(
        &self,
        collection: Collection,
        doc: NewDocument,
    ) -> AppResult<StoredDocument> {
        let sql = format!(
            r#"
            INSERT INTO documents (id, collection, owner_id, enabled, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(collection.as_str())
            .bind(&doc.owner_id)
            .bind(doc.enabled)
            .bind(Json(&doc.body))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn document_get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> AppResult<Option<StoredDocument>> {
        let sql =
            format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn documents_list(
        &self,
        collection: Collection,
        query: DocumentQuery,
    ) -> AppResult<Vec<StoredDocument>> {
        let rows = match query {
            DocumentQuery::Enabled => {
                let sql = format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = $1 AND enabled = true ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, DocumentRow>(&sql)
                    .bind(collection.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            DocumentQuery::OwnedBy(owner_id) => {
                let sql = format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = $1 AND owner_id = $2 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, DocumentRow>(&sql)
                    .bind(collection.as_str())
                    .bind(owner_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn document_update(
        &self,
        collection: Collection,
        id: Uuid,
        update: DocumentUpdate,
    ) -> AppResult<Option<StoredDocument>> {
        let sql = format!(
            r#"
            UPDATE documents
            SET body = COALESCE($3, body),
                enabled = COALESCE($4, enabled),
                updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING {DOCUMENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection.as_str())
            .bind(id)
            .bind(update.body.map(Json))
            .bind(update.enabled)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn document_record_view(&self, collection: Collection, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE documents SET views = views + 1 WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
