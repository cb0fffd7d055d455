//! In-memory store used when no `DATABASE_URL` is configured, and by tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repositories::{DocumentQuery, DocumentUpdate, NewDocument, Store, StoredDocument};
use crate::error::{AppError, AppResult};
use crate::models::account::{Account, NewAccount};
use crate::models::listing::Collection;

#[derive(Default)]
struct Inner {
    /// email -> account
    accounts: HashMap<String, Account>,
    /// Insertion order doubles as creation order.
    documents: Vec<(Collection, StoredDocument)>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn account_create(&self, account: NewAccount) -> AppResult<Account> {
        let mut inner = self.inner.write().await;
        if inner.accounts.contains_key(&account.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        let stored = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            user_type: account.user_type,
            picture_url: account.picture_url,
            created_at: Utc::now(),
        };
        inner.accounts.insert(stored.email.clone(), stored.clone());
        Ok(stored)
    }

    async fn account_find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.inner.read().await.accounts.get(email).cloned())
    }

    async fn document_insert(
        &self,
        collection: Collection,
        doc: NewDocument,
    ) -> AppResult<StoredDocument> {
        let now = Utc::now();
        let stored = StoredDocument {
            id: Uuid::new_v4(),
            owner_id: doc.owner_id,
            enabled: doc.enabled,
            views: 0,
            created_at: now,
            updated_at: now,
            body: doc.body,
        };
        self.inner
            .write()
            .await
            .documents
            .push((collection, stored.clone()));
        Ok(stored)
    }

    async fn document_get(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> AppResult<Option<StoredDocument>> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .iter()
            .find(|(c, d)| *c == collection && d.id == id)
            .map(|(_, d)| d.clone()))
    }

    async fn documents_list(
        &self,
        collection: Collection,
        query: DocumentQuery,
    ) -> AppResult<Vec<StoredDocument>> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .iter()
            .rev()
            .filter(|(c, _)| *c == collection)
            .map(|(_, d)| d)
            .filter(|d| match &query {
                DocumentQuery::Enabled => d.enabled,
                DocumentQuery::OwnedBy(owner) => &d.owner_id == owner,
            })
            .cloned()
            .collect())
    }

    async fn document_update(
        &self,
        collection: Collection,
        id: Uuid,
        update: DocumentUpdate,
    ) -> AppResult<Option<StoredDocument>> {
        let mut inner = self.inner.write().await;
        let Some((_, doc)) = inner
            .documents
            .iter_mut()
            .find(|(c, d)| *c == collection && d.id == id)
        else {
            return Ok(None);
        };
        if let Some(body) = update.body {
            doc.body = body;
        }
        if let Some(enabled) = update.enabled {
            doc.enabled = enabled;
        }
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn document_record_view(&self, collection: Collection, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some((_, doc)) = inner
            .documents
            .iter_mut()
            .find(|(c, d)| *c == collection && d.id == id)
        {
            doc.views += 1;
        }
        Ok(())
    }
}
