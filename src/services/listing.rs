//! Listing use cases shared by hackathons and jobs: browse, create, edit, enable/disable.

use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::db::{DocumentQuery, DocumentUpdate, NewDocument, StoreHandle, StoredDocument};
use crate::error::{AppError, AppResult};
use crate::models::account::UserType;
use crate::models::listing::{Listing, ListingDocument, ListingInput};

/// Ownership-checked CRUD over any [`Listing`] collection. Listings are never
/// removed; "delete" clears the `enabled` flag.
#[derive(Clone)]
pub struct ListingService {
    store: StoreHandle,
}

impl ListingService {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    pub async fn create<T: Listing>(
        &self,
        caller: &Identity,
        input: ListingInput<T>,
    ) -> AppResult<ListingDocument<T>> {
        if !caller.has_type(UserType::Industry) {
            return Err(AppError::Forbidden(format!(
                "Only INDUSTRY users can create a {}",
                T::LABEL.to_lowercase()
            )));
        }
        input.fields.validate()?;

        let doc = self
            .store
            .document_insert(
                T::COLLECTION,
                NewDocument {
                    owner_id: caller.user_id.clone(),
                    enabled: input.enabled.unwrap_or(true),
                    body: serde_json::to_value(&input.fields)?,
                },
            )
            .await?;
        info!(collection = T::COLLECTION.as_str(), id = %doc.id, owner = %caller.user_id, "listing created");
        decode(doc)
    }

    /// Enabled listings, newest first.
    pub async fn list_public<T: Listing>(&self) -> AppResult<Vec<ListingDocument<T>>> {
        let docs = self
            .store
            .documents_list(T::COLLECTION, DocumentQuery::Enabled)
            .await?;
        docs.into_iter().map(decode).collect()
    }

    /// Every listing owned by the caller, including disabled ones.
    pub async fn list_owned<T: Listing>(
        &self,
        caller: &Identity,
    ) -> AppResult<Vec<ListingDocument<T>>> {
        let docs = self
            .store
            .documents_list(T::COLLECTION, DocumentQuery::OwnedBy(caller.user_id.clone()))
            .await?;
        docs.into_iter().map(decode).collect()
    }

    /// Fetch one listing. Disabled listings are only visible to their owner;
    /// a fetch by anyone else counts as a view.
    pub async fn get<T: Listing>(
        &self,
        id: Uuid,
        viewer: Option<&Identity>,
    ) -> AppResult<ListingDocument<T>> {
        let mut doc = self
            .store
            .document_get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found::<T>())?;

        let is_owner = viewer.is_some_and(|v| v.user_id == doc.owner_id);
        if !doc.enabled && !is_owner {
            return Err(not_found::<T>());
        }
        if !is_owner {
            self.store.document_record_view(T::COLLECTION, id).await?;
            doc.views += 1;
        }
        decode(doc)
    }

    pub async fn update<T: Listing>(
        &self,
        caller: &Identity,
        id: Uuid,
        input: ListingInput<T>,
    ) -> AppResult<ListingDocument<T>> {
        self.owned::<T>(caller, id).await?;
        input.fields.validate()?;
        let update = DocumentUpdate {
            body: Some(serde_json::to_value(&input.fields)?),
            enabled: input.enabled,
        };
        self.apply::<T>(id, update).await
    }

    /// Flip the `enabled` flag.
    pub async fn toggle<T: Listing>(
        &self,
        caller: &Identity,
        id: Uuid,
    ) -> AppResult<ListingDocument<T>> {
        let current = self.owned::<T>(caller, id).await?;
        let update = DocumentUpdate {
            body: None,
            enabled: Some(!current.enabled),
        };
        self.apply::<T>(id, update).await
    }

    /// Soft delete: the listing stays stored but disappears from public lists.
    pub async fn disable<T: Listing>(&self, caller: &Identity, id: Uuid) -> AppResult<()> {
        self.owned::<T>(caller, id).await?;
        let update = DocumentUpdate {
            body: None,
            enabled: Some(false),
        };
        self.apply::<T>(id, update).await?;
        Ok(())
    }

    async fn owned<T: Listing>(&self, caller: &Identity, id: Uuid) -> AppResult<StoredDocument> {
        let doc = self
            .store
            .document_get(T::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found::<T>())?;
        if doc.owner_id != caller.user_id {
            debug!(collection = T::COLLECTION.as_str(), %id, caller = %caller.user_id, "not the owner");
            return Err(AppError::Forbidden(format!(
                "You can only modify your own {}",
                T::COLLECTION.as_str()
            )));
        }
        Ok(doc)
    }

    async fn apply<T: Listing>(
        &self,
        id: Uuid,
        update: DocumentUpdate,
    ) -> AppResult<ListingDocument<T>> {
        let doc = self
            .store
            .document_update(T::COLLECTION, id, update)
            .await?
            .ok_or_else(|| not_found::<T>())?;
        info!(collection = T::COLLECTION.as_str(), %id, enabled = doc.enabled, "listing updated");
        decode(doc)
    }
}

fn not_found<T: Listing>() -> AppError {
    AppError::NotFound(format!("{} not found", T::LABEL))
}

/// A stored body that no longer matches `T` is a server fault, not a bad request.
fn decode<T: Listing>(doc: StoredDocument) -> AppResult<ListingDocument<T>> {
    let fields = serde_json::from_value(doc.body).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "corrupt {} document {}: {}",
            T::COLLECTION.as_str(),
            doc.id,
            e
        ))
    })?;
    Ok(ListingDocument {
        id: doc.id,
        owner_id: doc.owner_id,
        enabled: doc.enabled,
        views: doc.views,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
        fields,
    })
}
