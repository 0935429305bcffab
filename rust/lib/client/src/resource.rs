//! Typed CRUD client for a single collection.

use std::marker::PhantomData;

use malha_core::{ApiError, Envelope};
use malha_model::Resource;

use crate::ApiClient;

/// Type-safe CRUD client for one [`Resource`].
///
/// Paths come from `R::PATH`: list and create on the collection, get,
/// update and delete on `{PATH}/{id}` (see [`Resource::update_path`]).
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _phantom: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _phantom: PhantomData,
        }
    }

    /// List all records.
    pub async fn list(&self) -> Envelope<Vec<R>> {
        self.api.get(R::PATH).await
    }

    /// Get a record by ID.
    pub async fn get(&self, id: &str) -> Envelope<R> {
        self.api.get(&R::item_path(id)).await
    }

    /// Create a new record.
    pub async fn create(&self, item: &R::Create) -> Envelope<R> {
        self.api.post(R::PATH, item).await
    }

    /// Update an existing record by ID.
    pub async fn update(&self, id: &str, item: &R::Update) -> Envelope<R> {
        self.api.put(&R::update_path(id), item).await
    }

    /// Delete a record by ID. Collections without `DELETE` fail locally.
    pub async fn delete(&self, id: &str) -> Envelope<()> {
        if !R::DELETABLE {
            let err = ApiError::Unsupported(format!("{} cannot be deleted", R::PLURAL));
            return Envelope::fail(err.to_string());
        }
        self.api.delete(&R::item_path(id)).await
    }
}
