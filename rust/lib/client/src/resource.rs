use std::marker::PhantomData;

use serde_json::Value;
use stockdesk_core::Resource;

use crate::api::ApiClient;
use crate::envelope::{ListBody, Reply};
use crate::error::ApiError;

/// Type-safe CRUD client for one backend collection.
///
/// Paths come from `T::COLLECTION`: `/{collection}` and
/// `/{collection}/{id}`.
pub struct ResourceClient<T: Resource> {
    api: ApiClient,
    _phantom: PhantomData<T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self { api, _phantom: PhantomData }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", T::COLLECTION, id)
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        let reply: Reply<ListBody<T>> = self.api.get(T::COLLECTION).await?;
        Ok(reply.data.into_rows())
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        Ok(self.api.get(&Self::item_path(id)).await?.data)
    }

    /// Create a record. The server may echo it back or send only a message.
    pub async fn create(&self, item: &T) -> Result<Reply<Option<T>>, ApiError> {
        self.api.post(T::COLLECTION, item).await
    }

    pub async fn update(&self, id: &str, item: &T) -> Result<Reply<Option<T>>, ApiError> {
        self.api.put(&Self::item_path(id), item).await
    }

    /// Save: create when the record has no id yet, update otherwise.
    pub async fn save(&self, item: &T) -> Result<Reply<Option<T>>, ApiError> {
        if item.is_new() {
            self.create(item).await
        } else {
            self.update(item.id(), item).await
        }
    }

    pub async fn delete(&self, id: &str) -> Result<Reply<Value>, ApiError> {
        self.api.delete(&Self::item_path(id)).await
    }
}
