//! Category endpoints

use crate::client::AdminClient;
use crate::error::ApiResult;
use crate::models::{Category, CategoryPatch, EntityKind, NewCategory};
use crate::response::{Envelope, RequestBody};
use crate::store::Refresh;
use serde_json::Value;

/// Categories API interface
#[derive(Clone)]
pub struct CategoriesApi {
    client: AdminClient,
}

impl CategoriesApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// GET /category
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        self.client.get(EntityKind::Category.tag()).await
    }

    /// Fetch and store the category list; returns the resulting snapshot
    pub async fn refresh(&self) -> ApiResult<Refresh<Category>> {
        let store = self.client.store();
        let ticket = store.begin_fetch(EntityKind::Category);
        let categories = self.list().await?;
        let accepted = store.apply_categories(ticket, categories);
        Ok(Refresh {
            items: store.category_list(),
            accepted,
        })
    }

    /// POST /category
    pub async fn create(&self, category: &NewCategory) -> ApiResult<Value> {
        self.client
            .post(EntityKind::Category.tag(), RequestBody::json(category)?)
            .await
    }

    /// PATCH /category/{id}
    pub async fn update(&self, id: i64, patch: &CategoryPatch) -> ApiResult<Value> {
        self.client
            .update(&EntityKind::Category.item_path(id), patch)
            .await
    }

    /// DELETE /category/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<Envelope> {
        self.client.delete(&EntityKind::Category.item_path(id)).await
    }
}
