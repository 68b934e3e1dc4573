//! Brand endpoints

use crate::client::AdminClient;
use crate::error::ApiResult;
use crate::models::{Brand, BrandPatch, EntityKind, NewBrand};
use crate::response::{Envelope, RequestBody};
use crate::store::Refresh;
use serde_json::Value;

/// Brands API interface
#[derive(Clone)]
pub struct BrandsApi {
    client: AdminClient,
}

impl BrandsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// GET /brand
    pub async fn list(&self) -> ApiResult<Vec<Brand>> {
        self.client.get(EntityKind::Brand.tag()).await
    }

    /// Fetch the brand list and store it unless a newer fetch already landed.
    ///
    /// Returns the store's brand snapshot after the attempt, flagged with
    /// whether this fetch was the one stored.
    pub async fn refresh(&self) -> ApiResult<Refresh<Brand>> {
        let store = self.client.store();
        let ticket = store.begin_fetch(EntityKind::Brand);
        let brands = self.list().await?;
        let accepted = store.apply_brands(ticket, brands);
        Ok(Refresh {
            items: store.brand_list(),
            accepted,
        })
    }

    /// POST /brand
    pub async fn create(&self, brand: &NewBrand) -> ApiResult<Value> {
        self.client
            .post(EntityKind::Brand.tag(), RequestBody::json(brand)?)
            .await
    }

    /// PATCH /brand/{id}
    pub async fn update(&self, id: i64, patch: &BrandPatch) -> ApiResult<Value> {
        self.client
            .update(&EntityKind::Brand.item_path(id), patch)
            .await
    }

    /// DELETE /brand/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<Envelope> {
        self.client.delete(&EntityKind::Brand.item_path(id)).await
    }
}
