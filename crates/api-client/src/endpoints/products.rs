//! Products API endpoints
//!
//! Products are the only collection with file attachments. Plain creates go
//! out as JSON; [`ProductsApi::create_multipart`] sends images and fields as
//! `multipart/form-data`.

use crate::client::AdminClient;
use crate::error::ApiResult;
use crate::models::{EntityKind, NewProduct, Product, ProductPatch};
use crate::response::{Envelope, RequestBody};
use crate::store::Refresh;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

/// Form field name the backend reads uploaded images from
pub const FILE_FIELD: &str = "files";

/// Products API interface
#[derive(Clone)]
pub struct ProductsApi {
    client: AdminClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List products
    ///
    /// GET /product
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.client.get(EntityKind::Product.tag()).await
    }

    /// Fetch and store the product list; returns the resulting snapshot
    pub async fn refresh(&self) -> ApiResult<Refresh<Product>> {
        let store = self.client.store();
        let ticket = store.begin_fetch(EntityKind::Product);
        let products = self.list().await?;
        let accepted = store.apply_products(ticket, products);
        Ok(Refresh {
            items: store.product_list(),
            accepted,
        })
    }

    /// Get a single product by ID
    ///
    /// GET /product/{id}
    pub async fn get(&self, id: i64) -> ApiResult<Product> {
        self.client.get(&EntityKind::Product.item_path(id)).await
    }

    /// Create a new product from JSON
    ///
    /// POST /product
    pub async fn create(&self, product: &NewProduct) -> ApiResult<Value> {
        self.client
            .post(EntityKind::Product.tag(), RequestBody::json(product)?)
            .await
    }

    /// Create a new product with attached files
    ///
    /// POST /product as `multipart/form-data`
    pub async fn create_multipart(&self, form: Form) -> ApiResult<Value> {
        self.client.post(EntityKind::Product.tag(), form).await
    }

    /// Update an existing product
    ///
    /// PATCH /product/{id}
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> ApiResult<Value> {
        self.client
            .update(&EntityKind::Product.item_path(id), patch)
            .await
    }

    /// Delete a product
    ///
    /// DELETE /product/{id}
    pub async fn delete(&self, id: i64) -> ApiResult<Envelope> {
        self.client.delete(&EntityKind::Product.item_path(id)).await
    }
}

/// Build the multipart form for a new product and its image files
#[must_use]
pub fn product_form(product: &NewProduct, files: Vec<(String, Vec<u8>)>) -> Form {
    let mut form = Form::new()
        .text("product_name", product.product_name.clone())
        .text("brand_id", product.brand_id.to_string())
        .text("category_id", product.category_id.to_string())
        .text("sex", product.sex.clone())
        .text("is_kids", product.is_kids.to_string());

    for (file_name, bytes) in files {
        form = form.part(FILE_FIELD, Part::bytes(bytes).file_name(file_name));
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_form_boundary() {
        let product = NewProduct {
            product_name: "Air Max".into(),
            brand_id: 1,
            category_id: 2,
            sex: "unisex".into(),
            is_kids: false,
            file_paths: Vec::new(),
        };

        let form = product_form(&product, vec![("a.png".into(), vec![0x89, 0x50])]);
        assert!(!form.boundary().is_empty());
    }
}
