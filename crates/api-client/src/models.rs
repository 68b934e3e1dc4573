//! Catalog entities served by the admin-panel backend
//!
//! The backend prefixes identifiers with the entity name (`brand_id`,
//! `brand_name`, ...). The models serialize under those names and accept the
//! bare `id`/`name` spelling on input.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three catalog collections the client caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// `brand`
    Brand,
    /// `category`
    Category,
    /// `product`
    Product,
}

impl EntityKind {
    /// All kinds, in display order
    pub const ALL: [Self; 3] = [Self::Brand, Self::Category, Self::Product];

    /// Tag used both as the collection path and the cache slot name
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Product => "product",
        }
    }

    /// Path of a single item of this kind
    #[must_use]
    pub fn item_path(self, id: i64) -> String {
        format!("{}/{id}", self.tag())
    }
}

impl FromStr for EntityKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brand" => Ok(Self::Brand),
            "category" => Ok(Self::Category),
            "product" => Ok(Self::Product),
            other => Err(ApiError::UnknownTag(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Brand entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Backend identifier
    #[serde(rename = "brand_id", alias = "id")]
    pub id: i64,
    /// Display name
    #[serde(rename = "brand_name", alias = "name")]
    pub name: String,
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Backend identifier
    #[serde(rename = "category_id", alias = "id")]
    pub id: i64,
    /// Display name
    #[serde(rename = "category_name", alias = "name")]
    pub name: String,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier
    #[serde(rename = "product_id", alias = "id")]
    pub id: i64,
    /// Display name
    #[serde(rename = "product_name", alias = "name")]
    pub name: String,
    /// References [`Brand::id`]; not checked
    pub brand_id: i64,
    /// References [`Category::id`]; not checked
    pub category_id: i64,
    /// Target audience tag as sent by the backend (e.g. "male", "female", "unisex")
    pub sex: String,
    /// Kids line
    pub is_kids: bool,
    /// Units sold so far
    pub sales_quantity: u64,
    /// Server-side paths of uploaded images
    #[serde(default)]
    pub file_paths: Vec<String>,
}

/// Create brand request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBrand {
    /// Display name
    pub brand_name: String,
}

/// Update brand request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
}

/// Create category request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display name
    pub category_name: String,
}

/// Update category request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Create product request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name
    pub product_name: String,
    /// Owning brand
    pub brand_id: i64,
    /// Owning category
    pub category_id: i64,
    /// Target audience tag
    pub sex: String,
    /// Kids line
    pub is_kids: bool,
    /// Already uploaded image paths
    #[serde(default)]
    pub file_paths: Vec<String>,
}

/// Update product request; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_kids: Option<bool>,
    /// Replacement value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_quantity: Option<u64>,
}
