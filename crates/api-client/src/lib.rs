//! API client and catalog store for the admin-panel backend
//!
//! This crate is the single point of HTTP access to the admin-panel server
//! and keeps the latest brand, category and product lists in memory.
//!
//! # Features
//!
//! - **Fixed origin**: every path is resolved against one configured base URL
//! - **Normalized failures**: `{"message": ...}` bodies become one display string
//! - **Interceptors**: pluggable hooks around every request
//! - **Catalog store**: snapshot cache with change notification and stale-write rejection
//! - **Request correlation**: every request carries an `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use adminpanel_api_client::{AdminClient, EntityKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdminClient::new()?;
//!
//!     // Raw verb plus explicit save
//!     let brands: serde_json::Value = client.get("brand").await?;
//!     client.save_result(EntityKind::Brand, brands);
//!
//!     // Typed, race-safe refresh
//!     let products = client.products().refresh().await?;
//!     println!("{} products cached", products.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod models;
pub mod normalize;
pub mod response;
pub mod store;

pub use client::AdminClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ErrorPolicy};
pub use models::{Brand, Category, EntityKind, Product};
pub use normalize::{normalize_message, FALLBACK_MESSAGE};
pub use response::{Envelope, RequestBody};
pub use store::{CatalogSnapshot, CatalogStore, FetchTicket, Refresh};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::AdminClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{BrandsApi, CategoriesApi, ProductsApi};
    pub use crate::error::{ApiError, ApiResult, ErrorPolicy};
    pub use crate::middleware::{Failure, Interceptor, RequestContext};
    pub use crate::models::{Brand, Category, EntityKind, Product};
    pub use crate::store::CatalogStore;
}
