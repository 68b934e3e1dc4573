//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface over one backend collection.
//!
//! ## Mapping to the admin-panel backend
//!
//! | Module | Collection path | Item path |
//! |--------|-----------------|-----------|
//! | `brands` | `brand` | `brand/{id}` |
//! | `categories` | `category` | `category/{id}` |
//! | `products` | `product` | `product/{id}` |

pub mod brands;
pub mod categories;
pub mod products;

pub use brands::BrandsApi;
pub use categories::CategoriesApi;
pub use products::ProductsApi;
