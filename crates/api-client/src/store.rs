//! In-memory catalog store
//!
//! Holds the latest brand, category and product snapshots fetched from the
//! backend. Every write replaces a whole slot; nothing is merged.
//!
//! Each slot keeps the payload exactly as it was saved ([`CatalogStore::raw`])
//! next to a typed view of it. Records that do not fit the typed model stay in
//! the raw payload and are left out of the typed list.
//!
//! Writes come in two flavours:
//!
//! - the `set_*_list` setters, which always win (last write wins)
//! - the `apply_*` methods, which take a [`FetchTicket`] obtained when the
//!   request was issued and refuse to overwrite data from a newer request
//!
//! Subscribers get a revision bump through a `tokio::sync::watch` channel on
//! every accepted write.
//!
//! # Example
//!
//! ```rust
//! use adminpanel_api_client::models::{Brand, EntityKind};
//! use adminpanel_api_client::store::CatalogStore;
//!
//! let store = CatalogStore::new();
//! let older = store.begin_fetch(EntityKind::Brand);
//! let newer = store.begin_fetch(EntityKind::Brand);
//!
//! assert!(store.apply_brands(newer, vec![Brand { id: 2, name: "Puma".into() }]));
//! // the older response arrives late and is dropped
//! assert!(!store.apply_brands(older, vec![Brand { id: 1, name: "Nike".into() }]));
//! assert_eq!(store.brand_list()[0].name, "Puma");
//! ```

use crate::models::{Brand, Category, EntityKind, Product};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::debug;

/// Process-wide store shared by clients built without an explicit store
static GLOBAL_STORE: Lazy<Arc<CatalogStore>> = Lazy::new(|| Arc::new(CatalogStore::new()));

/// Stamp taken when a fetch is issued, used to reject stale writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    kind: EntityKind,
    seq: u64,
}

impl FetchTicket {
    /// Collection this ticket was issued for
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Issue order within the store
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

struct Slot<T> {
    raw: Arc<Value>,
    items: Arc<[T]>,
    stamp: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            raw: Arc::new(Value::Array(Vec::new())),
            items: Arc::from(Vec::new()),
            stamp: 0,
        }
    }
}

/// Result of a ticketed fetch: the slot's list after the attempt
///
/// `accepted` is `false` when a newer write had already landed and this
/// fetch's data was dropped; `items` then holds that newer data.
#[derive(Debug, Clone)]
pub struct Refresh<T> {
    /// Current typed list for the collection
    pub items: Arc<[T]>,
    /// Whether this fetch's result was stored
    pub accepted: bool,
}

impl<T> std::ops::Deref for Refresh<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

/// Point-in-time view of all three collections
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Store revision the lists were read at
    pub revision: u64,
    /// Typed brand list
    pub brands: Arc<[Brand]>,
    /// Typed category list
    pub categories: Arc<[Category]>,
    /// Typed product list
    pub products: Arc<[Product]>,
}

/// Latest brand/category/product lists
pub struct CatalogStore {
    brands: RwLock<Slot<Brand>>,
    categories: RwLock<Slot<Category>>,
    products: RwLock<Slot<Product>>,
    sequence: AtomicU64,
    revision: watch::Sender<u64>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("revision", &self.revision())
            .field("brands", &self.brand_list().len())
            .field("categories", &self.category_list().len())
            .field("products", &self.product_list().len())
            .finish()
    }
}

impl CatalogStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            brands: RwLock::default(),
            categories: RwLock::default(),
            products: RwLock::default(),
            sequence: AtomicU64::new(0),
            revision,
        }
    }

    /// The store shared by the whole process
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_STORE)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current brand snapshot
    #[must_use]
    pub fn brand_list(&self) -> Arc<[Brand]> {
        read(&self.brands)
    }

    /// Current category snapshot
    #[must_use]
    pub fn category_list(&self) -> Arc<[Category]> {
        read(&self.categories)
    }

    /// Current product snapshot
    #[must_use]
    pub fn product_list(&self) -> Arc<[Product]> {
        read(&self.products)
    }

    /// Payload last stored for `kind`, exactly as it was saved
    #[must_use]
    pub fn raw(&self, kind: EntityKind) -> Arc<Value> {
        match kind {
            EntityKind::Brand => read_raw(&self.brands),
            EntityKind::Category => read_raw(&self.categories),
            EntityKind::Product => read_raw(&self.products),
        }
    }

    /// All three collections plus the revision they were read at
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            revision: self.revision(),
            brands: self.brand_list(),
            categories: self.category_list(),
            products: self.product_list(),
        }
    }

    /// Number of accepted writes so far
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receiver that wakes after every accepted write
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // -------------------------------------------------------------------------
    // Unconditional writes
    // -------------------------------------------------------------------------

    /// Replace the brand list
    pub fn set_brand_list(&self, brands: Vec<Brand>) {
        let stamp = self.next_seq();
        let raw = encode(&brands);
        self.write(&self.brands, EntityKind::Brand, raw, brands, stamp);
    }

    /// Replace the category list
    pub fn set_category_list(&self, categories: Vec<Category>) {
        let stamp = self.next_seq();
        let raw = encode(&categories);
        self.write(&self.categories, EntityKind::Category, raw, categories, stamp);
    }

    /// Replace the product list
    pub fn set_product_list(&self, products: Vec<Product>) {
        let stamp = self.next_seq();
        let raw = encode(&products);
        self.write(&self.products, EntityKind::Product, raw, products, stamp);
    }

    /// Store `payload` unchanged as the list for `kind`, unconditionally
    pub fn set_from_value(&self, kind: EntityKind, payload: Value) {
        let stamp = self.next_seq();
        self.write_value(kind, payload, stamp);
    }

    /// Empty all three slots
    pub fn clear(&self) {
        self.set_brand_list(Vec::new());
        self.set_category_list(Vec::new());
        self.set_product_list(Vec::new());
    }

    // -------------------------------------------------------------------------
    // Ticketed writes
    // -------------------------------------------------------------------------

    /// Take a ticket before issuing a fetch for `kind`
    #[must_use]
    pub fn begin_fetch(&self, kind: EntityKind) -> FetchTicket {
        FetchTicket {
            kind,
            seq: self.next_seq(),
        }
    }

    /// Store brands unless a newer write already landed; returns whether it was accepted
    pub fn apply_brands(&self, ticket: FetchTicket, brands: Vec<Brand>) -> bool {
        debug_assert_eq!(ticket.kind, EntityKind::Brand, "ticket issued for another collection");
        let raw = encode(&brands);
        self.write(&self.brands, EntityKind::Brand, raw, brands, ticket.seq)
    }

    /// Store categories unless a newer write already landed
    pub fn apply_categories(&self, ticket: FetchTicket, categories: Vec<Category>) -> bool {
        debug_assert_eq!(ticket.kind, EntityKind::Category, "ticket issued for another collection");
        let raw = encode(&categories);
        self.write(&self.categories, EntityKind::Category, raw, categories, ticket.seq)
    }

    /// Store products unless a newer write already landed
    pub fn apply_products(&self, ticket: FetchTicket, products: Vec<Product>) -> bool {
        debug_assert_eq!(ticket.kind, EntityKind::Product, "ticket issued for another collection");
        let raw = encode(&products);
        self.write(&self.products, EntityKind::Product, raw, products, ticket.seq)
    }

    /// Store `payload` unchanged for the ticket's kind unless a newer write already landed
    pub fn apply_value(&self, ticket: FetchTicket, payload: Value) -> bool {
        self.write_value(ticket.kind, payload, ticket.seq)
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn write_value(&self, kind: EntityKind, payload: Value, stamp: u64) -> bool {
        match kind {
            EntityKind::Brand => {
                let items = decode(kind, &payload);
                self.write(&self.brands, kind, payload, items, stamp)
            }
            EntityKind::Category => {
                let items = decode(kind, &payload);
                self.write(&self.categories, kind, payload, items, stamp)
            }
            EntityKind::Product => {
                let items = decode(kind, &payload);
                self.write(&self.products, kind, payload, items, stamp)
            }
        }
    }

    fn write<T>(
        &self,
        slot: &RwLock<Slot<T>>,
        kind: EntityKind,
        raw: Value,
        items: Vec<T>,
        stamp: u64,
    ) -> bool {
        {
            let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
            if stamp <= guard.stamp {
                debug!(
                    kind = %kind,
                    stamp,
                    current = guard.stamp,
                    "Dropping stale snapshot"
                );
                return false;
            }
            guard.raw = Arc::new(raw);
            guard.items = Arc::from(items);
            guard.stamp = stamp;
        }

        self.revision.send_modify(|rev| *rev += 1);
        debug!(kind = %kind, stamp, "Snapshot replaced");
        true
    }
}

fn read<T>(slot: &RwLock<Slot<T>>) -> Arc<[T]> {
    let guard = slot.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard.items)
}

fn read_raw<T>(slot: &RwLock<Slot<T>>) -> Arc<Value> {
    let guard = slot.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard.raw)
}

/// Typed view of a stored payload; records that do not decode are skipped
fn decode<T: DeserializeOwned>(kind: EntityKind, payload: &Value) -> Vec<T> {
    let Some(records) = payload.as_array() else {
        debug!(kind = %kind, "Stored payload is not a list, typed view is empty");
        return Vec::new();
    };

    let items: Vec<T> = records
        .iter()
        .filter_map(|record| T::deserialize(record).ok())
        .collect();
    if items.len() < records.len() {
        debug!(
            kind = %kind,
            skipped = records.len() - items.len(),
            "Records kept only in the raw payload"
        );
    }
    items
}

fn encode<T: Serialize>(items: &[T]) -> Value {
    Value::Array(
        items
            .iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect(),
    )
}
