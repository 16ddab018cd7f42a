//! # Data Store
//!
//! The operations the POS needs from the backing database, with an
//! in-memory and a SQLite implementation.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  categories           insert • select(ORDER BY sort_order, name)       │
//! │  menu_items           insert • update • delete • get                   │
//! │                       select(filter, ORDER BY name)                    │
//! │  orders               insert • update payment • delete • get           │
//! │                       select(filter, ORDER BY created_at DESC)         │
//! │  order_items          insert batch • select by order                   │
//! │  inventory_items      insert • get • select(ORDER BY name)             │
//! │  inventory_movements  apply (stock update + insert) • select by item   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both implementations give the same answers: same ordering, same error
//! kinds, same all-or-nothing writes.

pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod contract;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mezza_core::{
    Category, InventoryItem, InventoryMovement, MenuItem, Order, OrderItem, PaymentMethod,
    PaymentStatus,
};

use crate::error::StoreResult;

pub use memory::MemoryStore;
pub use sqlite::{SqliteConfig, SqliteStore};

// =============================================================================
// Filters
// =============================================================================

/// Selection criteria for menu items. Results are ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Only items that can currently be ordered.
    pub available_only: bool,
    /// Only items in this category.
    pub category_id: Option<String>,
}

impl MenuFilter {
    /// What the register shows: available items, optionally one category.
    pub fn for_register(category_id: Option<&str>) -> Self {
        MenuFilter {
            available_only: true,
            category_id: category_id.map(str::to_string),
        }
    }

    pub(crate) fn matches(&self, item: &MenuItem) -> bool {
        (!self.available_only || item.is_available)
            && self
                .category_id
                .as_ref()
                .map_or(true, |c| item.category_id.as_ref() == Some(c))
    }
}

/// Selection criteria for orders. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub payment_status: Option<PaymentStatus>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub(crate) fn matches(&self, order: &Order) -> bool {
        self.payment_status.map_or(true, |s| order.payment_status == s)
            && self.created_from.map_or(true, |from| order.created_at >= from)
            && self
                .created_before
                .map_or(true, |before| order.created_at < before)
    }
}

// =============================================================================
// DataStore Trait
// =============================================================================

/// Persistence operations used by the POS.
///
/// Implementations return `StoreError::NotFound` for missing rows and
/// `StoreError::Duplicate` for primary key clashes.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn insert_category(&self, category: &Category) -> StoreResult<()>;

    /// All categories by `sort_order`, then name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn insert_menu_item(&self, item: &MenuItem) -> StoreResult<()>;
    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<()>;
    async fn delete_menu_item(&self, id: &str) -> StoreResult<()>;
    async fn get_menu_item(&self, id: &str) -> StoreResult<MenuItem>;
    async fn list_menu_items(&self, filter: &MenuFilter) -> StoreResult<Vec<MenuItem>>;

    async fn insert_order(&self, order: &Order) -> StoreResult<()>;

    /// Inserts all items or none.
    async fn insert_order_items(&self, items: &[OrderItem]) -> StoreResult<()>;

    async fn get_order(&self, id: &str) -> StoreResult<Order>;
    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>>;
    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>>;

    /// Records payment progress and returns the updated order.
    async fn update_payment(
        &self,
        order_id: &str,
        status: PaymentStatus,
        method: Option<PaymentMethod>,
        at: DateTime<Utc>,
    ) -> StoreResult<Order>;

    /// Deletes an order together with its items.
    async fn delete_order(&self, id: &str) -> StoreResult<()>;

    async fn insert_inventory_item(&self, item: &InventoryItem) -> StoreResult<()>;
    async fn get_inventory_item(&self, id: &str) -> StoreResult<InventoryItem>;

    /// All inventory items by name.
    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Adds the movement's signed quantity to its item's stock and records
    /// the movement, both or neither. Returns the updated item.
    async fn apply_stock_movement(&self, movement: &InventoryMovement)
        -> StoreResult<InventoryItem>;

    /// An item's movements in the order they were recorded.
    async fn list_inventory_movements(&self, item_id: &str)
        -> StoreResult<Vec<InventoryMovement>>;
}

