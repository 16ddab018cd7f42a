//! # In-Memory Store
//!
//! A `DataStore` held in process memory. Used by tests and by callers
//! that do not need the data to outlive the process.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mezza_core::{
    Category, InventoryItem, InventoryMovement, MenuItem, Order, OrderItem, OrderStatus,
    PaymentMethod, PaymentStatus,
};
use tokio::sync::RwLock;
use tracing::debug;

use super::{DataStore, MenuFilter, OrderFilter};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    categories: HashMap<String, Category>,
    menu_items: HashMap<String, MenuItem>,
    orders: HashMap<String, Order>,
    order_items: HashMap<String, Vec<OrderItem>>,
    inventory_items: HashMap<String, InventoryItem>,
    inventory_movements: Vec<InventoryMovement>,
}

impl Tables {
    fn order_item_exists(&self, id: &str) -> bool {
        self.order_items
            .values()
            .any(|rows| rows.iter().any(|r| r.id == id))
    }
}

/// A `DataStore` held in process memory.
///
/// One `RwLock` guards all tables, so every call is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");
        let mut tables = self.tables.write().await;

        if tables.categories.contains_key(&category.id) {
            return Err(StoreError::duplicate("Category", &category.id));
        }
        tables
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(categories)
    }

    async fn insert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");
        let mut tables = self.tables.write().await;

        if tables.menu_items.contains_key(&item.id) {
            return Err(StoreError::duplicate("MenuItem", &item.id));
        }
        tables.menu_items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        debug!(id = %item.id, "Updating menu item");
        let mut tables = self.tables.write().await;

        let row = tables
            .menu_items
            .get_mut(&item.id)
            .ok_or_else(|| StoreError::not_found("MenuItem", &item.id))?;
        *row = item.clone();
        Ok(())
    }

    async fn delete_menu_item(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting menu item");
        self.tables
            .write()
            .await
            .menu_items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("MenuItem", id))
    }

    async fn get_menu_item(&self, id: &str) -> StoreResult<MenuItem> {
        self.tables
            .read()
            .await
            .menu_items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("MenuItem", id))
    }

    async fn list_menu_items(&self, filter: &MenuFilter) -> StoreResult<Vec<MenuItem>> {
        let tables = self.tables.read().await;
        let mut items: Vec<MenuItem> = tables
            .menu_items
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, "Inserting order");
        let mut tables = self.tables.write().await;

        if tables.orders.contains_key(&order.id) {
            return Err(StoreError::duplicate("Order", &order.id));
        }
        if tables
            .orders
            .values()
            .any(|o| o.order_number == order.order_number)
        {
            return Err(StoreError::duplicate("Order", &order.order_number));
        }
        tables.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn insert_order_items(&self, items: &[OrderItem]) -> StoreResult<()> {
        debug!(count = items.len(), "Inserting order items");
        let mut tables = self.tables.write().await;

        // Validate the whole batch before touching anything.
        let mut batch_ids = HashSet::with_capacity(items.len());
        for item in items {
            if !tables.orders.contains_key(&item.order_id) {
                return Err(StoreError::not_found("Order", &item.order_id));
            }
            if !batch_ids.insert(item.id.as_str()) || tables.order_item_exists(&item.id) {
                return Err(StoreError::duplicate("OrderItem", &item.id));
            }
        }

        for item in items {
            tables
                .order_items
                .entry(item.order_id.clone())
                .or_default()
                .push(item.clone());
        }
        Ok(())
    }

    async fn get_order(&self, id: &str) -> StoreResult<Order> {
        self.tables
            .read()
            .await
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Order", id))
    }

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        let tables = self.tables.read().await;
        if !tables.orders.contains_key(order_id) {
            return Err(StoreError::not_found("Order", order_id));
        }
        Ok(tables.order_items.get(order_id).cloned().unwrap_or_default())
    }

    async fn update_payment(
        &self,
        order_id: &str,
        status: PaymentStatus,
        method: Option<PaymentMethod>,
        at: DateTime<Utc>,
    ) -> StoreResult<Order> {
        debug!(id = %order_id, ?status, ?method, "Updating payment");
        let mut tables = self.tables.write().await;

        let order = tables
            .orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::not_found("Order", order_id))?;

        order.payment_status = status;
        if method.is_some() {
            order.payment_method = method;
        }
        if status == PaymentStatus::Paid {
            order.status = OrderStatus::Paid;
        }
        order.updated_at = at;
        Ok(order.clone())
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting order");
        let mut tables = self.tables.write().await;

        tables
            .orders
            .remove(id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;
        tables.order_items.remove(id);
        Ok(())
    }

    async fn insert_inventory_item(&self, item: &InventoryItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting inventory item");
        let mut tables = self.tables.write().await;

        if tables.inventory_items.contains_key(&item.id) {
            return Err(StoreError::duplicate("InventoryItem", &item.id));
        }
        tables
            .inventory_items
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get_inventory_item(&self, id: &str) -> StoreResult<InventoryItem> {
        self.tables
            .read()
            .await
            .inventory_items
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("InventoryItem", id))
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let tables = self.tables.read().await;
        let mut items: Vec<InventoryItem> = tables.inventory_items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn apply_stock_movement(
        &self,
        movement: &InventoryMovement,
    ) -> StoreResult<InventoryItem> {
        debug!(
            id = %movement.id,
            item_id = %movement.inventory_item_id,
            quantity = %movement.quantity,
            "Applying stock movement"
        );
        let mut tables = self.tables.write().await;

        if tables
            .inventory_movements
            .iter()
            .any(|m| m.id == movement.id)
        {
            return Err(StoreError::duplicate("InventoryMovement", &movement.id));
        }

        let row = tables
            .inventory_items
            .get_mut(&movement.inventory_item_id)
            .ok_or_else(|| StoreError::not_found("InventoryItem", &movement.inventory_item_id))?;

        let mut updated = row.clone();
        updated.apply(movement)?;
        *row = updated.clone();

        tables.inventory_movements.push(movement.clone());
        Ok(updated)
    }

    async fn list_inventory_movements(
        &self,
        item_id: &str,
    ) -> StoreResult<Vec<InventoryMovement>> {
        let tables = self.tables.read().await;
        if !tables.inventory_items.contains_key(item_id) {
            return Err(StoreError::not_found("InventoryItem", item_id));
        }
        Ok(tables
            .inventory_movements
            .iter()
            .filter(|m| m.inventory_item_id == item_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[tokio::test]
    async fn test_menu_crud() {
        contract::menu_crud(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_menu_filter_and_order() {
        contract::menu_filter_and_order(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_categories_sorted() {
        contract::categories_sorted(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_orders_filtered_newest_first() {
        contract::orders_filtered_newest_first(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_order_round_trips_exactly() {
        contract::order_round_trips_exactly(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_order_items_require_order() {
        contract::order_items_require_order(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_order_items_batch_is_all_or_nothing() {
        contract::order_items_batch_is_all_or_nothing(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_order_items_duplicate_within_batch() {
        contract::order_items_duplicate_within_batch(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_order_items_keep_insert_order() {
        contract::order_items_keep_insert_order(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_update_payment_marks_paid() {
        contract::update_payment_marks_paid(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_delete_order_removes_items() {
        contract::delete_order_removes_items(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_inventory_insert_and_list() {
        contract::inventory_insert_and_list(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_stock_movement_updates_and_records() {
        contract::stock_movement_updates_and_records(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_stock_movement_is_all_or_nothing() {
        contract::stock_movement_is_all_or_nothing(&MemoryStore::new()).await;
    }
}
