//! # POS Service
//!
//! The register, back-office and dashboard flows, driven over a
//! [`DataStore`].
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart ──► get_menu_item ──► Cart::add_item ──► totals            │
//! │                                                                         │
//! │  submit_order ──► OrderDraft::from_cart                                 │
//! │                     │                                                   │
//! │                     ├─► insert_order                                    │
//! │                     ├─► insert_order_items ──(fails)──► delete_order    │
//! │                     └─► cart.clear()                                    │
//! │                                                                         │
//! │  mark_paid ──► update_payment(Paid)                                     │
//! │                                                                         │
//! │  sales_report ──► list_orders(paid, range) ──► SalesSummary + daily     │
//! │                   list_order_items per order ──► category_sales         │
//! │                                                                         │
//! │  adjust_stock ──► InventoryMovement::manual ──► apply_stock_movement    │
//! │                                                                         │
//! │  dashboard ──► today's orders + inventory ──► DashboardStats            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use mezza_core::inventory::{low_stock, validate_inventory_item};
use mezza_core::report::{category_sales, daily_sales, dashboard_stats};
use mezza_core::validation::{validate_menu_item_name, validate_price};
use mezza_core::{
    Cart, Category, CategorySales, DailySales, DashboardStats, InventoryItem, InventoryMovement,
    MenuItem, Money, MovementType, Order, OrderDraft, OrderTotals, OrderType, PaymentMethod,
    PaymentStatus, Rate, SalesSummary,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::StoreResult;
use crate::store::{DataStore, MenuFilter, OrderFilter};

/// Days of sales shown on the dashboard chart, today included.
pub const DASHBOARD_DAYS: u64 = 30;

/// Sales figures for the reports screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub summary: SalesSummary,
    pub daily: Vec<DailySales>,
    /// Item sales of the paid orders, by menu category.
    pub categories: Vec<CategorySales>,
}

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    /// Paid sales per day over the last [`DASHBOARD_DAYS`] days.
    pub recent_sales: Vec<DailySales>,
}

/// POS operations over a data store.
pub struct PosService<S: DataStore> {
    store: S,
    settings: Settings,
    vat_rate: Rate,
    service_rate: Rate,
}

impl<S: DataStore> PosService<S> {
    /// Creates the service. Fails if the configured rates are out of range.
    pub fn new(store: S, settings: Settings) -> StoreResult<Self> {
        let (vat_rate, service_rate) = settings.rates()?;
        Ok(PosService {
            store,
            settings,
            vat_rate,
            service_rate,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Adds an active menu category.
    pub async fn add_category(&self, name: &str, sort_order: i64) -> StoreResult<Category> {
        validate_menu_item_name(name)?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            name_ar: None,
            sort_order,
            is_active: true,
            created_at: Utc::now(),
        };

        self.store.insert_category(&category).await?;
        debug!(id = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    /// Categories in register order.
    pub async fn categories(&self) -> StoreResult<Vec<Category>> {
        self.store.list_categories().await
    }

    /// Adds a new, available item to the menu.
    pub async fn add_menu_item(
        &self,
        name: &str,
        price: Money,
        category_id: Option<&str>,
    ) -> StoreResult<MenuItem> {
        validate_menu_item_name(name)?;
        validate_price(price)?;

        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.map(str::to_string),
            name: name.trim().to_string(),
            name_ar: None,
            sku: None,
            price,
            is_available: true,
            created_at: Utc::now(),
        };

        self.store.insert_menu_item(&item).await?;
        debug!(id = %item.id, name = %item.name, "Menu item added");
        Ok(item)
    }

    /// Marks a menu item available or sold out.
    pub async fn set_availability(&self, menu_item_id: &str, available: bool) -> StoreResult<MenuItem> {
        let mut item = self.store.get_menu_item(menu_item_id).await?;
        item.is_available = available;
        self.store.update_menu_item(&item).await?;
        debug!(id = %menu_item_id, available, "Menu item availability changed");
        Ok(item)
    }

    pub async fn remove_menu_item(&self, menu_item_id: &str) -> StoreResult<()> {
        self.store.delete_menu_item(menu_item_id).await
    }

    /// Available items for the register, ordered by name.
    pub async fn menu(&self, category_id: Option<&str>) -> StoreResult<Vec<MenuItem>> {
        self.store
            .list_menu_items(&MenuFilter::for_register(category_id))
            .await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Looks up a menu item and adds it to the cart. Returns the new totals.
    pub async fn add_to_cart(
        &self,
        cart: &mut Cart,
        menu_item_id: &str,
        quantity: i64,
    ) -> StoreResult<OrderTotals> {
        debug!(menu_item_id = %menu_item_id, quantity, "add_to_cart");

        let item = self.store.get_menu_item(menu_item_id).await?;
        cart.add_item(&item, quantity)?;
        self.cart_totals(cart)
    }

    /// Totals for the cart at the configured rates.
    pub fn cart_totals(&self, cart: &Cart) -> StoreResult<OrderTotals> {
        Ok(cart.totals(self.vat_rate, self.service_rate)?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submits the cart as a new order.
    ///
    /// The order row is inserted first, then its items. If the items fail
    /// the order row is removed again. The cart is cleared only on success.
    pub async fn submit_order(
        &self,
        cart: &mut Cart,
        order_type: OrderType,
        table_number: Option<&str>,
    ) -> StoreResult<Order> {
        let draft = OrderDraft::from_cart(
            cart,
            order_type,
            table_number,
            self.vat_rate,
            self.service_rate,
            Uuid::new_v4(),
            Utc::now(),
        )?;

        self.store.insert_order(&draft.order).await?;

        if let Err(e) = self.store.insert_order_items(&draft.items).await {
            warn!(order_id = %draft.order.id, error = %e, "Order items failed, removing order");
            if let Err(cleanup) = self.store.delete_order(&draft.order.id).await {
                warn!(order_id = %draft.order.id, error = %cleanup, "Could not remove order");
            }
            return Err(e);
        }

        cart.clear();

        info!(
            order_id = %draft.order.id,
            order_number = %draft.order.order_number,
            total = %draft.order.total_amount,
            items = draft.items.len(),
            "Order submitted"
        );

        Ok(draft.order)
    }

    /// Records full payment of an order.
    pub async fn mark_paid(&self, order_id: &str, method: PaymentMethod) -> StoreResult<Order> {
        let order = self
            .store
            .update_payment(order_id, PaymentStatus::Paid, Some(method), Utc::now())
            .await?;

        info!(
            order_id = %order.id,
            method = ?method,
            total = %order.total_amount,
            "Order paid"
        );

        Ok(order)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Adds a stocked ingredient or supply. The reorder point starts at
    /// the minimum level.
    pub async fn add_inventory_item(
        &self,
        name: &str,
        unit: &str,
        opening_stock: Decimal,
        min_stock_level: Decimal,
        unit_cost: Money,
    ) -> StoreResult<InventoryItem> {
        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            name_ar: None,
            unit: unit.trim().to_string(),
            current_stock: opening_stock,
            min_stock_level,
            reorder_point: min_stock_level,
            unit_cost,
            created_at: Utc::now(),
        };
        validate_inventory_item(&item)?;

        self.store.insert_inventory_item(&item).await?;
        debug!(id = %item.id, name = %item.name, stock = %item.current_stock, "Inventory item added");
        Ok(item)
    }

    /// Books stock in or out by hand, or corrects a count.
    ///
    /// `In` and `Out` take a positive quantity; `Adjustment` takes the
    /// signed correction. Returns the item with its new stock level.
    pub async fn adjust_stock(
        &self,
        inventory_item_id: &str,
        movement_type: MovementType,
        quantity: Decimal,
    ) -> StoreResult<InventoryItem> {
        let movement = InventoryMovement::manual(
            inventory_item_id,
            movement_type,
            quantity,
            Uuid::new_v4(),
            Utc::now(),
        )?;

        let item = self.store.apply_stock_movement(&movement).await?;

        info!(
            item_id = %item.id,
            movement = ?movement_type,
            quantity = %movement.quantity,
            stock = %item.current_stock,
            "Stock adjusted"
        );
        if item.is_low_stock() {
            warn!(
                item_id = %item.id,
                name = %item.name,
                stock = %item.current_stock,
                min = %item.min_stock_level,
                "Low stock"
            );
        }

        Ok(item)
    }

    /// All inventory items by name.
    pub async fn inventory(&self) -> StoreResult<Vec<InventoryItem>> {
        self.store.list_inventory_items().await
    }

    /// Items at or under their minimum level, by name.
    pub async fn low_stock_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = self.store.list_inventory_items().await?;
        Ok(low_stock(&items).into_iter().cloned().collect())
    }

    /// An item's stock movements, oldest first.
    pub async fn stock_movements(&self, inventory_item_id: &str) -> StoreResult<Vec<InventoryMovement>> {
        self.store.list_inventory_movements(inventory_item_id).await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Summarises paid orders created between `from` and `to`, both inclusive.
    pub async fn sales_report(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<SalesReport> {
        let orders = self.paid_orders(from, to).await?;
        debug!(from = %from, to = %to, orders = orders.len(), "Building sales report");

        let mut items = Vec::new();
        for order in &orders {
            items.extend(self.store.list_order_items(&order.id).await?);
        }
        let menu = self.store.list_menu_items(&MenuFilter::default()).await?;
        let categories = self.store.list_categories().await?;

        Ok(SalesReport {
            from,
            to,
            summary: SalesSummary::from_orders(&orders, from, to)?,
            daily: daily_sales(&orders, from, to)?,
            categories: category_sales(&items, &menu, &categories)?,
        })
    }

    /// Today's figures and the recent sales chart.
    pub async fn dashboard(&self, today: NaiveDate) -> StoreResult<Dashboard> {
        let todays_orders = self
            .store
            .list_orders(&OrderFilter {
                payment_status: None,
                created_from: Some(start_of(today)),
                created_before: today.succ_opt().map(start_of),
            })
            .await?;
        let inventory = self.store.list_inventory_items().await?;

        let first_day = today
            .checked_sub_days(Days::new(DASHBOARD_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        let recent = self.paid_orders(first_day, today).await?;

        Ok(Dashboard {
            stats: dashboard_stats(&todays_orders, &inventory)?,
            recent_sales: daily_sales(&recent, first_day, today)?,
        })
    }

    async fn paid_orders(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Order>> {
        let filter = OrderFilter {
            payment_status: Some(PaymentStatus::Paid),
            created_from: Some(start_of(from)),
            created_before: to.succ_opt().map(start_of),
        };
        self.store.list_orders(&filter).await
    }
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

// =============================================================================
// Unit Tests
// =============================================================================
