//! # SQLite Store
//!
//! A `DataStore` on an embedded SQLite database through a sqlx pool.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SqliteConfig::new(path)  ← pool settings                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::connect(config).await  ← pool + migrations               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                   │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐               │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...           │                           │
//! │  │  └─────┘ └─────┘ └─────┘               │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Row structs (TEXT money, TEXT timestamps) ──TryFrom──► domain types   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Format
//! - Money and stock quantities: decimal TEXT at full precision ("6.3714")
//! - Timestamps: fixed-width UTC TEXT with nanoseconds, so `ORDER BY` and
//!   range filters on the text match time order
//! - Enums: snake_case TEXT, as on the wire
//!
//! Multi-row writes (order item batches, stock movements) run in one
//! transaction; an error drops the transaction and rolls it back.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mezza_core::{
    Category, EtaSubmissionStatus, InventoryItem, InventoryMovement, MenuItem, Money,
    MovementType, Order, OrderItem, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{DataStore, MenuFilter, OrderFilter};
use crate::error::{StoreError, StoreResult};
use crate::migrations;

/// Path that selects a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

// =============================================================================
// Configuration
// =============================================================================

/// SQLite pool configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = SqliteConfig::new("./data/mezza.db")
///     .max_connections(5)
///     .min_connections(1);
/// let store = SqliteStore::connect(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to the database file, created if missing.
    pub database_path: PathBuf,

    /// Default: 5
    pub max_connections: u32,

    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a free connection. Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle time before a connection is closed. `None` keeps it open.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Default: true
    pub run_migrations: bool,
}

impl SqliteConfig {
    /// Creates a configuration for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private in-memory database (for tests and demos).
    ///
    /// The database lives as long as its single connection, so that
    /// connection is never retired.
    pub fn in_memory() -> Self {
        SqliteConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }
}

// =============================================================================
// Store
// =============================================================================

/// A `DataStore` backed by SQLite.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the pool and, if configured, runs migrations.
    ///
    /// File databases use WAL journaling, NORMAL synchronous and enforced
    /// foreign keys.
    pub async fn connect(config: SqliteConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };
        // SQLite leaves foreign keys off unless asked; ON DELETE CASCADE needs them.
        let connect_options = connect_options.foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool created");

        let store = SqliteStore { pool };
        if config.run_migrations {
            store.run_migrations().await?;
        }
        Ok(store)
    }

    /// Connects to a fresh in-memory database with the schema applied.
    pub async fn in_memory() -> StoreResult<Self> {
        SqliteStore::connect(SqliteConfig::in_memory()).await
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The underlying pool, for queries the `DataStore` trait does not cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Whether the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the pool. Later calls fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    async fn order_exists(&self, id: &str) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn inventory_item_exists(&self, id: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM inventory_items WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn insert_category(&self, category: &Category) -> StoreResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, name_ar, sort_order, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.name_ar)
        .bind(category.sort_order)
        .bind(category.is_active)
        .bind(format_time(category.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Category", &category.id))?;

        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT * FROM categories ORDER BY sort_order, name, id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn insert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, category_id, name, name_ar, sku, price, is_available, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.category_id)
        .bind(&item.name)
        .bind(&item.name_ar)
        .bind(&item.sku)
        .bind(money_text(item.price))
        .bind(item.is_available)
        .bind(format_time(item.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "MenuItem", &item.id))?;

        Ok(())
    }

    async fn update_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        debug!(id = %item.id, "Updating menu item");

        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET category_id = ?2, name = ?3, name_ar = ?4, sku = ?5,
                price = ?6, is_available = ?7, created_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.category_id)
        .bind(&item.name)
        .bind(&item.name_ar)
        .bind(&item.sku)
        .bind(money_text(item.price))
        .bind(item.is_available)
        .bind(format_time(item.created_at))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("MenuItem", &item.id));
        }
        Ok(())
    }

    async fn delete_menu_item(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("MenuItem", id));
        }
        Ok(())
    }

    async fn get_menu_item(&self, id: &str) -> StoreResult<MenuItem> {
        let row: Option<MenuItemRow> = sqlx::query_as("SELECT * FROM menu_items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| StoreError::not_found("MenuItem", id))?
            .try_into()
    }

    async fn list_menu_items(&self, filter: &MenuFilter) -> StoreResult<Vec<MenuItem>> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT * FROM menu_items
            WHERE (?1 = 0 OR is_available = 1)
              AND (?2 IS NULL OR category_id = ?2)
            ORDER BY name, id
            "#,
        )
        .bind(filter.available_only)
        .bind(&filter.category_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn insert_order(&self, order: &Order) -> StoreResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, "Inserting order");

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, order_type, table_number, status,
                subtotal, discount_amount, vat_amount, service_charge, total_amount,
                payment_method, payment_status, eta_submission_status, notes,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14,
                ?15, ?16
            )
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.order_type)
        .bind(&order.table_number)
        .bind(order.status)
        .bind(money_text(order.subtotal))
        .bind(money_text(order.discount_amount))
        .bind(money_text(order.vat_amount))
        .bind(money_text(order.service_charge))
        .bind(money_text(order.total_amount))
        .bind(order.payment_method)
        .bind(order.payment_status)
        .bind(order.eta_submission_status)
        .bind(&order.notes)
        .bind(format_time(order.created_at))
        .bind(format_time(order.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Order", &order.id))?;

        Ok(())
    }

    async fn insert_order_items(&self, items: &[OrderItem]) -> StoreResult<()> {
        debug!(count = items.len(), "Inserting order items");

        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, menu_item_id, name_snapshot, quantity,
                    unit_price, total_price, vat_amount, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.menu_item_id)
            .bind(&item.name_snapshot)
            .bind(item.quantity)
            .bind(money_text(item.unit_price))
            .bind(money_text(item.total_price))
            .bind(money_text(item.vat_amount))
            .bind(format_time(item.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    StoreError::not_found("Order", &item.order_id)
                }
                _ => insert_error(e, "OrderItem", &item.id),
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_order(&self, id: &str) -> StoreResult<Order> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| StoreError::not_found("Order", id))?
            .try_into()
    }

    async fn list_orders(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT * FROM orders
            WHERE (?1 IS NULL OR payment_status = ?1)
              AND (?2 IS NULL OR created_at >= ?2)
              AND (?3 IS NULL OR created_at < ?3)
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(filter.payment_status)
        .bind(filter.created_from.map(format_time))
        .bind(filter.created_before.map(format_time))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn list_order_items(&self, order_id: &str) -> StoreResult<Vec<OrderItem>> {
        if !self.order_exists(order_id).await? {
            return Err(StoreError::not_found("Order", order_id));
        }

        let rows: Vec<OrderItemRow> =
            sqlx::query_as("SELECT * FROM order_items WHERE order_id = ?1 ORDER BY rowid")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }

    async fn update_payment(
        &self,
        order_id: &str,
        status: PaymentStatus,
        method: Option<PaymentMethod>,
        at: DateTime<Utc>,
    ) -> StoreResult<Order> {
        debug!(id = %order_id, ?status, ?method, "Updating payment");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = ?2,
                payment_method = COALESCE(?3, payment_method),
                status = CASE WHEN ?4 THEN ?5 ELSE status END,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(order_id)
        .bind(status)
        .bind(method)
        .bind(status == PaymentStatus::Paid)
        .bind(OrderStatus::Paid)
        .bind(format_time(at))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", order_id));
        }

        let row: OrderRow = sqlx::query_as("SELECT * FROM orders WHERE id = ?1")
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        row.try_into()
    }

    async fn delete_order(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting order");

        // order_items go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Order", id));
        }
        Ok(())
    }

    async fn insert_inventory_item(&self, item: &InventoryItem) -> StoreResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting inventory item");

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, name, name_ar, unit, current_stock, min_stock_level,
                reorder_point, unit_cost, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.name_ar)
        .bind(&item.unit)
        .bind(item.current_stock.to_string())
        .bind(item.min_stock_level.to_string())
        .bind(item.reorder_point.to_string())
        .bind(money_text(item.unit_cost))
        .bind(format_time(item.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "InventoryItem", &item.id))?;

        Ok(())
    }

    async fn get_inventory_item(&self, id: &str) -> StoreResult<InventoryItem> {
        let row: Option<InventoryItemRow> =
            sqlx::query_as("SELECT * FROM inventory_items WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| StoreError::not_found("InventoryItem", id))?
            .try_into()
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows: Vec<InventoryItemRow> =
            sqlx::query_as("SELECT * FROM inventory_items ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(InventoryItem::try_from).collect()
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

        let mut tx = self.pool.begin().await?;

        let row: Option<InventoryItemRow> =
            sqlx::query_as("SELECT * FROM inventory_items WHERE id = ?1")
                .bind(&movement.inventory_item_id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut item = InventoryItem::try_from(row.ok_or_else(|| {
            StoreError::not_found("InventoryItem", &movement.inventory_item_id)
        })?)?;

        item.apply(movement)?;

        sqlx::query("UPDATE inventory_items SET current_stock = ?2 WHERE id = ?1")
            .bind(&item.id)
            .bind(item.current_stock.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO inventory_movements (
                id, inventory_item_id, movement_type, quantity, unit_cost,
                reference_type, reference_id, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&movement.id)
        .bind(&movement.inventory_item_id)
        .bind(movement.movement_type)
        .bind(movement.quantity.to_string())
        .bind(movement.unit_cost.map(money_text))
        .bind(&movement.reference_type)
        .bind(&movement.reference_id)
        .bind(&movement.notes)
        .bind(format_time(movement.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| insert_error(e, "InventoryMovement", &movement.id))?;

        tx.commit().await?;
        Ok(item)
    }

    async fn list_inventory_movements(
        &self,
        item_id: &str,
    ) -> StoreResult<Vec<InventoryMovement>> {
        if !self.inventory_item_exists(item_id).await? {
            return Err(StoreError::not_found("InventoryItem", item_id));
        }

        let rows: Vec<InventoryMovementRow> = sqlx::query_as(
            "SELECT * FROM inventory_movements WHERE inventory_item_id = ?1 ORDER BY rowid",
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(InventoryMovement::try_from).collect()
    }
}

// =============================================================================
// Column Encoding
// =============================================================================

/// Full-precision decimal text. `Money`'s `Display` rounds, so it is not used here.
fn money_text(amount: Money) -> String {
    amount.amount().to_string()
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format(TIME_FORMAT).to_string()
}

fn parse_time(column: &str, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| corrupt(column, value))
}

fn parse_decimal(column: &str, value: &str) -> StoreResult<Decimal> {
    Decimal::from_str(value).map_err(|_| corrupt(column, value))
}

fn parse_money(column: &str, value: &str) -> StoreResult<Money> {
    parse_decimal(column, value).map(Money::new)
}

fn corrupt(column: &str, value: &str) -> StoreError {
    StoreError::Corrupt {
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Maps a UNIQUE failure on insert to `Duplicate` for the row being written.
fn insert_error(err: sqlx::Error, entity: &str, id: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::duplicate(entity, id),
        _ => err.into(),
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    name_ar: Option<String>,
    sort_order: i64,
    is_active: bool,
    created_at: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = StoreError;

    fn try_from(row: CategoryRow) -> StoreResult<Self> {
        Ok(Category {
            created_at: parse_time("categories.created_at", &row.created_at)?,
            id: row.id,
            name: row.name,
            name_ar: row.name_ar,
            sort_order: row.sort_order,
            is_active: row.is_active,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    category_id: Option<String>,
    name: String,
    name_ar: Option<String>,
    sku: Option<String>,
    price: String,
    is_available: bool,
    created_at: String,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuItemRow) -> StoreResult<Self> {
        Ok(MenuItem {
            price: parse_money("menu_items.price", &row.price)?,
            created_at: parse_time("menu_items.created_at", &row.created_at)?,
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            name_ar: row.name_ar,
            sku: row.sku,
            is_available: row.is_available,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    order_number: String,
    order_type: OrderType,
    table_number: Option<String>,
    status: OrderStatus,
    subtotal: String,
    discount_amount: String,
    vat_amount: String,
    service_charge: String,
    total_amount: String,
    payment_method: Option<PaymentMethod>,
    payment_status: PaymentStatus,
    eta_submission_status: EtaSubmissionStatus,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> StoreResult<Self> {
        Ok(Order {
            subtotal: parse_money("orders.subtotal", &row.subtotal)?,
            discount_amount: parse_money("orders.discount_amount", &row.discount_amount)?,
            vat_amount: parse_money("orders.vat_amount", &row.vat_amount)?,
            service_charge: parse_money("orders.service_charge", &row.service_charge)?,
            total_amount: parse_money("orders.total_amount", &row.total_amount)?,
            created_at: parse_time("orders.created_at", &row.created_at)?,
            updated_at: parse_time("orders.updated_at", &row.updated_at)?,
            id: row.id,
            order_number: row.order_number,
            order_type: row.order_type,
            table_number: row.table_number,
            status: row.status,
            payment_method: row.payment_method,
            payment_status: row.payment_status,
            eta_submission_status: row.eta_submission_status,
            notes: row.notes,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    menu_item_id: String,
    name_snapshot: String,
    quantity: i64,
    unit_price: String,
    total_price: String,
    vat_amount: String,
    created_at: String,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = StoreError;

    fn try_from(row: OrderItemRow) -> StoreResult<Self> {
        Ok(OrderItem {
            unit_price: parse_money("order_items.unit_price", &row.unit_price)?,
            total_price: parse_money("order_items.total_price", &row.total_price)?,
            vat_amount: parse_money("order_items.vat_amount", &row.vat_amount)?,
            created_at: parse_time("order_items.created_at", &row.created_at)?,
            id: row.id,
            order_id: row.order_id,
            menu_item_id: row.menu_item_id,
            name_snapshot: row.name_snapshot,
            quantity: row.quantity,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRow {
    id: String,
    name: String,
    name_ar: Option<String>,
    unit: String,
    current_stock: String,
    min_stock_level: String,
    reorder_point: String,
    unit_cost: String,
    created_at: String,
}

impl TryFrom<InventoryItemRow> for InventoryItem {
    type Error = StoreError;

    fn try_from(row: InventoryItemRow) -> StoreResult<Self> {
        Ok(InventoryItem {
            current_stock: parse_decimal("inventory_items.current_stock", &row.current_stock)?,
            min_stock_level: parse_decimal("inventory_items.min_stock_level", &row.min_stock_level)?,
            reorder_point: parse_decimal("inventory_items.reorder_point", &row.reorder_point)?,
            unit_cost: parse_money("inventory_items.unit_cost", &row.unit_cost)?,
            created_at: parse_time("inventory_items.created_at", &row.created_at)?,
            id: row.id,
            name: row.name,
            name_ar: row.name_ar,
            unit: row.unit,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryMovementRow {
    id: String,
    inventory_item_id: String,
    movement_type: MovementType,
    quantity: String,
    unit_cost: Option<String>,
    reference_type: Option<String>,
    reference_id: Option<String>,
    notes: Option<String>,
    created_at: String,
}

impl TryFrom<InventoryMovementRow> for InventoryMovement {
    type Error = StoreError;

    fn try_from(row: InventoryMovementRow) -> StoreResult<Self> {
        let unit_cost = row
            .unit_cost
            .as_deref()
            .map(|cost| parse_money("inventory_movements.unit_cost", cost))
            .transpose()?;

        Ok(InventoryMovement {
            quantity: parse_decimal("inventory_movements.quantity", &row.quantity)?,
            created_at: parse_time("inventory_movements.created_at", &row.created_at)?,
            unit_cost,
            id: row.id,
            inventory_item_id: row.inventory_item_id,
            movement_type: row.movement_type,
            reference_type: row.reference_type,
            reference_id: row.reference_id,
            notes: row.notes,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
