//! # Seed Demo
//!
//! Seeds a menu and a stock room, rings up an order, pays it, books some
//! stock out and prints the day's sales report and dashboard.
//!
//! Runs on an in-memory SQLite database unless `MEZZA_DATABASE_PATH` names
//! a file.
//!
//! ## Usage
//! ```bash
//! cargo run -p mezza-store --bin seed
//!
//! # Keep the data
//! MEZZA_DATABASE_PATH=./mezza.db cargo run -p mezza-store --bin seed
//!
//! # Different rates
//! MEZZA_VAT_RATE=5 MEZZA_SERVICE_RATE=12 cargo run -p mezza-store --bin seed
//!
//! # Quieter logs
//! RUST_LOG=warn cargo run -p mezza-store --bin seed
//! ```

use std::collections::HashMap;

use chrono::Utc;
use mezza_core::{Cart, Money, MovementType, OrderType, PaymentMethod};
use mezza_store::{DataStore, PosService, Settings, SqliteConfig, SqliteStore};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Categories as (name, register position).
const CATEGORIES: &[(&str, i64)] = &[
    ("Mains", 1),
    ("Breakfast", 2),
    ("Desserts", 3),
    ("Drinks", 4),
];

/// Menu as (category, name, price in piastres).
const MENU: &[(&str, &str, i64)] = &[
    ("Mains", "Koshari", 4500),
    ("Mains", "Molokhia with Rice", 9500),
    ("Mains", "Fattah", 12000),
    ("Mains", "Hawawshi", 6500),
    ("Breakfast", "Foul Medames", 2500),
    ("Breakfast", "Taameya", 1500),
    ("Desserts", "Om Ali", 5500),
    ("Desserts", "Basbousa", 3000),
    ("Drinks", "Karkade", 2000),
    ("Drinks", "Sahlab", 3500),
    ("Drinks", "Tea with Mint", 1500),
];

/// Stock room as (name, unit, opening stock, minimum level, unit cost in piastres).
const STOCK: &[(&str, &str, i64, i64, i64)] = &[
    ("Rice", "kg", 40, 10, 3500),
    ("Lentils", "kg", 12, 5, 6000),
    ("Macaroni", "kg", 8, 5, 2800),
    ("Hibiscus", "kg", 3, 2, 15000),
];

/// Booked out after service as (name, quantity).
const USED: &[(&str, i64)] = &[("Macaroni", 4), ("Lentils", 2)];

/// What table 4 orders, as (name, quantity).
const TABLE_FOUR: &[(&str, i64)] = &[("Koshari", 2), ("Om Ali", 1), ("Karkade", 3)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let settings = Settings::from_env();
    println!("🍽  Mezza POS Seed Demo");
    println!("======================");
    println!("Restaurant: {}", settings.company_name);
    println!(
        "VAT: {}%  Service: {}%",
        settings.vat_rate_percent.normalize(),
        settings.service_rate_percent.normalize()
    );
    println!();

    let config = match &settings.database_path {
        Some(path) => SqliteConfig::new(path),
        None => SqliteConfig::in_memory(),
    };
    let store = SqliteStore::connect(config).await?;
    let service = PosService::new(store, settings)?;

    let mut category_ids = HashMap::new();
    for (name, position) in CATEGORIES {
        let category = service.add_category(name, *position).await?;
        category_ids.insert(*name, category.id);
    }

    for (category, name, piastres) in MENU {
        service
            .add_menu_item(
                name,
                Money::from_minor(*piastres),
                category_ids.get(category).map(String::as_str),
            )
            .await?;
    }
    let menu = service.menu(None).await?;
    println!("✓ Seeded {} menu items", menu.len());

    let mut cart = Cart::new();
    for (name, quantity) in TABLE_FOUR {
        let Some(item) = menu.iter().find(|m| m.name == *name) else {
            eprintln!("⚠ {} is not on the menu", name);
            continue;
        };
        let totals = service.add_to_cart(&mut cart, &item.id, *quantity).await?;
        println!(
            "  + {} x{}  (running total {})",
            item.name,
            quantity,
            service.settings().format_amount(totals.grand_total)
        );
    }

    let order = service
        .submit_order(&mut cart, OrderType::DineIn, Some("4"))
        .await?;
    println!();
    println!("✓ Submitted {}", order.order_number);

    let order = service.mark_paid(&order.id, PaymentMethod::Cash).await?;
    let settings = service.settings();
    println!("✓ Paid by cash");
    println!();
    println!("  Subtotal:        {}", settings.format_amount(order.subtotal));
    println!("  VAT:             {}", settings.format_amount(order.vat_amount));
    println!("  Service charge:  {}", settings.format_amount(order.service_charge));
    println!("  Total:           {}", settings.format_amount(order.total_amount));

    let items = service.store().list_order_items(&order.id).await?;
    println!();
    println!("Order items:");
    for item in &items {
        println!(
            "  {:<20} x{:<3} {}",
            item.name_snapshot,
            item.quantity,
            settings.format_amount(item.total_price)
        );
    }

    let today = Utc::now().date_naive();
    let report = service.sales_report(today, today).await?;
    println!();
    println!("Sales report for {}:", today);
    println!("  Orders:          {}", report.summary.order_count);
    println!("  Sales:           {}", settings.format_amount(report.summary.total_sales));
    println!(
        "  Average order:   {}",
        settings.format_amount(report.summary.average_order_value)
    );
    for category in &report.categories {
        println!("  {:<16} {}", category.name, settings.format_amount(category.sales));
    }

    let mut stock_ids = HashMap::new();
    for (name, unit, opening, min, piastres) in STOCK {
        let item = service
            .add_inventory_item(
                name,
                unit,
                Decimal::from(*opening),
                Decimal::from(*min),
                Money::from_minor(*piastres),
            )
            .await?;
        stock_ids.insert(*name, item.id);
    }
    println!();
    println!("✓ Stocked {} inventory items", STOCK.len());

    for (name, quantity) in USED {
        let Some(id) = stock_ids.get(name) else {
            continue;
        };
        let item = service
            .adjust_stock(id, MovementType::Out, Decimal::from(*quantity))
            .await?;
        println!("  - {} {} {} (left {})", name, quantity, item.unit, item.current_stock);
    }

    let low = service.low_stock_items().await?;
    println!();
    println!("Low stock:");
    for item in &low {
        println!(
            "  ⚠ {:<12} {} {} (min {})",
            item.name, item.current_stock, item.unit, item.min_stock_level
        );
    }

    let dashboard = service.dashboard(today).await?;
    println!();
    println!("Dashboard:");
    println!("  Today's revenue: {}", settings.format_amount(dashboard.stats.today_revenue));
    println!("  Today's orders:  {}", dashboard.stats.today_order_count);
    println!("  Low stock items: {}", dashboard.stats.low_stock_count);

    println!();
    println!("Order JSON:");
    println!("{}", serde_json::to_string_pretty(&order)?);

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: info, debug for the store crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mezza_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
