//! # mezza-store: Data Store Seam for Mezza POS
//!
//! This crate pins down the operations the POS needs from its database
//! (insert, update, delete, select-with-filter-and-order) as the
//! [`DataStore`] trait, implements it in memory and on SQLite, and drives
//! the order, stock and report flows on top of it.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Register / dashboard                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  mezza-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   PosService ──► mezza-core (Cart, OrderDraft, SalesSummary)    │   │
//! │  │       │                                                         │   │
//! │  │       ▼                                                         │   │
//! │  │   DataStore trait ◄── MemoryStore (tests)                       │   │
//! │  │                   ◄── SqliteStore (sqlx pool + migrations)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mezza_store::{PosService, Settings, SqliteConfig, SqliteStore};
//!
//! let store = SqliteStore::connect(SqliteConfig::new("./mezza.db")).await?;
//! let service = PosService::new(store, Settings::from_env())?;
//! let totals = service.add_to_cart(&mut cart, &menu_item_id, 2).await?;
//! let order = service.submit_order(&mut cart, OrderType::DineIn, Some("4")).await?;
//! ```

pub mod config;
pub mod error;
pub mod migrations;
pub mod service;
pub mod store;

pub use config::Settings;
pub use error::{StoreError, StoreResult};
pub use service::{Dashboard, PosService, SalesReport};
pub use store::{DataStore, MemoryStore, MenuFilter, OrderFilter, SqliteConfig, SqliteStore};
