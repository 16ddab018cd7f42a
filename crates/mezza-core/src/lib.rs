//! # mezza-core: Pure Business Logic for Mezza POS
//!
//! This crate holds the restaurant point-of-sale logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mezza POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (outside this workspace)           │   │
//! │  │    Menu ──► POS Cart ──► Orders ──► Reports ──► Settings        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mezza-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ totals  │ │  cart   │ │  order  │ │ report  │  │   │
//! │  │   │  Money  │ │ compute │ │  Cart   │ │  Draft  │ │ Summary │  │   │
//! │  │   │  Rate   │ │         │ │         │ │         │ │         │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                mezza-store (Data Store + POS Service)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` and `Rate` over exact decimals
//! - [`types`] - Domain types (LineItem, OrderTotals, MenuItem, Order, ...)
//! - [`totals`] - The order total calculator
//! - [`cart`] - The POS cart
//! - [`order`] - Turning a cart into an order record
//! - [`report`] - Sales summaries, category sales and dashboard figures
//! - [`inventory`] - Stock levels and movements
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use mezza_core::{compute, LineItem, Money, Rate};
//! use rust_decimal::Decimal;
//!
//! let lines = [LineItem::new(Money::new(Decimal::from(10)), 2)];
//! let vat = Rate::from_percentage(Decimal::from(14)).unwrap();
//! let service = Rate::from_percentage(Decimal::from(10)).unwrap();
//!
//! let totals = compute(&lines, vat, service).unwrap();
//! assert_eq!(totals.grand_total.amount(), Decimal::new(248, 1)); // 24.8
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod order;
pub mod report;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, LineItemFault, ValidationError};
pub use inventory::{InventoryItem, InventoryMovement, MovementType};
pub use money::{Money, Rate};
pub use order::OrderDraft;
pub use report::{CategorySales, DailySales, DashboardStats, SalesSummary};
pub use totals::{compute, compute_breakdown, OrderBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single menu item in a cart.
///
/// Catches typing 1000 instead of 10 at the register.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Default VAT rate in percent (Egyptian standard rate).
pub const DEFAULT_VAT_PERCENT: u32 = 14;

/// Default service charge in percent.
pub const DEFAULT_SERVICE_PERCENT: u32 = 10;
