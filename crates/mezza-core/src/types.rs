//! # Domain Types
//!
//! Core domain types used throughout Mezza POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   OrderTotals   │   │    MenuItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  unit_price     │──►│  subtotal       │   │  id (UUID)      │       │
//! │  │  quantity       │   │  vat_amount     │   │  name / name_ar │       │
//! │  └─────────────────┘   │  service_charge │   │  price          │       │
//! │                        │  grand_total    │   │  is_available   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │   OrderItem     │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  order_number   │◄──│  order_id (FK)  │   │  name           │       │
//! │  │  totals...      │   │  total_price    │   │  sort_order     │       │
//! │  │  payment_status │   │  vat_amount     │   │  is_active      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry fed to the order total calculator.
///
/// Ephemeral: created when an item lands in a cart, gone once the order is
/// submitted or the cart is cleared. The calculator validates it, so the
/// struct itself accepts any values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Price of one unit.
    pub unit_price: Money,
    /// Number of units, at least 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    #[inline]
    pub const fn new(unit_price: Money, quantity: i64) -> Self {
        LineItem {
            unit_price,
            quantity,
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Totals derived from a set of line items.
///
/// ## Invariants
/// - `subtotal = Σ(unit_price × quantity)`
/// - `vat_amount = subtotal × vat_rate`
/// - `service_charge = subtotal × service_rate`
/// - `grand_total = subtotal + vat_amount + service_charge`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub vat_amount: Money,
    pub service_charge: Money,
    pub grand_total: Money,
}

impl OrderTotals {
    /// All-zero totals (empty order).
    #[inline]
    pub const fn zero() -> Self {
        OrderTotals {
            subtotal: Money::zero(),
            vat_amount: Money::zero(),
            service_charge: Money::zero(),
            grand_total: Money::zero(),
        }
    }
}

/// Per-line figures stored on each order item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineTotal {
    /// `unit_price × quantity`.
    pub line_total: Money,
    /// `line_total × vat_rate`.
    pub vat_amount: Money,
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Category the item is listed under.
    pub category_id: Option<String>,

    /// Display name.
    pub name: String,

    /// Arabic display name.
    pub name_ar: Option<String>,

    /// Optional stock keeping code.
    pub sku: Option<String>,

    /// Menu price.
    pub price: Money,

    /// Whether the item can currently be ordered.
    pub is_available: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A menu section (mains, drinks, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub name_ar: Option<String>,
    /// Position on the register, lowest first.
    pub sort_order: i64,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Order Enums
// =============================================================================

/// How the order is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum OrderType {
    /// Eaten at a table; the only type that carries a table number.
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// Kitchen/service lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Paid,
    Cancelled,
}

/// Payment progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Refunded,
}

/// Tender used to settle an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum PaymentMethod {
    Cash,
    Card,
    Wallet,
    /// Split across several tenders.
    Mix,
}

/// State of the e-invoice submission to the tax authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum EtaSubmissionStatus {
    #[default]
    Pending,
    Submitted,
    Accepted,
    Rejected,
}

// =============================================================================
// Order
// =============================================================================

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    /// Human-readable number, e.g. `ORD-20260117-1A2B3C4D`.
    pub order_number: String,
    pub order_type: OrderType,
    pub table_number: Option<String>,
    pub status: OrderStatus,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub vat_amount: Money,
    pub service_charge: Money,
    pub total_amount: Money,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub eta_submission_status: EtaSubmissionStatus,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order's totals as computed at submission.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            vat_amount: self.vat_amount,
            service_charge: self.service_charge,
            grand_total: self.total_amount,
        }
    }

    /// Whether the order counts toward sales reports.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of a submitted order.
/// Snapshot of price at the time of ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    /// Menu name at time of ordering (frozen).
    pub name_snapshot: String,
    pub quantity: i64,
    /// Unit price at time of ordering (frozen).
    pub unit_price: Money,
    /// `unit_price × quantity`.
    pub total_price: Money,
    pub vat_amount: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_totals_zero() {
        assert_eq!(OrderTotals::zero(), OrderTotals::default());
        assert!(OrderTotals::zero().grand_total.is_zero());
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(OrderType::default(), OrderType::DineIn);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(EtaSubmissionStatus::default(), EtaSubmissionStatus::Pending);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::DineIn).unwrap(),
            "\"dine_in\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Wallet).unwrap(),
            "\"wallet\""
        );
    }
}
