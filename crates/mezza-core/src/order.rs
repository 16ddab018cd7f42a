//! # Order Drafting
//!
//! Turns a cart into the order record and order item records that get
//! written to the data store.
//!
//! ```text
//! Cart ──► compute_breakdown ──► Order { totals, pending, ETA pending }
//!                           └──► OrderItem × n { total_price, vat_amount }
//! ```
//!
//! IDs and the timestamp are passed in so drafting stays deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::types::{
    EtaSubmissionStatus, Order, OrderItem, OrderStatus, OrderType, PaymentStatus,
};
use crate::validation::validate_table_number;

/// An order ready to be inserted: the order row plus its item rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Builds an order from the cart.
    ///
    /// ## Rules
    /// - The cart must not be empty
    /// - Only dine-in orders keep a table number; blanks become `None`
    /// - Status, payment and ETA submission all start as pending
    /// - Each item carries its own `total_price` and VAT share
    pub fn from_cart(
        cart: &Cart,
        order_type: OrderType,
        table_number: Option<&str>,
        vat_rate: Rate,
        service_rate: Rate,
        order_id: Uuid,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let table_number = match order_type {
            OrderType::DineIn => validate_table_number(table_number)?,
            OrderType::Takeaway | OrderType::Delivery => None,
        };

        let breakdown = cart.breakdown(vat_rate, service_rate)?;
        let order_id_str = order_id.to_string();

        let order = Order {
            id: order_id_str.clone(),
            order_number: order_number(order_id, now),
            order_type,
            table_number,
            status: OrderStatus::Pending,
            subtotal: breakdown.totals.subtotal,
            discount_amount: Money::zero(),
            vat_amount: breakdown.totals.vat_amount,
            service_charge: breakdown.totals.service_charge,
            total_amount: breakdown.totals.grand_total,
            payment_method: None,
            payment_status: PaymentStatus::Pending,
            eta_submission_status: EtaSubmissionStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let items = cart
            .items()
            .iter()
            .zip(&breakdown.lines)
            .enumerate()
            .map(|(position, (line, figures))| OrderItem {
                id: item_id(order_id, position),
                order_id: order_id_str.clone(),
                menu_item_id: line.menu_item_id.clone(),
                name_snapshot: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: figures.line_total,
                vat_amount: figures.vat_amount,
                created_at: now,
            })
            .collect();

        Ok(OrderDraft { order, items })
    }
}

/// Formats `ORD-YYYYMMDD-XXXXXXXX` from the order date and ID.
pub fn order_number(order_id: Uuid, at: DateTime<Utc>) -> String {
    let simple = order_id.simple().to_string().to_uppercase();
    format!("ORD-{}-{}", at.format("%Y%m%d"), &simple[..8])
}

// Item IDs are name-based (v5) under the order ID, so a draft is a pure
// function of its inputs.
fn item_id(order_id: Uuid, position: usize) -> String {
    Uuid::new_v5(&order_id, position.to_string().as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MenuItem;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn menu_item(id: &str, minor: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            category_id: None,
            name: format!("Dish {}", id),
            name_ar: None,
            sku: None,
            price: Money::from_minor(minor),
            is_available: true,
            created_at: Utc::now(),
        }
    }

    fn rates() -> (Rate, Rate) {
        (
            Rate::from_percentage(dec!(14)).unwrap(),
            Rate::from_percentage(dec!(10)).unwrap(),
        )
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 17, 19, 30, 0).unwrap()
    }

    fn order_uuid() -> Uuid {
        Uuid::parse_str("1a2b3c4d-0000-4000-8000-000000000000").unwrap()
    }

    #[test]
    fn test_draft_from_cart() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("a", 1000), 2).unwrap();
        cart.add_item(&menu_item("b", 550), 1).unwrap();

        let (vat, service) = rates();
        let draft = OrderDraft::from_cart(
            &cart,
            OrderType::DineIn,
            Some("7"),
            vat,
            service,
            order_uuid(),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(draft.order.order_number, "ORD-20260117-1A2B3C4D");
        assert_eq!(draft.order.table_number.as_deref(), Some("7"));
        assert_eq!(draft.order.subtotal.amount(), dec!(25.5));
        assert_eq!(draft.order.vat_amount.amount(), dec!(3.57));
        assert_eq!(draft.order.service_charge.amount(), dec!(2.55));
        assert_eq!(draft.order.total_amount.amount(), dec!(31.62));
        assert_eq!(draft.order.payment_status, PaymentStatus::Pending);
        assert_eq!(draft.order.eta_submission_status, EtaSubmissionStatus::Pending);

        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].total_price.amount(), dec!(20));
        assert_eq!(draft.items[0].vat_amount.amount(), dec!(2.8));
        assert_eq!(draft.items[1].order_id, draft.order.id);
        assert_ne!(draft.items[0].id, draft.items[1].id);
    }

    #[test]
    fn test_takeaway_drops_table_number() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("a", 1000), 1).unwrap();

        let (vat, service) = rates();
        let draft = OrderDraft::from_cart(
            &cart,
            OrderType::Takeaway,
            Some("7"),
            vat,
            service,
            order_uuid(),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(draft.order.table_number, None);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let (vat, service) = rates();
        let result = OrderDraft::from_cart(
            &Cart::new(),
            OrderType::Delivery,
            None,
            vat,
            service,
            order_uuid(),
            fixed_now(),
        );
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_draft_is_deterministic() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("a", 1000), 3).unwrap();
        let (vat, service) = rates();

        let build = || {
            OrderDraft::from_cart(
                &cart,
                OrderType::DineIn,
                None,
                vat,
                service,
                order_uuid(),
                fixed_now(),
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }
}
