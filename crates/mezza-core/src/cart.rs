//! # Cart
//!
//! The point-of-sale cart. Owned by the caller; totals are recomputed from
//! the current lines on every read, so there is nothing to keep in sync.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Register Action          Method                  Cart Change           │
//! │  ───────────────          ──────                  ───────────           │
//! │                                                                         │
//! │  Tap menu item ──────────► add_item() ──────────► push / qty += n       │
//! │                                                                         │
//! │  Tap + / - ──────────────► change_quantity() ───► qty += Δ, drop if ≤ 0 │
//! │                                                                         │
//! │  Type quantity ──────────► set_quantity() ──────► qty = n, drop if 0    │
//! │                                                                         │
//! │  Tap trash ──────────────► remove_item() ───────► line removed          │
//! │                                                                         │
//! │  Order placed / Clear ───► clear() ─────────────► empty                 │
//! │                                                                         │
//! │  Any redraw ─────────────► totals() ────────────► compute(lines, ...)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};
use crate::totals::{compute, compute_breakdown, OrderBreakdown};
use crate::types::{LineItem, MenuItem, OrderTotals};
use crate::validation::{validate_price, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the cart.
///
/// Name and price are frozen when the item is first added, so a menu edit
/// made while the order is open does not change what the guest was quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Menu item ID (UUID)
    pub menu_item_id: String,

    /// Menu name at time of adding (frozen)
    pub name: String,

    /// Price at time of adding (frozen)
    pub unit_price: Money,

    /// Quantity in cart
    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart line from a menu item.
    pub fn from_menu_item(item: &MenuItem, quantity: i64) -> Self {
        CartItem {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// The line as the calculator sees it.
    #[inline]
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.unit_price, self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `menu_item_id` (adding again increases quantity)
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
///
/// A cart restored from JSON is checked against the same rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", try_from = "CartSnapshot")]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Wire form of a cart before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartSnapshot {
    items: Vec<CartItem>,
}

impl TryFrom<CartSnapshot> for Cart {
    type Error = CoreError;

    fn try_from(snapshot: CartSnapshot) -> CoreResult<Self> {
        if snapshot.items.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let mut seen = HashSet::with_capacity(snapshot.items.len());
        for line in &snapshot.items {
            if !seen.insert(line.menu_item_id.as_str()) {
                return Err(CoreError::DuplicateCartLine(line.menu_item_id.clone()));
            }
            validate_quantity(line.quantity)?;
            validate_price(line.unit_price)?;
        }

        Ok(Cart {
            items: snapshot.items,
        })
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds a menu item to the cart or increases its quantity.
    ///
    /// ## Errors
    /// - `ItemUnavailable` if the item is switched off on the menu
    /// - `Validation` if `quantity` is not in `1..=999`
    /// - `QuantityTooLarge` if the merged quantity would pass 999
    /// - `CartTooLarge` if a new line would exceed 100 lines
    pub fn add_item(&mut self, item: &MenuItem, quantity: i64) -> CoreResult<()> {
        if !item.is_available {
            return Err(CoreError::ItemUnavailable(item.id.clone()));
        }
        validate_quantity(quantity)?;

        if let Some(line) = self.find_mut(&item.id) {
            let new_qty = line.quantity.saturating_add(quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_menu_item(item, quantity));
        Ok(())
    }

    /// Adjusts a line's quantity by `delta`.
    ///
    /// A line whose quantity falls to zero or below is removed.
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i64) -> CoreResult<()> {
        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::NotInCart(menu_item_id.to_string()))?;

        let new_qty = line.quantity.saturating_add(delta);
        if new_qty <= 0 {
            return self.remove_item(menu_item_id);
        }
        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        line.quantity = new_qty;
        Ok(())
    }

    /// Sets a line's quantity. `0` removes the line.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(menu_item_id);
        }
        validate_quantity(quantity)?;

        let line = self
            .find_mut(menu_item_id)
            .ok_or_else(|| CoreError::NotInCart(menu_item_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by menu item ID.
    pub fn remove_item(&mut self, menu_item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.menu_item_id != menu_item_id);

        if self.items.len() == initial_len {
            Err(CoreError::NotInCart(menu_item_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in calculator form.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::line_item).collect()
    }

    /// Current totals for the given surcharge rates.
    pub fn totals(&self, vat_rate: Rate, service_rate: Rate) -> CoreResult<OrderTotals> {
        compute(&self.line_items(), vat_rate, service_rate)
    }

    /// Current totals with per-line figures.
    pub fn breakdown(&self, vat_rate: Rate, service_rate: Rate) -> CoreResult<OrderBreakdown> {
        compute_breakdown(&self.line_items(), vat_rate, service_rate)
    }

    fn find_mut(&mut self, menu_item_id: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| i.menu_item_id == menu_item_id)
    }
}
