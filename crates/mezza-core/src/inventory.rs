//! # Inventory
//!
//! Stock levels for ingredients and supplies, and the movements that
//! change them.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryMovement::manual(item, In,  5)  ──► quantity = +5             │
//! │  InventoryMovement::manual(item, Out, 2)  ──► quantity = -2             │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  InventoryItem::apply(&movement)  ──► current_stock += quantity         │
//! │                                                                         │
//! │  current_stock <= min_stock_level  ──► low stock                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is not floored at zero: a count that went negative shows up as
//! low stock until someone books it back in.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::ValidationResult;

/// `reference_type` recorded for adjustments entered by hand.
pub const MANUAL_ADJUSTMENT: &str = "manual_adjustment";

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum MovementType {
    /// Goods received.
    In,
    /// Goods used, wasted or sold.
    Out,
    /// A stock count correction, either sign.
    Adjustment,
}

/// A stocked ingredient or supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub name_ar: Option<String>,
    /// Unit of measure, e.g. "kg" or "pcs".
    pub unit: String,
    #[ts(type = "string")]
    pub current_stock: Decimal,
    #[ts(type = "string")]
    pub min_stock_level: Decimal,
    #[ts(type = "string")]
    pub reorder_point: Decimal,
    pub unit_cost: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// One change to an item's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryMovement {
    pub id: String,
    pub inventory_item_id: String,
    pub movement_type: MovementType,
    /// Signed: positive adds stock, negative removes it.
    #[ts(type = "string")]
    pub quantity: Decimal,
    pub unit_cost: Option<Money>,
    /// What caused the movement, e.g. [`MANUAL_ADJUSTMENT`].
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Whether the item is at or under its minimum level.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_level
    }

    /// Books a movement against this item.
    ///
    /// ## Errors
    /// - `MovementMismatch` if the movement is for another item
    /// - `TotalOverflow` if the new level leaves the decimal range
    pub fn apply(&mut self, movement: &InventoryMovement) -> CoreResult<()> {
        if movement.inventory_item_id != self.id {
            return Err(CoreError::MovementMismatch {
                item_id: self.id.clone(),
                movement_item_id: movement.inventory_item_id.clone(),
            });
        }

        self.current_stock = self
            .current_stock
            .checked_add(movement.quantity)
            .ok_or_else(|| CoreError::TotalOverflow("current_stock".to_string()))?;
        Ok(())
    }
}

impl InventoryMovement {
    /// Builds a hand-entered movement.
    ///
    /// `In` and `Out` take a positive quantity and sign it by direction.
    /// `Adjustment` takes the signed correction as given and must not be
    /// zero.
    pub fn manual(
        inventory_item_id: &str,
        movement_type: MovementType,
        quantity: Decimal,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let signed = match movement_type {
            MovementType::In | MovementType::Out if quantity <= Decimal::ZERO => {
                return Err(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }
                .into());
            }
            MovementType::Adjustment if quantity.is_zero() => {
                return Err(ValidationError::Required {
                    field: "quantity".to_string(),
                }
                .into());
            }
            MovementType::Out => -quantity,
            MovementType::In | MovementType::Adjustment => quantity,
        };

        Ok(InventoryMovement {
            id: id.to_string(),
            inventory_item_id: inventory_item_id.to_string(),
            movement_type,
            quantity: signed,
            unit_cost: None,
            reference_type: Some(MANUAL_ADJUSTMENT.to_string()),
            reference_id: None,
            notes: None,
            created_at: now,
        })
    }
}

/// Items at or under their minimum level, in input order.
pub fn low_stock(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).collect()
}

/// Validates a new inventory item's name, unit, levels and cost.
///
/// The opening stock must not be negative; later movements may take it
/// below zero.
pub fn validate_inventory_item(item: &InventoryItem) -> ValidationResult<()> {
    let name = item.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    if item.unit.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    for (field, level) in [
        ("current_stock", item.current_stock),
        ("min_stock_level", item.min_stock_level),
        ("reorder_point", item.reorder_point),
    ] {
        if level < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }
    }

    if item.unit_cost.is_negative() {
        return Err(ValidationError::Negative {
            field: "unit_cost".to_string(),
        });
    }

    Ok(())
}
