//! # Error Types
//!
//! Domain-specific error types for mezza-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mezza-core errors (this file)                                         │
//! │  ├── CoreError        - Calculator, cart, order, stock errors          │
//! │  │   └── LineItemFault - Why a line item was rejected                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mezza-store errors (separate crate)                                   │
//! │  └── StoreError       - Data store failures (wraps CoreError)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Line Item Fault
// =============================================================================

/// The reason a line item was refused by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemFault {
    /// Unit price below zero.
    NegativePrice,
    /// Quantity of zero or less.
    NonPositiveQuantity,
    /// `unit_price × quantity` (or the running sum) left the decimal range.
    Overflow,
}

impl fmt::Display for LineItemFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LineItemFault::NegativePrice => "unit price is negative",
            LineItemFault::NonPositiveQuantity => "quantity must be at least 1",
            LineItemFault::Overflow => "amount is too large",
        };
        f.write_str(msg)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item handed to the order total calculator is unusable.
    ///
    /// ## When This Occurs
    /// - Negative unit price
    /// - Quantity of zero or below
    /// - A line (or the subtotal) too large for the decimal type
    ///
    /// The calculator returns no partial totals alongside this error.
    #[error("Invalid line item at position {index}: {reason}")]
    InvalidLineItem { index: usize, reason: LineItemFault },

    /// Menu item is not in the cart.
    #[error("Menu item {0} not in cart")]
    NotInCart(String),

    /// Menu item is switched off on the menu.
    #[error("Menu item {0} is not available")]
    ItemUnavailable(String),

    /// Order submission was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A restored cart lists the same menu item on two lines.
    #[error("Menu item {0} appears on more than one cart line")]
    DuplicateCartLine(String),

    /// A running total (report sum, stock level) left the decimal range.
    #[error("{0} is too large to total")]
    TotalOverflow(String),

    /// A stock movement was applied to an item it does not belong to.
    #[error("Movement for inventory item {movement_item_id} applied to {item_id}")]
    MovementMismatch {
        item_id: String,
        movement_item_id: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidLineItem error.
    pub fn invalid_line(index: usize, reason: LineItemFault) -> Self {
        CoreError::InvalidLineItem { index, reason }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_line_item_message() {
        let err = CoreError::invalid_line(2, LineItemFault::NegativePrice);
        assert_eq!(
            err.to_string(),
            "Invalid line item at position 2: unit price is negative"
        );

        let err = CoreError::invalid_line(0, LineItemFault::NonPositiveQuantity);
        assert_eq!(
            err.to_string(),
            "Invalid line item at position 0: quantity must be at least 1"
        );
    }

    #[test]
    fn test_total_overflow_message() {
        let err = CoreError::TotalOverflow("total_sales".to_string());
        assert_eq!(err.to_string(), "total_sales is too large to total");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "vat_rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        };
        assert_eq!(err.to_string(), "vat_rate must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
