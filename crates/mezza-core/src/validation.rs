//! # Validation Module
//!
//! Input validation utilities for Mezza POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard forms                                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (business rules)                                 │
//! │  └── Cart, menu, settings input                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order total calculator                                       │
//! │  └── Rejects invalid line items outright                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mezza_core::validation::{validate_menu_item_name, validate_quantity};
//!
//! assert!(validate_menu_item_name("Koshari").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_menu_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

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

    Ok(())
}

/// Validates a table number and normalises blanks to `None`.
///
/// ## Example
/// ```rust
/// use mezza_core::validation::validate_table_number;
///
/// assert_eq!(validate_table_number(Some(" T4 ")).unwrap(), Some("T4".to_string()));
/// assert_eq!(validate_table_number(Some("   ")).unwrap(), None);
/// assert_eq!(validate_table_number(None).unwrap(), None);
/// ```
pub fn validate_table_number(table: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(table) = table.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if table.chars().count() > 20 {
        return Err(ValidationError::TooLong {
            field: "table_number".to_string(),
            max: 20,
        });
    }

    Ok(Some(table.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a menu price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
///
/// ## Example
/// ```rust
/// use mezza_core::money::Money;
/// use mezza_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_minor(4550)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a surcharge rate entered as a percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_rate_percentage(percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_menu_item_name() {
        assert!(validate_menu_item_name("Molokhia with Rice").is_ok());
        assert!(validate_menu_item_name("فول مدمس").is_ok());
        assert!(validate_menu_item_name("").is_err());
        assert!(validate_menu_item_name("   ").is_err());
        assert!(validate_menu_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_table_number() {
        assert_eq!(validate_table_number(Some("12")).unwrap(), Some("12".into()));
        assert!(validate_table_number(Some(&"9".repeat(21))).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(1)).is_ok());
        assert_eq!(
            validate_price(Money::from_minor(-1)),
            Err(ValidationError::Negative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rate_percentage() {
        assert!(validate_rate_percentage(dec!(0)).is_ok());
        assert!(validate_rate_percentage(dec!(14)).is_ok());
        assert!(validate_rate_percentage(dec!(100)).is_ok());
        assert!(validate_rate_percentage(dec!(-0.5)).is_err());
        assert!(validate_rate_percentage(dec!(100.01)).is_err());
    }
}
