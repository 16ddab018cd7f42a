//! # Order Total Calculator
//!
//! Turns a list of line items and two surcharge rates into order totals.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lines ──► validate each ──► line_total = price × qty ──► Σ = subtotal │
//! │                                                                         │
//! │  subtotal × vat_rate      ──► vat_amount                               │
//! │  subtotal × service_rate  ──► service_charge                           │
//! │                                                                         │
//! │  grand_total = subtotal + vat_amount + service_charge                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both surcharges are taken on the subtotal, never on each other.
//! Nothing is rounded; `Money`'s display rounds at the edge.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, LineItemFault};
use crate::money::{Money, Rate};
use crate::types::{LineItem, LineTotal, OrderTotals};

/// Totals plus the per-line figures they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderBreakdown {
    /// One entry per input line, same order.
    pub lines: Vec<LineTotal>,
    pub totals: OrderTotals,
}

/// Computes the order totals.
///
/// ## Errors
/// `CoreError::InvalidLineItem` for a negative price, a quantity below 1, or a
/// line that overflows the decimal range. The first offending line is
/// reported and no totals are returned.
///
/// ## Example
/// ```rust
/// use mezza_core::{compute, LineItem, Money, OrderTotals, Rate};
/// use rust_decimal::Decimal;
///
/// let vat = Rate::from_fraction(Decimal::new(14, 2)).unwrap();
/// let service = Rate::from_fraction(Decimal::new(10, 2)).unwrap();
///
/// let totals = compute(&[], vat, service).unwrap();
/// assert_eq!(totals, OrderTotals::zero());
/// ```
pub fn compute(lines: &[LineItem], vat_rate: Rate, service_rate: Rate) -> CoreResult<OrderTotals> {
    let mut subtotal = Money::zero();

    for (index, line) in lines.iter().enumerate() {
        let line_total = line_total(index, line)?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(CoreError::invalid_line(index, LineItemFault::Overflow))?;
    }

    surcharge(subtotal, vat_rate, service_rate, lines.len())
}

/// Same as [`compute`], also returning each line's total and VAT share.
///
/// Per-line VAT uses the same rate as the order, so the line VAT amounts
/// sum to `totals.vat_amount`.
pub fn compute_breakdown(
    lines: &[LineItem],
    vat_rate: Rate,
    service_rate: Rate,
) -> CoreResult<OrderBreakdown> {
    let mut subtotal = Money::zero();
    let mut line_totals = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let total = line_total(index, line)?;
        let vat_amount = total
            .apply_rate(vat_rate)
            .ok_or(CoreError::invalid_line(index, LineItemFault::Overflow))?;
        subtotal = subtotal
            .checked_add(total)
            .ok_or(CoreError::invalid_line(index, LineItemFault::Overflow))?;

        line_totals.push(LineTotal {
            line_total: total,
            vat_amount,
        });
    }

    let totals = surcharge(subtotal, vat_rate, service_rate, lines.len())?;

    Ok(OrderBreakdown {
        lines: line_totals,
        totals,
    })
}

fn line_total(index: usize, line: &LineItem) -> CoreResult<Money> {
    if line.unit_price.is_negative() {
        return Err(CoreError::invalid_line(index, LineItemFault::NegativePrice));
    }

    if line.quantity < 1 {
        return Err(CoreError::invalid_line(
            index,
            LineItemFault::NonPositiveQuantity,
        ));
    }

    line.unit_price
        .checked_mul_quantity(line.quantity)
        .ok_or(CoreError::invalid_line(index, LineItemFault::Overflow))
}

// Overflow past the last line is blamed on the last line: it is the one that
// pushed the subtotal out of range.
fn surcharge(
    subtotal: Money,
    vat_rate: Rate,
    service_rate: Rate,
    line_count: usize,
) -> CoreResult<OrderTotals> {
    let overflow = || CoreError::invalid_line(line_count.saturating_sub(1), LineItemFault::Overflow);

    let vat_amount = subtotal.apply_rate(vat_rate).ok_or_else(overflow)?;
    let service_charge = subtotal.apply_rate(service_rate).ok_or_else(overflow)?;
    let grand_total = subtotal
        .checked_add(vat_amount)
        .and_then(|sum| sum.checked_add(service_charge))
        .ok_or_else(overflow)?;

    Ok(OrderTotals {
        subtotal,
        vat_amount,
        service_charge,
        grand_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
