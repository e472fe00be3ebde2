// src/strategy/optimization.rs

//! Module for inventory optimization calculations.
//!
//! This module provides the Economic Order Quantity (EOQ) model: the order
//! size that balances the cost of placing orders against the cost of
//! holding stock.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::DomainError;

/// Total annual inventory cost for a given order quantity.
///
/// Formula: T(Q) = K·D/Q + h·Q/2
///
/// Where:
/// - D = annual demand quantity
/// - K = cost per order (ordering, shipping, handling; not the cost of goods)
/// - h = annual holding cost per unit (warehouse space, insurance, capital...)
///
/// Returns `None` for a zero quantity or when the result leaves the decimal range.
pub fn total_inventory_cost(
    demand: Decimal,
    order_cost: Decimal,
    holding_cost: Decimal,
    quantity: Decimal,
) -> Option<Decimal> {
    if quantity.is_zero() {
        return None;
    }
    let ordering = order_cost.checked_mul(demand)?.checked_div(quantity)?;
    let holding = holding_cost.checked_mul(quantity)?.checked_div(Decimal::TWO)?;
    ordering.checked_add(holding)
}

/// Calculates the Economic Order Quantity.
///
/// # Formula
/// Q* = sqrt(2·D·K / h)
///
/// Setting dT/dQ = -K·D/Q² + h/2 to zero gives Q² = 2DK/h. Demand is
/// assumed constant and lead time known. The result is not rounded to
/// whole units.
///
/// # Errors
/// Each zero input is its own failure, checked in the order demand,
/// holding cost, order cost.
pub fn economic_order_quantity(
    demand: Decimal,
    order_cost: Decimal,
    holding_cost: Decimal,
) -> Result<Decimal, DomainError> {
    if demand <= Decimal::ZERO {
        return Err(DomainError::DemandNotPositive);
    }
    if holding_cost <= Decimal::ZERO {
        return Err(DomainError::StorageCostNotPositive);
    }
    if order_cost <= Decimal::ZERO {
        return Err(DomainError::VariableCostNotPositive);
    }

    let q_squared = Decimal::TWO
        .checked_mul(demand)
        .and_then(|v| v.checked_mul(order_cost))
        .and_then(|v| v.checked_div(holding_cost))
        .ok_or(DomainError::Overflow("economic order quantity"))?;

    q_squared
        .sqrt()
        .ok_or(DomainError::Overflow("economic order quantity"))
}
