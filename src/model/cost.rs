// src/model/cost.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::{DomainError, Result, ValidationError};

/// Parses an amount given as text, e.g. `"12.50"`.
pub fn parse_amount(field: &'static str, input: &str) -> std::result::Result<Decimal, ValidationError> {
    Decimal::from_str(input.trim()).map_err(|_| ValidationError::InvalidNumber {
        field,
        input: input.to_string(),
    })
}

/// Converts a floating point amount. NaN and infinities are rejected.
pub fn amount_from_f64(field: &'static str, value: f64) -> std::result::Result<Decimal, ValidationError> {
    Decimal::from_f64(value).ok_or_else(|| ValidationError::InvalidNumber {
        field,
        input: value.to_string(),
    })
}

pub(crate) fn non_empty(
    entity: &'static str,
    field: &'static str,
    value: String,
) -> std::result::Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(value)
}

pub(crate) fn non_negative(
    field: &'static str,
    value: Decimal,
) -> std::result::Result<Decimal, DomainError> {
    if value < Decimal::ZERO {
        return Err(DomainError::Negative { field, value });
    }
    Ok(value)
}

/// The amount of money spent on producing, storing or delivering goods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cost {
    name: String,
    value: Decimal,
}

impl Cost {
    pub fn new(name: impl Into<String>, value: Decimal) -> Result<Self> {
        Ok(Self {
            name: non_empty("cost", "name", name.into())?,
            value: non_negative("cost", value)?,
        })
    }

    /// Builds a cost from amount text such as `"0.25"`.
    pub fn parse(name: impl Into<String>, value: &str) -> Result<Self> {
        Self::new(name, parse_amount("cost", value)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = non_empty("cost", "name", name.into())?;
        Ok(())
    }

    pub fn set_value(&mut self, value: Decimal) -> Result<()> {
        self.value = non_negative("cost", value)?;
        Ok(())
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Costs attached to a storage center or a product, keyed by name.
///
/// At most one cost is kept per name; adding a cost under an existing name
/// replaces the previous entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostCollection {
    entries: BTreeMap<String, Cost>,
}

impl CostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the cost, returning the entry it replaced, if any.
    pub fn add(&mut self, cost: Cost) -> Option<Cost> {
        self.entries.insert(cost.name.clone(), cost)
    }

    /// Returns the stored cost, or a zero-valued cost for an unknown name.
    pub fn get(&self, name: &str) -> Cost {
        self.entries.get(name).cloned().unwrap_or_else(|| Cost {
            name: name.to_string(),
            value: Decimal::ZERO,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cost> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every stored cost, zero when empty.
    pub fn total(&self) -> std::result::Result<Decimal, DomainError> {
        self.entries
            .values()
            .try_fold(Decimal::ZERO, |acc, cost| acc.checked_add(cost.value))
            .ok_or(DomainError::Overflow("total cost"))
    }
}

impl Extend<Cost> for CostCollection {
    fn extend<I: IntoIterator<Item = Cost>>(&mut self, iter: I) {
        for cost in iter {
            self.add(cost);
        }
    }
}
