//! Input validation for the Waste Operations Tracker

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::MaterialItem;

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Required free-text field: present and not blank
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, FieldError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(FieldError::new(field, format!("{} is required", field))),
    }
}

/// Required quantity: present, numeric and non-zero.
///
/// Zero is rejected the same way a missing value is; negative quantities are
/// rejected as well.
pub fn require_quantity(field: &str, value: Option<Decimal>) -> Result<Decimal, FieldError> {
    match value {
        Some(q) if q > Decimal::ZERO => Ok(q),
        Some(q) if q < Decimal::ZERO => {
            Err(FieldError::new(field, format!("{} cannot be negative", field)))
        }
        _ => Err(FieldError::new(field, format!("{} is required", field))),
    }
}

/// Line items must carry whole, non-negative quantities and non-negative amounts
pub fn validate_materials(materials: &[MaterialItem]) -> Result<(), FieldError> {
    for (idx, item) in materials.iter().enumerate() {
        let field = |name: &str| format!("materials[{}].{}", idx, name);

        if item.quantity < Decimal::ZERO {
            return Err(FieldError::new(field("quantity"), "Quantity cannot be negative"));
        }
        if !item.quantity.fract().is_zero() {
            return Err(FieldError::new(field("quantity"), "Quantity must be a whole number"));
        }
        if item.weight < Decimal::ZERO {
            return Err(FieldError::new(field("weight"), "Weight cannot be negative"));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(FieldError::new(field("unitPrice"), "Unit price cannot be negative"));
        }
        if item.total_value.is_some_and(|v| v < Decimal::ZERO) {
            return Err(FieldError::new(field("totalValue"), "Total value cannot be negative"));
        }
    }
    Ok(())
}
