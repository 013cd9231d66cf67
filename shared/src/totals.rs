//! Totals engine for material line items

use rust_decimal::Decimal;

use crate::models::{MaterialItem, Totals};

/// Value of one line: the explicit `total_value`, else `quantity * unit_price`
pub fn line_value(item: &MaterialItem) -> Decimal {
    item.total_value
        .unwrap_or_else(|| item.quantity.saturating_mul(item.unit_price))
}

/// Sum quantity, weight and line value across all items
pub fn compute_totals(materials: &[MaterialItem]) -> Totals {
    materials.iter().fold(Totals::default(), |acc, item| {
        acc + Totals {
            total_products: item.quantity,
            total_weight: item.weight,
            total_value: line_value(item),
        }
    })
}

/// Reassign product ids as `P1..Pn` in array order, discarding supplied ids
pub fn normalize_product_ids(materials: Vec<MaterialItem>) -> Vec<MaterialItem> {
    materials
        .into_iter()
        .enumerate()
        .map(|(idx, item)| MaterialItem {
            product_id: format!("P{}", idx + 1),
            ..item
        })
        .collect()
}

/// Normalize ids and fill in every missing line value
pub fn prepare_materials(materials: Vec<MaterialItem>) -> Vec<MaterialItem> {
    normalize_product_ids(materials)
        .into_iter()
        .map(|item| MaterialItem {
            total_value: Some(line_value(&item)),
            ..item
        })
        .collect()
}
