//! WebAssembly module for the Waste Operations Tracker dashboard
//!
//! Provides the live preview on the material entry form:
//! - Line totals as quantity and unit price are typed
//! - Record totals using the same engine as the server
//! - Form completeness percentage
//! - Line item validation before submit

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::totals::*;

/// Fields counted for the pickup header of the entry form
const HEADER_FIELDS: [&str; 8] = [
    "pickupId",
    "pickupDate",
    "clientName",
    "clientContact",
    "vehicleNumber",
    "driverName",
    "vehicleCharges",
    "labourCharges",
];

/// Fields counted for every material line
const LINE_FIELDS: [&str; 7] = [
    "productId",
    "materialType",
    "quantity",
    "weight",
    "unitPrice",
    "totalValue",
    "condition",
];

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("waste-ops preview module loaded"));
}

/// Value of one line rounded to cents; non-finite input counts as zero
#[wasm_bindgen]
pub fn calculate_line_total(quantity: f64, unit_price: f64) -> f64 {
    let quantity = Decimal::try_from(quantity).unwrap_or(Decimal::ZERO);
    let unit_price = Decimal::try_from(unit_price).unwrap_or(Decimal::ZERO);
    quantity
        .saturating_mul(unit_price)
        .round_dp(2)
        .to_f64()
        .unwrap_or(0.0)
}

/// Totals for a JSON array of line items, returned as JSON
#[wasm_bindgen]
pub fn calculate_record_totals(materials_json: &str) -> Result<String, JsValue> {
    record_totals(materials_json).map_err(|e| JsValue::from_str(&e))
}

/// Line items with positional product ids and filled line values, as JSON
#[wasm_bindgen]
pub fn prepare_material_lines(materials_json: &str) -> Result<String, JsValue> {
    prepared_lines(materials_json).map_err(|e| JsValue::from_str(&e))
}

/// Percentage of filled form fields, 0..=100
#[wasm_bindgen]
pub fn calculate_form_completeness(form_json: &str) -> Result<u32, JsValue> {
    let form: Value = serde_json::from_str(form_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid form JSON: {}", e)))?;
    Ok(form_completeness(&form))
}

/// First validation problem in the line items, or `None` when they are valid
#[wasm_bindgen]
pub fn validate_material_lines(materials_json: &str) -> Option<String> {
    match parse_lines(materials_json) {
        Ok(materials) => shared::validate_materials(&materials)
            .err()
            .map(|e| e.to_string()),
        Err(e) => Some(e),
    }
}

fn parse_lines(materials_json: &str) -> Result<Vec<MaterialItem>, String> {
    serde_json::from_str(materials_json).map_err(|e| format!("Invalid materials JSON: {}", e))
}

fn record_totals(materials_json: &str) -> Result<String, String> {
    let materials = parse_lines(materials_json)?;
    serde_json::to_string(&compute_totals(&materials)).map_err(|e| e.to_string())
}

fn prepared_lines(materials_json: &str) -> Result<String, String> {
    let materials = prepare_materials(parse_lines(materials_json)?);
    serde_json::to_string(&materials).map_err(|e| e.to_string())
}

/// Browser truthiness: empty strings, zero, `false` and `null` are unfilled
fn is_filled(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

fn form_completeness(form: &Value) -> u32 {
    let mut total = HEADER_FIELDS.len();
    let mut filled = HEADER_FIELDS
        .iter()
        .filter(|field| is_filled(form.get(**field)))
        .count();

    let lines = form
        .get("materials")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for line in lines {
        total += LINE_FIELDS.len();
        filled += LINE_FIELDS
            .iter()
            .filter(|field| is_filled(line.get(**field)))
            .count();
    }

    ((filled as f64 / total as f64) * 100.0).round() as u32
}
