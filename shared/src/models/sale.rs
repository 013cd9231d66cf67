//! Sales ledger models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only record of quantity sold against a pickup/product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub pickup_id: String,
    pub product_id: String,
    #[serde(default, with = "crate::lenient::decimal")]
    pub quantity_sold: Decimal,
    #[serde(default)]
    pub material_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub date: DateTime<Utc>,
}

impl Sale {
    /// UTC calendar day the sale was recorded on
    pub fn sold_on(&self) -> NaiveDate {
        self.date.date_naive()
    }
}
