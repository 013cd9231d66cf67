//! Material line items and the per-pickup material record

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use uuid::Uuid;

/// One line of collected material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    /// Positional id ("P1".."Pn"), reassigned on every write
    #[serde(default)]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub material_type: Option<String>,
    #[serde(default, with = "crate::lenient::decimal")]
    pub quantity: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub weight: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub unit_price: Decimal,
    /// Explicit line value; `quantity * unit_price` when absent
    #[serde(
        default,
        with = "crate::lenient::decimal_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_value: Option<Decimal>,
    #[serde(default)]
    pub condition: Option<String>,
}

/// Aggregate count, weight and value of a set of line items
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(default, with = "crate::lenient::decimal")]
    pub total_products: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub total_weight: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub total_value: Decimal,
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals {
            total_products: self.total_products.saturating_add(other.total_products),
            total_weight: self.total_weight.saturating_add(other.total_weight),
            total_value: self.total_value.saturating_add(other.total_value),
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Totals) {
        *self = *self + other;
    }
}

/// Line-item document attached to exactly one pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: Uuid,
    pub pickup_id: String,
    #[serde(default)]
    pub lot_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "crate::lenient::date_option")]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_contact: Option<String>,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default, with = "crate::lenient::decimal")]
    pub vehicle_charges: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub labour_charges: Decimal,
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub totals: Totals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a material record; only provided fields are replaced
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecordPatch {
    #[serde(default, with = "crate::lenient::date_option")]
    pub pickup_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    #[serde(default, with = "crate::lenient::decimal_option")]
    pub vehicle_charges: Option<Decimal>,
    #[serde(default, with = "crate::lenient::decimal_option")]
    pub labour_charges: Option<Decimal>,
    pub materials: Option<Vec<MaterialItem>>,
}

impl MaterialRecord {
    /// Merge the provided fields.
    ///
    /// Totals are recomputed only when `materials` is part of the patch; an
    /// update touching other fields keeps the stored totals as they are.
    pub fn apply(&mut self, patch: MaterialRecordPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.pickup_date {
            self.pickup_date = Some(date);
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(name) = patch.client_name {
            self.client_name = Some(name);
        }
        if let Some(contact) = patch.client_contact {
            self.client_contact = Some(contact);
        }
        if let Some(vehicle_number) = patch.vehicle_number {
            self.vehicle_number = Some(vehicle_number);
        }
        if let Some(driver_name) = patch.driver_name {
            self.driver_name = Some(driver_name);
        }
        if let Some(charges) = patch.vehicle_charges {
            self.vehicle_charges = charges;
        }
        if let Some(charges) = patch.labour_charges {
            self.labour_charges = charges;
        }
        if let Some(materials) = patch.materials {
            self.materials = crate::totals::prepare_materials(materials);
            self.totals = crate::totals::compute_totals(&self.materials);
        }
        self.updated_at = now;
    }

    /// Case-insensitive substring match on pickup id or client name
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.pickup_id.to_lowercase().contains(&term)
            || self
                .client_name
                .as_deref()
                .map(|name| name.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}
