//! Pickup models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to pickups created without one
pub const DEFAULT_PICKUP_STATUS: &str = "pending";

/// A single collection event at a client site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: Uuid,
    /// Dated sequence number (e.g., "PICKUP-20240110-0001")
    pub pickup_id: String,
    pub company_name: String,
    /// Weak reference to the company's lot
    pub lot_number: String,
    #[serde(default, with = "crate::lenient::date_option")]
    pub pickup_date: Option<NaiveDate>,
    pub status: String,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default, with = "crate::lenient::decimal")]
    pub vehicle_charges: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub labour_charges: Decimal,
    #[serde(default)]
    pub client_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a pickup that may change after creation.
///
/// Identity fields (`id`, `pickup_id`, `lot_number`, `company_name`,
/// `created_at`) have no representation here, so an update can never
/// overwrite them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickupPatch {
    #[serde(default, with = "crate::lenient::date_option")]
    pub pickup_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    #[serde(default, with = "crate::lenient::decimal_option")]
    pub vehicle_charges: Option<Decimal>,
    #[serde(default, with = "crate::lenient::decimal_option")]
    pub labour_charges: Option<Decimal>,
    pub client_contact: Option<String>,
}

impl Pickup {
    /// Merge the provided fields and refresh `updated_at`
    pub fn apply(&mut self, patch: PickupPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.pickup_date {
            self.pickup_date = Some(date);
        }
        if let Some(status) = patch.status {
            self.status = status;
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
        if let Some(contact) = patch.client_contact {
            self.client_contact = Some(contact);
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Pickup {
        let created = DateTime::parse_from_rfc3339("2024-01-10T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Pickup {
            id: Uuid::new_v4(),
            pickup_id: "PICKUP-20240110-0001".into(),
            company_name: "Acme".into(),
            lot_number: "LOT-20240110-001".into(),
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            status: DEFAULT_PICKUP_STATUS.into(),
            vehicle_number: None,
            driver_name: None,
            vehicle_charges: Decimal::ZERO,
            labour_charges: Decimal::ZERO,
            client_contact: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_patch_ignores_identity_fields() {
        let mut pickup = sample();
        let original = pickup.clone();
        let patch: PickupPatch = serde_json::from_value(json!({
            "pickup_id": "PICKUP-19990101-9999",
            "lot_number": "LOT-19990101-999",
            "company_name": "Other",
            "status": "completed",
            "labour_charges": "150"
        }))
        .unwrap();

        let now = Utc::now();
        pickup.apply(patch, now);

        assert_eq!(pickup.pickup_id, original.pickup_id);
        assert_eq!(pickup.lot_number, original.lot_number);
        assert_eq!(pickup.company_name, original.company_name);
        assert_eq!(pickup.created_at, original.created_at);
        assert_eq!(pickup.status, "completed");
        assert_eq!(pickup.labour_charges, Decimal::from(150));
        assert_eq!(pickup.updated_at, now);
    }

    #[test]
    fn test_pickup_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["pickup_date"], json!("2024-01-10"));
        assert_eq!(value["vehicle_charges"], json!(0));
        assert_eq!(value["status"], json!("pending"));
    }
}
