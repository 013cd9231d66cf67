//! Generated pickup reports

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MaterialRecord, Totals};

/// Persisted summary report for one pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// "<pickupId>-<epoch millis>"
    pub id: String,
    pub pickup_id: String,
    pub created_at: DateTime<Utc>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub pickup_id: String,
    #[serde(default, with = "crate::lenient::date_option")]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub totals: Totals,
    pub charges: Charges,
    #[serde(default, with = "crate::lenient::decimal")]
    pub grand_total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    #[serde(default, with = "crate::lenient::decimal")]
    pub vehicle_charges: Decimal,
    #[serde(default, with = "crate::lenient::decimal")]
    pub labour_charges: Decimal,
}

impl ReportSummary {
    /// Summarize a material record: material value plus vehicle and labour charges
    pub fn for_record(record: &MaterialRecord) -> Self {
        let charges = Charges {
            vehicle_charges: record.vehicle_charges,
            labour_charges: record.labour_charges,
        };
        let grand_total = record
            .totals
            .total_value
            .saturating_add(charges.vehicle_charges)
            .saturating_add(charges.labour_charges);

        Self {
            pickup_id: record.pickup_id.clone(),
            pickup_date: record.pickup_date,
            client_name: record.client_name.clone(),
            totals: record.totals,
            charges,
            grand_total,
        }
    }
}

impl Report {
    pub fn new(summary: ReportSummary, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}-{}", summary.pickup_id, now.timestamp_millis()),
            pickup_id: summary.pickup_id.clone(),
            created_at: now,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_grand_total_and_id() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let record = MaterialRecord {
            id: Uuid::new_v4(),
            pickup_id: "PICKUP-20240110-0001".into(),
            lot_number: None,
            status: None,
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            client_name: Some("Acme".into()),
            client_contact: None,
            vehicle_number: None,
            driver_name: None,
            vehicle_charges: Decimal::from(300),
            labour_charges: Decimal::new(755, 1),
            materials: Vec::new(),
            totals: Totals {
                total_products: Decimal::from(3),
                total_weight: Decimal::ZERO,
                total_value: Decimal::from(250),
            },
            created_at: now,
            updated_at: now,
        };

        let report = Report::new(ReportSummary::for_record(&record), now);

        assert_eq!(report.summary.grand_total, Decimal::new(6255, 1));
        assert_eq!(report.id, format!("PICKUP-20240110-0001-{}", now.timestamp_millis()));
        assert_eq!(report.pickup_id, "PICKUP-20240110-0001");
    }
}
