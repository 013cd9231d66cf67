//! Dashboard analytics rollup

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MaterialRecord, Sale, Totals};

/// Label used for line items without a material type
pub const UNTYPED_MATERIAL: &str = "other";

/// Summary metrics combining material records with the sales ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub totals: Totals,
    /// Quantity collected per material type
    #[serde(with = "crate::lenient::decimal_map")]
    pub by_type: BTreeMap<String, Decimal>,
    pub today: DailySales,
    #[serde(with = "crate::lenient::decimal")]
    pub sold_overall: Decimal,
    /// Never negative; oversell clamps to zero
    #[serde(with = "crate::lenient::decimal")]
    pub inventory_left: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[serde(with = "crate::lenient::decimal")]
    pub sold_today: Decimal,
    pub date: NaiveDate,
}

impl AnalyticsSummary {
    /// Roll up stored records and sales as of the given UTC day
    pub fn compute(records: &[MaterialRecord], sales: &[Sale], today: NaiveDate) -> Self {
        let totals = records
            .iter()
            .fold(Totals::default(), |acc, record| acc + record.totals);

        let mut by_type: BTreeMap<String, Decimal> = BTreeMap::new();
        for item in records.iter().flat_map(|r| r.materials.iter()) {
            let key = match item.material_type.as_deref() {
                Some(t) if !t.is_empty() => t.to_string(),
                _ => UNTYPED_MATERIAL.to_string(),
            };
            let entry = by_type.entry(key).or_insert(Decimal::ZERO);
            *entry = entry.saturating_add(item.quantity);
        }

        let sold_overall = sales
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.quantity_sold));
        let sold_today = sales
            .iter()
            .filter(|s| s.sold_on() == today)
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.quantity_sold));

        let inventory_left = totals
            .total_products
            .saturating_sub(sold_overall)
            .max(Decimal::ZERO);

        Self {
            totals,
            by_type,
            today: DailySales {
                sold_today,
                date: today,
            },
            sold_overall,
            inventory_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialItem;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn record(items: &[(Option<&str>, i64)]) -> MaterialRecord {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let materials: Vec<MaterialItem> = items
            .iter()
            .map(|(kind, qty)| MaterialItem {
                material_type: kind.map(str::to_string),
                quantity: Decimal::from(*qty),
                ..Default::default()
            })
            .collect();
        MaterialRecord {
            id: Uuid::new_v4(),
            pickup_id: "PICKUP-20240110-0001".into(),
            lot_number: None,
            status: None,
            pickup_date: None,
            client_name: None,
            client_contact: None,
            vehicle_number: None,
            driver_name: None,
            vehicle_charges: Decimal::ZERO,
            labour_charges: Decimal::ZERO,
            totals: crate::totals::compute_totals(&materials),
            materials,
            created_at: now,
            updated_at: now,
        }
    }

    fn sale(qty: i64, day: u32) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            pickup_id: "PICKUP-20240110-0001".into(),
            product_id: "P1".into(),
            quantity_sold: Decimal::from(qty),
            material_type: None,
            name: None,
            date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_untyped_and_empty_types_grouped_as_other() {
        let summary = AnalyticsSummary::compute(
            &[record(&[(None, 2), (Some(""), 3), (Some("metal"), 1)])],
            &[],
            today(),
        );
        assert_eq!(summary.by_type.get(UNTYPED_MATERIAL), Some(&Decimal::from(5)));
        assert_eq!(summary.by_type.get("metal"), Some(&Decimal::from(1)));
    }

    #[test]
    fn test_sold_today_uses_utc_day() {
        let summary = AnalyticsSummary::compute(
            &[record(&[(Some("metal"), 10)])],
            &[sale(2, 9), sale(3, 10), sale(1, 10)],
            today(),
        );
        assert_eq!(summary.sold_overall, Decimal::from(6));
        assert_eq!(summary.today.sold_today, Decimal::from(4));
        assert_eq!(summary.inventory_left, Decimal::from(4));
    }

    proptest! {
        #[test]
        fn prop_inventory_left_non_negative(
            collected in prop::collection::vec(0i64..50, 0..6),
            sold in prop::collection::vec(1i64..80, 0..6)
        ) {
            let items: Vec<(Option<&str>, i64)> = collected.iter().map(|q| (Some("paper"), *q)).collect();
            let sales: Vec<Sale> = sold.iter().map(|q| sale(*q, 10)).collect();
            let summary = AnalyticsSummary::compute(&[record(&items)], &sales, today());

            prop_assert!(summary.inventory_left >= Decimal::ZERO);
            prop_assert!(summary.inventory_left <= summary.totals.total_products);
        }
    }
}
