//! Lot models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grouping of all pickups collected from one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: Uuid,
    /// Dated sequence number (e.g., "LOT-20240110-001")
    pub lot_number: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lot {
    pub fn new(lot_number: String, company_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            lot_number,
            company_name: company_name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive exact match on the company name
    pub fn belongs_to(&self, company_name: &str) -> bool {
        self.company_name.to_lowercase() == company_name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belongs_to_ignores_case() {
        let lot = Lot::new("LOT-20240110-001".into(), "Acme Recycling", Utc::now());
        assert!(lot.belongs_to("acme recycling"));
        assert!(lot.belongs_to("ACME RECYCLING"));
        assert!(!lot.belongs_to("Acme"));
    }
}
