//! Material record service
//!
//! Exactly one record per pickup. Product ids and totals are derived on every
//! write that carries line items.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::lenient::parse_date;
use shared::{
    compute_totals, prepare_materials, require_text, validate_materials, MaterialItem,
    MaterialRecord, MaterialRecordPatch, PaginatedResponse, Pagination,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::services::pickup::PickupResolver;
use crate::store::Store;

/// Material service for line-item documents
#[derive(Clone)]
pub struct MaterialService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    pickups: Arc<dyn PickupResolver>,
}

/// Input for creating a material record.
///
/// Descriptive fields override the pickup's values when present and non-blank.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRecordInput {
    pub pickup_id: Option<String>,
    pub materials: Option<Vec<MaterialItem>>,
    pub pickup_date: Option<String>,
    pub client_name: Option<String>,
    pub client_contact: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    #[serde(default, with = "shared::lenient::decimal_option")]
    pub vehicle_charges: Option<Decimal>,
    #[serde(default, with = "shared::lenient::decimal_option")]
    pub labour_charges: Option<Decimal>,
}

/// Material record filters; blank values are ignored
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MaterialRecordFilter {
    /// Substring of pickup id or client name
    pub q: Option<String>,
    /// Substring of client name
    pub company_name: Option<String>,
    pub lot_number: Option<String>,
    pub status: Option<String>,
}

impl MaterialRecordFilter {
    fn matches(&self, record: &MaterialRecord) -> bool {
        if let Some(term) = non_blank(&self.q) {
            if !record.matches_term(term) {
                return false;
            }
        }
        if let Some(name) = non_blank(&self.company_name) {
            let name = name.to_lowercase();
            let hit = record
                .client_name
                .as_deref()
                .is_some_and(|client| client.to_lowercase().contains(&name));
            if !hit {
                return false;
            }
        }
        if let Some(lot) = non_blank(&self.lot_number) {
            if record.lot_number.as_deref() != Some(lot) {
                return false;
            }
        }
        if let Some(status) = non_blank(&self.status) {
            if record.status.as_deref() != Some(status) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>, pickups: Arc<dyn PickupResolver>) -> Self {
        Self {
            store,
            clock,
            pickups,
        }
    }

    /// Attach line items to a pickup
    pub async fn create_record(&self, input: CreateMaterialRecordInput) -> AppResult<MaterialRecord> {
        let pickup_id = require_text("pickupId", input.pickup_id.as_deref())?.to_string();
        let materials = input.materials.unwrap_or_default();
        validate_materials(&materials)?;

        let pickup = self.pickups.get_by_pickup_id(&pickup_id).await?;

        let materials = prepare_materials(materials);
        let totals = compute_totals(&materials);
        let pickup_date = input
            .pickup_date
            .as_deref()
            .and_then(parse_date)
            .or(pickup.pickup_date);

        let now = self.clock.now();
        let record = MaterialRecord {
            id: Uuid::new_v4(),
            pickup_id: pickup.pickup_id.clone(),
            lot_number: Some(pickup.lot_number.clone()),
            status: Some(pickup.status.clone()),
            pickup_date,
            client_name: present(input.client_name).or(Some(pickup.company_name.clone())),
            client_contact: present(input.client_contact).or(pickup.client_contact.clone()),
            vehicle_number: present(input.vehicle_number).or(pickup.vehicle_number.clone()),
            driver_name: present(input.driver_name).or(pickup.driver_name.clone()),
            vehicle_charges: input.vehicle_charges.unwrap_or(pickup.vehicle_charges),
            labour_charges: input.labour_charges.unwrap_or(pickup.labour_charges),
            materials,
            totals,
            created_at: now,
            updated_at: now,
        };

        let record = self
            .store
            .materials
            .update(move |records| {
                if records.iter().any(|r| r.pickup_id == record.pickup_id) {
                    return Err(AppError::DuplicateEntry("pickupId".to_string()));
                }
                records.push(record.clone());
                Ok(record)
            })
            .await?;

        tracing::info!(
            pickup_id = %record.pickup_id,
            items = record.materials.len(),
            total_value = %record.totals.total_value,
            "Material record created"
        );
        Ok(record)
    }

    pub async fn get_record(&self, pickup_id: &str) -> AppResult<MaterialRecord> {
        self.store
            .materials
            .load()
            .await
            .into_iter()
            .find(|r| r.pickup_id == pickup_id)
            .ok_or_else(|| AppError::NotFound("Material record".to_string()))
    }

    /// List records in stored order
    pub async fn list_records(
        &self,
        filter: &MaterialRecordFilter,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<MaterialRecord>> {
        let records: Vec<MaterialRecord> = self
            .store
            .materials
            .load()
            .await
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();

        Ok(pagination.paginate(records))
    }

    /// All stored records, unfiltered
    pub async fn all_records(&self) -> Vec<MaterialRecord> {
        self.store.materials.load().await
    }

    /// Replace the provided fields; totals change only with new line items
    pub async fn update_record(
        &self,
        pickup_id: &str,
        patch: MaterialRecordPatch,
    ) -> AppResult<MaterialRecord> {
        if let Some(materials) = &patch.materials {
            validate_materials(materials)?;
        }

        let now = self.clock.now();
        let updated = self
            .store
            .materials
            .update(|records| {
                let record = records
                    .iter_mut()
                    .find(|r| r.pickup_id == pickup_id)
                    .ok_or_else(|| AppError::NotFound("Material record".to_string()))?;
                record.apply(patch, now);
                Ok(record.clone())
            })
            .await?;

        tracing::info!(pickup_id = %updated.pickup_id, "Material record updated");
        Ok(updated)
    }

    /// Remove and return the record for a pickup
    pub async fn delete_record(&self, pickup_id: &str) -> AppResult<MaterialRecord> {
        let removed = self
            .store
            .materials
            .update(|records| {
                let idx = records
                    .iter()
                    .position(|r| r.pickup_id == pickup_id)
                    .ok_or_else(|| AppError::NotFound("Material record".to_string()))?;
                Ok(records.remove(idx))
            })
            .await?;

        tracing::info!(pickup_id = %removed.pickup_id, "Material record deleted");
        Ok(removed)
    }
}
