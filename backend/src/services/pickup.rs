//! Pickup registry service
//!
//! Pickups are numbered per day and always belong to their company's lot,
//! which is created on the company's first pickup.

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::ids::next_pickup_id;
use shared::lenient::parse_date;
use shared::{
    require_text, FieldError, PaginatedResponse, Pagination, Pickup, PickupPatch,
    DEFAULT_PICKUP_STATUS,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::services::lot::LotService;
use crate::store::Store;

/// Look up pickups by their human-readable id
#[axum::async_trait]
pub trait PickupResolver: Send + Sync {
    async fn get_by_pickup_id(&self, pickup_id: &str) -> AppResult<Pickup>;
}

/// Pickup service for registry operations
#[derive(Clone)]
pub struct PickupService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

/// Input for creating a pickup
#[derive(Debug, Default, Deserialize)]
pub struct CreatePickupInput {
    pub company_name: Option<String>,
    /// `YYYY-MM-DD` or an RFC3339 timestamp
    pub pickup_date: Option<String>,
    pub status: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    #[serde(default, with = "shared::lenient::decimal_option")]
    pub vehicle_charges: Option<Decimal>,
    #[serde(default, with = "shared::lenient::decimal_option")]
    pub labour_charges: Option<Decimal>,
    pub client_contact: Option<String>,
}

/// Conjunctive pickup filters; blank values are ignored
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PickupFilter {
    /// Case-insensitive substring
    pub company_name: Option<String>,
    pub lot_number: Option<String>,
    pub status: Option<String>,
}

impl PickupFilter {
    fn matches(&self, pickup: &Pickup) -> bool {
        if let Some(name) = non_blank(&self.company_name) {
            if !pickup
                .company_name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(lot) = non_blank(&self.lot_number) {
            if pickup.lot_number != lot {
                return false;
            }
        }
        if let Some(status) = non_blank(&self.status) {
            if pickup.status != status {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PickupService {
    /// Create a new PickupService instance
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Create a pickup, resolving or creating the company's lot
    pub async fn create_pickup(&self, input: CreatePickupInput) -> AppResult<Pickup> {
        let company_name = require_text("company_name", input.company_name.as_deref())?.to_string();
        let raw_date = require_text("pickup_date", input.pickup_date.as_deref())?;
        let pickup_date = parse_date(raw_date).ok_or_else(|| {
            FieldError::new("pickup_date", "pickup_date must be a date (YYYY-MM-DD)")
        })?;

        // Lock order: pickups before lots
        let mut pickups = self.store.pickups.lock().await;
        let lot = LotService::new(self.store.clone(), self.clock.clone())
            .find_or_create_lot(&company_name)
            .await?;

        let now = self.clock.now();
        let pickup_id = next_pickup_id(pickups.records.iter().map(|p| p.pickup_id.as_str()), now);

        let pickup = Pickup {
            id: Uuid::new_v4(),
            pickup_id,
            company_name,
            lot_number: lot.lot_number,
            pickup_date: Some(pickup_date),
            status: input
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PICKUP_STATUS.to_string()),
            vehicle_number: input.vehicle_number,
            driver_name: input.driver_name,
            vehicle_charges: input.vehicle_charges.unwrap_or(Decimal::ZERO),
            labour_charges: input.labour_charges.unwrap_or(Decimal::ZERO),
            client_contact: input.client_contact,
            created_at: now,
            updated_at: now,
        };

        pickups.records.push(pickup.clone());
        pickups.commit().await?;

        tracing::info!(
            pickup_id = %pickup.pickup_id,
            lot_number = %pickup.lot_number,
            "Pickup created"
        );
        Ok(pickup)
    }

    /// List pickups matching the filter, newest first
    pub async fn list_pickups(
        &self,
        filter: &PickupFilter,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Pickup>> {
        let mut pickups: Vec<Pickup> = self
            .store
            .pickups
            .load()
            .await
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();

        pickups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pagination.paginate(pickups))
    }

    pub async fn get_pickup(&self, pickup_id: &str) -> AppResult<Pickup> {
        self.store
            .pickups
            .load()
            .await
            .into_iter()
            .find(|p| p.pickup_id == pickup_id)
            .ok_or_else(|| AppError::NotFound("Pickup".to_string()))
    }

    /// Merge the patch into an existing pickup
    pub async fn update_pickup(&self, pickup_id: &str, patch: PickupPatch) -> AppResult<Pickup> {
        let now = self.clock.now();
        let updated = self
            .store
            .pickups
            .update(|pickups| {
                let pickup = pickups
                    .iter_mut()
                    .find(|p| p.pickup_id == pickup_id)
                    .ok_or_else(|| AppError::NotFound("Pickup".to_string()))?;
                pickup.apply(patch, now);
                Ok(pickup.clone())
            })
            .await?;

        tracing::info!(pickup_id = %updated.pickup_id, "Pickup updated");
        Ok(updated)
    }

    /// Remove a pickup; returns false when it does not exist.
    ///
    /// The lot and any material record for the pickup are left in place.
    pub async fn delete_pickup(&self, pickup_id: &str) -> AppResult<bool> {
        let mut pickups = self.store.pickups.lock().await;
        let before = pickups.records.len();
        pickups.records.retain(|p| p.pickup_id != pickup_id);

        if pickups.records.len() == before {
            return Ok(false);
        }

        pickups.commit().await?;
        tracing::info!(pickup_id = %pickup_id, "Pickup deleted");
        Ok(true)
    }
}

#[axum::async_trait]
impl PickupResolver for PickupService {
    async fn get_by_pickup_id(&self, pickup_id: &str) -> AppResult<Pickup> {
        self.get_pickup(pickup_id).await
    }
}
