//! Lot registry: one lot per company, numbered per day

use shared::ids::next_lot_number;
use shared::{Lot, PaginatedResponse, Pagination};
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Lot service for resolving and listing company lots
#[derive(Clone)]
pub struct LotService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl LotService {
    /// Create a new LotService instance
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Return the company's lot, creating and persisting one on first use.
    ///
    /// Matching is case-insensitive on the exact company name.
    pub async fn find_or_create_lot(&self, company_name: &str) -> AppResult<Lot> {
        let mut lots = self.store.lots.lock().await;

        if let Some(existing) = lots.records.iter().find(|lot| lot.belongs_to(company_name)) {
            return Ok(existing.clone());
        }

        let now = self.clock.now();
        let lot_number = next_lot_number(lots.records.iter().map(|l| l.lot_number.as_str()), now);
        let lot = Lot::new(lot_number, company_name, now);

        lots.records.push(lot.clone());
        lots.commit().await?;

        tracing::info!(lot_number = %lot.lot_number, company = %lot.company_name, "Lot created");
        Ok(lot)
    }

    /// List lots, newest first, optionally filtered by company name substring
    pub async fn list_lots(
        &self,
        company_name: Option<&str>,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Lot>> {
        let needle = company_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut lots: Vec<Lot> = self
            .store
            .lots
            .load()
            .await
            .into_iter()
            .filter(|lot| match &needle {
                Some(n) => lot.company_name.to_lowercase().contains(n),
                None => true,
            })
            .collect();

        lots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pagination.paginate(lots))
    }

    /// Get a lot by its lot number
    pub async fn get_lot(&self, lot_number: &str) -> AppResult<Lot> {
        self.store
            .lots
            .load()
            .await
            .into_iter()
            .find(|lot| lot.lot_number == lot_number)
            .ok_or_else(|| AppError::NotFound("Lot".to_string()))
    }
}
