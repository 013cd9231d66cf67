//! Analytics rollup over material records and the sales ledger

use shared::AnalyticsSummary;
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::services::{material::MaterialService, sales::SalesService};

/// Computes dashboard metrics at query time
#[derive(Clone)]
pub struct AnalyticsService {
    materials: MaterialService,
    sales: SalesService,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    pub fn new(materials: MaterialService, sales: SalesService, clock: Arc<dyn Clock>) -> Self {
        Self {
            materials,
            sales,
            clock,
        }
    }

    pub async fn summarize(&self) -> AppResult<AnalyticsSummary> {
        let records = self.materials.all_records().await;
        let sales = self.sales.all_sales().await;
        let today = self.clock.today();

        let summary = AnalyticsSummary::compute(&records, &sales, today);
        tracing::debug!(
            records = records.len(),
            sales = sales.len(),
            inventory_left = %summary.inventory_left,
            "Analytics summary computed"
        );
        Ok(summary)
    }
}
