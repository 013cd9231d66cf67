//! Reporting service
//!
//! Generates per-pickup summaries (material value plus charges) and keeps
//! them in the report index.

use serde::Deserialize;
use shared::{require_text, Report, ReportSummary};
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{AppError, AppResult};
use crate::services::material::MaterialService;
use crate::store::Store;

/// Reporting service for generated pickup reports
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    materials: MaterialService,
}

/// Input for generating a report
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportInput {
    pub pickup_id: Option<String>,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>, materials: MaterialService) -> Self {
        Self {
            store,
            clock,
            materials,
        }
    }

    /// Summarize a pickup's material record and append it to the index
    pub async fn generate(&self, input: GenerateReportInput) -> AppResult<Report> {
        let pickup_id = require_text("pickupId", input.pickup_id.as_deref())?;
        let record = self.materials.get_record(pickup_id).await?;

        let report = Report::new(ReportSummary::for_record(&record), self.clock.now());

        let report = self
            .store
            .reports
            .update(move |reports| {
                reports.push(report.clone());
                Ok(report)
            })
            .await?;

        tracing::info!(
            report_id = %report.id,
            grand_total = %report.summary.grand_total,
            "Report generated"
        );
        Ok(report)
    }

    pub async fn list(&self) -> AppResult<Vec<Report>> {
        Ok(self.store.reports.load().await)
    }

    pub async fn get(&self, id: &str) -> AppResult<Report> {
        self.store
            .reports
            .load()
            .await
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Report".to_string()))
    }
}
