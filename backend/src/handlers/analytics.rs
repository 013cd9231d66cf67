//! Analytics HTTP handlers

use axum::{extract::State, Json};
use shared::AnalyticsSummary;

use crate::error::AppResult;
use crate::handlers::material::material_service;
use crate::services::{AnalyticsService, SalesService};
use crate::AppState;

/// Dashboard summary metrics
pub async fn get_analytics_summary(
    State(state): State<AppState>,
) -> AppResult<Json<AnalyticsSummary>> {
    let service = AnalyticsService::new(
        material_service(&state),
        SalesService::new(state.store.clone(), state.clock.clone()),
        state.clock.clone(),
    );
    Ok(Json(service.summarize().await?))
}
