//! Report HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::Report;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::handlers::material::material_service;
use crate::services::reporting::{GenerateReportInput, ReportingService};
use crate::AppState;

fn reporting_service(state: &AppState) -> ReportingService {
    ReportingService::new(state.store.clone(), state.clock.clone(), material_service(state))
}

/// Generate a summary report for a pickup
pub async fn generate_report(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<GenerateReportInput>,
) -> AppResult<impl IntoResponse> {
    let report = reporting_service(&state).generate(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_reports(State(state): State<AppState>) -> AppResult<Json<Vec<Report>>> {
    Ok(Json(reporting_service(&state).list().await?))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Report>> {
    Ok(Json(reporting_service(&state).get(&id).await?))
}
