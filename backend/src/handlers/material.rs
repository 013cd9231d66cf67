//! Material record HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{MaterialRecord, MaterialRecordPatch, PaginatedResponse, Pagination};
use std::sync::Arc;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::services::material::{CreateMaterialRecordInput, MaterialRecordFilter, MaterialService};
use crate::services::PickupService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListMaterialsQuery {
    pub q: Option<String>,
    pub company_name: Option<String>,
    pub lot_number: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

pub(crate) fn material_service(state: &AppState) -> MaterialService {
    let pickups = Arc::new(PickupService::new(state.store.clone(), state.clock.clone()));
    MaterialService::new(state.store.clone(), state.clock.clone(), pickups)
}

/// Create the material record for a pickup
pub async fn create_material_record(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMaterialRecordInput>,
) -> AppResult<impl IntoResponse> {
    let record = material_service(&state).create_record(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List material records in stored order
pub async fn list_material_records(
    State(state): State<AppState>,
    Query(query): Query<ListMaterialsQuery>,
) -> AppResult<Json<PaginatedResponse<MaterialRecord>>> {
    let pagination = Pagination::from_query(query.page.as_deref(), query.page_size.as_deref());
    let filter = MaterialRecordFilter {
        q: query.q,
        company_name: query.company_name,
        lot_number: query.lot_number,
        status: query.status,
    };

    let records = material_service(&state)
        .list_records(&filter, pagination)
        .await?;
    Ok(Json(records))
}

pub async fn get_material_record(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
) -> AppResult<Json<MaterialRecord>> {
    Ok(Json(material_service(&state).get_record(&pickup_id).await?))
}

pub async fn update_material_record(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
    JsonBody(patch): JsonBody<MaterialRecordPatch>,
) -> AppResult<Json<MaterialRecord>> {
    let record = material_service(&state)
        .update_record(&pickup_id, patch)
        .await?;
    Ok(Json(record))
}

/// Delete a material record, returning the removed document
pub async fn delete_material_record(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = material_service(&state).delete_record(&pickup_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "deleted": removed })))
}
