//! Pickup HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{PaginatedResponse, Pagination, Pickup, PickupPatch};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::services::pickup::{CreatePickupInput, PickupFilter, PickupService};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListPickupsQuery {
    pub company_name: Option<String>,
    pub lot_number: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

fn pickup_service(state: &AppState) -> PickupService {
    PickupService::new(state.store.clone(), state.clock.clone())
}

/// Create a pickup
pub async fn create_pickup(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePickupInput>,
) -> AppResult<impl IntoResponse> {
    let pickup = pickup_service(&state).create_pickup(input).await?;
    Ok((StatusCode::CREATED, Json(pickup)))
}

/// List pickups, newest first
pub async fn list_pickups(
    State(state): State<AppState>,
    Query(query): Query<ListPickupsQuery>,
) -> AppResult<Json<PaginatedResponse<Pickup>>> {
    let pagination = Pagination::from_query(query.page.as_deref(), query.page_size.as_deref());
    let filter = PickupFilter {
        company_name: query.company_name,
        lot_number: query.lot_number,
        status: query.status,
    };

    let pickups = pickup_service(&state)
        .list_pickups(&filter, pagination)
        .await?;
    Ok(Json(pickups))
}

/// Get a pickup by pickup id
pub async fn get_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
) -> AppResult<Json<Pickup>> {
    Ok(Json(pickup_service(&state).get_pickup(&pickup_id).await?))
}

/// Update a pickup; identity fields in the body are ignored
pub async fn update_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
    JsonBody(patch): JsonBody<PickupPatch>,
) -> AppResult<Json<Pickup>> {
    let pickup = pickup_service(&state)
        .update_pickup(&pickup_id, patch)
        .await?;
    Ok(Json(pickup))
}

/// Delete a pickup
pub async fn delete_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !pickup_service(&state).delete_pickup(&pickup_id).await? {
        return Err(AppError::NotFound("Pickup".to_string()));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
