//! Lot HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{Lot, PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::services::LotService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListLotsQuery {
    pub company_name: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// List lots, newest first
pub async fn list_lots(
    State(state): State<AppState>,
    Query(query): Query<ListLotsQuery>,
) -> AppResult<Json<PaginatedResponse<Lot>>> {
    let service = LotService::new(state.store.clone(), state.clock.clone());
    let pagination = Pagination::from_query(query.page.as_deref(), query.page_size.as_deref());

    let lots = service
        .list_lots(query.company_name.as_deref(), pagination)
        .await?;
    Ok(Json(lots))
}

/// Get a lot by lot number
pub async fn get_lot(
    State(state): State<AppState>,
    Path(lot_number): Path<String>,
) -> AppResult<Json<Lot>> {
    let service = LotService::new(state.store.clone(), state.clock.clone());
    Ok(Json(service.get_lot(&lot_number).await?))
}
