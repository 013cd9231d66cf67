//! Sales ledger HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::Sale;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::services::sales::{RecordSaleInput, SalesFilter, SalesService};
use crate::AppState;

/// Record a sale
pub async fn record_sale(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RecordSaleInput>,
) -> AppResult<impl IntoResponse> {
    let service = SalesService::new(state.store.clone(), state.clock.clone());
    let sale = service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// List sales by day and/or pickup
pub async fn list_sales(
    State(state): State<AppState>,
    Query(filter): Query<SalesFilter>,
) -> AppResult<Json<Vec<Sale>>> {
    let service = SalesService::new(state.store.clone(), state.clock.clone());
    Ok(Json(service.list_sales(&filter).await?))
}
