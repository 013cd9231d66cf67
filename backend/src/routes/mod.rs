//! Route definitions for the Waste Operations Tracker

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .nest("/pickups", pickup_routes())
        .nest("/lots", lot_routes())
        .nest("/materials", material_routes())
        .nest("/sales", sales_routes())
        .route("/analytics/summary", get(handlers::get_analytics_summary))
        .nest("/reports", report_routes())
}

/// Pickup registry routes
fn pickup_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_pickups).post(handlers::create_pickup))
        .route(
            "/:pickup_id",
            get(handlers::get_pickup)
                .put(handlers::update_pickup)
                .delete(handlers::delete_pickup),
        )
}

/// Lot routes (read-only; lots are created with pickups)
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots))
        .route("/:lot_number", get(handlers::get_lot))
}

/// Material record routes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_material_records).post(handlers::create_material_record),
        )
        .route(
            "/:pickup_id",
            get(handlers::get_material_record)
                .put(handlers::update_material_record)
                .delete(handlers::delete_material_record),
        )
}

/// Sales ledger routes
fn sales_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_sales).post(handlers::record_sale))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_reports))
        .route("/generate", post(handlers::generate_report))
        .route("/:id", get(handlers::get_report))
}
