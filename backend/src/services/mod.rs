//! Business logic services for the Waste Operations Tracker

pub mod analytics;
pub mod lot;
pub mod material;
pub mod pickup;
pub mod reporting;
pub mod sales;

pub use analytics::AnalyticsService;
pub use lot::LotService;
pub use material::MaterialService;
pub use pickup::{PickupResolver, PickupService};
pub use reporting::ReportingService;
pub use sales::SalesService;
