//! Shared types and models for the Waste Operations Tracker
//!
//! This crate contains the record model, the totals engine and the id scheme
//! shared between the backend, the dashboard (via WASM), and other components.

pub mod ids;
pub mod lenient;
pub mod models;
pub mod totals;
pub mod types;
pub mod validation;

pub use models::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
