//! Domain models for the Waste Operations Tracker

mod analytics;
mod lot;
mod material;
mod pickup;
mod report;
mod sale;

pub use analytics::*;
pub use lot::*;
pub use material::*;
pub use pickup::*;
pub use report::*;
pub use sale::*;
