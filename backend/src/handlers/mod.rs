//! HTTP request handlers

pub mod analytics;
pub mod health;
pub mod lot;
pub mod material;
pub mod pickup;
pub mod reporting;
pub mod sales;

pub use analytics::*;
pub use health::*;
pub use lot::*;
pub use material::*;
pub use pickup::*;
pub use reporting::*;
pub use sales::*;
