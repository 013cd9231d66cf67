//! Sales ledger service

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::lenient::parse_date;
use shared::{require_quantity, require_text, Sale};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::AppResult;
use crate::store::Store;

/// Sales service for the append-only ledger
#[derive(Clone)]
pub struct SalesService {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

/// Input for recording a sale
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleInput {
    pub pickup_id: Option<String>,
    pub product_id: Option<String>,
    #[serde(default, with = "shared::lenient::decimal_option")]
    pub quantity_sold: Option<Decimal>,
    pub material_type: Option<String>,
    pub name: Option<String>,
}

/// Sales filters
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesFilter {
    /// UTC calendar day; an unparseable value matches nothing
    pub date: Option<String>,
    pub pickup_id: Option<String>,
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Append a sale.
    ///
    /// The sold quantity is not checked against collected stock.
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<Sale> {
        let pickup_id = require_text("pickupId", input.pickup_id.as_deref())?.to_string();
        let product_id = require_text("productId", input.product_id.as_deref())?.to_string();
        let quantity_sold = require_quantity("quantitySold", input.quantity_sold)?;

        let sale = Sale {
            id: Uuid::new_v4(),
            pickup_id,
            product_id,
            quantity_sold,
            material_type: input.material_type,
            name: input.name,
            date: self.clock.now(),
        };

        let sale = self
            .store
            .sales
            .update(move |sales| {
                sales.push(sale.clone());
                Ok(sale)
            })
            .await?;

        tracing::info!(
            pickup_id = %sale.pickup_id,
            product_id = %sale.product_id,
            quantity = %sale.quantity_sold,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Sales matching the filter, in recorded order
    pub async fn list_sales(&self, filter: &SalesFilter) -> AppResult<Vec<Sale>> {
        let day = match filter.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match parse_date(raw) {
                Some(day) => Some(day),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let pickup_id = filter
            .pickup_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        Ok(self
            .store
            .sales
            .load()
            .await
            .into_iter()
            .filter(|sale| day.map_or(true, |d| sale.sold_on() == d))
            .filter(|sale| pickup_id.map_or(true, |id| sale.pickup_id == id))
            .collect())
    }

    /// Entire ledger
    pub async fn all_sales(&self) -> Vec<Sale> {
        self.store.sales.load().await
    }
}
