//! Common types used across the platform

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Pagination parameters, clamped to at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: clamp(page, 1),
            page_size: clamp(page_size, DEFAULT_PAGE_SIZE),
        }
    }

    /// Lenient parse of raw query values; unparseable values use the defaults
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(page_size))
    }

    /// Slice an already filtered and ordered result set
    pub fn paginate<T>(&self, items: Vec<T>) -> PaginatedResponse<T> {
        let total = items.len() as u64;
        let start = (self.page - 1).saturating_mul(self.page_size);
        let data: Vec<T> = items
            .into_iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .collect();

        PaginatedResponse {
            data,
            pagination: PaginationMeta {
                page: self.page,
                page_size: self.page_size,
                total,
                total_pages: total.div_ceil(self.page_size),
            },
        }
    }
}

fn clamp(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) => v.max(1) as u64,
        None => default,
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}
