use serde::{Deserialize, Serialize};

/// Default starting page number.
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validated `(page, limit)` pair driving one fetch.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32, // (1-based)
    pub limit: u32,
}

/// Values substituted for missing or invalid query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub page: u32,
    pub limit: u32,
}

impl PageDefaults {
    pub const fn with_limit(limit: u32) -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit,
        }
    }
}

/// Informations de pagination, as reported by the server
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32, // (1-based)
    pub limit: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Builds pagination for endpoints that only report a total count.
    pub fn from_count(total_items: u64, request: PageRequest) -> Self {
        let limit = u64::from(request.limit.max(MIN_PAGE_SIZE));
        let total_pages = total_items.div_ceil(limit).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

        Self {
            total_items,
            total_pages,
            current_page: request.page,
            limit: request.limit,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}

/// One fetched page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
