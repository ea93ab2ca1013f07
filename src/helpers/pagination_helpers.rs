use url::form_urlencoded;

use crate::{
    helpers::number_helpers::parse_numeric,
    models::pagination::{PageDefaults, PageRequest, MAX_PAGE_SIZE, MIN_PAGE_SIZE},
};

/// Number of page links shown around the current page.
pub const WINDOW_SIZE: u32 = 5;

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";

fn query_pairs(query: &str) -> form_urlencoded::Parse<'_> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
}

/// First value for `key`, like `URLSearchParams.get`.
pub fn query_value(query: &str, key: &str) -> Option<String> {
    query_pairs(query)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn parse_bounded(raw: Option<&str>, min: u32, max: u32) -> Option<u32> {
    let value = parse_numeric(raw?)?.floor();
    if value < f64::from(min) || value > f64::from(max) {
        return None;
    }
    Some(value as u32)
}

/// Reads `page`/`limit` from a query string. Never fails: missing, non-numeric,
/// non-finite or out-of-range values are replaced by `defaults`, fractions are floored.
pub fn parse_page_request(query: &str, defaults: PageDefaults) -> PageRequest {
    let page = query_value(query, PAGE_PARAM);
    let limit = query_value(query, LIMIT_PARAM);

    PageRequest {
        page: parse_bounded(page.as_deref(), 1, u32::MAX).unwrap_or(defaults.page),
        limit: parse_bounded(limit.as_deref(), MIN_PAGE_SIZE, MAX_PAGE_SIZE)
            .unwrap_or(defaults.limit),
    }
}

/// Contiguous run of page numbers centered on `current_page`. Near either end the run
/// shifts instead of shrinking; it only shrinks when `total_pages < window_size`.
pub fn compute_window(current_page: u32, total_pages: u32, window_size: u32) -> Vec<u32> {
    if total_pages == 0 || window_size == 0 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let span = window_size.min(total_pages);
    let start = current
        .saturating_sub(window_size / 2)
        .max(1)
        .min(total_pages - span + 1);

    (start..start + span).collect()
}

/// Everything a pagination bar needs: the window, first/last anchors with
/// gap markers, and prev/next targets (`None` when disabled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub current: u32,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub first: Option<u32>,
    pub leading_gap: bool,
    pub window: Vec<u32>,
    pub trailing_gap: bool,
    pub last: Option<u32>,
}

pub fn page_links(current_page: u32, total_pages: u32) -> PageLinks {
    let window = compute_window(current_page, total_pages, WINDOW_SIZE);
    let current = current_page.clamp(1, total_pages.max(1));

    let window_start = window.first().copied().unwrap_or(1);
    let window_end = window.last().copied().unwrap_or(1);

    PageLinks {
        current,
        prev: (current > 1).then(|| current - 1),
        next: (current < total_pages).then(|| current + 1),
        first: (window_start > 1).then_some(1),
        leading_gap: window_start > 2,
        trailing_gap: window_end + 1 < total_pages,
        last: (window_end < total_pages).then_some(total_pages),
        window,
    }
}

/// Returns a new query string with `key` set to `value`. Other parameters keep
/// their order; an existing `key` is replaced in place and its duplicates dropped.
pub fn with_updated_param(query: &str, key: &str, value: &str) -> String {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = query_pairs(query).into_owned().collect();

    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if replaced {
            return false;
        }
        *v = value.to_string();
        replaced = true;
        true
    });

    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub fn with_page(query: &str, page: u32) -> String {
    with_updated_param(query, PAGE_PARAM, &page.to_string())
}

/// Changing the page size always goes back to the first page.
pub fn with_limit(query: &str, limit: u32) -> String {
    let query = with_updated_param(query, LIMIT_PARAM, &limit.to_string());
    with_updated_param(&query, PAGE_PARAM, "1")
}
