/**
 * Member Listing Parameters and Pagination
 *
 * Query-string parameters accepted by `GET /api/users` and the paged
 * result envelope. Pagination metadata travels in a `Pagination` response
 * header so the body stays a plain member array.
 */

use serde::{Deserialize, Serialize};

/// Hard cap on the page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 50;

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_MIN_AGE: u8 = 18;
const DEFAULT_MAX_AGE: u8 = 150;

/// Sort order for member listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Most recently registered first.
    Created,
    /// Most recently active first.
    #[default]
    LastActive,
}

/// Filter and paging parameters from the query string.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberParams {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Gender to list. When absent, the opposite of the caller's gender
    /// is assumed.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default = "default_min_age")]
    pub min_age: u8,
    #[serde(default = "default_max_age")]
    pub max_age: u8,
    #[serde(default)]
    pub order_by: OrderBy,
}

impl Default for MemberParams {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            gender: None,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            order_by: OrderBy::default(),
        }
    }
}

impl MemberParams {
    /// Requested page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn clamped_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Requested page number, never below 1.
    pub fn clamped_page_number(&self) -> u32 {
        self.page_number.max(1)
    }
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_min_age() -> u8 {
    DEFAULT_MIN_AGE
}

fn default_max_age() -> u8 {
    DEFAULT_MAX_AGE
}

/// One page of results plus the metadata needed to page further.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, current_page: u32, page_size: u32) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            // Tolerate a zero page_size from callers that skip the clamp.
            total_count.div_ceil(page_size.max(1) as u64) as u32
        };
        Self {
            items,
            current_page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Metadata payload for the `Pagination` response header.
    pub fn header(&self) -> PaginationHeader {
        PaginationHeader {
            current_page: self.current_page,
            items_per_page: self.page_size,
            total_items: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// JSON payload of the `Pagination` response header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHeader {
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let params = MemberParams::default();
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, 10);
        assert_eq!(params.min_age, 18);
        assert_eq!(params.max_age, 150);
        assert_eq!(params.order_by, OrderBy::LastActive);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut params = MemberParams::default();
        params.page_size = 500;
        assert_eq!(params.clamped_page_size(), MAX_PAGE_SIZE);

        params.page_size = 0;
        assert_eq!(params.clamped_page_size(), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u32> = Page::new(vec![], 21, 1, 10);
        assert_eq!(page.total_pages, 3);

        let page: Page<u32> = Page::new(vec![], 20, 1, 10);
        assert_eq!(page.total_pages, 2);

        let empty: Page<u32> = Page::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_zero_page_size_does_not_divide_by_zero() {
        let page: Page<u32> = Page::new(vec![], 7, 1, 0);
        assert_eq!(page.total_pages, 7);
    }

    #[test]
    fn test_pagination_header_is_camel_case() {
        let page: Page<u32> = Page::new(vec![1, 2], 12, 2, 10);
        let json = serde_json::to_string(&page.header()).unwrap();
        assert_eq!(
            json,
            r#"{"currentPage":2,"itemsPerPage":10,"totalItems":12,"totalPages":2}"#
        );
    }

    #[test]
    fn test_params_parse_from_query_string() {
        let params: MemberParams =
            serde_urlencoded_like("page_number=2&page_size=5&gender=male&min_age=25&max_age=40");
        assert_eq!(params.page_number, 2);
        assert_eq!(params.page_size, 5);
        assert_eq!(params.gender.as_deref(), Some("male"));
        assert_eq!(params.min_age, 25);
        assert_eq!(params.max_age, 40);
    }

    // Minimal query-string parse via serde_json to avoid an extra dev-dep.
    fn serde_urlencoded_like(query: &str) -> MemberParams {
        let mut map = serde_json::Map::new();
        for pair in query.split('&') {
            let (k, v) = pair.split_once('=').unwrap();
            let value = v
                .parse::<u64>()
                .map(serde_json::Value::from)
                .unwrap_or_else(|_| serde_json::Value::from(v));
            map.insert(k.to_string(), value);
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
