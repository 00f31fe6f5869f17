//! Pagination handling for GitHub API.
//!
//! GitHub list endpoints come in two shapes: bare JSON arrays (repository
//! listings) and envelopes carrying a `total_count` next to the items
//! (environments, secrets, variables). [`Page`] wraps the former,
//! [`CountedList`] describes the latter.

use crate::config::MAX_PER_PAGE;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Pagination parameters for list requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Creates new pagination parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for page `page` at the largest page size.
    pub fn full_page(page: u32) -> Self {
        Self::new().page(page).per_page(MAX_PER_PAGE)
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets items per page.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.min(MAX_PER_PAGE));
        self
    }
}

/// A single page of an array-returning list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Page number that was requested.
    pub page: u32,
    /// Last page number advertised by the `Link` header, if any.
    pub last_page: Option<u32>,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, page: u32) -> Self {
        Self {
            items,
            page,
            last_page: None,
        }
    }

    /// Reads the advertised last page from response headers.
    pub fn with_links(mut self, headers: &HeaderMap) -> Self {
        self.last_page = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link);
        self
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Extracts the `page` query value of the `rel="last"` entry of a Link header (RFC 8288).
pub fn last_page_from_link(header_value: &str) -> Option<u32> {
    header_value.split(',').find_map(|part| {
        let mut segments = part.split(';').map(str::trim);
        let target = segments.next()?.strip_prefix('<')?.strip_suffix('>')?;
        let is_last = segments.any(|s| s.trim_start_matches("rel=").trim_matches('"') == "last");
        if !is_last {
            return None;
        }
        url::Url::parse(target)
            .ok()?
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    })
}

/// A list envelope of the form `{ "total_count": n, "<items>": [...] }`.
pub trait CountedList: DeserializeOwned {
    /// Element type of the list.
    type Item;

    /// Total number of items across all pages.
    fn total_count(&self) -> u64;

    /// Consumes the envelope and returns this page's items.
    fn into_items(self) -> Vec<Self::Item>;
}

/// Whether another page must be requested after receiving `received` items,
/// `collected` in total so far, out of `total_count`.
///
/// Page size is not checked: some endpoints serve fewer than `per_page`
/// items per page (variables stop at 30).
pub(crate) fn wants_next_page(received: usize, collected: usize, total_count: u64) -> bool {
    received > 0 && (collected as u64) < total_count
}
