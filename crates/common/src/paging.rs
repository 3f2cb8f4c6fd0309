//! Offset paging over repository collections
//!
//! Page numbers are zero-based. Query parameters are parsed leniently:
//! anything malformed falls back to the defaults instead of rejecting the
//! request.

use serde::Deserialize;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Page size bounds applied when resolving query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Raw `page`/`size` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl PageParams {
    /// Resolve into a page request, falling back to defaults for bad input
    pub fn resolve(&self, config: &PagingConfig) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|page| page.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0);

        let max_size = config.max_size.max(1);
        let size = self
            .size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|size| *size >= 1)
            .map(|size| size.min(i64::from(max_size)) as u32)
            .unwrap_or_else(|| config.default_size.clamp(1, max_size));

        PageRequest::new(page, size)
    }
}

/// A zero-based page number and a page size of at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records preceding this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn first(&self) -> Self {
        Self::new(0, self.size)
    }

    pub fn previous(&self) -> Self {
        Self::new(self.page.saturating_sub(1), self.size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self::new(page, self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// A window of records plus the total count of the underlying collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn number(&self) -> u32 {
        self.request.page()
    }

    pub fn size(&self) -> u32 {
        self.request.size()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.request.size()))
    }

    pub fn has_previous(&self) -> bool {
        self.number() > 0
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number()) + 1 < self.total_pages()
    }

    /// Index of the last page, zero for an empty collection
    pub fn last_page(&self) -> u32 {
        self.total_pages()
            .saturating_sub(1)
            .min(u64::from(u32::MAX)) as u32
    }
}
