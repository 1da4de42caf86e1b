//! Page-number pagination.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query values. Returns `None` for page zero;
    /// a zero page size falls back to the default and oversized requests are
    /// capped.
    #[must_use]
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Option<Self> {
        let page = page.unwrap_or(1);

        if page == 0 {
            return None;
        }

        let page_size = match page_size {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(size) => size.min(MAX_PAGE_SIZE),
        };

        Some(Self { page, page_size })
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Whether this page lies past the last one for `count` rows. The first
    /// page always exists, even when empty.
    #[must_use]
    pub fn is_out_of_range(&self, count: u64) -> bool {
        self.page > 1 && u64::try_from(self.offset()).unwrap_or(u64::MAX) >= count
    }
}

/// One page of results plus the total row count across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    pub items: Vec<T>,
    pub request: PageRequest,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        let seen = u64::try_from(self.request.offset()).unwrap_or(u64::MAX)
            + u64::try_from(self.items.len()).unwrap_or(u64::MAX);

        seen < self.count
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.request.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
        }
    }
}
