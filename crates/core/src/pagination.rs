//! Page arithmetic for collection endpoints.
//!
//! Pages are 1-based. The page size comes from server configuration; the
//! observed production default is [`DEFAULT_PAGE_SIZE`].

/// Items per collection page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// A resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: i64,
    /// Items per page (always >= 1).
    pub size: i64,
}

impl Page {
    /// Resolve a requested page number against the configured page size.
    ///
    /// Missing or non-positive page numbers resolve to the first page.
    pub fn new(requested: Option<i64>, size: i64) -> Self {
        Self {
            number: requested.filter(|n| *n >= 1).unwrap_or(1),
            size: size.max(1),
        }
    }

    /// Row offset for `LIMIT ... OFFSET ...`.
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }

    /// Number of the last page for `total` items (at least 1).
    pub fn last_page(&self, total: i64) -> i64 {
        if total <= 0 {
            1
        } else {
            (total + self.size - 1) / self.size
        }
    }

    pub fn has_next(&self, total: i64) -> bool {
        self.number < self.last_page(total)
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether the collection spans more than one page.
    pub fn is_partial(&self, total: i64) -> bool {
        self.last_page(total) > 1
    }
}
