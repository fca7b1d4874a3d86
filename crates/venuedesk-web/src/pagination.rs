//! Page/limit parameters shared by list views and the dashboard API

use serde::{Deserialize, Serialize};
use validator::Validate;
use venuedesk_core::{Error, Result};

/// Items per page when none is requested
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size the dashboard asks the backend for
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// Page number (1-based)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u32>,

    /// Number of items per page
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl Pagination {
    /// Pagination for an explicit page and limit
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Validate query input, reporting the first offending field
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `page` or `limit` is out of range.
    pub fn checked(self) -> Result<Self> {
        self.validate().map_err(|errors| {
            let field = errors
                .field_errors()
                .keys()
                .next()
                .map_or_else(|| "pagination".to_string(), ToString::to_string);
            Error::Validation {
                field,
                message: format!("page must be at least 1 and limit between 1 and {MAX_LIMIT}"),
            }
        })?;
        Ok(self)
    }

    /// Effective limit (with default)
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Current page number (1-based)
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of items before this page
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }

    /// Check if there's a next page
    #[must_use]
    pub fn has_next(&self, total_items: u64) -> bool {
        self.offset() + u64::from(self.limit()) < total_items
    }

    /// Check if there's a previous page
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page() > 1
    }

    /// Query string the backend list endpoint expects
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("page={}&limit={}", self.page(), self.limit())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

/// Pagination metadata for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Current page (1-based)
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages, at least 1
    pub total_pages: u64,

    /// Whether there's a next page
    pub has_next: bool,

    /// Whether there's a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata
    #[must_use]
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = pagination.limit();
        Self {
            page: pagination.page(),
            per_page,
            total: total_items,
            total_pages: total_items.div_ceil(u64::from(per_page)).max(1),
            has_next: pagination.has_next(total_items),
            has_prev: pagination.has_prev(),
        }
    }
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self::new(&Pagination::default(), 0)
    }
}
