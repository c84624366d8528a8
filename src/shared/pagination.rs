//! Pagination
//!
//! Query-string paging is parsed leniently: anything that is not a positive
//! integer falls back to the default, the way a browser client expects.

use serde::{Deserialize, Serialize};

/// Hard cap on page size
pub const MAX_LIMIT: u64 = 100;

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Items per page, at least 1
    pub limit: u64,
}

impl PageRequest {
    /// Resolve raw query values against a default limit.
    pub fn parse(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// Number of items to skip before this page
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    /// Build the metadata block for a page of a collection holding `total` items.
    pub fn paginate(&self, total: u64) -> Pagination {
        let total_pages = self.total_pages(total);
        Pagination {
            current_page: self.page,
            total_pages,
            total_contacts: total,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

/// Pagination metadata for a contact listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_contacts: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Pagination metadata for a user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_users: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for UserPagination {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_users: p.total_contacts,
            has_next: p.has_next,
            has_prev: p.has_prev,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value as u64)
}
