//! Page-based pagination options.
//!
//! # Invariants
//! - `page` and `limit` are both `>= 1`.
//! - `offset() == (page - 1) * limit`, computed without overflow.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    ZeroPage,
    ZeroLimit,
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPage => write!(f, "page must be >= 1"),
            Self::ZeroLimit => write!(f, "limit must be >= 1"),
        }
    }
}

impl Error for PaginationError {}

/// 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    page: u32,
    limit: u32,
}

impl PaginationOptions {
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Zero-based row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}
