//! Clamped offset/limit page requests.

/// Largest page size any endpoint serves.
pub const MAX_LIMIT: u32 = 1000;

/// Offset page request.
///
/// ## Invariants
/// - `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u64,
    limit: u32,
}

impl PageRequest {
    /// Build a request, clamping `limit` into `1..=MAX_LIMIT`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{MAX_LIMIT, PageRequest};
    ///
    /// assert_eq!(PageRequest::clamped(0, 0).limit(), 1);
    /// assert_eq!(PageRequest::clamped(0, 50_000).limit(), MAX_LIMIT);
    /// ```
    #[must_use]
    pub fn clamped(skip: u64, limit: u32) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// A request for the largest page starting at the first row.
    #[must_use]
    pub const fn everything() -> Self {
        Self {
            skip: 0,
            limit: MAX_LIMIT,
        }
    }

    /// Rows to skip.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum rows returned to the caller.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// `skip` as a SQL `OFFSET` value, saturating at `i64::MAX`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// One row more than `limit`, used to detect a following page.
    #[must_use]
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit) + 1
    }
}
