//! Page envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// One page of results plus the window it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    skip: u64,
    limit: u32,
    has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageRequest::fetch_limit`].
    ///
    /// Rows beyond `limit` are dropped and mark the page as having more
    /// results.
    #[must_use]
    pub fn from_overfetch(mut rows: Vec<T>, request: PageRequest) -> Self {
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self {
            items: rows,
            skip: request.skip(),
            limit: request.limit(),
            has_more,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Whether another page follows.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Rows skipped before this page.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Limit the page was requested with.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// `skip` value for the following page, if any.
    #[must_use]
    pub fn next_skip(&self) -> Option<u64> {
        self.has_more
            .then(|| self.skip.saturating_add(u64::from(self.limit)))
    }

    /// Transform every item while keeping the window.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            skip: self.skip,
            limit: self.limit,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(vec![1, 2], false)]
    #[case(vec![1, 2, 3], true)]
    fn overfetch_sets_has_more(#[case] rows: Vec<i32>, #[case] expected: bool) {
        let page = Page::from_overfetch(rows, PageRequest::clamped(0, 2));
        assert_eq!(page.items().len(), 2);
        assert_eq!(page.has_more(), expected);
    }

    #[rstest]
    fn last_page_has_no_next_skip() {
        let page = Page::from_overfetch(vec!["x"], PageRequest::clamped(4, 2));
        assert_eq!(page.next_skip(), None);
    }

    #[rstest]
    fn serialises_camel_case() {
        let page = Page::from_overfetch(vec![1, 2, 3], PageRequest::clamped(0, 2)).map(|n| n * 10);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({ "items": [10, 20], "skip": 0, "limit": 2, "hasMore": true })
        );
    }
}
