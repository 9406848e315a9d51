//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] carries a `skip`/`limit` pair clamped into range. Adapters fetch
//! one row more than the limit ([`PageRequest::fetch_limit`]) and hand the
//! rows to [`Page::from_overfetch`], which trims the extra row and records
//! whether further results exist.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::clamped(0, 2);
//! let rows = vec!["a", "b", "c"];
//! let page = Page::from_overfetch(rows, request);
//! assert_eq!(page.items(), &["a", "b"]);
//! assert!(page.has_more());
//! assert_eq!(page.next_skip(), Some(2));
//! ```

mod page;
mod request;

pub use page::Page;
pub use request::{MAX_LIMIT, PageRequest};
