//! Request correlation identifier carried in Tokio task-local storage.
//!
//! The HTTP [`Trace`](crate::Trace) middleware scopes one [`TraceId`] per
//! request. Anything running inside that scope, including
//! [`Error::new`](crate::domain::Error::new), can read it with
//! [`TraceId::current`]. Task locals do not follow `tokio::spawn` or
//! `spawn_blocking`; wrap such work in [`TraceId::scope`] to keep the id.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation id for one request.
///
/// # Examples
/// ```
/// use quest_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "3f2b1f4e-8d1c-4e0a-9a57-0d3c5c1f0b11".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<F>(trace_id: Self, fut: F) -> F::Output
    where
        F: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// The wrapped UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn nothing_in_scope_outside_a_request() {
        assert_eq!(TraceId::current(), None);
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (seen_inner, seen_outer) = TraceId::scope(outer, async move {
            let seen_inner = TraceId::scope(inner, async { TraceId::current() }).await;
            (seen_inner, TraceId::current())
        })
        .await;
        assert_eq!(seen_inner, Some(inner));
        assert_eq!(seen_outer, Some(outer));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }

    #[rstest]
    fn parses_with_surrounding_whitespace() {
        let id: TraceId = " 3f2b1f4e-8d1c-4e0a-9a57-0d3c5c1f0b11 "
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_string(), "3f2b1f4e-8d1c-4e0a-9a57-0d3c5c1f0b11");
    }
}
