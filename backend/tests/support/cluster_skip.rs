//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.

const SKIP_VAR: &str = "SKIP_TEST_CLUSTER";

/// Whether `SKIP_TEST_CLUSTER` holds `1`, `true` or `yes` in any case.
pub fn skip_requested() -> bool {
    std::env::var(SKIP_VAR).is_ok_and(|value| {
        let value = value.trim().to_ascii_lowercase();
        matches!(value.as_str(), "1" | "true" | "yes")
    })
}

/// Turn a cluster start-up failure into a skip or a test failure.
///
/// Returns `None` after printing a marker when skipping is requested;
/// panics otherwise so a broken CI database is never silently ignored.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        return None;
    }
    panic!("embedded PostgreSQL unavailable: {reason}. Set {SKIP_VAR}=1 to skip.");
}
