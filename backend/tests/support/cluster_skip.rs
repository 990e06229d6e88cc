//! `SKIP_TEST_CLUSTER` policy for suites needing embedded PostgreSQL.

/// True when `SKIP_TEST_CLUSTER` is "1", "true", or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure.
///
/// Prints a skip marker and returns `None` when skipping is enabled; panics
/// otherwise so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_flag_accepts_truthy_values() {
        for value in ["1", "TRUE", "yes"] {
            let _guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", Some(value))]);
            assert!(should_skip_test_cluster(), "{value} should enable skipping");
        }
    }

    #[test]
    fn skipped_failure_yields_none() {
        let _guard = env_lock::lock_env([("SKIP_TEST_CLUSTER", Some("1"))]);
        assert!(handle_cluster_setup_failure::<()>("no cluster").is_none());
    }
}
