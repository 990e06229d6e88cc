//! Process-wide embedded PostgreSQL cluster.

use std::time::Duration;

use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle};

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Return the shared cluster, retrying transient bootstrap failures.
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(error),
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
///
/// A fresh random password is generated per process otherwise, and `initdb`
/// is skipped when the data directory already exists.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads; the shared
        // handle serialises bootstrap behind its own mutex.
        unsafe {
            std::env::set_var("PG_PASSWORD", "records_embedded_test");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn existing_password_is_kept() {
        let _guard = env_lock::lock_env([("PG_PASSWORD", Some("custom_value"))]);
        super::ensure_stable_password();
        assert_eq!(
            std::env::var("PG_PASSWORD").expect("PG_PASSWORD should be set"),
            "custom_value"
        );
    }
}
