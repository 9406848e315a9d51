//! Start an embedded PostgreSQL cluster from inside the workspace.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default, which
//! sandboxed runners refuse. Unless `PG_RUNTIME_DIR` and `PG_DATA_DIR` are
//! both set, start-up points them at a fresh directory under
//! `target/pg-embed` while holding the env lock.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static START_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ATTEMPTS: u32 = 4;
const BACKOFF: Duration = Duration::from_millis(500);

const TRANSIENT: [&str; 7] = [
    "connection reset",
    "connection refused",
    "timed out",
    "timeout",
    "temporarily unavailable",
    "dns error",
    "error decoding response body",
];

fn scratch_dirs() -> std::io::Result<(PathBuf, PathBuf)> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("quests-{}-{}", std::process::id(), Uuid::new_v4()));
    let install = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok((install, data))
}

fn is_transient(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSIENT.iter().any(|pattern| lower.contains(pattern))
}

/// Start a cluster, retrying binary downloads that fail transiently.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serial = START_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let configured =
        std::env::var_os("PG_RUNTIME_DIR").is_some() && std::env::var_os("PG_DATA_DIR").is_some();
    let _env = if configured {
        None
    } else {
        let (install, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data.to_string_lossy().into_owned())),
        ]))
    };

    let mut delay = BACKOFF;
    let mut attempt = 1;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt == ATTEMPTS || !is_transient(&message) {
                    return Err(message);
                }
                eprintln!("pg-embed: attempt {attempt}/{ATTEMPTS} failed, retrying: {message}");
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
        }
    }
}
