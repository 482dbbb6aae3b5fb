#![allow(dead_code)]

use std::io::Write;
use std::sync::Mutex;

use tempfile::NamedTempFile;

/// Environment variables read by `ServerConfig::load`.
pub const CONFIG_VARS: [&str; 4] = ["CLINIC_CONFIG", "HOST", "PORT", "RUST_LOG"];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with the config variables cleared and then `changes` applied.
///
/// Access is serialized because the process environment is shared by tests
/// running in parallel; previous values are restored even if `f` panics.
pub fn with_config_env<F, R>(changes: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::capture();

    for key in CONFIG_VARS {
        std::env::remove_var(key);
    }
    for (key, value) in changes {
        std::env::set_var(key, value);
    }
    f()
}

struct EnvRestore {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvRestore {
    fn capture() -> Self {
        Self {
            saved: CONFIG_VARS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Write `contents` to a temporary `.toml` file kept alive by the handle.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
