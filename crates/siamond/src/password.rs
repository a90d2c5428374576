//! API password discovery.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Environment variable holding the API password.
pub(crate) const PASSWORD_ENV: &str = "SIA_API_PASSWORD";

/// Environment variable overriding the node's data directory.
pub(crate) const DATA_DIR_ENV: &str = "SIA_DATA_DIR";

const PASSWORD_FILE: &str = "apipassword";

/// Finds the API password from the environment or the node's data directory.
pub(crate) fn find_password() -> String {
    find_password_from(env::var(PASSWORD_ENV).ok(), &sia_dir())
}

/// A non-empty `env_value` wins. Otherwise the trimmed contents of
/// `<dir>/apipassword` are used; an unreadable file yields an empty password.
pub(crate) fn find_password_from(env_value: Option<String>, dir: &Path) -> String {
    if let Some(password) = env_value.filter(|p| !p.is_empty()) {
        debug!(source = PASSWORD_ENV, "using API password from environment");
        return password;
    }

    let path = dir.join(PASSWORD_FILE);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            debug!(path = %path.display(), "using API password from file");
            contents.trim().to_string()
        }
        Err(e) => {
            info!(
                path = %path.display(),
                error = %e,
                "could not read API password, continuing without one"
            );
            String::new()
        }
    }
}

/// The node's data directory: `SIA_DATA_DIR` or the platform default.
pub(crate) fn sia_dir() -> PathBuf {
    match env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_sia_dir(),
    }
}

#[cfg(target_os = "windows")]
fn default_sia_dir() -> PathBuf {
    let base = env::var_os("LOCALAPPDATA").map(PathBuf::from).unwrap_or_default();
    base.join("Sia")
}

#[cfg(target_os = "macos")]
fn default_sia_dir() -> PathBuf {
    home_dir().join("Library/Application Support/Sia")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_sia_dir() -> PathBuf {
    home_dir().join(".sia")
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    env::var_os("HOME").map(PathBuf::from).unwrap_or_default()
}
