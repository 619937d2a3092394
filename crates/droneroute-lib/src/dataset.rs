use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for a network document inside a data directory.
pub const NETWORK_FILENAME: &str = "network.json";

/// Environment variable that overrides the network location.
pub const NETWORK_ENV_VAR: &str = "DRONEROUTE_NETWORK";

/// Resolve the default network location using platform-specific project directories.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "droneroute", "droneroute")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(NETWORK_FILENAME))
}

/// Locate the network document to load.
///
/// Resolution order: the explicit `target`, then the `DRONEROUTE_NETWORK`
/// environment variable, then [`default_network_path`]. A directory (or any
/// path without an extension) is treated as a data directory containing
/// `network.json`. The resolved file must exist.
pub fn resolve_network_path(target: Option<&Path>) -> Result<PathBuf> {
    let resolved = if let Some(explicit) = target {
        canonical_network_path(explicit)
    } else if let Some(env_path) = env::var_os(NETWORK_ENV_VAR) {
        canonical_network_path(Path::new(&env_path))
    } else {
        default_network_path()?
    };

    debug!(path = %resolved.display(), "resolved network location");
    if !resolved.is_file() {
        return Err(Error::NetworkNotFound { path: resolved });
    }
    Ok(resolved)
}

fn canonical_network_path(path: &Path) -> PathBuf {
    if path.extension().is_some() && !path.is_dir() {
        return path.to_path_buf();
    }

    path.join(NETWORK_FILENAME)
}
