use crate::error::{Result, RouletteError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File names
// ---------------------------------------------------------------------------

/// Registry file inside a user-configured directory.
pub const CONFIG_FILE: &str = "port-roulette-config.json";

/// Registry file directly under the home directory.
pub const FALLBACK_CONFIG_FILE: &str = ".port-roulette-config.json";

/// Written and removed again to check that a directory accepts writes.
pub const PROBE_FILE: &str = ".test";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(RouletteError::HomeNotFound)
}

pub fn fallback_config_path(home: &Path) -> PathBuf {
    home.join(FALLBACK_CONFIG_FILE)
}

pub fn preferred_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Expand a leading `~` against `home`.
pub fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
