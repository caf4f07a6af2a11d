use crate::error::Result;
use crate::io;
use crate::paths;
use crate::registry::Registry;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// The user-configured directory accepted a probe write.
    Preferred,
    /// `~/.port-roulette-config.json`.
    Fallback,
}

/// Pick the registry file for this run.
///
/// 1. `preferred_dir` (with `~` expanded), if it can be created and written to
/// 2. the fixed file under `home`
pub fn resolve_path(preferred_dir: Option<&Path>, home: &Path) -> (PathBuf, PathSource) {
    let preferred = preferred_dir.filter(|dir| !dir.as_os_str().is_empty());

    if let Some(dir) = preferred {
        let dir = paths::expand_tilde(dir, home);
        match io::probe_writable(&dir) {
            Ok(()) => return (paths::preferred_config_path(&dir), PathSource::Preferred),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "config dir unusable, falling back");
            }
        }
    }

    (paths::fallback_config_path(home), PathSource::Fallback)
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// The registry file for one run. The path is fixed at construction so every
/// load and save in the run agree on it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    source: PathSource,
}

impl ConfigStore {
    pub fn resolve(preferred_dir: Option<&Path>, home: &Path) -> Self {
        let (path, source) = resolve_path(preferred_dir, home);
        tracing::debug!(path = %path.display(), ?source, "registry file");
        Self { path, source }
    }

    /// Store bound to an explicit file, skipping resolution.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: PathSource::Preferred,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> PathSource {
        self.source
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Read the registry. A missing file is an empty registry, not an error.
    pub fn try_load(&self) -> Result<Registry> {
        if !self.path.exists() {
            return Ok(Registry::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let registry: Registry = serde_json::from_str(&data)?;
        Ok(registry)
    }

    pub fn try_save(&self, registry: &Registry) -> Result<()> {
        let data = serde_json::to_string_pretty(registry)?;
        io::atomic_write(&self.path, data.as_bytes())
    }

    /// Never fails: unreadable or malformed files load as an empty registry.
    pub fn load(&self) -> Registry {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "could not load registry, starting empty");
            Registry::new()
        })
    }

    /// Never fails: write errors are logged and dropped.
    pub fn save(&self, registry: &Registry) {
        if let Err(e) = self.try_save(registry) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not save registry");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
