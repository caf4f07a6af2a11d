use roulette_core::store::PathSource;
use roulette_core::{paths, ConfigStore};
use std::path::{Path, PathBuf};

/// Resolve the registry file for this run.
///
/// Priority:
/// 1. `--config-dir` flag / `config_dir` env var (passed in as `explicit`),
///    if it is non-blank and writable
/// 2. `~/.port-roulette-config.json`
///
/// Without a home directory the fallback lands in the working directory.
pub fn resolve_store(explicit: Option<&Path>) -> ConfigStore {
    let explicit = explicit.filter(|p| !p.to_string_lossy().trim().is_empty());

    let home = paths::home_dir().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using current directory for the registry");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let store = ConfigStore::resolve(explicit, &home);
    if explicit.is_some() && store.source() == PathSource::Fallback {
        tracing::info!(path = %store.path().display(), "configured directory ignored");
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        let store = resolve_store(Some(dir.path()));
        assert_eq!(store.path(), dir.path().join(paths::CONFIG_FILE));
        assert_eq!(store.source(), PathSource::Preferred);
    }

    #[test]
    fn blank_dir_is_ignored() {
        let store = resolve_store(Some(Path::new("   ")));
        assert_eq!(
            store.path().file_name().and_then(|n| n.to_str()),
            Some(paths::FALLBACK_CONFIG_FILE)
        );
        assert_eq!(store.source(), PathSource::Fallback);
    }
}
