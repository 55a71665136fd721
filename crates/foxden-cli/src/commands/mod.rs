//! CLI subcommand implementations.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use foxden_core::{FoxdenConfig, Season};
use foxden_ledger::Ledger;
use foxden_store::RedbStore;

pub mod create;
pub mod feed;
pub mod inspect;
pub mod list;
pub mod providers;
pub mod serve;
pub mod show;

/// Load configuration, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> anyhow::Result<FoxdenConfig> {
    if path.is_file() {
        let config = FoxdenConfig::from_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    } else {
        debug!(path = %path.display(), "no configuration file, using defaults");
        Ok(FoxdenConfig::default())
    }
}

/// Open the ledger over the configured data directory.
pub fn open_ledger(config: FoxdenConfig) -> anyhow::Result<Ledger<RedbStore>> {
    std::fs::create_dir_all(&config.storage.data_dir).with_context(|| {
        format!(
            "failed to create data directory {}",
            config.storage.data_dir.display()
        )
    })?;
    let db_path = config.storage.data_dir.join("foxden.redb");
    let backend = RedbStore::open(&db_path)?;
    Ok(Ledger::new(backend, config))
}

/// Parse `--season`, defaulting to the current calendar month.
pub fn parse_season(season: Option<&str>) -> anyhow::Result<Season> {
    match season {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid season {raw:?}: {e}")),
        None => Ok(Season::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foxden.toml");
        fs::write(&path, "[app]\nid = \"foxden-test\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.app.id, "foxden-test");
    }

    #[test]
    fn load_config_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/foxden.toml")).unwrap();
        assert_eq!(config.app.id, "foxden");
    }

    #[test]
    fn parse_season_accepts_explicit_and_default() {
        assert_eq!(parse_season(Some("2026-08")).unwrap().to_string(), "2026-08");
        assert!(parse_season(Some("garbage")).is_err());
        assert_eq!(parse_season(None).unwrap(), Season::current());
    }

    #[tokio::test]
    async fn open_ledger_creates_data_dir_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FoxdenConfig::default();
        config.storage.data_dir = dir.path().join("data");

        let ledger = open_ledger(config).unwrap();
        let season = Season::current();
        let record = ledger
            .write_profile("fox-t-1", "Nibbles", "0xabc", &season, &[0u8; 200])
            .await
            .unwrap();
        assert_eq!(record.record_id, 1);
        assert!(dir.path().join("data/foxden.redb").is_file());
    }
}
