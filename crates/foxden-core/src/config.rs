//! foxden.toml configuration parser.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::metadata::ContainerMeta;
use crate::season::Season;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FoxdenConfig {
    pub app: AppConfig,
    pub storage: StorageConfig,
    /// Storage providers probed by `foxden providers`.
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application id stamped into container metadata; containers of other
    /// apps sharing the backend are invisible to us.
    pub id: String,
    pub url: String,
    pub version: String,
    /// Owner credited for writes when the caller does not name one.
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Deployment environment tag ("dev", "staging", "prod").
    pub environment: String,
    /// Network label recorded in container metadata.
    pub network: String,
    /// Directory holding the backend database.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider account address (display only).
    pub address: String,
    /// HTTP endpoint probed for liveness.
    pub endpoint_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: "foxden".to_string(),
            url: "https://foxden.example".to_string(),
            version: "1.0.0".to_string(),
            owner: "0xfoxden".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            network: "local".to_string(),
            data_dir: PathBuf::from("/var/lib/foxden"),
        }
    }
}

impl Default for FoxdenConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            storage: StorageConfig::default(),
            providers: Vec::new(),
        }
    }
}

impl FoxdenConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FoxdenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The container metadata a new season container is stamped with.
    pub fn container_meta(&self, season: &Season) -> ContainerMeta {
        ContainerMeta {
            app_id: self.app.id.clone(),
            app_url: self.app.url.clone(),
            environment: self.storage.environment.clone(),
            network: self.storage.network.clone(),
            season: season.clone(),
            version: self.app.version.clone(),
        }
    }

    /// Lookup filter for this app's containers in the given season.
    pub fn season_filter(&self, season: &Season) -> BTreeMap<String, String> {
        ContainerMeta::season_filter(&self.app.id, season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = FoxdenConfig::default();
        assert_eq!(config.app.id, "foxden");
        assert_eq!(config.storage.environment, "dev");
        assert!(config.providers.is_empty());
    }

    #[test]
    fn parses_partial_toml() {
        let config: FoxdenConfig = toml::from_str(
            r#"
            [app]
            id = "foxden-staging"

            [[providers]]
            address = "0xabc"
            endpoint_url = "https://provider-a.example/ping"
            "#,
        )
        .unwrap();

        assert_eq!(config.app.id, "foxden-staging");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.storage.network, "local");
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].endpoint_url, "https://provider-a.example/ping");
    }

    #[test]
    fn container_meta_carries_season() {
        let config = FoxdenConfig::default();
        let season: Season = "2025-11".parse().unwrap();
        let meta = config.container_meta(&season);
        assert_eq!(meta.app_id, "foxden");
        assert_eq!(meta.season, season);

        let map = meta.to_map();
        assert_eq!(map["season"], "2025-11");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = FoxdenConfig::default();
        let text = config.to_toml_string().unwrap();
        let back: FoxdenConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.app.id, config.app.id);
        assert_eq!(back.storage.data_dir, config.storage.data_dir);
    }
}
