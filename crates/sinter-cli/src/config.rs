//! Optional JSON configuration file.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sinter_engine::LabConfig;
use sinter_store::StoreConfig;

/// Settings read from `--config`; every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SinterConfig {
    /// How the database is opened.
    #[serde(default)]
    pub store: StoreConfig,

    /// Study service settings.
    #[serde(default)]
    pub lab: LabConfig,
}

impl SinterConfig {
    /// Load from a JSON file, or use the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_path_uses_defaults() {
        let config = SinterConfig::load(None).unwrap();
        assert!(config.store.seed_defaults);
        assert_eq!(config.lab.default_sweep.point_count(), 441);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sinter.json");
        std::fs::write(
            &path,
            r#"{
                "store": { "seed_defaults": false },
                "lab": { "default_sweep": {
                    "pressure": { "min": 0.0, "max": 10.0, "step": 5.0 },
                    "temperature": { "min": 1000.0, "max": 1100.0, "step": 50.0 }
                } }
            }"#,
        )
        .unwrap();

        let config = SinterConfig::load(Some(&path)).unwrap();
        assert!(!config.store.seed_defaults);
        assert_eq!(config.lab.default_sweep.point_count(), 9);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sinter.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SinterConfig::load(Some(&path)).is_err());
    }
}
