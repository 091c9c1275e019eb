// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PitchwireError, Result};

/// Persistent glue-layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Method channel the Dart side calls `getNetworkType` on.
    pub channel_name: String,
    /// Identifier the native ad factory is registered under.
    pub ad_factory_id: String,
    /// Telephony subtype code treated as 5G (NR). Not part of the public
    /// telephony constants, so it is kept overridable.
    pub nr_subtype_code: i32,
    /// Timing of the render reconciliation checkpoints.
    pub reconciliation: ReconciliationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_name: "com.aryatech.speedtest/network_type".into(),
            ad_factory_id: "listTile".into(),
            nr_subtype_code: 20,
            reconciliation: ReconciliationConfig::default(),
        }
    }
}

/// Checkpoint timing for native ad rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    /// Delay between the first layout pass and the final checkpoint.
    pub settle_delay_ms: u64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self { settle_delay_ms: 100 }
    }
}

impl AppConfig {
    /// Load the config from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Persist the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_name.trim().is_empty() {
            return Err(PitchwireError::Config("channel_name must not be empty".into()));
        }
        if self.ad_factory_id.trim().is_empty() {
            return Err(PitchwireError::Config("ad_factory_id must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.ad_factory_id, "listTile");
        assert_eq!(config.nr_subtype_code, 20);
        assert_eq!(config.reconciliation.settle_delay_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitchwire.json");
        let mut config = AppConfig::default();
        config.nr_subtype_code = 23;
        config.reconciliation.settle_delay_ms = 250;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "reconciliation": { "settle_delay_ms": 40 } }"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.reconciliation.settle_delay_ms, 40);
        assert_eq!(loaded.ad_factory_id, "listTile");
    }

    #[test]
    fn retired_layout_timeout_key_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("older.json");
        std::fs::write(
            &path,
            r#"{ "reconciliation": { "settle_delay_ms": 100, "layout_timeout_ms": 2000 } }"#,
        )
        .unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.reconciliation, ReconciliationConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(PitchwireError::Serialization(_))
        ));
    }

    #[test]
    fn empty_factory_id_rejected() {
        let config = AppConfig {
            ad_factory_id: " ".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PitchwireError::Config(_))));
    }
}
