//! Reel configuration file handling
//!
//! `reel.toml` overrides the video settings and props of registered compositions:
//!
//! ```toml
//! [compositions.BarChart]
//! fps = 60
//! width = 1920
//! height = 1080
//! duration_in_frames = 240
//!
//! [compositions.BarChart.props]
//! title = "Monthly Revenue"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use reel_core::Frame;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const CONFIG_FILE: &str = "reel.toml";

/// Top-level Reel configuration (reel.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ReelConfig {
    /// Overrides keyed by composition id
    #[serde(default)]
    pub compositions: BTreeMap<String, CompositionOverride>,
}

/// Settings replacing a composition's registered defaults; absent fields keep the default
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CompositionOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_frames: Option<Frame>,
    /// Merged key by key over the default props
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

impl ReelConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a directory (looks for reel.toml) or a file path
    pub fn load_from_dir(path: &Path) -> anyhow::Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!("No {} found in {}", CONFIG_FILE, path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn get(&self, id: &str) -> Option<&CompositionOverride> {
        self.compositions.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
[compositions.BarChart]
fps = 60
duration_in_frames = 240

[compositions.BarChart.props]
title = "Monthly Revenue"
staggerDelay = 4

[compositions.ThreeScene]
width = 1920
"#;

    #[test]
    fn parses_overrides() {
        let config = ReelConfig::from_toml_str(SAMPLE).unwrap();
        let bar = config.get("BarChart").unwrap();
        assert_eq!(bar.fps, Some(60));
        assert_eq!(bar.width, None);
        assert_eq!(bar.duration_in_frames, Some(240));
        assert_eq!(
            bar.props,
            Some(serde_json::json!({"title": "Monthly Revenue", "staggerDelay": 4}))
        );
        assert_eq!(config.get("ThreeScene").unwrap().width, Some(1920));
    }

    #[test]
    fn empty_file_is_empty_config() {
        assert_eq!(ReelConfig::from_toml_str("").unwrap(), ReelConfig::default());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ReelConfig::from_toml_str("[compositions.BarChart]\nfps = \"fast\"").is_err());
    }

    #[test]
    fn toml_round_trip() {
        let config = ReelConfig::from_toml_str(SAMPLE).unwrap();
        let text = config.to_toml().unwrap();
        assert_eq!(ReelConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn load_from_dir_reads_reel_toml() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ReelConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(missing.to_string().contains("No reel.toml found"));

        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, SAMPLE).unwrap();
        let from_dir = ReelConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(from_dir.compositions.len(), 2);
        assert_eq!(ReelConfig::load_from_dir(&path).unwrap(), from_dir);
    }

    #[test]
    fn load_reports_parse_failures_with_the_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[compositions.BarChart]\nfps = -1").unwrap();
        let err = ReelConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"), "{err}");
    }
}
