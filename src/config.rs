//! codeharvest configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main codeharvest configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Workspace layout
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Block extraction thresholds
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Content classification thresholds
    #[serde(default)]
    pub classify: ClassifyConfig,
}

impl HarvestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Default config file location (~/.codeharvest/config.toml)
    pub fn default_path() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".codeharvest")
            .join("config.toml")
    }
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root directory; projects live under `<root>/<user>/<project>/`
    pub root: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".").join("web").join("workspace"),
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Minimum trimmed body length for any annotated block
    pub min_body_len: usize,

    /// Minimum trimmed body length for script files
    pub min_script_body_len: usize,

    /// Longest string still treated as a bare filename
    pub max_filename_len: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_body_len: 10,
            min_script_body_len: 50,
            max_filename_len: 50,
        }
    }
}

/// Classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Bodies with fewer lines than this may be treated as fragments
    pub fragment_max_lines: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            fragment_max_lines: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarvestConfig::default();
        assert_eq!(config.extract.min_body_len, 10);
        assert_eq!(config.extract.min_script_body_len, 50);
        assert_eq!(config.classify.fragment_max_lines, 100);
        assert!(config.workspace.root.ends_with("web/workspace"));
    }

    #[test]
    fn test_partial_toml() {
        let config = HarvestConfig::from_toml(
            r#"
            [workspace]
            root = "/srv/projects"

            [extract]
            min_script_body_len = 80
            "#,
        )
        .unwrap();
        assert_eq!(config.workspace.root, PathBuf::from("/srv/projects"));
        assert_eq!(config.extract.min_script_body_len, 80);
        assert_eq!(config.extract.min_body_len, 10);
        assert_eq!(config.classify.fragment_max_lines, 100);
    }

    #[test]
    fn test_invalid_toml() {
        let err = HarvestConfig::from_toml("[extract\nmin_body_len = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = HarvestConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = HarvestConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.extract.max_filename_len, config.extract.max_filename_len);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HarvestConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_default_path() {
        assert!(HarvestConfig::default_path().ends_with(".codeharvest/config.toml"));
    }
}
