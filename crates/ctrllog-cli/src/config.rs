//! CLI configuration file
//!
//! Read from `config.toml` in the OS config directory:
//! - Linux: ~/.config/ctrllog/config.toml
//! - macOS: ~/Library/Application Support/ctrllog/config.toml
//! - Windows: %APPDATA%\ctrllog\config\config.toml
//!
//! Command line flags override anything set here.

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ctrllog_core::{Catalog, DiscoverTab};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// JSON catalog to browse. Defaults to the built-in sample catalog.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Tab used by `discover` when `--tab` is not given
    #[serde(default)]
    pub default_tab: Option<DiscoverTab>,
    /// Pins the newest year offered by year pickers. Defaults to today.
    #[serde(default)]
    pub current_year: Option<i32>,
    /// Signed-in username for personalized sections
    #[serde(default)]
    pub username: Option<String>,
}

impl CliConfig {
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ctrllog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from an explicit path (which must exist) or from the default
    /// location (which may be missing).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CliConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// `override_path` (from `--catalog`) wins over the configured catalog
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<Catalog> {
        match override_path.or(self.catalog.as_deref()) {
            Some(path) => Catalog::from_json_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => Ok(Catalog::sample()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config: CliConfig = toml::from_str(
            r#"
            catalog = "/srv/ctrllog/games.json"
            default_tab = "best-reviewed"
            current_year = 2024
            username = "night_city"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/srv/ctrllog/games.json")));
        assert_eq!(config.default_tab, Some(DiscoverTab::BestReviewed));
        assert_eq!(config.current_year(), 2024);
        assert_eq!(config.username.as_deref(), Some("night_city"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.current_year() >= 2024);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_tab = \"by-genre\"").unwrap();
        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_tab, Some(DiscoverTab::ByGenre));
    }

    #[test]
    fn test_catalog_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"games": [{{"id": 7, "title": "Hades", "genre": "action",
                "release_year": 2020, "rating": 4.5}}]}}"#
        )
        .unwrap();

        let config = CliConfig::default();
        assert_eq!(config.load_catalog(None).unwrap(), Catalog::sample());

        let custom = config.load_catalog(Some(file.path())).unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.games()[0].title, "Hades");
    }
}
