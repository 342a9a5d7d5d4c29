//! Configuration management

use crate::core::error::{Error, Result};
use crate::index::{Direction, Selector};
use crate::search::Mode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub query: QueryConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus file used when no `--file` is given
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Direction set, e.g. "right|down" or "all"
    pub directions: String,
    /// Reconstruction algorithm
    pub mode: Mode,
    /// Candidate selection strategy
    pub selection: SelectionMode,
    /// Seed for `selection = "seeded"`
    pub seed: u64,
}

/// Display offsets added to zero-based coordinates on output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_offset: i64,
    pub row_offset: i64,
    pub col_offset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    First,
    Random,
    Seeded,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            directions: "right".to_string(),
            mode: Mode::default(),
            selection: SelectionMode::default(),
            seed: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_offset: 1,
            row_offset: 1,
            col_offset: 1,
        }
    }
}

impl DisplayConfig {
    /// No offsets: coordinates are shown zero-based
    pub const ZERO: DisplayConfig = DisplayConfig {
        page_offset: 0,
        row_offset: 0,
        col_offset: 0,
    };
}

impl QueryConfig {
    /// Parse the configured direction set
    pub fn direction_set(&self) -> Result<Direction> {
        self.directions.parse()
    }

    /// Build the configured selection strategy
    pub fn selector(&self) -> Arc<dyn Selector> {
        self.selection.selector(self.seed)
    }
}

impl SelectionMode {
    pub fn selector(self, seed: u64) -> Arc<dyn Selector> {
        use crate::index::{FirstSelector, RandomSelector, SeededSelector};
        match self {
            SelectionMode::First => Arc::new(FirstSelector),
            SelectionMode::Random => Arc::new(RandomSelector),
            SelectionMode::Seeded => Arc::new(SeededSelector::new(seed)),
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::gridcypher_home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the gridcypher home directory
    pub fn gridcypher_home() -> Result<PathBuf> {
        // Check GRIDCYPHER_HOME env var first
        if let Ok(home) = std::env::var("GRIDCYPHER_HOME") {
            return Ok(PathBuf::from(home));
        }

        // Use XDG directories
        ProjectDirs::from("dev", "gridcypher", "gridcypher")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine gridcypher home directory".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.query.direction_set().unwrap(), Direction::RIGHT);
        assert_eq!(config.query.mode, Mode::Longest);
        assert_eq!(config.query.selection, SelectionMode::First);
        assert_eq!(config.display.page_offset, 1);
        assert!(config.corpus.path.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.query.directions, "right");
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[query]
directions = "right|down"
mode = "ltr"
selection = "seeded"
seed = 7

[display]
page_offset = 3
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.query.direction_set().unwrap(),
            Direction::RIGHT | Direction::DOWN
        );
        assert_eq!(config.query.mode, Mode::Ltr);
        assert_eq!(config.query.selection, SelectionMode::Seeded);
        assert_eq!(config.query.seed, 7);
        assert_eq!(config.display.page_offset, 3);
        assert_eq!(config.display.row_offset, 1);
    }

    #[test]
    fn test_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[query\ndirections = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::TomlParse(_))
        ));
    }
}
