use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directory_engine::EngineConfig;
use directory_ingest::ColumnAliases;
use serde::{Deserialize, Serialize};

use crate::errors::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "client-directory.toml";

/// Filter controls the directory exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterControl {
    Search,
    Region,
    Bucket,
    Favorites,
}

impl FilterControl {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Region => "region",
            Self::Bucket => "bucket",
            Self::Favorites => "favorites",
        }
    }
}

/// Presentation settings plus engine and column overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Heading printed above the cards
    pub title: String,

    /// Cards per row
    pub columns: usize,

    /// Filter controls that accept input
    pub filters: Vec<FilterControl>,

    /// Default table file when `--table` is not given
    pub table: Option<PathBuf>,

    pub engine: EngineConfig,

    /// Extra column headers, appended to the built-in aliases
    pub aliases: ColumnAliases,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            title: "🏢 거래처 통합 관리".to_string(),
            columns: 3,
            filters: vec![
                FilterControl::Search,
                FilterControl::Region,
                FilterControl::Bucket,
                FilterControl::Favorites,
            ],
            table: None,
            engine: EngineConfig::default(),
            aliases: ColumnAliases::default(),
        }
    }
}

impl DirectoryConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `client-directory.toml` in the working
    /// directory is used when present, defaults otherwise. Returns the file actually read.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_FILE}; using built-in defaults");
                    return Ok((Self::default(), None));
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|err| {
            CliError::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok((config, Some(path)))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| CliError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=6).contains(&self.columns) {
            return Err(CliError::InvalidConfig(format!(
                "columns must be between 1 and 6 (got {})",
                self.columns
            ))
            .into());
        }

        for (idx, control) in self.filters.iter().enumerate() {
            if self.filters[..idx].contains(control) {
                return Err(CliError::InvalidConfig(format!(
                    "filter {} is listed twice",
                    control.as_str()
                ))
                .into());
            }
        }

        self.engine
            .validate()
            .map_err(|err| CliError::InvalidConfig(err.to_string()))?;
        Ok(())
    }

    pub fn shows(&self, control: FilterControl) -> bool {
        self.filters.contains(&control)
    }

    /// Fail when a value was given for a filter the config hides
    pub fn require(&self, control: FilterControl) -> Result<()> {
        if self.shows(control) {
            Ok(())
        } else {
            Err(CliError::FilterDisabled(control.as_str()).into())
        }
    }

    /// Built-in aliases plus the configured extras
    pub fn column_aliases(&self) -> ColumnAliases {
        ColumnAliases::default().merged_with(&self.aliases)
    }

    pub fn resolve_table(&self, cli_table: Option<PathBuf>) -> Result<PathBuf> {
        cli_table
            .or_else(|| self.table.clone())
            .ok_or_else(|| CliError::MissingTable.into())
    }
}
