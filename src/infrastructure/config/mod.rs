use crate::domains::selection::memory::DEFAULT_PROJECT_KEY;
use crate::domains::sessions::{FilterMode, SortMode};
use crate::errors::{Result, SelectionError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const FILTER_ENV: &str = "SCHALTWERK_SELECTION_FILTER";
const SORT_ENV: &str = "SCHALTWERK_SELECTION_SORT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    pub default_filter: FilterMode,
    pub default_sort: SortMode,
    pub default_project_key: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_filter: FilterMode::All,
            default_sort: SortMode::Name,
            default_project_key: DEFAULT_PROJECT_KEY.to_string(),
        }
    }
}

impl SelectionConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("schaltwerk").join("selection.toml"))
    }

    /// Loads from the user config directory, then applies environment
    /// overrides. A missing file is not an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                log::warn!("No config directory available, using default selection settings");
                Self::default()
            }
        };
        for warning in config.apply_env_overrides() {
            log::warn!("{warning}");
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Selection config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| SelectionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            toml::from_str(&contents).map_err(|source| SelectionError::InvalidConfig {
                path: path.to_path_buf(),
                source,
            })?;

        if config.default_project_key.trim().is_empty() {
            return Err(SelectionError::InvalidValue(
                "default_project_key must not be empty".to_string(),
            ));
        }

        log::debug!("Loaded selection config from {}", path.display());
        Ok(config)
    }

    /// Returns warnings for values that could not be parsed; those keep the
    /// configured value.
    pub fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides(env::var(FILTER_ENV).ok(), env::var(SORT_ENV).ok())
    }

    fn apply_overrides(&mut self, filter: Option<String>, sort: Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(value) = filter {
            match value.trim().parse::<FilterMode>() {
                Ok(mode) => self.default_filter = mode,
                Err(e) => warnings.push(format!(
                    "Invalid {FILTER_ENV} value '{value}': {e}. Keeping {}.",
                    self.default_filter.as_str()
                )),
            }
        }

        if let Some(value) = sort {
            match value.trim().parse::<SortMode>() {
                Ok(mode) => self.default_sort = mode,
                Err(e) => warnings.push(format!(
                    "Invalid {SORT_ENV} value '{value}': {e}. Keeping {}.",
                    self.default_sort.as_str()
                )),
            }
        }

        warnings
    }
}
