//! Runtime configuration read from the process environment.

use std::env;
use std::path::{Path, PathBuf};

use psychics_content::{AbilityRegistry, ConceptCatalog, ConfigLoader, PsychicLoader};
use psychics_core::PsychicsConfig;

use crate::error::{Result, RuntimeError};
use crate::manager::PsychicManager;
use crate::repository::FileEsperRepository;

/// Where the runtime keeps records and finds its content.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub concepts_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub autosave_interval: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            concepts_path: None,
            config_path: None,
            autosave_interval: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PSYCHICS_DATA_DIR` - Directory for esper records (default: platform-specific)
    /// - `PSYCHICS_CONCEPTS` - RON file with psychic concepts (default: none)
    /// - `PSYCHICS_CONFIG` - TOML file with tunables (default: built-in values)
    /// - `PSYCHICS_AUTOSAVE` - Ticks between autosaves, overriding the TOML value
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("PSYCHICS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.concepts_path = lookup("PSYCHICS_CONCEPTS").map(PathBuf::from);
        config.config_path = lookup("PSYCHICS_CONFIG").map(PathBuf::from);
        config.autosave_interval = lookup("PSYCHICS_AUTOSAVE").and_then(|v| v.parse().ok());

        config
    }

    /// Tunables from the TOML file, if any, with the autosave override applied.
    pub fn psychics_config(&self) -> Result<PsychicsConfig> {
        let mut config = match &self.config_path {
            Some(path) => ConfigLoader::load(path).map_err(RuntimeError::Content)?,
            None => PsychicsConfig::default(),
        };
        if let Some(interval) = self.autosave_interval {
            config.autosave_interval = interval;
        }
        Ok(config)
    }

    /// Concept catalog from the RON file, or an empty catalog.
    pub fn catalog(&self, registry: &AbilityRegistry) -> Result<ConceptCatalog> {
        match &self.concepts_path {
            Some(path) => PsychicLoader::load(path, registry).map_err(RuntimeError::Content),
            None => Ok(ConceptCatalog::new()),
        }
    }

    /// Builds a manager backed by a file repository under `data_dir`.
    pub fn build_manager(&self, registry: &AbilityRegistry) -> Result<PsychicManager> {
        let catalog = self.catalog(registry)?;
        let config = self.psychics_config()?;
        let repository = FileEsperRepository::new(&self.data_dir)?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            psychics = catalog.len(),
            autosave_interval = config.autosave_interval,
            "psychics runtime configured"
        );

        Ok(PsychicManager::new(catalog, Box::new(repository), config))
    }
}

/// Platform data directory, falling back to `./data/espers`.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "psychics")
        .map(|dirs| dirs.data_dir().join("espers"))
        .unwrap_or_else(|| Path::new("data").join("espers"))
}
