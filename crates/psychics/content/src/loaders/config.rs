//! Tunables loader.

use std::path::Path;

use psychics_core::PsychicsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`PsychicsConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<PsychicsConfig> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    pub fn load_str(content: &str) -> LoadResult<PsychicsConfig> {
        let config: PsychicsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
