//! Content loaders for reading psychic data from files.
//!
//! Psychic concepts are RON, tunables are TOML.

pub mod config;
pub mod psychics;

pub use config::ConfigLoader;
pub use psychics::{AbilitySpec, DamageSpec, PsychicLoader, PsychicSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
