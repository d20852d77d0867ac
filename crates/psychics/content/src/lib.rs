//! Data-driven psychic content.
//!
//! This crate turns data files into the immutable concepts psychics-core
//! instantiates:
//! - Behaviour kinds (code, registered in an [`AbilityRegistry`])
//! - Psychic and ability concepts (data-driven via RON)
//! - Tunables (data-driven via TOML)
//!
//! Loaded concepts live in a [`ConceptCatalog`], which resolves saved psychic
//! names back to concepts when espers are loaded.

pub mod behaviors;
pub mod catalog;
pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use behaviors::{Instant, Passive};
pub use catalog::ConceptCatalog;
pub use registry::AbilityRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{AbilitySpec, ConfigLoader, DamageSpec, PsychicLoader, PsychicSpec};
