//! Unified error type surfaced by the runtime.
//!
//! Wraps repository, core and content failures so the manager and the
//! operator binary can bubble them up with consistent context.

use thiserror::Error;
use uuid::Uuid;

pub use crate::repository::RepositoryError;
use psychics_core::PsychicError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Psychic(#[from] PsychicError),

    #[error("failed to load content: {0:#}")]
    Content(anyhow::Error),

    #[error("no esper registered for entity {0}")]
    UnknownEsper(Uuid),

    #[error("unknown psychic concept `{0}`")]
    UnknownConcept(String),
}
