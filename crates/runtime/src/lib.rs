//! Runtime wiring for psychics.
//!
//! This crate connects the core to the outside world: it keeps a registry of
//! espers, drives them from a tick scheduler, persists their records and
//! reads its setup from the environment. Hosts embed [`PsychicManager`].
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the esper registry and tick scheduler
//! - [`repository`] provides record storage (file and in-memory)
//! - [`config`] reads environment-driven setup
//! - [`logging`] installs the tracing subscriber used by binaries
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod repository;

pub use config::{RuntimeConfig, default_data_dir};
pub use error::{Result, RuntimeError};
pub use manager::PsychicManager;
pub use repository::{
    EsperRepository, FileEsperRepository, InMemoryEsperRepository, RepositoryError,
};
