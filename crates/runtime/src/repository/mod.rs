//! Repository layer for persisted esper records.
//!
//! Records are plain [`ConfigSection`](psychics_core::ConfigSection) trees keyed
//! by entity id. Concepts are content, not repository data; they come from the
//! content catalog.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileEsperRepository;
pub use memory::InMemoryEsperRepository;
pub use traits::EsperRepository;
