//! In-memory repository implementations for tests and local runs.

mod esper;

pub use esper::InMemoryEsperRepository;
