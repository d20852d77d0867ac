//! File-based repository implementations.

mod esper;

pub use esper::FileEsperRepository;
