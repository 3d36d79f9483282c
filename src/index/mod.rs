//! Index ingestion: the provider contract and the indexer.

mod indexer;
mod memory;
mod provider;

pub use indexer::Indexer;
pub use memory::MemoryIndexProvider;
pub use provider::{IndexProvider, Occurrence, OccurrenceRole};
