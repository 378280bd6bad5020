//! Vector store implementations

mod factory;
mod in_memory;
mod scoring;
mod sqlite;

pub use factory::VectorStoreFactory;
pub use in_memory::InMemoryVectorStore;
pub use scoring::UNKNOWN_SOURCE;
pub use sqlite::SqliteVectorStore;
