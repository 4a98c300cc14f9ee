//! `DocumentStore` implementations
//!
//! Each store fulfils the four document primitives defined in regret-core.

mod error;
mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
