//! # regret-db
//!
//! Document store layer implementing the `DocumentStore` port.
//!
//! ## Overview
//!
//! Two adapters are provided:
//!
//! - [`PgDocumentStore`] keeps every collection in one PostgreSQL table with a
//!   JSONB `data` column, accessed through SQLx.
//! - [`MemoryDocumentStore`] keeps documents in process. It backs local
//!   development and the test suites.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regret_db::pool::{create_pool, DatabaseConfig};
//! use regret_db::PgDocumentStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let store = PgDocumentStore::new(pool);
//!     store.ensure_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use stores::{MemoryDocumentStore, PgDocumentStore};
