//! Database models - SQLx-compatible structs for PostgreSQL tables

mod document;

pub use document::DocumentModel;
