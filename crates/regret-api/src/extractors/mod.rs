//! Axum extractors for request handling
//!
//! Custom extractors for the anonymous author, path and query parameters,
//! and validated bodies.

mod anonymous;
mod path;
mod query;
mod validated;

pub use anonymous::{AnonymousAuthor, ANONYMOUS_ID_HEADER};
pub use path::{ApiPath, ReactionPath};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
