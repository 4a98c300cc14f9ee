//! HTTP request handlers
//!
//! Organized by resource.

pub mod comments;
pub mod health;
pub mod insights;
pub mod reactions;
pub mod search;
pub mod stories;
pub mod votes;
