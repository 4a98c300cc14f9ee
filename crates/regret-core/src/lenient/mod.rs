//! Lenient parsing of JSON-object text fields
//!
//! Counter bundles and sliding-doors tallies are stored as text. Older rows
//! were written by hand with single quotes, bare keys or bare values, so reads
//! go through a strict parse first and the [`repair`] table second. Nothing in
//! this module performs I/O or panics.

mod coerce;
mod repair;

pub use coerce::coerce_count;
pub use repair::repair;

use serde_json::{Map, Value};
use tracing::warn;

/// A parsed JSON object
pub type JsonObject = Map<String, Value>;

/// Parse stored text into a JSON object, repairing it if needed.
///
/// Returns `None` when the input is absent or blank, or when neither the
/// strict parse nor the repaired parse yields a key-value object. The
/// unrecoverable case is logged as a warning and never surfaced.
pub fn parse_object(text: Option<&str>) -> Option<JsonObject> {
    let text = text.filter(|t| !t.trim().is_empty())?;

    if let Some(object) = strict_object(text) {
        return Some(object);
    }

    let repaired = repair(text);
    if let Some(object) = strict_object(&repaired) {
        return Some(object);
    }

    warn!(value = %text, "Unrecoverable stored JSON value, falling back to default");
    None
}

/// Strict parse that only accepts a top-level object
fn strict_object(text: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
