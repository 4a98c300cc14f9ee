//! Textual repair table for near-JSON object text

use regex::Regex;

lazy_static::lazy_static! {
    static ref BARE_KEY: Regex =
        Regex::new(r"([{,]\s*)(\w+)(\s*:)").expect("bare key pattern is valid");
    static ref BARE_VALUE: Regex =
        Regex::new(r#":\s*([^",{}\[\]]+)([,}\]])"#).expect("bare value pattern is valid");
}

/// Apply the repair table to near-JSON text.
///
/// The steps run in a fixed order and each one sees the output of the
/// previous one:
///
/// 1. single quotes become double quotes
/// 2. bare identifier keys get quoted
/// 3. bare scalar values get quoted (numeric coercion happens later)
///
/// Only the malformed shapes found in stored data are handled. The output is
/// not guaranteed to be valid JSON.
pub fn repair(text: &str) -> String {
    let double_quoted = text.replace('\'', "\"");
    let keys_quoted = BARE_KEY.replace_all(&double_quoted, "${1}\"${2}\"${3}");
    BARE_VALUE
        .replace_all(&keys_quoted, ":\"${1}\"${2}")
        .into_owned()
}
