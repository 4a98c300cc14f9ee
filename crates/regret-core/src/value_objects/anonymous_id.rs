//! Pseudonymous author and voter identifier

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const PREFIX: &str = "anon_";
const RANDOM_LEN: usize = 9;
const MAX_LEN: usize = 64;

/// Client-held pseudonym attached to stories, comments and votes
///
/// Generated ids look like `anon_k3j9x0a2bl8m2v4c1`: nine random base-36
/// characters followed by the creation time in base-36 milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnonymousId(String);

impl AnonymousId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let random: String = (0..RANDOM_LEN)
            .filter_map(|_| char::from_digit(rng.gen_range(0..36), 36))
            .collect();
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);

        Self(format!("{PREFIX}{random}{}", to_base36(millis)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AnonymousId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AnonymousId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::Validation(
                "Anonymous id must not be empty".to_string(),
            ));
        }
        if s.len() > MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Anonymous id must be at most {MAX_LEN} characters"
            )));
        }
        if !s.chars().all(|c| c.is_ascii_graphic()) {
            return Err(DomainError::Validation(
                "Anonymous id must be visible ASCII".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        if let Some(c) = char::from_digit((n % 36) as u32, 36) {
            digits.push(c);
        }
        n /= 36;
    }
    digits.iter().rev().collect()
}
