//! Reaction counters stored as a text-encoded JSON object

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lenient::{coerce_count, parse_object};

/// Kind of reaction a reader can leave
///
/// Stories accept `me_too`, `hugs` and `wisdom`. Comments accept `helpful`
/// and `heart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    MeToo,
    Hugs,
    Wisdom,
    Helpful,
    Heart,
}

impl ReactionKind {
    /// Every known reaction kind, in storage order
    pub const ALL: [ReactionKind; 5] = [
        Self::MeToo,
        Self::Hugs,
        Self::Wisdom,
        Self::Helpful,
        Self::Heart,
    ];

    /// Kinds that apply to stories
    pub const STORY: [ReactionKind; 3] = [Self::MeToo, Self::Hugs, Self::Wisdom];

    /// Kinds that apply to comments
    pub const COMMENT: [ReactionKind; 2] = [Self::Helpful, Self::Heart];

    /// Storage key for this kind
    pub const fn key(self) -> &'static str {
        match self {
            Self::MeToo => "me_too",
            Self::Hugs => "hugs",
            Self::Wisdom => "wisdom",
            Self::Helpful => "helpful",
            Self::Heart => "heart",
        }
    }

    /// Human readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::MeToo => "Me Too",
            Self::Hugs => "Hugs",
            Self::Wisdom => "Wisdom",
            Self::Helpful => "Helpful",
            Self::Heart => "Heart",
        }
    }

    #[inline]
    pub fn is_story_kind(self) -> bool {
        Self::STORY.contains(&self)
    }

    #[inline]
    pub fn is_comment_kind(self) -> bool {
        Self::COMMENT.contains(&self)
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("Unknown reaction kind: {s}"))
    }
}

/// Mapping from reaction kind to a non-negative count.
///
/// Only known kinds are ever held. A known kind that was absent from the
/// stored text stays absent, and [`ReactionBundle::get`] reads it as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReactionBundle {
    counts: BTreeMap<ReactionKind, u64>,
}

impl ReactionBundle {
    /// Bundle with every given kind present at 0
    pub fn zeroed(kinds: &[ReactionKind]) -> Self {
        Self {
            counts: kinds.iter().map(|kind| (*kind, 0)).collect(),
        }
    }

    /// Default bundle for a new story
    pub fn story_default() -> Self {
        Self::zeroed(&ReactionKind::STORY)
    }

    /// Default bundle for a new comment
    pub fn comment_default() -> Self {
        Self::zeroed(&ReactionKind::COMMENT)
    }

    /// Set a count, returning the updated bundle
    pub fn with(mut self, kind: ReactionKind, count: u64) -> Self {
        self.counts.insert(kind, count);
        self
    }

    /// Parse stored text, falling back to `default` when it cannot be read.
    ///
    /// Keys outside the known kinds are dropped. Values are coerced with
    /// [`coerce_count`]. This never fails.
    pub fn parse(text: Option<&str>, default: &ReactionBundle) -> Self {
        let Some(object) = parse_object(text) else {
            return default.clone();
        };

        let counts = ReactionKind::ALL
            .into_iter()
            .filter_map(|kind| object.get(kind.key()).map(|v| (kind, coerce_count(v))))
            .collect();

        Self { counts }
    }

    /// Canonical JSON text with numeric values, keys in kind order
    pub fn serialize(&self) -> String {
        serde_json::to_string(&self.counts).unwrap_or_else(|_| String::from("{}"))
    }

    /// Re-encode stored text in canonical form
    pub fn normalize_text(text: Option<&str>, default: &ReactionBundle) -> String {
        Self::parse(text, default).serialize()
    }

    /// Count for a kind, 0 when absent
    #[inline]
    pub fn get(&self, kind: ReactionKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, kind: ReactionKind) -> bool {
        self.counts.contains_key(&kind)
    }

    /// Copy with `kind` raised by one. An absent kind becomes 1.
    pub fn incremented(&self, kind: ReactionKind) -> Self {
        let mut next = self.clone();
        let count = next.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
        next
    }

    /// Sum of every present count
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, c| acc.saturating_add(*c))
    }

    /// Sum of the counts for the given kinds
    pub fn total_of(&self, kinds: &[ReactionKind]) -> u64 {
        kinds
            .iter()
            .fold(0, |acc, kind| acc.saturating_add(self.get(*kind)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u64)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
