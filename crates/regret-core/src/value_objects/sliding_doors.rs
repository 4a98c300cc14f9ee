//! Sliding-doors "what if" tallies attached to a story

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::lenient::{coerce_count, parse_object};

/// How a voter thinks the alternate path would have turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Better,
    Worse,
    Same,
}

impl VoteChoice {
    pub const ALL: [VoteChoice; 3] = [Self::Better, Self::Worse, Self::Same];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Better => "better",
            Self::Worse => "worse",
            Self::Same => "same",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "better" => Ok(Self::Better),
            "worse" => Ok(Self::Worse),
            "same" => Ok(Self::Same),
            _ => Err(format!("Unknown vote choice: {s}")),
        }
    }
}

/// Rounded share of each choice, in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VotePercentages {
    pub better: u32,
    pub worse: u32,
    pub same: u32,
}

/// Alternate path text plus its three vote tallies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlidingDoors {
    pub alternate_path: String,
    pub votes_better: u64,
    pub votes_worse: u64,
    pub votes_same: u64,
}

impl SlidingDoors {
    /// Fresh record with zeroed tallies
    pub fn new(alternate_path: impl Into<String>) -> Self {
        Self {
            alternate_path: alternate_path.into(),
            votes_better: 0,
            votes_worse: 0,
            votes_same: 0,
        }
    }

    /// Parse stored text. Returns `None` when the story has no usable record.
    pub fn parse(text: Option<&str>) -> Option<Self> {
        let object = parse_object(text)?;

        let alternate_path = match object.get("alternate_path") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let tally = |key: &str| object.get(key).map_or(0, coerce_count);

        Some(Self {
            alternate_path,
            votes_better: tally("votes_better"),
            votes_worse: tally("votes_worse"),
            votes_same: tally("votes_same"),
        })
    }

    /// Canonical JSON text
    pub fn serialize(&self) -> String {
        json!({
            "alternate_path": self.alternate_path,
            "votes_better": self.votes_better,
            "votes_worse": self.votes_worse,
            "votes_same": self.votes_same,
        })
        .to_string()
    }

    /// Copy with one more vote for `choice`
    pub fn with_vote(&self, choice: VoteChoice) -> Self {
        let mut next = self.clone();
        let tally = match choice {
            VoteChoice::Better => &mut next.votes_better,
            VoteChoice::Worse => &mut next.votes_worse,
            VoteChoice::Same => &mut next.votes_same,
        };
        *tally = tally.saturating_add(1);
        next
    }

    pub fn votes_for(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::Better => self.votes_better,
            VoteChoice::Worse => self.votes_worse,
            VoteChoice::Same => self.votes_same,
        }
    }

    pub fn total_votes(&self) -> u64 {
        self.votes_better
            .saturating_add(self.votes_worse)
            .saturating_add(self.votes_same)
    }

    /// Share of each choice. All zero when nobody has voted.
    pub fn percentages(&self) -> VotePercentages {
        let total = self.total_votes();
        if total == 0 {
            return VotePercentages::default();
        }
        let share = |votes: u64| (votes as f64 / total as f64 * 100.0).round() as u32;

        VotePercentages {
            better: share(self.votes_better),
            worse: share(self.votes_worse),
            same: share(self.votes_same),
        }
    }
}
