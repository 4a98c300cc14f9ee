//! Story categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of story categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Career,
    Relationships,
    Money,
    Education,
    Health,
    Family,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Career,
        Self::Relationships,
        Self::Money,
        Self::Education,
        Self::Health,
        Self::Family,
        Self::Other,
    ];

    /// Storage key
    pub const fn key(self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Relationships => "relationships",
            Self::Money => "money",
            Self::Education => "education",
            Self::Health => "health",
            Self::Family => "family",
            Self::Other => "other",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Career => "Career",
            Self::Relationships => "Relationships",
            Self::Money => "Money",
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Family => "Family",
            Self::Other => "Other",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Career => "Job choices, missed opportunities, workplace decisions",
            Self::Relationships => "Love, friendships, family dynamics, social connections",
            Self::Money => "Financial decisions, investments, spending habits",
            Self::Education => "Academic choices, learning opportunities, skill development",
            Self::Health => "Physical and mental health decisions, lifestyle choices",
            Self::Family => "Parenting, family relationships, generational decisions",
            Self::Other => "Miscellaneous regrets and life choices",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Career => "💼",
            Self::Relationships => "💕",
            Self::Money => "💰",
            Self::Education => "🎓",
            Self::Health => "🏥",
            Self::Family => "👨‍👩‍👧‍👦",
            Self::Other => "🤔",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Career => "blue",
            Self::Relationships => "pink",
            Self::Money => "green",
            Self::Education => "purple",
            Self::Health => "red",
            Self::Family => "orange",
            Self::Other => "gray",
        }
    }

    /// Parse a stored key, treating anything unknown as `Other`
    pub fn from_key_or_other(key: &str) -> Self {
        key.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.key() == lower)
            .ok_or_else(|| format!("Unknown category: {s}"))
    }
}
