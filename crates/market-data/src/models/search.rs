//! Discovery request types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which candidate pipelines a discovery request runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Full candidate generation (direct, punctuation, short, name, suffix)
    #[default]
    Symbol,
    /// Name-pattern candidates only
    Name,
    /// Both pipelines, unioned by symbol
    All,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Name => "name",
            Self::All => "all",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symbol" => Ok(Self::Symbol),
            "name" => Ok(Self::Name),
            "all" => Ok(Self::All),
            other => Err(format!("Unknown search type: {}", other)),
        }
    }
}
