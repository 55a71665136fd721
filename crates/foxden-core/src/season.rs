//! Season identifiers.
//!
//! A season is a calendar-month partition key in `YYYY-MM` form. The core
//! never orders seasons; it only compares them for equality, though the
//! textual format happens to sort chronologically.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::MetadataError;

/// A calendar-month partition key, e.g. `2025-11`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(String);

impl Season {
    /// The season for the current calendar month (UTC).
    pub fn current() -> Self {
        let now = Utc::now();
        Season(format!("{:04}-{:02}", now.year(), now.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Season {
    type Err = MetadataError;

    /// Parses and validates `YYYY-MM`. Months outside 01–12 are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MetadataError::InvalidField {
            field: "season",
            value: s.to_string(),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let m: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&m) {
            return Err(invalid());
        }
        Ok(Season(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_season() {
        let season: Season = "2025-11".parse().unwrap();
        assert_eq!(season.as_str(), "2025-11");
        assert_eq!(season.to_string(), "2025-11");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["2025", "2025-13", "2025-00", "25-11", "2025-1", "abcd-11", "2025-xy"] {
            assert!(bad.parse::<Season>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn current_is_well_formed() {
        let season = Season::current();
        assert!(season.as_str().parse::<Season>().is_ok());
    }

    #[test]
    fn serde_round_trip_as_plain_string() {
        let season: Season = "2025-11".parse().unwrap();
        let json = serde_json::to_string(&season).unwrap();
        assert_eq!(json, "\"2025-11\"");
        let back: Season = serde_json::from_str(&json).unwrap();
        assert_eq!(back, season);
    }
}
