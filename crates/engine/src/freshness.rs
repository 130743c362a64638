use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::FreshnessThresholds;
use crate::error::{DirectoryError, Result};

const DATE_LAYOUTS: [&str; 4] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y.%m.%d."];

/// How long ago a company was last visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// At least `stale_days` since the last visit
    Stale,
    /// Between `aging_days` and `stale_days`
    Aging,
    /// Visited within `aging_days` (future dates included)
    Recent,
    /// No visit on record
    Unknown,
}

impl Freshness {
    #[must_use]
    pub fn classify(
        last_visit: Option<NaiveDate>,
        today: NaiveDate,
        thresholds: &FreshnessThresholds,
    ) -> Self {
        let Some(last_visit) = last_visit else {
            return Self::Unknown;
        };
        let days = (today - last_visit).num_days();
        if days >= thresholds.stale_days {
            Self::Stale
        } else if days >= thresholds.aging_days {
            Self::Aging
        } else {
            Self::Recent
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stale => "stale",
            Self::Aging => "aging",
            Self::Recent => "recent",
            Self::Unknown => "unknown",
        }
    }
}

/// Parse a visit date cell: `YYYY-MM-DD`, `YYYY.MM.DD`, `YYYY/MM/DD`, or an RFC 3339 timestamp.
///
/// A trailing time component separated by a space or `T` (`2024-03-01 09:30:00`,
/// `2024-03-01T09:30:00`) is ignored.
pub fn parse_visit_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.date_naive());
    }

    let date_part = trimmed
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or_default();
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(date_part, layout).ok())
        .ok_or_else(|| DirectoryError::InvalidDate(raw.to_string()))
}
