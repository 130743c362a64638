use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

/// Configuration for the directory engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sentinel label that disables the bucket and region filters
    pub all_label: String,

    /// Umbrella bucket label for names starting with an ASCII letter
    pub latin_label: String,

    /// Filler used when department/contact/phone lines have unequal counts
    pub placeholder: String,

    /// Cell value of the favorite marker column that counts as "favorite"
    pub favorite_marker: String,

    /// Consonant buckets exposed to the filter controls, in display order
    pub buckets: Vec<String>,

    /// Day thresholds for the last-visit freshness indicator
    pub freshness: FreshnessThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            all_label: "전체".to_string(),
            latin_label: "A-Z".to_string(),
            placeholder: "-".to_string(),
            favorite_marker: "O".to_string(),
            buckets: [
                "ㄱ", "ㄴ", "ㄷ", "ㄹ", "ㅁ", "ㅂ", "ㅅ", "ㅇ", "ㅈ", "ㅊ", "ㅋ", "ㅌ", "ㅍ", "ㅎ",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            freshness: FreshnessThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Full list of bucket labels for the filter controls: all-sentinel, consonants, Latin.
    #[must_use]
    pub fn bucket_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.buckets.len() + 2);
        labels.push(self.all_label.clone());
        labels.extend(self.buckets.iter().cloned());
        labels.push(self.latin_label.clone());
        labels
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("all_label", &self.all_label),
            ("latin_label", &self.latin_label),
            ("placeholder", &self.placeholder),
            ("favorite_marker", &self.favorite_marker),
        ] {
            if value.trim().is_empty() {
                return Err(DirectoryError::invalid_config(format!(
                    "{field} must not be empty"
                )));
            }
        }

        if self.all_label == self.latin_label {
            return Err(DirectoryError::invalid_config(format!(
                "all_label and latin_label must differ (both are {:?})",
                self.all_label
            )));
        }

        if self.buckets.is_empty() {
            return Err(DirectoryError::invalid_config("buckets must not be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for bucket in &self.buckets {
            if bucket.chars().count() != 1 {
                return Err(DirectoryError::invalid_config(format!(
                    "bucket {bucket:?} must be a single character"
                )));
            }
            if bucket == &self.all_label || bucket == &self.latin_label {
                return Err(DirectoryError::invalid_config(format!(
                    "bucket {bucket:?} collides with a sentinel label"
                )));
            }
            if !seen.insert(bucket.as_str()) {
                return Err(DirectoryError::invalid_config(format!(
                    "bucket {bucket:?} is listed twice"
                )));
            }
        }

        self.freshness.validate()
    }
}

/// Day thresholds separating the freshness buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessThresholds {
    /// At or above this many days since the last visit a record is stale
    pub stale_days: i64,

    /// At or above this many days (and below `stale_days`) a record is aging
    pub aging_days: i64,
}

impl Default for FreshnessThresholds {
    fn default() -> Self {
        Self {
            stale_days: 30,
            aging_days: 20,
        }
    }
}

impl FreshnessThresholds {
    /// Validate thresholds
    pub fn validate(&self) -> Result<()> {
        if self.aging_days <= 0 {
            return Err(DirectoryError::invalid_config(format!(
                "freshness.aging_days ({}) must be > 0",
                self.aging_days
            )));
        }
        if self.aging_days >= self.stale_days {
            return Err(DirectoryError::invalid_config(format!(
                "freshness.aging_days ({}) must be below freshness.stale_days ({})",
                self.aging_days, self.stale_days
            )));
        }
        Ok(())
    }
}
