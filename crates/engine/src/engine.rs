use serde::Serialize;

use crate::chosung::{initial_consonant, is_latin_initial};
use crate::config::EngineConfig;
use crate::error::{DirectoryError, Result};
use crate::favorites::FavoriteSet;
use crate::region::region_candidates;
use crate::search::matches_query;
use crate::sort::order_entries;
use crate::types::ContactRecord;

/// Selected initial-consonant bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Bucket {
    /// No bucket filtering
    #[default]
    All,
    /// Names starting with an ASCII letter
    Latin,
    /// Names whose classification equals the label
    Initial(String),
}

impl Bucket {
    /// Interpret a filter-control label. Unknown labels become `Initial` and simply match
    /// nothing reachable.
    #[must_use]
    pub fn from_label(label: &str, config: &EngineConfig) -> Self {
        if label.is_empty() || label == config.all_label {
            Self::All
        } else if label == config.latin_label {
            Self::Latin
        } else {
            Self::Initial(label.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Latin => is_latin_initial(name),
            Self::Initial(label) => initial_consonant(name) == *label,
        }
    }
}

/// Selected region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Region {
    /// No region filtering
    #[default]
    All,
    /// Addresses starting with this string
    Prefix(String),
}

impl Region {
    #[must_use]
    pub fn from_label(label: &str, config: &EngineConfig) -> Self {
        if label.is_empty() || label == config.all_label {
            Self::All
        } else {
            Self::Prefix(label.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, address: &str) -> bool {
        match self {
            Self::All => true,
            Self::Prefix(prefix) => address.starts_with(prefix.as_str()),
        }
    }
}

/// Filter criteria for one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
    /// Free-text query; empty disables the search stage
    pub query: String,
    pub bucket: Bucket,
    pub region: Region,
    /// Keep only favorites
    pub favorites_only: bool,
}

impl DirectoryFilter {
    /// Builder: set query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Builder: set bucket
    #[must_use]
    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = bucket;
        self
    }

    /// Builder: set region
    #[must_use]
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Builder: restrict to favorites
    #[must_use]
    pub const fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }
}

/// A record as handed to the renderer, with its derived attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry<'a> {
    #[serde(flatten)]
    pub record: &'a ContactRecord,
    pub is_favorite: bool,
    pub classification: String,
}

/// Stateless filter/classify/sort pipeline over a contact table
#[derive(Debug, Clone, Default)]
pub struct DirectoryEngine {
    config: EngineConfig,
}

impl DirectoryEngine {
    /// Create an engine after validating `config`
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The 16 bucket labels for the filter controls
    #[must_use]
    pub fn bucket_labels(&self) -> Vec<String> {
        self.config.bucket_labels()
    }

    /// Region labels for the filter controls
    #[must_use]
    pub fn region_candidates(&self, records: &[ContactRecord]) -> Vec<String> {
        region_candidates(records, &self.config.all_label)
    }

    /// Raw classification label of a name
    #[must_use]
    pub fn classify(&self, name: &str) -> String {
        initial_consonant(name)
    }

    #[must_use]
    pub fn bucket_from_label(&self, label: &str) -> Bucket {
        Bucket::from_label(label, &self.config)
    }

    #[must_use]
    pub fn region_from_label(&self, label: &str) -> Region {
        Region::from_label(label, &self.config)
    }

    /// Resolve a bucket chosen from the controls.
    ///
    /// Only [`Self::bucket_labels`] are selectable; an empty label means the all-sentinel.
    pub fn select_bucket(&self, label: &str) -> Result<Bucket> {
        let labels = self.bucket_labels();
        if label.is_empty() || labels.iter().any(|known| known == label) {
            return Ok(self.bucket_from_label(label));
        }
        Err(DirectoryError::unknown_label("bucket", label, &labels))
    }

    /// Resolve a region chosen from the controls.
    ///
    /// Only whole first-token candidates of `records` are selectable, never a partial token.
    pub fn select_region(&self, records: &[ContactRecord], label: &str) -> Result<Region> {
        let candidates = self.region_candidates(records);
        if label.is_empty() || candidates.iter().any(|known| known == label) {
            return Ok(self.region_from_label(label));
        }
        Err(DirectoryError::unknown_label("region", label, &candidates))
    }

    /// Run search, region, bucket and favorites filters, then order the survivors.
    ///
    /// `records` is only read; an empty result is a valid outcome.
    #[must_use]
    pub fn apply<'a>(
        &self,
        records: &'a [ContactRecord],
        filter: &DirectoryFilter,
        favorites: &FavoriteSet,
    ) -> Vec<DirectoryEntry<'a>> {
        let searched: Vec<&ContactRecord> = records
            .iter()
            .filter(|record| matches_query(record, &filter.query))
            .collect();
        log::debug!(
            "search {:?}: {} -> {} records",
            filter.query,
            records.len(),
            searched.len()
        );

        let regional: Vec<&ContactRecord> = searched
            .into_iter()
            .filter(|record| filter.region.matches(&record.address))
            .collect();
        log::debug!("region {:?}: {} records", filter.region, regional.len());

        let bucketed: Vec<&ContactRecord> = regional
            .into_iter()
            .filter(|record| filter.bucket.matches(&record.name))
            .collect();
        log::debug!("bucket {:?}: {} records", filter.bucket, bucketed.len());

        let mut entries: Vec<DirectoryEntry<'a>> = bucketed
            .into_iter()
            .map(|record| DirectoryEntry {
                record,
                is_favorite: favorites.is_favorite(record),
                classification: initial_consonant(&record.name),
            })
            .filter(|entry| !filter.favorites_only || entry.is_favorite)
            .collect();
        if filter.favorites_only {
            log::debug!("favorites only: {} records", entries.len());
        }

        order_entries(&mut entries);
        entries
    }

    /// Per-bucket hit counts under `filter`, ignoring its own bucket selection.
    ///
    /// Labels follow [`Self::bucket_labels`]; the all-sentinel counts every survivor.
    #[must_use]
    pub fn bucket_counts(
        &self,
        records: &[ContactRecord],
        filter: &DirectoryFilter,
        favorites: &FavoriteSet,
    ) -> Vec<(String, usize)> {
        let unbucketed = DirectoryFilter {
            bucket: Bucket::All,
            ..filter.clone()
        };
        let survivors = self.apply(records, &unbucketed, favorites);

        self.bucket_labels()
            .into_iter()
            .map(|label| {
                let bucket = self.bucket_from_label(&label);
                let count = survivors
                    .iter()
                    .filter(|entry| bucket.matches(&entry.record.name))
                    .count();
                (label, count)
            })
            .collect()
    }
}
