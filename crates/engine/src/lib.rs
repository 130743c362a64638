//! # Directory Engine
//!
//! Filtering, classification and ordering for a business-contact directory.
//!
//! ## Pipeline
//!
//! ```text
//! ContactRecord[] (immutable snapshot)
//!     │
//!     ├──> Text search      name/address substring containment
//!     │
//!     ├──> Region filter    address starts with the selected first token
//!     │
//!     ├──> Bucket filter    leading Hangul consonant, or "A-Z" for Latin names
//!     │
//!     ├──> Favorites        optional favorites-only predicate
//!     │
//!     └──> Stable sort      favorites first, then name ascending
//!              │
//!              └─> DirectoryEntry[] for the renderer
//! ```
//!
//! The engine is pure: it never mutates its input, performs no I/O and never fails on
//! malformed rows. Favorites are owned by the caller and passed in per call.
//!
//! ## Example
//!
//! ```rust
//! use directory_engine::{ContactRecord, DirectoryEngine, DirectoryFilter, FavoriteSet, RecordId};
//!
//! let records = vec![
//!     ContactRecord::new(RecordId(0), "가나다유통", "서울 강남구"),
//!     ContactRecord::new(RecordId(1), "흐름물산", "경기도 수원시"),
//! ];
//! let mut favorites = FavoriteSet::new();
//! favorites.toggle("흐름물산");
//!
//! let engine = DirectoryEngine::default();
//! let entries = engine.apply(&records, &DirectoryFilter::default(), &favorites);
//! assert_eq!(entries[0].record.name, "흐름물산");
//! assert!(entries[0].is_favorite);
//! ```

mod chosung;
mod config;
mod engine;
mod error;
mod favorites;
mod freshness;
mod region;
mod search;
mod sort;
mod types;

pub use chosung::{initial_consonant, is_latin_initial, CHOSUNG_TABLE, HANGUL_SYLLABLE_BASE};
pub use config::{EngineConfig, FreshnessThresholds};
pub use engine::{Bucket, DirectoryEngine, DirectoryEntry, DirectoryFilter, Region};
pub use error::{DirectoryError, Result};
pub use favorites::FavoriteSet;
pub use freshness::{parse_visit_date, Freshness};
pub use region::{region_candidates, region_of};
pub use search::matches_query;
pub use types::{ContactRecord, Department, RecordId};
