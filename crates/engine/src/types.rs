use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const MAP_SEARCH_BASE: &str = "https://map.naver.com/v5/search/";

/// Position of a record in its source table (0-indexed data row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of the contact table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRecord {
    /// Source row index
    pub id: RecordId,

    /// Company display name; also the favorite-membership key
    pub name: String,

    /// Free-text address; its first token is the region
    pub address: String,

    /// Department contact rows, positionally zipped from the source cells
    #[serde(default)]
    pub departments: Vec<Department>,

    /// Handled product lines
    #[serde(default)]
    pub tags: Vec<String>,

    /// Parking and site entry information
    pub parking: Option<String>,

    /// Account temperament and other remarks
    pub notes: Option<String>,

    /// Photo URL, only when it looks like an HTTP(S) URL
    pub image_url: Option<String>,

    /// Date of the last visit
    pub last_visit: Option<NaiveDate>,

    /// Favorite marker carried by the table itself
    #[serde(default)]
    pub marked_favorite: bool,
}

impl ContactRecord {
    /// Create a record with name and address only
    pub fn new(id: RecordId, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            departments: Vec::new(),
            tags: Vec::new(),
            parking: None,
            notes: None,
            image_url: None,
            last_visit: None,
            marked_favorite: false,
        }
    }

    /// Builder: set department rows
    #[must_use]
    pub fn departments(mut self, departments: Vec<Department>) -> Self {
        self.departments = departments;
        self
    }

    /// Builder: add a tag
    #[must_use]
    pub fn add_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Builder: set last visit date
    #[must_use]
    pub const fn last_visit(mut self, date: NaiveDate) -> Self {
        self.last_visit = Some(date);
        self
    }

    /// Builder: set the table-side favorite marker
    #[must_use]
    pub const fn marked_favorite(mut self, marked: bool) -> Self {
        self.marked_favorite = marked;
        self
    }

    /// Map search link for the address, if there is one
    #[must_use]
    pub fn map_search_url(&self) -> Option<String> {
        if self.address.is_empty() {
            return None;
        }
        Some(format!("{MAP_SEARCH_BASE}{}", self.address))
    }

    /// Content hash over name and address, stable across table re-reads.
    ///
    /// Unlike `name`, this stays distinct for two companies sharing a display name
    /// at different addresses.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.address.as_bytes());
        let digest = hasher.finalize();
        hex_encode_lower(&digest[..8])
    }
}

/// A (department, contact person, phone) triple
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub label: String,
    pub contact: String,
    pub phone: String,
}

impl Department {
    pub fn new(
        label: impl Into<String>,
        contact: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            contact: contact.into(),
            phone: phone.into(),
        }
    }

    /// Rebuild department rows from three newline-delimited cells.
    ///
    /// Line `k` of each cell belongs to row `k`; shorter cells are padded with
    /// `placeholder`. Three blank cells produce no rows.
    #[must_use]
    pub fn zip_cells(labels: &str, contacts: &str, phones: &str, placeholder: &str) -> Vec<Self> {
        if [labels, contacts, phones].iter().all(|cell| cell.trim().is_empty()) {
            return Vec::new();
        }

        let split = |cell: &str| -> Vec<String> {
            cell.split('\n')
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect()
        };
        let labels = split(labels);
        let contacts = split(contacts);
        let phones = split(phones);

        let rows = labels.len().max(contacts.len()).max(phones.len());
        let pick = |lines: &[String], k: usize| {
            lines
                .get(k)
                .cloned()
                .unwrap_or_else(|| placeholder.to_string())
        };

        (0..rows)
            .map(|k| Self {
                label: pick(&labels, k),
                contact: pick(&contacts, k),
                phone: pick(&phones, k),
            })
            .collect()
    }

    /// `tel:` link for the phone number; `None` for placeholder or blank phones
    #[must_use]
    pub fn tel_href(&self, placeholder: &str) -> Option<String> {
        let phone = self.phone.trim();
        if phone.is_empty() || phone == placeholder {
            return None;
        }
        Some(format!("tel:{phone}"))
    }
}

fn hex_encode_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len().saturating_mul(2));
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zip_pads_shorter_cells_positionally() {
        let rows = Department::zip_cells("영업\n총무", "홍길동", "010-1\n010-2", "-");
        assert_eq!(
            rows,
            vec![
                Department::new("영업", "홍길동", "010-1"),
                Department::new("총무", "-", "010-2"),
            ]
        );
    }

    #[test]
    fn zip_uses_longest_cell_and_strips_carriage_returns() {
        let rows = Department::zip_cells("영업\r\n", "김\r\n이\r\n박", "", "-");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Department::new("영업", "김", ""));
        assert_eq!(rows[1], Department::new("", "이", "-"));
        assert_eq!(rows[2], Department::new("-", "박", "-"));
    }

    #[test]
    fn zip_of_blank_cells_is_empty() {
        assert!(Department::zip_cells("", " ", "", "-").is_empty());
    }

    #[test]
    fn tel_href_skips_placeholder() {
        assert_eq!(
            Department::new("영업", "홍길동", "010-1234").tel_href("-"),
            Some("tel:010-1234".to_string())
        );
        assert_eq!(Department::new("영업", "홍길동", "-").tel_href("-"), None);
    }

    #[test]
    fn map_search_url_requires_address() {
        let record = ContactRecord::new(RecordId(0), "세창상사", "부산 해운대구");
        assert_eq!(
            record.map_search_url().as_deref(),
            Some("https://map.naver.com/v5/search/부산 해운대구")
        );
        assert_eq!(
            ContactRecord::new(RecordId(1), "세창상사", "").map_search_url(),
            None
        );
    }

    #[test]
    fn fingerprint_separates_same_name_different_address() {
        let a = ContactRecord::new(RecordId(0), "세창상사", "서울 중구");
        let b = ContactRecord::new(RecordId(1), "세창상사", "부산 중구");
        let a_again = ContactRecord::new(RecordId(7), "세창상사", "서울 중구");
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a_again.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);
    }
}
