use std::path::Path;

use directory_engine::{parse_visit_date, ContactRecord, Department, EngineConfig, RecordId};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::columns::{ColumnAliases, ColumnMap, Field};
use crate::error::Result;
use crate::table::{RawRow, RawTable};

static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid regex"));

/// Turns raw sheet rows into contact records
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    aliases: ColumnAliases,
    config: EngineConfig,
}

impl TableReader {
    #[must_use]
    pub fn new(aliases: ColumnAliases, config: EngineConfig) -> Self {
        Self { aliases, config }
    }

    /// Build one record per non-blank row.
    ///
    /// Record ids are source row indices, so they stay put when blank rows are skipped.
    /// Fails only when the table lacks a name or address column altogether.
    pub fn read(&self, table: &RawTable) -> Result<Vec<ContactRecord>> {
        let columns = self.aliases.resolve(&table.columns())?;

        let records: Vec<ContactRecord> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(idx, row)| {
                let blank = row.is_blank();
                if blank {
                    log::debug!("Skipping blank row {idx}");
                }
                !blank
            })
            .map(|(idx, row)| self.record_from_row(RecordId(idx), row, &columns))
            .collect();

        log::info!("Read {} contact records ({} rows)", records.len(), table.len());
        Ok(records)
    }

    fn record_from_row(&self, id: RecordId, row: &RawRow, columns: &ColumnMap) -> ContactRecord {
        let cell = |field: Field| columns.column(field).map_or("", |column| row.get(column));

        let name = cell(Field::Name).trim();
        let address = cell(Field::Address).trim();
        let mut record = ContactRecord::new(id, name, address)
            .departments(Department::zip_cells(
                cell(Field::Department),
                cell(Field::Contact),
                cell(Field::Phone),
                &self.config.placeholder,
            ))
            .marked_favorite(cell(Field::Favorite).trim() == self.config.favorite_marker);

        if record.name.is_empty() {
            log::warn!("Row {id} has no company name; it only appears under the all bucket");
        }

        record.tags = split_tags(cell(Field::Tags));
        record.parking = non_empty(cell(Field::Parking));
        record.notes = non_empty(cell(Field::Notes));
        record.image_url = self.image_url(id, cell(Field::Image));

        let visit = cell(Field::LastVisit).trim();
        if !visit.is_empty() {
            match parse_visit_date(visit) {
                Ok(date) => record.last_visit = Some(date),
                Err(err) => log::warn!("Row {id}: {err}"),
            }
        }

        record
    }

    fn image_url(&self, id: RecordId, raw: &str) -> Option<String> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        if HTTP_URL.is_match(url) {
            return Some(url.to_string());
        }
        log::warn!("Row {id}: ignoring image value that is not an http(s) URL: {url:?}");
        None
    }
}

/// Load a table file and read it with the given aliases and engine config
pub fn load_records(
    path: &Path,
    aliases: ColumnAliases,
    config: EngineConfig,
) -> Result<Vec<ContactRecord>> {
    let table = RawTable::load(path)?;
    TableReader::new(aliases, config).read(&table)
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
