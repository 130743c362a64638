use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{IngestError, Result};

/// On-disk layout of an exported sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `[{...}, ...]` or `{"rows": [{...}, ...]}`
    Json,
    /// `[[rows]]` array of tables
    Toml,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// One sheet row: column header -> cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    /// Cell text, or "" when the column is absent
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|cell| cell.trim().is_empty())
    }

    fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whole sheet, read in one go
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    #[must_use]
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let format = TableFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let table = match format {
            TableFormat::Json => Self::from_json_str(&text)?,
            TableFormat::Toml => Self::from_toml_str(&text)?,
        };
        log::debug!("Loaded {} rows from {}", table.rows.len(), path.display());
        Ok(table)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let rows = match value {
            serde_json::Value::Array(rows) => rows,
            serde_json::Value::Object(mut obj) => match obj.remove("rows") {
                Some(serde_json::Value::Array(rows)) => rows,
                _ => {
                    return Err(IngestError::SchemaMismatch(
                        "expected a top-level array or a \"rows\" array".to_string(),
                    ))
                }
            },
            _ => {
                return Err(IngestError::SchemaMismatch(
                    "expected a top-level array or a \"rows\" array".to_string(),
                ))
            }
        };

        rows.into_iter()
            .enumerate()
            .map(|(idx, row)| match row {
                serde_json::Value::Object(cells) => Ok(cells
                    .into_iter()
                    .map(|(column, cell)| (column, json_cell_text(cell)))
                    .collect::<RawRow>()),
                other => Err(IngestError::SchemaMismatch(format!(
                    "row {idx} is not an object: {other}"
                ))),
            })
            .collect::<Result<Vec<RawRow>>>()
            .map(Self::new)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut doc = text.parse::<toml::Table>()?;
        let rows = match doc.remove("rows") {
            Some(toml::Value::Array(rows)) => rows,
            None => Vec::new(),
            Some(_) => {
                return Err(IngestError::SchemaMismatch(
                    "\"rows\" must be an array of tables".to_string(),
                ))
            }
        };

        rows.into_iter()
            .enumerate()
            .map(|(idx, row)| match row {
                toml::Value::Table(cells) => Ok(cells
                    .into_iter()
                    .map(|(column, cell)| (column, toml_cell_text(cell)))
                    .collect::<RawRow>()),
                other => Err(IngestError::SchemaMismatch(format!(
                    "row {idx} is not a table: {other}"
                ))),
            })
            .collect::<Result<Vec<RawRow>>>()
            .map(Self::new)
    }

    #[must_use]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column header seen in any row
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = self.rows.iter().flat_map(RawRow::columns).collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    }
}

fn json_cell_text(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    }
}

fn toml_cell_text(cell: toml::Value) -> String {
    match cell {
        toml::Value::String(text) => text,
        toml::Value::Datetime(dt) => dt.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_array_with_nulls_and_numbers() {
        let table = RawTable::from_json_str(
            r#"[{"거래처명":"세창상사","주소":null,"연락처":1012345678},{"거래처명":"가람"}]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("주소"), "");
        assert_eq!(table.rows()[0].get("연락처"), "1012345678");
        assert_eq!(table.rows()[1].get("주소"), "");
        assert_eq!(table.columns(), vec!["거래처명", "연락처", "주소"]);
    }

    #[test]
    fn json_rows_wrapper_is_accepted() {
        let table = RawTable::from_json_str(r#"{"rows":[{"거래처명":"가람"}]}"#).unwrap();
        assert_eq!(table.rows()[0].get("거래처명"), "가람");
    }

    #[test]
    fn json_scalar_rows_are_rejected() {
        assert!(matches!(
            RawTable::from_json_str(r#"["가람"]"#),
            Err(IngestError::SchemaMismatch(_))
        ));
        assert!(matches!(
            RawTable::from_json_str("42"),
            Err(IngestError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn toml_rows_with_dates() {
        let table = RawTable::from_toml_str(
            r#"
            [[rows]]
            "거래처명" = "세창상사"
            "마지막 방문일" = 2024-03-01

            [[rows]]
            "거래처명" = "가람"
            "마지막 방문일" = 2024-03-05T09:30:00

            [[rows]]
            "거래처명" = "나래"
            "연락처" = 1012345678
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].get("마지막 방문일"), "2024-03-01");
        assert_eq!(table.rows()[1].get("마지막 방문일"), "2024-03-05T09:30:00");
        assert_eq!(table.rows()[2].get("연락처"), "1012345678");
    }

    #[test]
    fn toml_without_rows_is_empty() {
        assert!(RawTable::from_toml_str("title = \"x\"").unwrap().is_empty());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            TableFormat::from_path(Path::new("sheet.JSON")).unwrap(),
            TableFormat::Json
        );
        assert_eq!(
            TableFormat::from_path(Path::new("sheet.toml")).unwrap(),
            TableFormat::Toml
        );
        assert!(TableFormat::from_path(Path::new("sheet.xlsx")).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.json");
        std::fs::write(&path, r#"[{"거래처명":"세창상사"}]"#).unwrap();
        let table = RawTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(matches!(
            RawTable::load(&dir.path().join("missing.json")),
            Err(IngestError::Io(_))
        ));
    }

    #[test]
    fn blank_rows_are_detected() {
        let row: RawRow = [("거래처명", " "), ("주소", "")].into_iter().collect();
        assert!(row.is_blank());
    }
}
