//! # Directory Ingest
//!
//! Boundary between an exported contact sheet and the directory engine.
//!
//! ```text
//! table file (.json / .toml)
//!     │
//!     ├──> RawTable        rows of column -> cell text, missing cells = ""
//!     │
//!     ├──> ColumnMap       column-name aliases resolved once per table
//!     │
//!     └──> TableReader     ContactRecord[] (departments zipped, URLs and dates checked)
//! ```

mod columns;
mod error;
mod reader;
mod table;

pub use columns::{ColumnAliases, ColumnMap, Field};
pub use error::{IngestError, Result};
pub use reader::{load_records, TableReader};
pub use table::{RawRow, RawTable, TableFormat};
