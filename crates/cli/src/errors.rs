use directory_engine::DirectoryError;
use directory_ingest::IngestError;
use directory_protocol::ErrorEnvelope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("The {0} filter is disabled in the configuration")]
    FilterDisabled(&'static str),

    #[error("No table given: pass --table or set `table` in the config file")]
    MissingTable,
}

/// Map an error chain to a stable code plus a next-step hint
pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");
    let (code, hint) = classify_chain(err);
    ErrorEnvelope {
        code: code.to_string(),
        message,
        hint: hint.map(ToString::to_string),
    }
}

fn classify_chain(err: &anyhow::Error) -> (&'static str, Option<&'static str>) {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return match cli {
                CliError::InvalidConfig(_) => (
                    "invalid_config",
                    Some("Fix the config file or pass --config with a valid one."),
                ),
                CliError::FilterDisabled(_) => (
                    "filter_disabled",
                    Some("Add the filter to `filters` in the config file to enable it."),
                ),
                CliError::MissingTable => (
                    "table_unreadable",
                    Some("Pass --table with an exported sheet (.json or .toml)."),
                ),
            };
        }
        if let Some(ingest) = cause.downcast_ref::<IngestError>() {
            return match ingest {
                IngestError::SchemaMismatch(_) => (
                    "schema_mismatch",
                    Some("Check the column headers or add aliases under [aliases]."),
                ),
                IngestError::UnsupportedFormat(_) => (
                    "table_unreadable",
                    Some("Export the sheet as .json or .toml."),
                ),
                IngestError::Io(_) | IngestError::Json(_) | IngestError::Toml(_) => (
                    "table_unreadable",
                    Some("Make sure the table file exists and is a valid export."),
                ),
            };
        }
        match cause.downcast_ref::<DirectoryError>() {
            Some(DirectoryError::InvalidConfig(_)) => return ("invalid_config", None),
            Some(DirectoryError::UnknownLabel { .. }) => {
                return (
                    "invalid_filter",
                    Some("Pick a label listed by `client-directory regions` or `buckets`."),
                )
            }
            Some(DirectoryError::InvalidDate(_)) | None => {}
        }
    }
    ("internal", None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn ingest_errors_are_classified_through_context() {
        let err = Err::<(), _>(IngestError::SchemaMismatch("no column for name".into()))
            .context("Failed to read table sheet.json")
            .unwrap_err();
        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "schema_mismatch");
        assert!(envelope.message.contains("sheet.json"));
        assert!(envelope.message.contains("no column for name"));
        assert!(envelope.hint.is_some());
    }

    #[test]
    fn cli_errors_have_codes() {
        let err = anyhow::Error::from(CliError::FilterDisabled("region"));
        assert_eq!(classify_error(&err).code, "filter_disabled");
        let err = anyhow::Error::from(CliError::MissingTable);
        assert_eq!(classify_error(&err).code, "table_unreadable");
    }

    #[test]
    fn unlisted_filter_labels_are_invalid_filter() {
        let engine = directory_engine::DirectoryEngine::default();
        let err = anyhow::Error::from(engine.select_bucket("ㄲ").unwrap_err());
        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "invalid_filter");
        assert!(envelope.message.contains("ㄲ"));
        assert!(envelope.hint.is_some());
    }

    #[test]
    fn unknown_errors_are_internal() {
        let err = anyhow::anyhow!("boom");
        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "internal");
        assert_eq!(envelope.hint, None);
    }
}
