use thiserror::Error;

/// Result type for directory engine operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors raised by the directory engine.
///
/// Row-level data problems never surface here; they degrade into empty labels instead.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A visit date that matches none of the accepted layouts
    #[error("Unrecognized visit date: {0}")]
    InvalidDate(String),

    /// A filter label that is not among the selectable ones
    #[error("Unknown {control} label {label:?}; choose one of: {choices}")]
    UnknownLabel {
        control: &'static str,
        label: String,
        choices: String,
    },
}

impl DirectoryError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn unknown_label(control: &'static str, label: &str, choices: &[String]) -> Self {
        Self::UnknownLabel {
            control,
            label: label.to_string(),
            choices: choices.join(", "),
        }
    }
}
