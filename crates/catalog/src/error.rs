use std::fmt;

use crate::model::SourceKind;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A source line could not be turned into a record (bad price, bad date,
    /// missing required field).
    MalformedRecord {
        source: SourceKind,
        /// 1-based line number, when the record came from text.
        line: Option<u64>,
        identifier: String,
        reason: String,
    },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty file name, bad quit token, etc.).
    ConfigValidation(String),
    /// Two distinct item types render to the same per-type file name.
    DestinationCollision {
        item_type: String,
        other: String,
        file_name: String,
    },
    /// IO error while reading source text.
    Io(String),
}

impl CatalogError {
    pub(crate) fn malformed(
        source: SourceKind,
        identifier: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            source,
            line: None,
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach a line number to a `MalformedRecord`; other variants pass through.
    pub(crate) fn at_line(self, line_no: u64) -> Self {
        match self {
            Self::MalformedRecord { source, identifier, reason, .. } => Self::MalformedRecord {
                source,
                line: Some(line_no),
                identifier,
                reason,
            },
            other => other,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { source, line, identifier, reason } => {
                write!(f, "{source} source")?;
                if let Some(line) = line {
                    write!(f, ", line {line}")?;
                }
                if !identifier.is_empty() {
                    write!(f, ", record '{identifier}'")?;
                }
                write!(f, ": {reason}")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::DestinationCollision { item_type, other, file_name } => write!(
                f,
                "item types '{other}' and '{item_type}' both map to report file '{file_name}'"
            ),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}
