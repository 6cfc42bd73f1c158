//! Error handling for comparison table rendering
//!
//! Loading a store or a configuration file can fail and returns one of the
//! error types below. Rendering itself never fails: problems found while
//! rendering are reported as [`RenderWarning`]s next to the produced HTML.

use std::fmt;

use thiserror::Error;

/// Errors raised while opening or querying a field store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist
    #[error("Store file not found: {0}")]
    NotFound(String),
    /// The backing file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a valid document of the given format
    #[error("Parse error in {format} store: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    /// File extension does not map to a known format
    #[error("Unsupported store format '{0}'")]
    UnsupportedFormat(String),
    /// Two published tables share one identifier
    #[error("Duplicate table identifier '{0}'")]
    DuplicateTable(String),
}

impl StoreError {
    pub fn parse(format: &'static str, message: impl fmt::Display) -> Self {
        StoreError::Parse {
            format,
            message: message.to_string(),
        }
    }
}

/// Errors raised while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What kind of non-fatal problem a render ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// No published table matches the identifier
    MissingTable,
    /// The store returned an error; rendered as an empty table
    StoreUnavailable,
    /// A badge selection outside the known set; the default label was used
    UnknownBadgeKind,
    /// The asset resolver returned no markup for an image reference
    UnresolvedImage,
    /// The resolved image markup contained content that was stripped
    SanitizedMarkup,
}

/// Render warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderWarning {
    pub kind: WarningKind,
    pub message: String,
    /// 1-based product row, if the warning belongs to one
    pub row: Option<usize>,
    pub suggestion: Option<String>,
}

impl RenderWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            row: None,
            suggestion: None,
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "Warning at row {}: {}", row, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Render output with optional warnings
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered HTML fragment
    pub html: String,
    /// Any warnings generated while rendering
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn new(html: String) -> Self {
        Self {
            html,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(html: String, warnings: Vec<RenderWarning>) -> Self {
        Self { html, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
