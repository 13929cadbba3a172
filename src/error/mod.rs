//! Error types and handling infrastructure for the transform pipeline

use std::fmt;
use std::path::PathBuf;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the offending `RawOptions` field
    pub field: &'static str,
    /// Human-readable description of the problem
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raised exclusively by the options resolver; carries one or more
/// field-level violations. Always recoverable by correcting input.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }

    /// Names of all offending fields, for machine-checkable assertions
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid options")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i == 0 {
                write!(f, ": {}", v)?;
            } else {
                write!(f, "; {}", v)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Main error type for transform operations
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// OS error surfaced as-is, annotated with the attempted operation and path
    #[error("{op} '{}': {source}", .path.as_deref().map(|p| p.display().to_string()).unwrap_or_else(|| "<stream>".into()))]
    Io {
        op: &'static str,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON syntax error: {0}")]
    JsonSyntax(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlCodec(#[from] serde_yaml::Error),

    #[error("JS module parse error: {message}")]
    ScriptParse { message: String },

    #[error("identifier '{name}' not exported by source")]
    MissingImport { name: String },

    #[error("no destination given and none could be derived from the source")]
    MissingDestination,

    #[error("destination '{0}' is a directory")]
    DestinationIsDirectory(PathBuf),

    #[error("cannot merge a non-object value into a destination object without an export identifier")]
    UnmergeableValue,

    /// Escape hatch for middleware-supplied errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransformError {
    pub fn io(op: &'static str, path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { op, path, source }
    }

    pub fn script_parse(message: impl Into<String>) -> Self {
        Self::ScriptParse {
            message: message.into(),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => {
                let fields: Vec<&str> = err.fields();
                format!("{} (fields: {})", err, fields.join(", "))
            }
            Self::MissingImport { name } => {
                format!(
                    "import '{}' is valid but the source does not export it",
                    name
                )
            }
            other => other.to_string(),
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for options resolution
pub type ResolveResult<T> = Result<T, ValidationError>;
