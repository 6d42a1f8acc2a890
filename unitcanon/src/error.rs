use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with a location inside the unit expression
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for unit canonicalization
#[derive(Debug, Clone)]
pub enum CanonError {
    /// The expression does not derive from the unit grammar
    Parse(Box<ErrorDetails>),

    /// The expression parsed but cannot become a factor sequence
    Normalize(Box<ErrorDetails>),

    /// A lookup table could not be loaded
    Table(String),

    /// Input exceeded a configured ceiling
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// The expression parsed but resolved no label, definition or link
    Empty(String),

    /// Error without a location in the expression
    Engine(String),
}

impl CanonError {
    /// Create a parse error with source information
    pub fn parse(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Create a normalization error with source information
    pub fn normalize(message: impl Into<String>, span: Span, source_text: Arc<str>) -> Self {
        Self::Normalize(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: None,
        }))
    }

    /// Create a normalization error with suggestion
    pub fn normalize_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Normalize(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Location details, for errors that point into the expression
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            CanonError::Parse(details) | CanonError::Normalize(details) => Some(details),
            _ => None,
        }
    }
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " in '{}' at column {}",
                    details.source_text, details.span.col
                )
            }
            CanonError::Normalize(details) => {
                write!(f, "Invalid expression: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " in '{}' at column {}",
                    details.source_text, details.span.col
                )
            }
            CanonError::Table(msg) => write!(f, "Lookup table error: {}", msg),
            CanonError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit: {}, actual: {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
            CanonError::Empty(input) => write!(
                f,
                "No label, definition or cross-reference resolved for '{}'",
                input
            ),
            CanonError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CanonError {}

impl From<csv::Error> for CanonError {
    fn from(err: csv::Error) -> Self {
        CanonError::Table(err.to_string())
    }
}

impl From<std::io::Error> for CanonError {
    fn from(err: std::io::Error) -> Self {
        CanonError::Engine(format!("I/O error: {}", err))
    }
}
