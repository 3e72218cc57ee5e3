//! Error handling for w2l conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A character no lexer rule accepts; skipped and reported
    Lex {
        character: char,
        line: usize,
        column: usize,
    },
    /// A region opened without its matching close (or vice versa)
    Structural {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// An outline line that does not have the expected label/text shape
    MalformedOutline { line: String, reason: String },
    /// A dispatch handler failed; the rest of the page is abandoned
    Render {
        message: String,
        token: String,
        line: usize,
        column: usize,
    },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (CLI only)
    IoError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Lex {
                character,
                line,
                column,
            } => write!(
                f,
                "Illegal character {:?} at line {}, column {}",
                character, line, column
            ),
            ConversionError::Structural {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Structural error at line {}, column {}: {}", l, c, message)
                } else {
                    write!(f, "Structural error: {}", message)
                }
            }
            ConversionError::MalformedOutline { line, reason } => {
                write!(f, "Malformed outline line '{}': {}", line, reason)
            }
            ConversionError::Render {
                message,
                token,
                line,
                column,
            } => write!(
                f,
                "Render error at line {}, column {} ({}): {}",
                line, column, token, message
            ),
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn lex(character: char, line: usize, column: usize) -> Self {
        ConversionError::Lex {
            character,
            line,
            column,
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        ConversionError::Structural {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn structural_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        ConversionError::Structural {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn malformed_outline(line: impl Into<String>, reason: impl Into<String>) -> Self {
        ConversionError::MalformedOutline {
            line: line.into(),
            reason: reason.into(),
        }
    }

    pub fn render(
        message: impl Into<String>,
        token: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        ConversionError::Render {
            message: message.into(),
            token: token.into(),
            line,
            column,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    /// Source location, when the error carries one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ConversionError::Lex { line, column, .. }
            | ConversionError::Render { line, column, .. } => Some((*line, *column)),
            ConversionError::Structural {
                line: Some(l),
                column: Some(c),
                ..
            } => Some((*l, *c)),
            _ => None,
        }
    }

    /// Whether this error halts the current page
    pub fn is_fatal_for_page(&self) -> bool {
        matches!(
            self,
            ConversionError::MalformedOutline { .. } | ConversionError::Render { .. }
        )
    }
}
