//! Markup diagnostics
//!
//! This module provides the diagnostic sink shared by the lexer, the renderer
//! and the builders of one run. It records:
//!
//! - Illegal characters skipped by the lexer
//! - Regions left open at the end of a page
//! - Malformed outlines and abandoned pages
//! - Unsupported templates and placeholder constructs
//!
//! Every diagnostic is also forwarded to the `log` facade.
//!
//! ## Example
//!
//! ```rust
//! use w2l::diagnostics::check_markup;
//!
//! let result = check_markup("{| class=\"wikitable\"\n| cell\n");
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::lexer::Lexer;
use crate::utils::error::ConversionError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output might not be perfect
    Warning,
    /// Error - part of the page was skipped or abandoned
    Error,
}

impl DiagnosticLevel {
    fn log_level(self) -> log::Level {
        match self {
            DiagnosticLevel::Info => log::Level::Info,
            DiagnosticLevel::Warning => log::Level::Warn,
            DiagnosticLevel::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Span of text in the source (start, end)
    pub span: Option<(usize, usize)>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            span: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add span information
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some((start, end));
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&ConversionError> for Diagnostic {
    fn from(err: &ConversionError) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
        match err.location() {
            Some((line, column)) => diag.with_location(line, column),
            None => diag,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line:column
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Run-scoped diagnostic sink with a per-level summary
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic and forward it to the logger
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        match (diag.line, diag.column) {
            (Some(line), Some(col)) => {
                log::log!(diag.level.log_level(), "{}:{}: {}", line, col, diag.message)
            }
            _ => log::log!(diag.level.log_level(), "{}", diag.message),
        }
        self.diagnostics.push(diag);
    }

    /// Record an error value
    pub fn report(&mut self, err: &ConversionError) {
        self.add(Diagnostic::from(err));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::new(DiagnosticLevel::Warning, message));
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Lex a page and collect its diagnostics without rendering it
pub fn check_markup(input: &str) -> Diagnostics {
    let mut result = Diagnostics::new();
    let mut lexer = Lexer::new(input);
    while lexer.next_lexeme(&mut result).is_some() {}
    lexer.finish(&mut result);
    result
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &Diagnostics, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_page() {
        let result = check_markup("'''Secret'''\n\nPlain text, 1954.");
        assert!(result.is_empty(), "{}", result.summary());
    }

    #[test]
    fn test_illegal_character_reported() {
        let result = check_markup("ok \u{1F600} ok");
        assert_eq!(result.errors, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.column, Some(4));
    }

    #[test]
    fn test_unclosed_center_reported() {
        let result = check_markup("{{center|never closed");
        assert!(result.has_errors());
        assert!(result.iter().any(|d| d.message.contains("centered")));
    }

    #[test]
    fn test_summary_format() {
        let mut result = Diagnostics::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
    }

    #[test]
    fn test_from_error_keeps_location() {
        let err = ConversionError::structural_at("unclosed table", 4, 1);
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.line, Some(4));
    }

    #[test]
    fn test_stray_closer_shows_source_and_help() {
        let result = check_markup("text\n|}\n{{TOC end}}\n</center>");
        assert_eq!(result.errors, 3);
        let rendered = result.diagnostics[1].to_string();
        assert!(rendered.contains("--> line 3:1"), "{}", rendered);
        assert!(rendered.contains("| {{TOC end}}"));
        assert!(rendered.contains("= help: remove it"));
    }

    #[test]
    fn test_illegal_character_shows_line() {
        let result = check_markup("first\nbad \u{1F600} char\nlast");
        let rendered = result.diagnostics[0].to_string();
        assert!(rendered.contains("| bad \u{1F600} char"), "{}", rendered);
        assert!(!rendered.contains("last"));
    }
}
