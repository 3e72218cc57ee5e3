//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Error types and result types
//! - Attribute and template-argument parsing
//! - Page-quality tally

pub mod attributes;
pub mod diagnostics;
pub mod error;
pub mod progress;

// Re-export commonly used items
pub use attributes::{parse_attributes, split_template_args, Attributes};
pub use diagnostics::{check_markup, format_diagnostics, Diagnostic, DiagnosticLevel, Diagnostics};
pub use error::{ConversionError, ConversionResult};
pub use progress::ProgressTally;
