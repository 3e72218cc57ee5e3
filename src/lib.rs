//! # w2l
//!
//! Wikisource transcription markup to LaTeX converter.
//!
//! ## Features
//!
//! - **Multi-mode lexer**: context-sensitive scanning of tables, outlines,
//!   centered and right-aligned blocks, with spans that tile the page
//! - **Token-driven renderer**: typed dispatch with output lookback for
//!   paragraph and line-break decisions
//! - **Table support**: `tabularx` output with column spans, borders and
//!   width clamping
//! - **Outlines**: contents tables rendered as `easylist` outlines with
//!   per-level numbering styles
//! - **Diagnostics**: illegal characters, unclosed regions and abandoned
//!   pages are collected without stopping the run
//!
//! ## Usage Examples
//!
//! ### Single Page
//!
//! ```rust
//! use w2l::wiki_to_latex;
//!
//! let latex = wiki_to_latex("'''Secret'''\n\n{{center|Hello}}");
//! assert!(latex.contains(r"\textbf{Secret}"));
//! assert!(latex.contains("\\begin{center}\nHello\n\\end{center}"));
//! ```
//!
//! ### Section of Pages
//!
//! ```rust
//! use w2l::{convert_section, Diagnostics, Page, W2LOptions};
//!
//! let pages = vec![
//!     Page::new("First page.").with_quality(4),
//!     Page::new("Second page.").with_quality(3),
//! ];
//! let mut diags = Diagnostics::new();
//! let section = convert_section(&pages, &W2LOptions::default(), &mut diags);
//! assert_eq!(section.fragments.len(), 2);
//! assert_eq!(section.tally.total(), 2);
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Utility modules
pub mod utils;

// Re-export core conversion types
pub use crate::core::lexer::{lex, tokenize, Lexeme, LexMode, Lexer, Position, Token, TokenKind, TokenValue};
pub use crate::core::render::{render_page, PageFragment, Renderer, W2LOptions};
pub use crate::core::substitute::substitute;
pub use crate::core::table::{Table, TableFormat};
pub use crate::core::toc::{NumberingStyle, TocBuilder};

// Re-export data modules
pub use data::constants;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::diagnostics::{check_markup, Diagnostic, DiagnosticLevel, Diagnostics};
pub use utils::error::{ConversionError, ConversionResult};
pub use utils::progress::ProgressTally;

/// One transcribed page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub text: String,
    /// Proofreading level 0-4 reported alongside the text
    pub quality: Option<u8>,
}

impl Page {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quality: None,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// A run of pages converted together
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Fragments joined with the page separator
    pub content: String,
    /// Per-page output, in input order
    pub fragments: Vec<PageFragment>,
    pub tally: ProgressTally,
}

/// Convert one page
///
/// A page-quality stamp in the text takes precedence over `page.quality`.
pub fn convert_page(page: &Page, options: &W2LOptions, diags: &mut Diagnostics) -> PageFragment {
    let tokens = tokenize(&page.text, diags);
    let mut fragment = render_page(&tokens, options, diags);
    if fragment.quality.is_none() {
        fragment.quality = page.quality;
    }
    fragment
}

/// Convert a sequence of pages
///
/// An abandoned page keeps its partial fragment and the run continues with
/// the next page.
pub fn convert_section(pages: &[Page], options: &W2LOptions, diags: &mut Diagnostics) -> Section {
    let mut fragments = Vec::with_capacity(pages.len());
    let mut tally = ProgressTally::new();

    for (index, page) in pages.iter().enumerate() {
        log::debug!("converting page {}", index + 1);
        let fragment = convert_page(page, options, diags);
        if let Some(level) = fragment.quality {
            if let Err(err) = tally.record(level) {
                diags.report(&err);
            }
        }
        if let Some(err) = &fragment.abandoned {
            log::warn!("page {} abandoned: {}", index + 1, err);
        }
        fragments.push(fragment);
    }

    let content = fragments
        .iter()
        .map(|f| f.content.as_str())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(&options.page_separator);

    Section {
        content,
        fragments,
        tally,
    }
}

/// Convert a single page of markup with default options
///
/// Diagnostics are discarded; use [`convert_page`] to keep them.
pub fn wiki_to_latex(input: &str) -> String {
    let mut diags = Diagnostics::new();
    convert_page(&Page::new(input), &W2LOptions::default(), &mut diags).content
}
