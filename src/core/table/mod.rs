//! Wiki table to LaTeX conversion
//!
//! A two-pass builder for `{| … |}` tables. Cells are rendered into their
//! own sinks while open and handed to the [`Table`] when closed; column
//! count, padding and multicolumn widths are settled only at [`Table::end`].
//!
//! # Example
//!
//! ```rust
//! use w2l::core::table::{LatexCell, Table};
//!
//! let mut table = Table::new();
//! table.set_border(true);
//! table.append_cell(LatexCell::with_span("Heading", 2));
//! table.append_row();
//! table.append_cell(LatexCell::new("a"));
//! table.append_cell(LatexCell::new("b"));
//! let latex = table.end();
//! assert!(latex.starts_with("\\begin{tabularx}{\\textwidth}{|X|X|}"));
//! ```

mod cell;
mod generator;

#[cfg(test)]
mod tests;

// Re-export public API
pub use cell::{Cell, CellAlign, LatexCell};
pub use generator::{Table, TableFormat};
