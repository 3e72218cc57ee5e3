//! Two-pass `tabularx` generator
//!
//! Rows are collected as they arrive; the column count is only known once
//! the whole table has been seen, so layout happens in [`Table::end`].

use std::fmt::Write;

use super::cell::{CellAlign, LatexCell};
use crate::data::constants::MIN_TABLE_WIDTH;
use crate::utils::attributes::{parse_attributes, parse_percent, style_or_attribute};

/// Table format settings
#[derive(Debug, Clone, PartialEq)]
pub struct TableFormat {
    /// Entire table is bordered
    pub bordered: bool,
    /// True if the table contains any multicolumn cell
    pub multicolumn: bool,
    /// Fixed at finalize
    pub column_count: usize,
    /// Requested width as a fraction of `\textwidth`; `None` is full width
    pub width: Option<f64>,
    /// Text alignment of all the cells
    pub alignment: CellAlign,
    /// Outline-style table whose first cell is `I.`
    pub contents: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            bordered: false,
            multicolumn: false,
            column_count: 0,
            width: None,
            alignment: CellAlign::Left,
            contents: false,
        }
    }
}

/// A table under construction
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<LatexCell>>,
    row_entries: Vec<LatexCell>,
    /// Row-level `align=center`
    row_centered: bool,
    caption: Option<String>,
    min_width: f64,
    pub format: TableFormat,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self::with_min_width(MIN_TABLE_WIDTH)
    }

    pub fn with_min_width(min_width: f64) -> Self {
        Self {
            rows: Vec::new(),
            row_entries: Vec::new(),
            row_centered: false,
            caption: None,
            min_width,
            format: TableFormat::default(),
        }
    }

    /// Apply the attributes of the `{|` line
    pub fn apply_attributes(&mut self, attrs: &str) {
        let attrs = parse_attributes(attrs);
        if attrs
            .get("class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == "wikitable"))
        {
            self.set_border(true);
        }
        if let Some(border) = attrs.get("border") {
            let border = border.trim();
            self.set_border(!border.is_empty() && border != "0");
        }
        if let Some(width) = style_or_attribute(&attrs, "width", "width").and_then(|w| parse_percent(&w)) {
            self.set_width(width);
        }
        if let Some(align) = style_or_attribute(&attrs, "align", "text-align") {
            self.set_alignment(&align);
        }
    }

    pub fn set_border(&mut self, bordered: bool) {
        self.format.bordered = bordered;
    }

    /// Requested width in percent of the text width
    pub fn set_width(&mut self, percent: f64) {
        let fraction = percent.round() / 100.0;
        self.format.width = if fraction >= 1.0 {
            None
        } else if fraction < self.min_width {
            Some(self.min_width)
        } else {
            Some(fraction)
        };
    }

    pub fn set_alignment(&mut self, align: &str) {
        if CellAlign::from_attr(align) == CellAlign::Center {
            self.format.alignment = CellAlign::Center;
        }
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        let caption = caption.into();
        if !caption.trim().is_empty() {
            self.caption = Some(caption.trim().to_string());
        }
    }

    /// Attributes of a `|-` row line apply to the cells of that row
    pub fn set_row_attributes(&mut self, attrs: &str) {
        let attrs = parse_attributes(attrs);
        self.row_centered = style_or_attribute(&attrs, "align", "text-align")
            .map(|a| CellAlign::from_attr(&a) == CellAlign::Center)
            .unwrap_or(false);
    }

    /// Add a finished cell to the current row
    pub fn append_cell(&mut self, mut cell: LatexCell) {
        if self.rows.is_empty() && self.row_entries.is_empty() && cell.content.trim() == "I." {
            self.format.contents = true;
        }
        if cell.colspan > 1 {
            self.format.multicolumn = true;
        }
        if self.row_centered {
            cell.centered = true;
        }
        self.row_entries.push(cell);
    }

    /// Close the current row
    pub fn append_row(&mut self) {
        if !self.row_entries.is_empty() {
            self.rows.push(std::mem::take(&mut self.row_entries));
        }
        self.row_centered = false;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(!self.row_entries.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Table width as a LaTeX length
    fn width_latex(&self) -> String {
        match self.format.width {
            Some(w) if !self.format.contents => format!("{}\\textwidth", w),
            _ => "\\textwidth".to_string(),
        }
    }

    /// Build the column specification string (e.g., "|X|X|")
    fn build_column_spec(&self) -> String {
        let n = self.format.column_count;
        if self.format.contents {
            return if n > 1 {
                format!("@{{}}r{}@{{}}", "X".repeat(n - 1))
            } else {
                "@{}X@{}".to_string()
            };
        }

        let column = match self.format.alignment {
            CellAlign::Center => ">{\\centering\\arraybackslash}X",
            CellAlign::Left => "X",
        };
        let columns = vec![column; n];
        if self.format.bordered {
            format!("|{}|", columns.join("|"))
        } else {
            columns.concat()
        }
    }

    /// Finalize the table and return its LaTeX
    pub fn end(mut self) -> String {
        self.append_row();
        if self.rows.is_empty() {
            return String::new();
        }

        let col_count = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.colspan).sum::<usize>())
            .max()
            .unwrap_or(1)
            .max(1);
        self.format.column_count = col_count;

        for row in &mut self.rows {
            let used: usize = row.iter().map(|c| c.colspan).sum();
            for _ in used..col_count {
                row.push(LatexCell::blank());
            }
        }

        let width = self.width_latex();
        let mut output = String::new();

        if let Some(caption) = &self.caption {
            let _ = writeln!(output, "\\begin{{center}}\\textbf{{{}}}\\end{{center}}", caption);
        }
        let _ = writeln!(
            output,
            "\\begin{{tabularx}}{{{}}}{{{}}}",
            width,
            self.build_column_spec()
        );
        if self.format.bordered {
            output.push_str("\\hline\n");
        }

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.to_latex(&width, col_count, self.format.bordered))
                .collect();
            let _ = writeln!(output, "{} \\\\", cells.join(" & "));
            if self.format.bordered {
                output.push_str("\\hline\n");
            }
        }

        output.push_str("\\end{tabularx}\n");
        output
    }
}
