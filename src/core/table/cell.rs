//! Cell types for LaTeX table generation

use crate::core::render::OutputSink;
use crate::utils::attributes::{parse_attributes, style_or_attribute};

/// Column alignment of a table or cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAlign {
    #[default]
    Left,
    Center,
}

impl CellAlign {
    /// Parse an HTML `align` or CSS `text-align` value
    pub fn from_attr(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" => CellAlign::Center,
            _ => CellAlign::Left,
        }
    }
}

/// Whether a `border` attribute asks for a border
fn is_bordered(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("none")
}

/// A cell under construction; rendered text accumulates in its own sink
#[derive(Debug, Clone)]
pub struct Cell {
    sink: OutputSink,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Border around just this cell
    pub bordered: bool,
    /// Center just this cell
    pub centered: bool,
    /// Whether this is a header (`!`) cell
    pub header: bool,
}

impl Cell {
    pub fn new(header: bool) -> Self {
        Self {
            sink: OutputSink::with_capacity(64),
            colspan: 1,
            bordered: false,
            centered: false,
            header,
        }
    }

    /// Apply the directives of a `key="value" |` prefix
    pub fn apply_attributes(&mut self, attrs: &str) {
        if attrs.trim().is_empty() {
            return;
        }
        let attrs = parse_attributes(attrs);
        if let Some(span) = attrs.get("colspan").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.colspan = span.max(1);
        }
        if let Some(align) = style_or_attribute(&attrs, "align", "text-align") {
            self.centered = CellAlign::from_attr(&align) == CellAlign::Center;
        }
        if let Some(border) = style_or_attribute(&attrs, "border", "border") {
            self.bordered = is_bordered(&border);
        }
    }

    pub fn append(&mut self, text: &str) {
        self.sink.push(text);
    }

    pub fn sink_mut(&mut self) -> &mut OutputSink {
        &mut self.sink
    }

    /// Current text, for lookback only
    pub fn text(&self) -> &str {
        self.sink.as_str()
    }

    /// Close the cell, producing its finished form
    pub fn end(self) -> LatexCell {
        LatexCell {
            content: self.sink.as_str().trim().to_string(),
            colspan: self.colspan,
            bordered: self.bordered,
            centered: self.centered,
            header: self.header,
        }
    }
}

/// A finished table cell
#[derive(Debug, Clone, PartialEq)]
pub struct LatexCell {
    /// Cell content (LaTeX code)
    pub content: String,
    /// Number of columns this cell spans
    pub colspan: usize,
    pub bordered: bool,
    pub centered: bool,
    /// Whether this is a header cell
    pub header: bool,
}

impl LatexCell {
    /// Create a new cell with content
    pub fn new(content: impl Into<String>) -> Self {
        LatexCell {
            content: content.into(),
            colspan: 1,
            bordered: false,
            centered: false,
            header: false,
        }
    }

    /// Create a cell spanning `colspan` columns
    pub fn with_span(content: impl Into<String>, colspan: usize) -> Self {
        LatexCell {
            colspan: colspan.max(1),
            ..LatexCell::new(content)
        }
    }

    /// Blank padding cell
    pub fn blank() -> Self {
        LatexCell::new(String::new())
    }

    /// Generate LaTeX code for this cell in a table of `col_count` columns
    /// and total width `width`
    pub fn to_latex(&self, width: &str, col_count: usize, table_bordered: bool) -> String {
        let mut content = self.content.trim().to_string();

        if self.header && !content.is_empty() {
            content = format!("\\textbf{{{}}}", content);
        }
        if self.bordered {
            content = format!("\\fbox{{{}}}", content);
        }
        if self.centered {
            content = format!("\\centering\\arraybackslash {}", content);
        }

        if self.colspan > 1 {
            let rule = if table_bordered { "|" } else { "" };
            format!(
                "\\multicolumn{{{}}}{{{}p{{\\dimexpr {}*{}/{}\\relax}}{}}}{{{}}}",
                self.colspan, rule, width, self.colspan, col_count, rule, content
            )
        } else {
            content
        }
    }
}
