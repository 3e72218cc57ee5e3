//! Table-of-contents outline builder
//!
//! Contents pages are transcribed as wiki tables inside a
//! `{{TOC begin}}`/`{{TOC end}}` region, one row per entry, with the nesting
//! level given by the number of leading `|` cells. The builder collects the
//! rows and emits an `easylist` outline whose numbering style per level is
//! taken from the first label seen at that level.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::substitute::substitute;
use crate::data::constants::{DECLASSIFIED_BANNER, LIST_PROPERTIES};
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    static ref LABEL: Regex = Regex::new(
        r#"^(?:[A-Za-z0-9]{1,4}\.\s?\|)?(?:colspan="\d+"\|)?(?P<text>.*)$"#
    )
    .unwrap();
    static ref PAGE_MARKER: Regex = Regex::new(r"(?P<num>[A-Z]-\d{1,3})").unwrap();
    static ref PAGE_ENTRY: Regex = Regex::new(r"^\s*[A-Z]-\d{1,3}\s*$").unwrap();
}

/// Numbering style bound to an outline level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingStyle {
    Roman,
    Capital,
    Arabic,
    Lowercase,
    Hidden,
}

impl NumberingStyle {
    /// Style implied by the first character of an entry's label
    pub fn from_marker(marker: char) -> Self {
        match marker {
            'I' | 'V' | 'X' => NumberingStyle::Roman,
            c if c.is_ascii_uppercase() => NumberingStyle::Capital,
            c if c.is_ascii_digit() => NumberingStyle::Arabic,
            c if c.is_ascii_lowercase() => NumberingStyle::Lowercase,
            _ => NumberingStyle::Hidden,
        }
    }

    /// `\ListProperties` entries for this style at `level`
    fn properties(self, level: usize) -> Vec<String> {
        let mut props = Vec::new();
        let numbers = match self {
            NumberingStyle::Roman => Some("R"),
            NumberingStyle::Capital => Some("L"),
            NumberingStyle::Lowercase => Some("l"),
            NumberingStyle::Arabic | NumberingStyle::Hidden => None,
        };
        if let Some(numbers) = numbers {
            props.push(format!("Numbers{}={}", level, numbers));
        }
        if level > 1 {
            let hidden = if self == NumberingStyle::Hidden { level } else { level - 1 };
            props.push(format!("Hide{}={}", level, hidden));
        }
        props
    }
}

#[derive(Debug, Clone, Default)]
struct OutlineLine {
    text: String,
    new_page: bool,
    /// Text after a new-page marker is dropped
    closed: bool,
}

/// Per-level facts gathered while parsing
#[derive(Debug, Clone, Copy)]
struct LevelInfo {
    style: NumberingStyle,
    only_page_entries: bool,
}

/// Outline builder for one TOC region
#[derive(Debug, Clone)]
pub struct TocBuilder {
    lines: Vec<OutlineLine>,
    current: OutlineLine,
    list_properties: String,
    banner: String,
}

impl Default for TocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TocBuilder {
    pub fn new() -> Self {
        Self::with_settings(LIST_PROPERTIES, DECLASSIFIED_BANNER)
    }

    pub fn with_settings(list_properties: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            current: OutlineLine::default(),
            list_properties: list_properties.into(),
            banner: banner.into(),
        }
    }

    pub fn append(&mut self, text: &str) {
        if !self.current.closed {
            self.current.text.push_str(text);
        }
    }

    /// Row boundary (`|-`)
    pub fn end_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    /// `---NEWPAGE---` inside the current row
    pub fn mark_new_page(&mut self) {
        self.current.new_page = true;
        self.current.closed = true;
    }

    /// Row text without table delimiters or newlines
    fn clean(text: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.starts_with("{|") && !l.starts_with("|}"))
            .collect::<Vec<_>>()
            .concat()
    }

    /// Finalize the outline
    pub fn finish(mut self) -> ConversionResult<String> {
        self.end_line();

        let rows: Vec<(String, bool)> = self
            .lines
            .iter()
            .map(|line| (Self::clean(&line.text), line.new_page))
            .filter(|(text, _)| !text.is_empty())
            .collect();

        let is_page_list = rows.first().is_some_and(|(text, _)| text.contains("Page"));
        let mut levels: BTreeMap<usize, LevelInfo> = BTreeMap::new();
        let mut body = String::new();

        for (raw, new_page) in &rows {
            let level = raw.chars().take_while(|&c| c == '|').count();
            if level == 0 {
                return Err(ConversionError::malformed_outline(
                    raw.as_str(),
                    "entry does not start with a level marker",
                ));
            }
            let rest = &raw[level..];
            let marker = rest.chars().next().ok_or_else(|| {
                ConversionError::malformed_outline(raw.as_str(), "no text after markers")
            })?;

            let text = LABEL
                .captures(rest)
                .and_then(|caps| caps.name("text"))
                .map(|m| m.as_str().trim())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    ConversionError::malformed_outline(raw.as_str(), "entry has no text after its label")
                })?;
            let page_entry = PAGE_ENTRY.is_match(text);

            let info = levels.entry(level).or_insert(LevelInfo {
                style: NumberingStyle::from_marker(marker),
                only_page_entries: true,
            });
            info.only_page_entries &= page_entry;

            let line = substitute(text).replace("{\\textbar}", " ");
            if is_page_list && line.contains("\\uline{Page}") {
                body.push_str(&format!("\\hfill {}\n", line));
                continue;
            }
            let line = if is_page_list {
                PAGE_MARKER.replace_all(&line, "\\hfill $num").into_owned()
            } else {
                line
            };
            body.push_str(&format!("{} {}\n", "@".repeat(level), line));
            if *new_page {
                body.push_str("\\newpage\n");
                body.push_str(&self.banner);
            }
        }

        let mut props = vec![self.list_properties.clone()];
        for (&level, info) in &levels {
            if is_page_list && info.only_page_entries {
                continue;
            }
            props.extend(info.style.properties(level));
        }

        Ok(format!(
            "\\begin{{small}}\n\\begin{{easylist}}\n\\ListProperties({})\n{}\\end{{easylist}}\n\\end{{small}}",
            props.join(","),
            body
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(rows: &[&str]) -> ConversionResult<String> {
        let mut toc = TocBuilder::new();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                toc.end_line();
            }
            toc.append(row);
        }
        toc.finish()
    }

    #[test]
    fn test_style_bound_on_first_sight() {
        let latex = build(&[
            "|I.|Background",
            "||A.|French rule",
            "|||1.|Early years",
            "|II.|Geneva",
            "||B.|Partition",
        ])
        .unwrap();
        assert!(latex.contains(
            "\\ListProperties(Space=-2.3mm,Space*=-2.3mm,Hang=true,Progressive*=2em,Numbers1=R,Numbers2=L,Hide2=1,Hide3=2)"
        ));
        assert!(latex.contains("@ Background\n@@ French rule\n@@@ Early years\n@ Geneva\n@@ Partition\n"));
    }

    #[test]
    fn test_later_markers_keep_bound_style() {
        // Level 1 first seen as a capital letter stays capital
        let latex = build(&["|A.|One", "|IV.|Two"]).unwrap();
        assert!(latex.contains("Numbers1=L"));
        assert!(!latex.contains("Numbers1=R"));
    }

    #[test]
    fn test_output_frame() {
        let latex = build(&["|1.|Only"]).unwrap();
        assert_eq!(
            latex,
            "\\begin{small}\n\\begin{easylist}\n\\ListProperties(Space=-2.3mm,Space*=-2.3mm,Hang=true,Progressive*=2em)\n@ Only\n\\end{easylist}\n\\end{small}"
        );
    }

    #[test]
    fn test_hidden_style() {
        let latex = build(&["|*Note", "||-x"]).unwrap();
        assert!(!latex.contains("Hide1"));
        assert!(latex.contains("Progressive*=2em,Hide2=2)"));
    }

    #[test]
    fn test_missing_marker_is_malformed() {
        let err = build(&["|I.|Fine", "no marker here"]).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedOutline { .. }));
        assert!(err.is_fatal_for_page());
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(
            build(&["|||"]),
            Err(ConversionError::MalformedOutline { .. })
        ));
        assert!(matches!(
            build(&["|A.|"]),
            Err(ConversionError::MalformedOutline { .. })
        ));
    }

    #[test]
    fn test_new_page_inserts_banner() {
        let mut toc = TocBuilder::with_settings("P", "BANNER\n");
        toc.append("|I.|First");
        toc.mark_new_page();
        toc.append("dropped");
        toc.end_line();
        toc.append("|II.|Second");
        let latex = toc.finish().unwrap();
        assert!(latex.contains("@ First\n\\newpage\nBANNER\n@ Second\n"));
        assert!(!latex.contains("dropped"));
    }

    #[test]
    fn test_page_list() {
        let latex = build(&[
            "|{{u|Page}}",
            "|I.|Background A-1",
            "||A-12",
        ])
        .unwrap();
        assert!(latex.contains("\\hfill \\uline{Page}\n"));
        assert!(latex.contains("@ Background \\hfill A-1\n"));
        assert!(latex.contains("@@ \\hfill A-12\n"));
        // level 2 holds only page numbers and gets no numbering entry
        assert!(!latex.contains("Hide2"));
    }

    #[test]
    fn test_table_delimiters_and_newlines_removed() {
        let mut toc = TocBuilder::new();
        toc.append("\n{| class=\"toc\"\n");
        toc.end_line();
        toc.append("\n|I.|Split\nacross lines\n|}\n");
        let latex = toc.finish().unwrap();
        assert!(latex.contains("@ Splitacross lines\n"));
    }

    #[test]
    fn test_pipes_in_text_become_spaces() {
        let latex = build(&["|I.|Part|two"]).unwrap();
        assert!(latex.contains("@ Part two\n"));
    }
}
