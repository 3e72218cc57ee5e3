//! Tests for the wiki table builder

use super::cell::{Cell, CellAlign, LatexCell};
use super::generator::Table;
use pretty_assertions::assert_eq;

fn cells(table: &mut Table, texts: &[&str]) {
    for text in texts {
        table.append_cell(LatexCell::new(*text));
    }
    table.append_row();
}

#[test]
fn test_basic_table() {
    let mut table = Table::new();
    cells(&mut table, &["A", "B", "C"]);
    cells(&mut table, &["1", "2", "3"]);

    let latex = table.end();
    assert_eq!(
        latex,
        "\\begin{tabularx}{\\textwidth}{XXX}\nA & B & C \\\\\n1 & 2 & 3 \\\\\n\\end{tabularx}\n"
    );
}

#[test]
fn test_rows_padded_to_column_count() {
    let mut table = Table::new();
    cells(&mut table, &["a"]);
    cells(&mut table, &["b", "c", "d"]);
    table.append_cell(LatexCell::with_span("wide", 2));
    table.append_row();

    let latex = table.end();
    assert!(latex.contains("{XXX}"));
    assert!(latex.contains("a &  &  \\\\"));
    assert!(latex.contains("b & c & d \\\\"));
    assert!(latex.contains("\\multicolumn{2}{p{\\dimexpr \\textwidth*2/3\\relax}}{wide} &  \\\\"));
}

#[test]
fn test_span_two_of_two() {
    let mut table = Table::new();
    table.append_cell(LatexCell::with_span("Both", 2));
    table.append_row();
    cells(&mut table, &["left", "right"]);

    let latex = table.end();
    assert!(latex.starts_with("\\begin{tabularx}{\\textwidth}{XX}\n"));
    assert!(latex.contains("\\multicolumn{2}{p{\\dimexpr \\textwidth*2/2\\relax}}{Both} \\\\"));
}

#[test]
fn test_width_clamping() {
    let mut table = Table::new();
    table.set_width(50.0);
    assert_eq!(table.format.width, Some(0.7));
    table.set_width(100.0);
    assert_eq!(table.format.width, None);
    table.set_width(85.0);
    assert_eq!(table.format.width, Some(0.85));

    cells(&mut table, &["x"]);
    assert!(table.end().starts_with("\\begin{tabularx}{0.85\\textwidth}{X}"));
}

#[test]
fn test_custom_minimum_width() {
    let mut table = Table::with_min_width(0.5);
    table.set_width(40.0);
    assert_eq!(table.format.width, Some(0.5));
}

#[test]
fn test_bordered_table_has_rules() {
    let mut table = Table::new();
    table.apply_attributes("class=\"wikitable\" style=\"width:85%; text-align:center\"");
    assert!(table.format.bordered);
    assert_eq!(table.format.alignment, CellAlign::Center);
    cells(&mut table, &["a", "b"]);
    cells(&mut table, &["c", "d"]);

    let latex = table.end();
    assert_eq!(latex.matches("\\hline").count(), 3);
    assert!(latex.contains(
        "{0.85\\textwidth}{|>{\\centering\\arraybackslash}X|>{\\centering\\arraybackslash}X|}"
    ));
}

#[test]
fn test_contents_table_ignores_width() {
    let mut table = Table::new();
    table.set_width(60.0);
    cells(&mut table, &["I.", "Background", "1"]);
    cells(&mut table, &["II.", "Geneva", "12"]);
    assert!(table.format.contents);

    let latex = table.end();
    assert!(latex.starts_with("\\begin{tabularx}{\\textwidth}{@{}rXX@{}}"));
}

#[test]
fn test_contents_detection_needs_first_cell() {
    let mut table = Table::new();
    cells(&mut table, &["Heading"]);
    cells(&mut table, &["I."]);
    assert!(!table.format.contents);
}

#[test]
fn test_cell_attributes() {
    let mut cell = Cell::new(true);
    cell.apply_attributes("colspan=\"3\" style=\"text-align:center; border:1px solid\"");
    cell.append("Total");
    let finished = cell.end();
    assert_eq!(finished.colspan, 3);
    assert!(finished.centered);
    assert!(finished.bordered);
    assert!(finished.header);
    assert_eq!(
        finished.to_latex("\\textwidth", 3, false),
        "\\multicolumn{3}{p{\\dimexpr \\textwidth*3/3\\relax}}{\\centering\\arraybackslash \\fbox{\\textbf{Total}}}"
    );
}

#[test]
fn test_row_alignment_applies_to_row_cells() {
    let mut table = Table::new();
    table.set_row_attributes("align=\"center\"");
    table.append_cell(LatexCell::new("mid"));
    table.append_row();
    table.append_cell(LatexCell::new("plain"));
    let latex = table.end();
    assert!(latex.contains("\\centering\\arraybackslash mid \\\\"));
    assert!(latex.contains("\nplain \\\\"));
}

#[test]
fn test_caption_above_table() {
    let mut table = Table::new();
    table.set_caption(" Casualties ");
    cells(&mut table, &["x"]);
    let latex = table.end();
    assert!(latex.starts_with("\\begin{center}\\textbf{Casualties}\\end{center}\n\\begin{tabularx}"));
}

#[test]
fn test_empty_table_renders_nothing() {
    assert_eq!(Table::new().end(), "");
}
