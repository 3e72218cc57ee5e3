//! Integration tests for w2l page and section conversion

use w2l::{
    check_markup, convert_page, convert_section, lex, substitute, tokenize, wiki_to_latex,
    ConversionError, Diagnostics, Page, W2LOptions,
};

// ============================================================================
// End-to-end conversion
// ============================================================================

mod end_to_end {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold_paragraph_and_center() {
        let result = wiki_to_latex("'''Secret'''\n\n{{center|Hello}}");
        assert_eq!(
            result,
            "\\textbf{Secret}\n\n\\begin{center}\nHello\n\\end{center}\n"
        );
    }

    #[test]
    fn test_right_aligned_block() {
        let result = wiki_to_latex("{{right|Signed}}");
        assert_eq!(result, "\\begin{flushright}\nSigned\n\\end{flushright}\n");
    }

    #[test]
    fn test_html_center_and_comment() {
        let result = wiki_to_latex("<!-- note --><center>Title</center>");
        assert_eq!(result, "\\begin{center}\nTitle\n\\end{center}\n");
    }

    #[test]
    fn test_accents_and_replacements() {
        let result = wiki_to_latex("Café – done");
        assert!(result.starts_with("Caf"));
        assert!(!result.contains('é'));
        assert!(result.contains(" -- done"));
    }

    #[test]
    fn test_top_secret_banner() {
        let result = wiki_to_latex("'''TOP SECRET – Sensitive'''");
        assert!(result.contains(w2l::constants::TOP_SECRET_BANNER.trim()));
    }

    #[test]
    fn test_left_offset_block() {
        let result = wiki_to_latex("{{left|Memo|offset=3em}}");
        assert_eq!(result, "\\hspace*{3em}Memo \\\\\n");
    }
}

// ============================================================================
// Tables
// ============================================================================

mod tables {
    use super::*;

    #[test]
    fn test_span_two_of_two() {
        let input = "{| class=\"wikitable\"\n|-\n| colspan=\"2\" | Span\n|-\n| a || b\n|}\n";
        let result = wiki_to_latex(input);
        assert!(result.contains("\\begin{tabularx}{\\textwidth}{|X|X|}"), "{}", result);
        assert!(result.contains(
            "\\multicolumn{2}{|p{\\dimexpr \\textwidth*2/2\\relax}|}{Span} \\\\"
        ));
        assert!(result.contains("a & b \\\\"));
    }

    #[test]
    fn test_rows_padded_to_column_count() {
        let result = wiki_to_latex("{|\n| a || b || c\n|-\n| d\n|}\n");
        assert!(result.contains("{XXX}"));
        assert!(result.contains("a & b & c \\\\\n"));
        assert!(result.contains("d &  &  \\\\\n"));
    }

    #[test]
    fn test_width_clamping() {
        let cases = [
            ("50", "{0.7\\textwidth}"),
            ("100", "{\\textwidth}"),
            ("85", "{0.85\\textwidth}"),
        ];
        for (width, expected) in cases {
            let input = format!("{{| style=\"width:{}%\"\n| x\n|}}\n", width);
            let result = wiki_to_latex(&input);
            assert!(
                result.contains(&format!("\\begin{{tabularx}}{}", expected)),
                "width {} gave '{}'",
                width,
                result
            );
        }
    }

    #[test]
    fn test_contents_table_layout() {
        let result = wiki_to_latex("{| width=\"50%\"\n| I. || Background\n|}\n");
        assert!(result.contains("\\begin{tabularx}{\\textwidth}{@{}rX@{}}"));
    }

    #[test]
    fn test_caption_and_centered_row() {
        let result = wiki_to_latex("{|\n|+ Figures\n|- align=\"center\"\n| a || b\n|}\n");
        assert!(result.starts_with("\\begin{center}\\textbf{Figures}\\end{center}\n"));
        assert!(result.contains(
            "\\centering\\arraybackslash a & \\centering\\arraybackslash b \\\\"
        ));
    }
}

// ============================================================================
// Outlines
// ============================================================================

mod outlines {
    use super::*;

    #[test]
    fn test_numbering_bound_on_first_sight() {
        let input = "{{TOC begin}}\n{|\n|I.|Background\n|-\n||A.|Rule\n|-\n|||1.|Years\n|-\n|II.|Geneva\n|-\n||B.|Partition\n|}\n{{TOC end}}";
        let result = wiki_to_latex(input);
        assert!(result.contains("Numbers1=R,Numbers2=L,Hide2=1,Hide3=2)"));
        assert!(!result.contains("Numbers3"));
        assert!(result.contains("@ Background\n@@ Rule\n@@@ Years\n@ Geneva\n@@ Partition\n"));
    }

    #[test]
    fn test_new_page_banner() {
        let options = W2LOptions {
            declassified_banner: "BANNER\n".to_string(),
            ..Default::default()
        };
        let page = Page::new("{{TOC begin}}\n|I.|One ---NEWPAGE---\n|-\n|II.|Two\n{{TOC end}}");
        let mut diags = Diagnostics::new();
        let fragment = convert_page(&page, &options, &mut diags);
        assert!(fragment.content.contains("@ One\n\\newpage\nBANNER\n@ Two\n"));
    }
}

// ============================================================================
// Sections and failure handling
// ============================================================================

mod sections {
    use super::*;

    #[test]
    fn test_abandoned_page_does_not_stop_run() {
        let pages = vec![
            Page::new("{{TOC begin}}\nno markers\n{{TOC end}}"),
            Page::new("fine"),
        ];
        let mut diags = Diagnostics::new();
        let section = convert_section(&pages, &W2LOptions::default(), &mut diags);
        assert!(matches!(
            section.fragments[0].abandoned,
            Some(ConversionError::MalformedOutline { .. })
        ));
        assert!(section.fragments[1].is_complete());
        assert_eq!(section.content, "fine\n");
        assert!(diags.has_errors());
    }

    #[test]
    fn test_tally_percentages_sum_to_hundred() {
        let pages = vec![
            Page::new("a").with_quality(4),
            Page::new("b").with_quality(4),
            Page::new("<pagequality level=\"3\" user=\"Ed\" />c"),
        ];
        let mut diags = Diagnostics::new();
        let section = convert_section(&pages, &W2LOptions::default(), &mut diags);
        assert_eq!(section.tally.count(4), 2);
        assert_eq!(section.tally.count(3), 1);
        let sum: f64 = (0..5).map(|level| section.tally.percentage(level)).sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {}", sum);
        assert!(section
            .tally
            .to_string()
            .starts_with("Number of pages parsed: 3"));
    }
}

// ============================================================================
// Lexer properties and diagnostics
// ============================================================================

mod lexing {
    use super::*;

    const PAGE: &str = "{{rh|left=A|right=B}}\n:''Intro'' text\n{| class=\"wikitable\"\n! Head !! Two\n|-\n| [[x|y]] || 5%\n|}\n# item\n";

    #[test]
    fn test_lexing_is_deterministic() {
        let mut first = Diagnostics::new();
        let mut second = Diagnostics::new();
        assert_eq!(tokenize(PAGE, &mut first), tokenize(PAGE, &mut second));
        assert!(first.is_empty());
    }

    #[test]
    fn test_spans_tile_the_page() {
        let mut diags = Diagnostics::new();
        let rebuilt: String = lex(PAGE, &mut diags)
            .iter()
            .map(|lexeme| &PAGE[lexeme.span()])
            .collect();
        assert_eq!(rebuilt, PAGE);
    }

    #[test]
    fn test_illegal_character_reported() {
        let result = check_markup("ok\nbad \u{1F600} char");
        assert!(result.has_errors());
        let diag = &result.diagnostics[0];
        assert_eq!((diag.line, diag.column), (Some(2), Some(5)));
    }

    #[test]
    fn test_unclosed_table_reported() {
        let result = check_markup("{|\n| a\n");
        assert!(result.has_errors());
        assert!(result
            .iter()
            .any(|d| d.message.contains("unclosed table-row-group region")));
    }

    #[test]
    fn test_substitution_is_escaping_only_on_plain_text() {
        assert_eq!(substitute("plain text, 50% & more"), "plain text, 50\\% \\& more");
    }
}
