use super::*;
use crate::utils::diagnostics::Diagnostics;
use pretty_assertions::assert_eq;

fn kinds(input: &str) -> Vec<TokenKind> {
    let mut diags = Diagnostics::new();
    tokenize(input, &mut diags).into_iter().map(|t| t.kind).collect()
}

fn lex_clean(input: &str) -> Vec<Token> {
    let mut diags = Diagnostics::new();
    let tokens = tokenize(input, &mut diags);
    assert!(diags.is_empty(), "{}", diags.summary());
    tokens
}

const PAGE: &str = "<noinclude><pagequality level=\"4\" user=\"Editor\" /></noinclude>\
{{rh|left=IV. A. 5.|right=A-12}}\n\
<!-- scan note -->\n\
{{center|'''TOP SECRET – Sensitive'''}}\n\n\
:The ''French'' position, 1954…\n\
# first item\n\
{| class=\"wikitable\" style=\"width:85%\"\n\
|-\n\
! Year !! Event\n\
| 1954 || [[/Part I#Geneva|Geneva]] <span style=\"x\">talks</span>\n\
|}\n\
Café ✓ done.\n";

#[test]
fn test_lexing_is_deterministic() {
    let mut first = Diagnostics::new();
    let mut second = Diagnostics::new();
    assert_eq!(lex(PAGE, &mut first), lex(PAGE, &mut second));
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_spans_reconstruct_input() {
    for input in [PAGE, "bad \u{1F600} char", "{{center|open", "{|\n| a\nmore\n|}\n"] {
        let mut diags = Diagnostics::new();
        let rebuilt: String = lex(input, &mut diags)
            .iter()
            .map(|lexeme| &input[lexeme.span()])
            .collect();
        assert_eq!(rebuilt, input);
    }
}

#[test]
fn test_well_formed_page_closes_every_mode() {
    let mut diags = Diagnostics::new();
    let mut lexer = Lexer::new(PAGE);
    while lexer.next_lexeme(&mut diags).is_some() {}
    assert_eq!(lexer.depth(), 0);
    assert_eq!(lexer.mode(), LexMode::Initial);
    lexer.finish(&mut diags);
    assert!(diags.is_empty(), "{}", diags.summary());
}

#[test]
fn test_illegal_character_skipped() {
    let mut diags = Diagnostics::new();
    let lexemes = lex("a\n b\u{1F600}c", &mut diags);
    assert!(lexemes.iter().any(|l| matches!(
        l,
        Lexeme::Illegal { character: '\u{1F600}', .. }
    )));
    assert_eq!(diags.errors, 1);
    assert_eq!(diags.diagnostics[0].line, Some(2));
    assert_eq!(diags.diagnostics[0].column, Some(3));
    let words: Vec<_> = lexemes
        .into_iter()
        .filter_map(Lexeme::into_token)
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.value)
        .collect();
    assert_eq!(words.len(), 3);
}

#[test]
fn test_centered_block_push_and_pop() {
    assert_eq!(
        kinds("{{center|Hello}}"),
        vec![TokenKind::CenterBegin, TokenKind::Word, TokenKind::CenterEnd]
    );
    assert_eq!(
        kinds("<center>Hi</center>"),
        vec![TokenKind::CenterBegin, TokenKind::Word, TokenKind::CenterEnd]
    );
    assert_eq!(
        kinds("{{right|{{u|x}}}}"),
        vec![TokenKind::RightBegin, TokenKind::Underline, TokenKind::RightEnd]
    );
}

#[test]
fn test_unclosed_modes_reported() {
    let mut diags = Diagnostics::new();
    tokenize("text\n{{center|never closed", &mut diags);
    assert!(diags.has_errors());
    let diag = &diags.diagnostics[0];
    assert!(diag.message.contains("unclosed centered region"));
    assert_eq!(diag.line, Some(2));

    let mut diags = Diagnostics::new();
    tokenize("{|\n| cell\n", &mut diags);
    assert!(diags
        .iter()
        .any(|d| d.message.contains("table-row-group")));
}

#[test]
fn test_line_start_rules() {
    assert_eq!(
        kinds("a:b"),
        vec![TokenKind::Word, TokenKind::Punct, TokenKind::Word]
    );
    assert_eq!(
        kinds("::Indented"),
        vec![TokenKind::Indent, TokenKind::Word]
    );
    assert_eq!(
        kinds("x\n  ----"),
        vec![TokenKind::Word, TokenKind::Whitespace, TokenKind::HorizontalRule]
    );
    let tokens = lex_clean("## nested");
    assert_eq!(tokens[0].value, TokenValue::Depth(2));
}

#[test]
fn test_wikitable_token_sequence() {
    use TokenKind::*;
    let input = "{| class=\"wikitable\"\n|-\n| a || colspan=\"2\" | b\n|}\n";
    let tokens = lex_clean(input);
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WikitableBegin,
            TableRow,
            CellBegin,
            Whitespace,
            Word,
            Whitespace,
            CellSeparator,
            Whitespace,
            Word,
            CellEnd,
            TableEnd,
        ]
    );
    assert_eq!(
        tokens[6].value,
        TokenValue::Attributes {
            header: false,
            attrs: "colspan=\"2\"".to_string(),
        }
    );
}

#[test]
fn test_cell_continuation_line() {
    use TokenKind::*;
    assert_eq!(
        kinds("{|\n| a\nmore\n|}\n"),
        vec![TableBegin, CellBegin, Whitespace, Word, CellEnd, CellContinue, Word, CellEnd, TableEnd]
    );
}

#[test]
fn test_header_cell_with_attributes() {
    let tokens = lex_clean("{|\n! style=\"text-align:center\" | Title\n|}");
    assert_eq!(
        tokens[1].value,
        TokenValue::Attributes {
            header: true,
            attrs: "style=\"text-align:center\"".to_string(),
        }
    );
}

#[test]
fn test_toc_region() {
    let input = "{{TOC begin}}\n|I.|Intro\n|-\n||A.|Sub---NEWPAGE---\n{{TOC end}}";
    let tokens = lex_clean(input);
    assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::TocBegin));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::TocEnd));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::TocRow));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::TocNewPage));
    assert!(tokens[1..tokens.len() - 1].iter().all(|t| matches!(
        t.kind,
        TokenKind::TocText | TokenKind::TocRow | TokenKind::TocNewPage
    )));
}

#[test]
fn test_html_tag_attributes_ignored() {
    use TokenKind::*;
    let mut diags = Diagnostics::new();
    let lexemes = lex("<span style=\"color:red\" class=x>hi</span>", &mut diags);
    assert!(diags.is_empty());
    let ignored = lexemes
        .iter()
        .filter(|l| matches!(l, Lexeme::Ignored { .. }))
        .count();
    assert_eq!(ignored, 4);
    let kinds: Vec<_> = lexemes
        .into_iter()
        .filter_map(Lexeme::into_token)
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec![HtmlTagOpen, HtmlTagClose, Word, HtmlEndTag]);
}

#[test]
fn test_structured_values() {
    let tokens = lex_clean("<pagequality level=\"3\" user=\"A B\" />[[/Part I#Geneva|Geneva talks]]");
    assert_eq!(tokens[0].value, TokenValue::Quality(3));
    assert_eq!(
        tokens[1].value,
        TokenValue::Link {
            subpage: Some("/Part I".to_string()),
            anchor: Some("Geneva".to_string()),
            title: Some("Geneva talks".to_string()),
        }
    );

    let tokens = lex_clean("{{larger|'''Title'''}}");
    assert_eq!(
        tokens[0].value,
        TokenValue::Size {
            scale: SizeScale::Larger,
            text: "'''Title'''".to_string(),
        }
    );
}

#[test]
fn test_banners_and_comments() {
    use TokenKind::*;
    assert_eq!(
        kinds("<!-- a -->TOP SECRET - Sensitive"),
        vec![TopSecret]
    );
    assert_eq!(
        kinds("{{c|{{x-smaller|'''Declassified''' per Executive Order 13526, Section 3.3<br />NND Project Number: NND 63316. By: NWD Date: 2011}}}}\n"),
        vec![Declassified, Whitespace]
    );
    assert_eq!(kinds("a{{nop}}b"), vec![Word, Word]);
}

#[test]
fn test_positions_track_lines() {
    let tokens = lex_clean("one\n  two");
    let two = tokens.iter().find(|t| t.value.text() == Some("two")).unwrap();
    assert_eq!(two.position, Position::new(2, 3));
    assert!(tokens[0].at_line_start());
}

#[test]
fn test_less_than_without_tag_shape_is_punctuation() {
    use TokenKind::*;
    let tokens = lex_clean("a<b then\n<br/> <i>x</i>");
    assert_eq!(tokens[1].kind, Punct);
    assert_eq!(tokens[2].value.text(), Some("b"));
    assert!(tokens.iter().any(|t| t.kind == HtmlTagOpen));
    assert!(tokens.iter().any(|t| t.value.text() == Some("then")));
}

#[test]
fn test_stray_closers_reported() {
    let mut diags = Diagnostics::new();
    let tokens = tokenize("text\n|}\n{{TOC end}}\n</center>", &mut diags);
    assert_eq!(diags.errors, 3, "{}", diags.summary());
    assert!(diags.iter().all(|d| d.message.contains("without an open region")));
    assert_eq!(diags.diagnostics[0].line, Some(2));
    assert!(tokens.iter().all(|t| matches!(t.kind, TokenKind::Word | TokenKind::Whitespace)));
}

#[test]
fn test_unicode_numbers_and_spaces() {
    use TokenKind::*;
    assert_eq!(
        kinds("½ 2³\u{2003}x"),
        vec![Number, Whitespace, Number, Whitespace, Word]
    );
    assert_eq!(kinds("a\u{a0}b"), vec![Word, Punct, Word]);
}
