//! Lexer rule tables
//!
//! Each mode owns an ordered list of rules. The first rule that matches at
//! the current position wins, so the order of every table below is part of
//! the grammar. Inclusive modes try their own rules first and then fall back
//! to the initial table; exclusive modes see only their own rules.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::mode::LexMode;
use super::token::TokenKind;
use crate::utils::attributes::find_template_close;

/// How a rule's input is matched
#[derive(Debug)]
pub enum Pattern {
    /// Regex anchored at the current position
    Regex(Regex),
    /// Regex matching a template opener; the match extends to the balanced `}}`
    Template(Regex),
    /// Regex that only fires where `shape` also matches
    Shaped { token: Regex, shape: Regex },
}

/// Effect of a rule on the mode stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    None,
    Push(LexMode),
    Pop,
    /// Closer with no region to close; reported and consumed
    Unmatched,
}

#[derive(Debug)]
pub struct Rule {
    /// Token kind to emit; `None` consumes the input silently
    pub kind: Option<TokenKind>,
    pub pattern: Pattern,
    /// Only fires when nothing but spaces or tabs precede it on the line
    pub line_start: bool,
    pub action: ModeAction,
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!(r"\A(?:{})", pattern)).unwrap()
}

impl Rule {
    fn new(kind: Option<TokenKind>, pattern: Pattern) -> Self {
        Self {
            kind,
            pattern,
            line_start: false,
            action: ModeAction::None,
        }
    }

    fn token(kind: TokenKind, pattern: &str) -> Self {
        Self::new(Some(kind), Pattern::Regex(anchored(pattern)))
    }

    fn template(kind: TokenKind, opener: &str) -> Self {
        Self::new(Some(kind), Pattern::Template(anchored(opener)))
    }

    fn shaped(kind: TokenKind, pattern: &str, shape: &str) -> Self {
        Self::new(
            Some(kind),
            Pattern::Shaped {
                token: anchored(pattern),
                shape: anchored(shape),
            },
        )
    }

    fn ignore(pattern: &str) -> Self {
        Self::new(None, Pattern::Regex(anchored(pattern)))
    }

    fn unmatched(pattern: &str) -> Self {
        let mut rule = Self::ignore(pattern);
        rule.action = ModeAction::Unmatched;
        rule
    }

    fn at_line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    fn push(mut self, mode: LexMode) -> Self {
        self.action = ModeAction::Push(mode);
        self
    }

    fn pop(mut self) -> Self {
        self.action = ModeAction::Pop;
        self
    }

    /// Length in bytes of the match at the start of `rest`
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        match &self.pattern {
            Pattern::Regex(re) => re.find(rest).map(|m| m.end()),
            Pattern::Template(re) => {
                let opener = re.find(rest)?;
                find_template_close(rest, opener.end())
            }
            Pattern::Shaped { token, shape } => {
                if !shape.is_match(rest) {
                    return None;
                }
                token.find(rest).map(|m| m.end())
            }
        }
    }

    /// Capture groups of a regex rule over its own matched text
    pub fn captures<'t>(&self, matched: &'t str) -> Option<Captures<'t>> {
        match &self.pattern {
            Pattern::Regex(re) | Pattern::Shaped { token: re, .. } => re.captures(matched),
            Pattern::Template(_) => None,
        }
    }
}

const COMMENT: &str = r"(?s)<!--.*?-->";

/// Inline body that stays inside one table cell
const CELL_INLINE: &str = r"(?:[^|!\n]|\|[^|\n]|![^!\n])+?";

/// Attribute run before the `|` that separates it from cell text
const CELL_ATTRIBUTES: &str =
    r#"(?:[ \t]*((?:[A-Za-z-]+[ \t]*=[ \t]*(?:"[^"\n]*"|'[^'\n]*'|[^\s|"']+)[ \t]*)+)\|)?"#;

fn initial_rules() -> Vec<Rule> {
    use TokenKind::*;
    vec![
        Rule::ignore(COMMENT),
        Rule::token(NoInclude, r"(?i)<noinclude>"),
        Rule::token(NoIncludeEnd, r"(?i)</noinclude>"),
        Rule::token(
            PageQuality,
            r#"(?i)<pagequality\s+level="(\d)"\s+user="[^"]*"\s*/>"#,
        ),
        Rule::token(
            Declassified,
            r"(?:\{\{\s*(?:c|center)\s*\|\s*)?(?:\{\{\s*(?:xx-smaller|x-smaller|smaller|small)\s*\|\s*)?(?:''')?Declassified(?:''')?\s+per\s+Executive\s+Order\s+13526[^\n]*?Date:\s*2011(?:\s*\}\})*",
        ),
        Rule::token(
            TopSecret,
            r"(?:'''\s*)?TOP SECRET\s*[-–—]+\s*Sensitive(?:\s*''')?",
        ),
        Rule::template(RunningHeader, r"(?i)\{\{\s*rh\s*\|"),
        Rule::token(TocBegin, r"(?i)\{\{\s*TOC begin\s*\}\}").push(LexMode::TocContents),
        Rule::unmatched(r"(?i)\{\{\s*TOC end\s*\}\}"),
        Rule::unmatched(r"(?i)</center\s*>"),
        Rule::unmatched(r"\|\}").at_line_start(),
        Rule::token(
            WikitableBegin,
            r#"\{\|([^\n]*?class[ \t]*=[ \t]*["']?[^"'\n]*wikitable[^\n]*)"#,
        )
        .at_line_start()
        .push(LexMode::Wikitable),
        Rule::token(TableBegin, r"\{\|([^\n]*)")
            .at_line_start()
            .push(LexMode::TableRowGroup),
        Rule::token(CenterBegin, r"(?i)\{\{\s*(?:center|c)\s*\||<center\s*>")
            .push(LexMode::Centered),
        Rule::token(RightBegin, r"(?i)\{\{\s*right\s*\|").push(LexMode::RightAligned),
        Rule::template(IndentBlock, r"(?i)\{\{\s*left\s*\|"),
        Rule::token(Indent, r":+").at_line_start(),
        Rule::token(OrderedListItem, r"#+[ \t]*").at_line_start(),
        Rule::token(HorizontalRule, r"-{4,}").at_line_start(),
        Rule::template(Underline, r"(?i)\{\{\s*u\s*\|"),
        Rule::token(Underline, r"(?is)<u>(.*?)</u>"),
        Rule::template(
            SizeTemplate,
            r"(?i)\{\{\s*(?:xx-smaller|x-smaller|smaller|small|larger|big|x-larger|xx-larger)\s*\|",
        ),
        Rule::token(Gap, r"(?i)\{\{\s*gap\s*(?:\|\s*([^{}|]*?)\s*)?\}\}"),
        Rule::token(RefList, r"(?i)<references\s*/>|\{\{\s*reflist\s*\}\}"),
        Rule::ignore(r"(?i)\{\{\s*nop\s*\}\}"),
        Rule::template(Template, r"\{\{"),
        Rule::token(Bold, r"'''(.+?)'''"),
        Rule::token(Italic, r"''(.+?)''"),
        Rule::token(FileEmbed, r"(?i)\[\[\s*(?:File|Image)\s*:[^\]]*\]\]"),
        Rule::token(
            InternalLink,
            r"\[\[([^\]|#\n]*)(?:#([^\]|\n]*))?(?:\|([^\]\n]*))?\]\]",
        ),
        Rule::token(ExternalLink, r"\[(https?://[^\s\]]+)(?:[ \t]+([^\]\n]*))?\]"),
        Rule::token(LineBreak, r"(?i)<br\s*/?>"),
        Rule::token(HtmlEndTag, r"</([A-Za-z][A-Za-z0-9]*)\s*>"),
        Rule::shaped(
            HtmlTagOpen,
            r"<([A-Za-z][A-Za-z0-9]*)",
            r"<[A-Za-z][A-Za-z0-9]*(?:[ \t/][^<>\n]*)?>",
        )
        .push(LexMode::HtmlTag),
        Rule::token(Checkbox, r"[□☐☑☒✓✔]"),
        Rule::token(Ellipses, r"\.[ \t]\.[ \t]\.|\.\.\.|…"),
        Rule::token(ParagraphBreak, r"[ \t\r]*\n(?:[ \t\r]*\n)+[ \t]*"),
        Rule::token(Whitespace, r"[[ \t\r\n\p{Zs}]&&[^\u{a0}]]+"),
        Rule::token(Number, r"[\d\p{No}]+(?:[.,:/]\d+)*"),
        Rule::token(Word, r"[\p{L}\p{M}]+"),
        Rule::token(Punct, r"[\p{P}\p{Sm}\p{Sc}\p{Sk}§°©®\u{a0}]"),
    ]
}

fn table_rules() -> Vec<Rule> {
    use TokenKind::*;
    vec![
        Rule::ignore(COMMENT),
        Rule::token(TableEnd, r"\|\}").at_line_start().pop(),
        Rule::token(TableRow, r"\|-+([^\n]*)").at_line_start(),
        Rule::token(TableCaption, r"\|\+([^\n]*)").at_line_start(),
        Rule::token(CellBegin, &format!(r"[|!]{}", CELL_ATTRIBUTES))
            .at_line_start()
            .push(LexMode::TableCell),
        Rule::ignore(r"[ \t\r\n]+"),
        Rule::token(CellContinue, "")
            .at_line_start()
            .push(LexMode::TableCell),
    ]
}

fn cell_rules() -> Vec<Rule> {
    use TokenKind::*;
    vec![
        Rule::token(CellSeparator, &format!(r"(?:\|\||!!){}", CELL_ATTRIBUTES)),
        Rule::token(CellEnd, r"[ \t\r]*\n").pop(),
        Rule::token(Bold, &format!("'''({})'''", CELL_INLINE)),
        Rule::token(Italic, &format!("''({})''", CELL_INLINE)),
        Rule::token(Punct, "'{2,3}"),
    ]
}

fn html_tag_rules() -> Vec<Rule> {
    vec![
        Rule::token(TokenKind::HtmlTagClose, r"/?>").pop(),
        Rule::ignore(r"\s+"),
        Rule::ignore(
            r#"[A-Za-z_:][-A-Za-z0-9_:.]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+))?"#,
        ),
    ]
}

fn toc_rules() -> Vec<Rule> {
    use TokenKind::*;
    vec![
        Rule::ignore(COMMENT),
        Rule::token(TocEnd, r"(?i)\{\{\s*TOC end\s*\}\}").pop(),
        Rule::token(TocNewPage, r"---NEWPAGE---"),
        Rule::token(TocRow, r"\|-"),
        Rule::token(TocText, r"[^|{<\-]+|[|{<\-]"),
    ]
}

lazy_static! {
    static ref RULES: FxHashMap<LexMode, Vec<Rule>> = {
        let mut map = FxHashMap::default();
        map.insert(LexMode::Initial, initial_rules());
        map.insert(LexMode::HtmlTag, html_tag_rules());
        map.insert(LexMode::TableRowGroup, table_rules());
        map.insert(LexMode::Wikitable, table_rules());
        map.insert(LexMode::TableCell, cell_rules());
        map.insert(
            LexMode::Centered,
            vec![Rule::token(TokenKind::CenterEnd, r"(?i)\}\}|</center\s*>").pop()],
        );
        map.insert(
            LexMode::RightAligned,
            vec![Rule::token(TokenKind::RightEnd, r"\}\}").pop()],
        );
        map.insert(LexMode::TocContents, toc_rules());
        map
    };
}

fn table_for(mode: LexMode) -> &'static [Rule] {
    RULES.get(&mode).map(Vec::as_slice).unwrap_or(&[])
}

/// Rules active in `mode`, in priority order
pub fn active_rules(mode: LexMode) -> impl Iterator<Item = &'static Rule> {
    let own = table_for(mode);
    let fallback = if mode.is_exclusive() || mode == LexMode::Initial {
        &[][..]
    } else {
        table_for(LexMode::Initial)
    };
    own.iter().chain(fallback.iter())
}
