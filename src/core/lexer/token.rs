//! Token types produced by the lexer

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TokenKind {
    // Structural markers
    NoInclude,
    NoIncludeEnd,
    PageQuality,
    Declassified,
    TopSecret,
    RunningHeader,
    HtmlTagOpen,
    HtmlTagClose,
    HtmlEndTag,

    // Tables
    TableBegin,
    WikitableBegin,
    TableCaption,
    TableRow,
    CellBegin,
    CellSeparator,
    CellContinue,
    CellEnd,
    TableEnd,

    // Outline region
    TocBegin,
    TocText,
    TocRow,
    TocNewPage,
    TocEnd,

    // Blocks
    CenterBegin,
    CenterEnd,
    RightBegin,
    RightEnd,
    Indent,
    IndentBlock,
    OrderedListItem,
    HorizontalRule,

    // Inline formatting
    Bold,
    Italic,
    Underline,
    SizeTemplate,
    Template,
    InternalLink,
    ExternalLink,
    FileEmbed,
    RefList,
    LineBreak,
    Gap,
    Checkbox,
    Ellipses,

    // Atomic text
    Word,
    Number,
    Punct,
    Whitespace,
    ParagraphBreak,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Relative text size requested by a size template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SizeScale {
    XxSmaller,
    XSmaller,
    Smaller,
    Larger,
    XLarger,
    XxLarger,
}

impl SizeScale {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "xx-smaller" => Some(SizeScale::XxSmaller),
            "x-smaller" => Some(SizeScale::XSmaller),
            "smaller" | "small" => Some(SizeScale::Smaller),
            "larger" | "big" => Some(SizeScale::Larger),
            "x-larger" => Some(SizeScale::XLarger),
            "xx-larger" => Some(SizeScale::XxLarger),
            _ => None,
        }
    }

    /// LaTeX size environment
    pub fn environment(&self) -> &'static str {
        match self {
            SizeScale::XxSmaller => "scriptsize",
            SizeScale::XSmaller => "footnotesize",
            SizeScale::Smaller => "small",
            SizeScale::Larger => "large",
            SizeScale::XLarger => "Large",
            SizeScale::XxLarger => "LARGE",
        }
    }
}

/// Structured token payload
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TokenValue {
    #[default]
    None,
    Text(String),
    /// Proofreading level 0-4
    Quality(u8),
    RunningHeader {
        left: Option<String>,
        center: Option<String>,
        right: Option<String>,
    },
    Link {
        subpage: Option<String>,
        anchor: Option<String>,
        title: Option<String>,
    },
    Size {
        scale: SizeScale,
        text: String,
    },
    /// Table, row or cell attributes
    Attributes { header: bool, attrs: String },
    /// Nesting depth of `:` indentation or `#` list items
    Depth(usize),
    /// `{{left|text|offset=..}}`
    Offset { text: String, offset: Option<String> },
}

impl TokenValue {
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TokenValue::None => true,
            TokenValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// 1-indexed line and column of a token's first character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A classified, positioned unit of input
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Byte range in the page text
    pub span: Range<usize>,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: Range<usize>, position: Position) -> Self {
        Self {
            kind,
            value,
            span,
            position,
        }
    }

    /// Whether the token starts its source line
    pub fn at_line_start(&self) -> bool {
        self.position.column == 1
    }
}

/// Everything the lexer consumes: tokens, ignored spans and skipped characters
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme {
    Token(Token),
    Ignored { span: Range<usize> },
    Illegal { character: char, span: Range<usize> },
}

impl Lexeme {
    pub fn span(&self) -> Range<usize> {
        match self {
            Lexeme::Token(token) => token.span.clone(),
            Lexeme::Ignored { span } | Lexeme::Illegal { span, .. } => span.clone(),
        }
    }

    pub fn into_token(self) -> Option<Token> {
        match self {
            Lexeme::Token(token) => Some(token),
            _ => None,
        }
    }
}
