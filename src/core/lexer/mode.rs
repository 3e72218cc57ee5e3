//! Lexer modes and the mode stack

use std::fmt;

use super::token::Position;

/// Scanning context of the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexMode {
    Initial,
    HtmlTag,
    TableRowGroup,
    Wikitable,
    TableCell,
    Centered,
    RightAligned,
    TocContents,
}

impl LexMode {
    /// Exclusive modes replace the initial rule set instead of layering on it
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            LexMode::HtmlTag | LexMode::TableRowGroup | LexMode::Wikitable | LexMode::TocContents
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            LexMode::Initial => "initial",
            LexMode::HtmlTag => "html-tag",
            LexMode::TableRowGroup => "table-row-group",
            LexMode::Wikitable => "wikitable",
            LexMode::TableCell => "table-cell",
            LexMode::Centered => "centered",
            LexMode::RightAligned => "right-aligned",
            LexMode::TocContents => "toc-contents",
        }
    }
}

impl fmt::Display for LexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stack of pushed modes; the initial mode sits implicitly at the bottom
#[derive(Debug, Clone, Default)]
pub struct ModeStack {
    frames: Vec<(LexMode, Position)>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> LexMode {
        self.frames
            .last()
            .map(|(mode, _)| *mode)
            .unwrap_or(LexMode::Initial)
    }

    pub fn push(&mut self, mode: LexMode, opened_at: Position) {
        self.frames.push((mode, opened_at));
    }

    /// Pop the innermost mode; `None` when only the initial mode remains
    pub fn pop(&mut self) -> Option<(LexMode, Position)> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether `mode` is open anywhere on the stack
    pub fn contains(&self, mode: LexMode) -> bool {
        self.frames.iter().any(|(m, _)| *m == mode)
    }

    /// Remove every open mode, innermost first
    pub fn drain(&mut self) -> impl Iterator<Item = (LexMode, Position)> + '_ {
        self.frames.drain(..).rev()
    }
}
