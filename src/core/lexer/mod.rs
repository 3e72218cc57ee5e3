//! Multi-mode lexer for wiki transcription markup
//!
//! The lexer walks one page's text left to right. At every position the
//! rules of the active mode are tried in priority order; the first match
//! becomes a token (or is consumed silently), and may push or pop a mode.
//! A character that no rule accepts is skipped and reported, so lexing
//! never fails.
//!
//! ## Example
//!
//! ```rust
//! use w2l::core::lexer::{tokenize, TokenKind};
//! use w2l::utils::Diagnostics;
//!
//! let mut diags = Diagnostics::new();
//! let tokens = tokenize("'''Secret''' page", &mut diags);
//! assert_eq!(tokens[0].kind, TokenKind::Bold);
//! assert!(diags.is_empty());
//! ```

mod mode;
mod rules;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use mode::{LexMode, ModeStack};
pub use rules::ModeAction;
pub use token::{Lexeme, Position, SizeScale, Token, TokenKind, TokenValue};

use crate::utils::diagnostics::{Diagnostic, Diagnostics};
use crate::utils::error::ConversionError;

/// Lexer over one page of markup
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    /// Byte offset where the current line begins
    line_begin: usize,
    modes: ModeStack,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            line_begin: 0,
            modes: ModeStack::new(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn mode(&self) -> LexMode {
        self.modes.current()
    }

    /// Number of modes currently pushed above the initial mode
    pub fn depth(&self) -> usize {
        self.modes.depth()
    }

    fn at_line_start(&self) -> bool {
        self.input[self.line_begin..self.pos]
            .chars()
            .all(|c| c == ' ' || c == '\t')
    }

    /// Text of the line being scanned, without its newline
    fn current_line(&self) -> &'a str {
        let rest = &self.input[self.line_begin..];
        rest.split('\n').next().unwrap_or(rest)
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.input[self.pos..self.pos + len];
        for (offset, c) in consumed.char_indices() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
                self.line_begin = self.pos + offset + 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len;
    }

    /// Consume the next lexeme, or `None` at end of input
    pub fn next_lexeme(&mut self, diags: &mut Diagnostics) -> Option<Lexeme> {
        if self.pos >= self.input.len() {
            return None;
        }

        let input = self.input;
        let rest = &input[self.pos..];
        let mode = self.modes.current();
        let line_start = self.at_line_start();

        for rule in rules::active_rules(mode) {
            if rule.line_start && !line_start {
                continue;
            }
            let Some(len) = rule.match_len(rest) else {
                continue;
            };
            // Only a push into a different mode may consume nothing
            if len == 0 && !matches!(rule.action, ModeAction::Push(next) if next != mode) {
                continue;
            }

            let position = self.position();
            let span = self.pos..self.pos + len;
            let matched = &rest[..len];

            match rule.action {
                ModeAction::Push(next) => {
                    log::trace!("{}: enter {} mode", position, next);
                    self.modes.push(next, position);
                }
                ModeAction::Pop => {
                    if let Some((closed, _)) = self.modes.pop() {
                        log::trace!("{}: leave {} mode", position, closed);
                    }
                }
                ModeAction::Unmatched => {
                    let err = ConversionError::structural_at(
                        format!("{} without an open region", matched.trim()),
                        position.line,
                        position.column,
                    );
                    diags.add(
                        Diagnostic::from(&err)
                            .with_span(span.start, span.end)
                            .with_source(self.current_line())
                            .with_suggestion("remove it or add the matching opener"),
                    );
                }
                ModeAction::None => {}
            }

            let lexeme = match rule.kind {
                Some(kind) => Lexeme::Token(Token::new(
                    kind,
                    value::token_value(kind, rule, matched),
                    span,
                    position,
                )),
                None => Lexeme::Ignored { span },
            };
            self.advance(len);
            return Some(lexeme);
        }

        let character = rest.chars().next()?;
        let span = self.pos..self.pos + character.len_utf8();
        diags.add(
            Diagnostic::from(&ConversionError::lex(character, self.line, self.column))
                .with_span(span.start, span.end)
                .with_source(self.current_line()),
        );
        self.advance(character.len_utf8());
        Some(Lexeme::Illegal { character, span })
    }

    /// Report every mode still open at end of input
    pub fn finish(&mut self, diags: &mut Diagnostics) {
        for (mode, opened_at) in self.modes.drain() {
            diags.report(&ConversionError::structural_at(
                format!("unclosed {} region", mode),
                opened_at.line,
                opened_at.column,
            ));
        }
    }
}

/// Lex a whole page, including ignored spans and skipped characters
pub fn lex(input: &str, diags: &mut Diagnostics) -> Vec<Lexeme> {
    let mut lexer = Lexer::new(input);
    let mut lexemes = Vec::new();
    while let Some(lexeme) = lexer.next_lexeme(diags) {
        lexemes.push(lexeme);
    }
    lexer.finish(diags);
    lexemes
}

/// Lex a whole page into its tokens
pub fn tokenize(input: &str, diags: &mut Diagnostics) -> Vec<Token> {
    lex(input, diags)
        .into_iter()
        .filter_map(Lexeme::into_token)
        .collect()
}
