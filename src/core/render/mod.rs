//! Token-driven LaTeX renderer
//!
//! The renderer consumes one page's tokens and emits its LaTeX fragment.
//! A `match` on the token kind picks the handler; kinds without a handler
//! pass their raw text through. Handlers write to an [`OutputSink`] whose
//! lookback decides whether breaks and spaces are needed, and route table
//! and outline tokens to the builder scoped to their region.
//!
//! A handler failure abandons the rest of the page: the fragment keeps what
//! was emitted so far and carries the error.

pub mod context;
mod markup;


pub use context::{BlockEnv, OutputSink, RenderContext, SpacingState, W2LOptions};

use crate::core::lexer::{Token, TokenKind};
use crate::utils::diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
use crate::utils::error::{ConversionError, ConversionResult};

/// LaTeX output for one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageFragment {
    pub content: String,
    /// Page-quality level stamped on the page, if any
    pub quality: Option<u8>,
    /// Error that cut the page short; `content` is partial when set
    pub abandoned: Option<ConversionError>,
}

impl PageFragment {
    pub fn is_complete(&self) -> bool {
        self.abandoned.is_none()
    }
}

/// Renderer for one page
pub struct Renderer<'d> {
    ctx: RenderContext,
    diags: &'d mut Diagnostics,
    /// Nothing but whitespace seen since the last source newline
    line_start: bool,
}

impl<'d> Renderer<'d> {
    pub fn new(options: &W2LOptions, diags: &'d mut Diagnostics) -> Self {
        Self {
            ctx: RenderContext::new(options.clone()),
            diags,
            line_start: true,
        }
    }

    /// Render a page's tokens into its fragment
    pub fn render(mut self, tokens: &[Token]) -> PageFragment {
        let mut abandoned = None;
        for token in tokens {
            if let Err(err) = self.dispatch(token) {
                self.diags.report(&err);
                abandoned = Some(err);
                break;
            }
        }
        if abandoned.is_none() {
            if let Err(err) = self.close_open_regions() {
                abandoned = Some(err);
            }
        }
        PageFragment {
            content: self.ctx.output.finish(),
            quality: self.ctx.quality,
            abandoned,
        }
    }

    fn render_error(token: &Token, message: impl Into<String>) -> ConversionError {
        ConversionError::render(
            message,
            token.kind.to_string(),
            token.position.line,
            token.position.column,
        )
    }

    fn note(&mut self, level: DiagnosticLevel, token: &Token, message: impl Into<String>) {
        self.diags.add(
            Diagnostic::new(level, message)
                .with_location(token.position.line, token.position.column)
                .with_span(token.span.start, token.span.end),
        );
    }

    /// Handle one token
    fn dispatch(&mut self, token: &Token) -> ConversionResult<()> {
        use TokenKind::*;

        if self.line_start
            && self.ctx.in_list()
            && self.ctx.cell.is_none()
            && !matches!(token.kind, OrderedListItem | Whitespace | ParagraphBreak)
        {
            self.close_lists();
        }

        match token.kind {
            // Structural markers
            NoInclude | NoIncludeEnd | HtmlTagOpen | HtmlTagClose | HtmlEndTag => {}
            PageQuality => self.page_quality(token),
            Declassified => self.declassified(),
            TopSecret => self.top_secret(),
            RunningHeader => self.running_header(token),

            // Tables
            TableBegin | WikitableBegin => self.table_begin(token)?,
            TableCaption => self.table_caption(token)?,
            TableRow => self.table_row(token)?,
            CellBegin | CellSeparator => self.cell_begin(token)?,
            CellContinue => self.cell_continue(token)?,
            CellEnd => self.cell_end(),
            TableEnd => self.table_end(token)?,

            // Outline region
            TocBegin => self.toc_begin(token)?,
            TocText | TocRow | TocNewPage => self.toc_event(token)?,
            TocEnd => self.toc_end(token)?,

            // Blocks
            CenterBegin => self.block_begin(BlockEnv::Center),
            RightBegin => self.block_begin(BlockEnv::Right),
            CenterEnd | RightEnd => self.block_end(token),
            Indent => self.indent(token),
            IndentBlock => self.indent_block(token),
            OrderedListItem => self.list_item(token),
            HorizontalRule => self.horizontal_rule(),

            // Inline formatting
            Bold => self.wrap_inline("textbf", token),
            Italic => self.wrap_inline("textit", token),
            Underline => self.wrap_inline("uline", token),
            SizeTemplate => self.size_template(token),
            Template => self.template(token),
            InternalLink => self.internal_link(token),
            ExternalLink => self.external_link(token),
            FileEmbed => self.note(DiagnosticLevel::Info, token, "embedded file not rendered"),
            RefList => self.note(DiagnosticLevel::Info, token, "reference list not rendered"),
            LineBreak => self.ctx.sink().line_break(),
            Gap => self.gap(token),
            Checkbox | Punct => self.escaped(token),
            Word => self.word(token),

            // Spacing
            Whitespace => self.whitespace(token),
            ParagraphBreak => self.paragraph_break(),

            // Number, Ellipses
            _ => self.passthrough(token),
        }

        self.line_start = match token.kind {
            Whitespace => self.line_start || token.value.text().is_some_and(|t| t.contains('\n')),
            ParagraphBreak | CellEnd | CellContinue | TableEnd => true,
            _ => false,
        };
        Ok(())
    }

    /// Close whatever the page left open, best effort
    ///
    /// Every region is closed even when an outline fails to build; that
    /// failure is returned afterwards so the page is marked abandoned.
    fn close_open_regions(&mut self) -> ConversionResult<()> {
        let mut failure = None;
        if let Some(cell) = self.ctx.cell.take() {
            if let Some(table) = self.ctx.table.as_mut() {
                table.append_cell(cell.end());
            }
        }
        if let Some(table) = self.ctx.table.take() {
            self.diags.warn("table left open at end of page; closed");
            self.splice(&table.end());
        }
        if let Some(toc) = self.ctx.toc.take() {
            self.ctx.in_toc = false;
            self.diags.warn("outline left open at end of page; closed");
            match toc.finish() {
                Ok(latex) => self.splice(&format!("{}\n", latex)),
                Err(err) => {
                    self.diags.report(&err);
                    failure = Some(err);
                }
            }
        }
        while let Some(env) = self.ctx.pop_env() {
            self.diags.warn(format!(
                "{} block left open at end of page; closed",
                env.latex_name()
            ));
            self.write_env_end(env);
        }
        self.close_lists();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Render a page's tokens with the given options
pub fn render_page(tokens: &[Token], options: &W2LOptions, diags: &mut Diagnostics) -> PageFragment {
    Renderer::new(options, diags).render(tokens)
}
