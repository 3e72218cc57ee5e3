//! Token handlers

use super::context::BlockEnv;
use super::Renderer;
use crate::core::lexer::{Token, TokenValue};
use crate::core::substitute::{escape_text, replace_accents, substitute};
use crate::core::table::{Cell, Table};
use crate::core::toc::TocBuilder;
use crate::data::constants::{is_known_template, DEFAULT_GAP, HORIZONTAL_RULE, TOP_SECRET_BANNER};
use crate::utils::attributes::split_template_args;
use crate::utils::diagnostics::DiagnosticLevel;
use crate::utils::error::ConversionResult;

fn text_of(token: &Token) -> &str {
    token.value.text().unwrap_or("")
}

fn attrs_of(token: &Token) -> (bool, &str) {
    match &token.value {
        TokenValue::Attributes { header, attrs } => (*header, attrs.as_str()),
        _ => (false, ""),
    }
}

fn depth_of(token: &Token) -> usize {
    match token.value {
        TokenValue::Depth(depth) => depth,
        _ => 1,
    }
}

impl Renderer<'_> {
    /// Write a finished block (table, outline) into the page on its own lines
    pub(super) fn splice(&mut self, latex: &str) {
        if latex.is_empty() {
            return;
        }
        let sink = &mut self.ctx.output;
        sink.ensure_newline();
        sink.push_block(latex);
    }

    pub(super) fn passthrough(&mut self, token: &Token) {
        if let Some(text) = token.value.text() {
            self.ctx.sink().push(text);
        }
    }

    // =========================================================================
    // Structural markers
    // =========================================================================

    pub(super) fn page_quality(&mut self, token: &Token) {
        if let TokenValue::Quality(level) = token.value {
            self.ctx.quality = Some(level);
        }
    }

    pub(super) fn declassified(&mut self) {
        let banner = self.ctx.options.declassified_banner.clone();
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push_block(&banner);
    }

    pub(super) fn top_secret(&mut self) {
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push_block(TOP_SECRET_BANNER);
    }

    pub(super) fn running_header(&mut self, token: &Token) {
        if !self.ctx.options.emit_running_headers {
            return;
        }
        if let TokenValue::RunningHeader {
            left,
            center,
            right,
        } = &token.value
        {
            let field = |f: &Option<String>| f.as_deref().map(substitute).unwrap_or_default();
            let latex = format!(
                "\\vfill\n\\begin{{spacing}}{{0}}\n\\hfline{{{}}}{{{}}}{{{}}}\n\\end{{spacing}}\n",
                field(left),
                field(center),
                field(right)
            );
            let sink = self.ctx.sink();
            sink.ensure_newline();
            sink.push_block(&latex);
        }
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn require_table(&self, token: &Token) -> ConversionResult<()> {
        if self.ctx.table.is_none() {
            return Err(Self::render_error(token, "table cell outside of a table"));
        }
        Ok(())
    }

    /// Hand the open cell, if any, to the table
    fn close_cell(&mut self) {
        if let Some(cell) = self.ctx.cell.take() {
            if let Some(table) = self.ctx.table.as_mut() {
                table.append_cell(cell.end());
            }
        }
    }

    pub(super) fn table_begin(&mut self, token: &Token) -> ConversionResult<()> {
        if self.ctx.table.is_some() {
            return Err(Self::render_error(token, "nested tables are not supported"));
        }
        if self.ctx.in_toc {
            return Err(Self::render_error(token, "table inside an outline region"));
        }
        self.close_lists();
        let (_, attrs) = attrs_of(token);
        let mut table = Table::with_min_width(self.ctx.options.min_table_width);
        table.apply_attributes(attrs);
        if token.kind == crate::core::lexer::TokenKind::WikitableBegin {
            table.set_border(true);
        }
        log::debug!("{}: table begins", token.position);
        self.ctx.table = Some(table);
        Ok(())
    }

    pub(super) fn table_caption(&mut self, token: &Token) -> ConversionResult<()> {
        self.require_table(token)?;
        let caption = substitute(text_of(token));
        if let Some(table) = self.ctx.table.as_mut() {
            table.set_caption(caption);
        }
        Ok(())
    }

    pub(super) fn table_row(&mut self, token: &Token) -> ConversionResult<()> {
        self.require_table(token)?;
        self.close_cell();
        let (_, attrs) = attrs_of(token);
        if let Some(table) = self.ctx.table.as_mut() {
            table.append_row();
            table.set_row_attributes(attrs);
        }
        Ok(())
    }

    pub(super) fn cell_begin(&mut self, token: &Token) -> ConversionResult<()> {
        self.require_table(token)?;
        self.close_cell();
        let (header, attrs) = attrs_of(token);
        let mut cell = Cell::new(header);
        cell.apply_attributes(attrs);
        self.ctx.cell = Some(cell);
        Ok(())
    }

    /// A table line without a leading `|` continues the open cell
    pub(super) fn cell_continue(&mut self, token: &Token) -> ConversionResult<()> {
        self.require_table(token)?;
        if self.ctx.cell.is_none() {
            self.ctx.cell = Some(Cell::new(false));
        }
        Ok(())
    }

    pub(super) fn cell_end(&mut self) {
        if let Some(cell) = self.ctx.cell.as_mut() {
            cell.sink_mut().soft_newline();
        }
    }

    pub(super) fn table_end(&mut self, token: &Token) -> ConversionResult<()> {
        self.require_table(token)?;
        self.close_cell();
        if let Some(table) = self.ctx.table.take() {
            let latex = table.end();
            self.splice(&latex);
        }
        Ok(())
    }

    // =========================================================================
    // Outline region
    // =========================================================================

    pub(super) fn toc_begin(&mut self, token: &Token) -> ConversionResult<()> {
        if self.ctx.in_toc || self.ctx.table.is_some() {
            return Err(Self::render_error(token, "outline nested in another region"));
        }
        let options = &self.ctx.options;
        self.ctx.toc = Some(TocBuilder::with_settings(
            options.list_properties.clone(),
            options.declassified_banner.clone(),
        ));
        self.ctx.in_toc = true;
        Ok(())
    }

    pub(super) fn toc_event(&mut self, token: &Token) -> ConversionResult<()> {
        use crate::core::lexer::TokenKind::*;
        let toc = self
            .ctx
            .toc
            .as_mut()
            .ok_or_else(|| Self::render_error(token, "outline text outside an outline region"))?;
        match token.kind {
            TocRow => toc.end_line(),
            TocNewPage => toc.mark_new_page(),
            _ => toc.append(text_of(token)),
        }
        Ok(())
    }

    pub(super) fn toc_end(&mut self, token: &Token) -> ConversionResult<()> {
        let toc = self
            .ctx
            .toc
            .take()
            .ok_or_else(|| Self::render_error(token, "outline end without a beginning"))?;
        self.ctx.in_toc = false;
        let latex = toc.finish()?;
        self.splice(&format!("{}\n", latex));
        Ok(())
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    pub(super) fn block_begin(&mut self, env: BlockEnv) {
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push_block(&format!("\\begin{{{}}}\n", env.latex_name()));
        self.ctx.push_env(env);
    }

    pub(super) fn write_env_end(&mut self, env: BlockEnv) {
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push_block(&format!("\\end{{{}}}\n", env.latex_name()));
    }

    pub(super) fn block_end(&mut self, token: &Token) {
        match self.ctx.pop_env() {
            Some(env) => self.write_env_end(env),
            None => self.note(
                DiagnosticLevel::Warning,
                token,
                "block end without an open block",
            ),
        }
    }

    pub(super) fn indent(&mut self, token: &Token) {
        let depth = depth_of(token);
        self.ctx.indent_depth = depth;
        let em = depth * self.ctx.options.indent_unit_em as usize;
        let sink = self.ctx.sink();
        sink.paragraph_break();
        sink.push(&format!("\\noindent\\hspace*{{{}em}}", em));
    }

    pub(super) fn indent_block(&mut self, token: &Token) {
        if let TokenValue::Offset { text, offset } = &token.value {
            let offset = offset
                .clone()
                .unwrap_or_else(|| format!("{}em", self.ctx.options.indent_unit_em));
            let body = substitute(text.trim());
            let sink = self.ctx.sink();
            sink.ensure_newline();
            sink.push(&format!("\\hspace*{{{}}}{} \\\\\n", offset, body));
        }
    }

    pub(super) fn list_item(&mut self, token: &Token) {
        let depth = depth_of(token);
        while self.ctx.list_depth < depth {
            let sink = self.ctx.sink();
            sink.ensure_newline();
            sink.push_block("\\begin{enumerate}\n");
            self.ctx.list_depth += 1;
        }
        while self.ctx.list_depth > depth {
            let sink = self.ctx.sink();
            sink.ensure_newline();
            sink.push_block("\\end{enumerate}\n");
            self.ctx.list_depth -= 1;
        }
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push("\\item ");
    }

    pub(super) fn close_lists(&mut self) {
        while self.ctx.list_depth > 0 {
            let sink = self.ctx.sink();
            sink.ensure_newline();
            sink.push_block("\\end{enumerate}\n");
            self.ctx.list_depth -= 1;
        }
    }

    pub(super) fn horizontal_rule(&mut self) {
        let sink = self.ctx.sink();
        sink.ensure_newline();
        sink.push_block(HORIZONTAL_RULE);
    }

    // =========================================================================
    // Inline formatting
    // =========================================================================

    pub(super) fn wrap_inline(&mut self, command: &str, token: &Token) {
        let inner = substitute(text_of(token));
        self.ctx
            .sink()
            .push(&format!("\\{}{{{}}}", command, inner));
    }

    pub(super) fn size_template(&mut self, token: &Token) {
        if let TokenValue::Size { scale, text } = &token.value {
            let env = scale.environment();
            let latex = format!("\\begin{{{}}}{}\\end{{{}}}", env, substitute(text), env);
            self.ctx.sink().push(&latex);
        }
    }

    pub(super) fn gap(&mut self, token: &Token) {
        let width = match text_of(token) {
            "" => DEFAULT_GAP,
            w => w,
        };
        let latex = format!("\\hspace{{{}}}", escape_text(width));
        self.ctx.sink().push(&latex);
    }

    pub(super) fn template(&mut self, token: &Token) {
        let raw = text_of(token);
        let inner = raw
            .strip_prefix("{{")
            .and_then(|s| s.strip_suffix("}}"))
            .unwrap_or(raw);
        let name = split_template_args(inner)
            .first()
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if is_known_template(&name) {
            let latex = substitute(raw);
            self.ctx.sink().push(&latex);
        } else {
            self.note(
                DiagnosticLevel::Warning,
                token,
                format!("unsupported template '{}' dropped", name),
            );
        }
    }

    pub(super) fn internal_link(&mut self, token: &Token) {
        if let TokenValue::Link {
            subpage,
            anchor,
            title,
        } = &token.value
        {
            let label = title.as_ref().or(anchor.as_ref()).or(subpage.as_ref());
            if let Some(label) = label {
                let latex = substitute(label);
                self.ctx.sink().push(&latex);
            }
        }
    }

    pub(super) fn external_link(&mut self, token: &Token) {
        let latex = substitute(text_of(token));
        self.ctx.sink().push(&latex);
    }

    // =========================================================================
    // Atomic text
    // =========================================================================

    pub(super) fn escaped(&mut self, token: &Token) {
        let latex = escape_text(text_of(token));
        self.ctx.sink().push(&latex);
    }

    pub(super) fn word(&mut self, token: &Token) {
        let latex = replace_accents(text_of(token));
        self.ctx.sink().push(&latex);
    }

    pub(super) fn whitespace(&mut self, token: &Token) {
        if text_of(token).contains('\n') {
            self.ctx.indent_depth = 0;
            self.ctx.sink().soft_newline();
        } else {
            self.ctx.sink().space();
        }
    }

    pub(super) fn paragraph_break(&mut self) {
        self.close_lists();
        self.ctx.indent_depth = 0;
        self.ctx.sink().paragraph_break();
    }
}
