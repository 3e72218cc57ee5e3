//! Render context and options for wiki to LaTeX conversion
//!
//! Per-page render state, the output sink and conversion options.

use crate::core::table::{Cell, Table};
use crate::core::toc::TocBuilder;
use crate::data::constants::{
    DECLASSIFIED_BANNER, INDENT_UNIT_EM, LIST_PROPERTIES, MIN_TABLE_WIDTH,
};

/// Options for wiki to LaTeX conversion
#[derive(Debug, Clone)]
pub struct W2LOptions {
    /// Smallest width fraction a narrowed table may take (default: 0.7)
    pub min_table_width: f64,
    /// Horizontal space per `:` indentation level, in em
    pub indent_unit_em: u32,
    /// Block inserted after a `---NEWPAGE---` outline marker
    pub declassified_banner: String,
    /// Leading `\ListProperties` entries of every outline
    pub list_properties: String,
    /// Text placed between page fragments of a section
    pub page_separator: String,
    /// Whether `{{rh}}` running headers are rendered
    pub emit_running_headers: bool,
}

impl Default for W2LOptions {
    fn default() -> Self {
        Self {
            min_table_width: MIN_TABLE_WIDTH,
            indent_unit_em: INDENT_UNIT_EM,
            declassified_banner: DECLASSIFIED_BANNER.to_string(),
            list_properties: LIST_PROPERTIES.to_string(),
            page_separator: "\n".to_string(),
            emit_running_headers: true,
        }
    }
}

impl W2LOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop running headers and join pages without a blank line
    pub fn compact() -> Self {
        Self {
            page_separator: String::new(),
            emit_running_headers: false,
            ..Default::default()
        }
    }
}

/// Spacing state of an output sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingState {
    /// Nothing written yet
    #[default]
    Start,
    /// Inside running paragraph text
    MidParagraph,
    /// A blank line has just been written
    AfterParagraphBreak,
    /// A block boundary (`\begin`/`\end` line) has just been written
    AfterBlockClose,
}

/// Initial capacity for output buffer (reduces reallocations)
const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Append-only output buffer with lookback
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    buf: String,
    state: SpacingState,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            state: SpacingState::Start,
        }
    }

    pub fn state(&self) -> SpacingState {
        self.state
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn last_char(&self) -> Option<char> {
        self.buf.chars().next_back()
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.buf.ends_with(suffix)
    }

    /// Append paragraph text
    pub fn push(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.buf.push_str(s);
        self.state = SpacingState::MidParagraph;
    }

    /// Append a block boundary such as `\begin{center}` or `\end{center}`
    pub fn push_block(&mut self, s: &str) {
        self.buf.push_str(s);
        self.state = SpacingState::AfterBlockClose;
    }

    /// Add a newline if not already at one
    pub fn ensure_newline(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Ensure there's a paragraph break (blank line)
    pub fn paragraph_break(&mut self) {
        match self.state {
            SpacingState::Start | SpacingState::AfterParagraphBreak => {}
            SpacingState::MidParagraph | SpacingState::AfterBlockClose => {
                if self.buf.ends_with('\n') {
                    if !self.buf.ends_with("\n\n") {
                        self.buf.push('\n');
                    }
                } else {
                    self.buf.push_str("\n\n");
                }
                self.state = SpacingState::AfterParagraphBreak;
            }
        }
    }

    /// Forced line break; nothing outside a paragraph or right after a newline
    pub fn line_break(&mut self) {
        if self.state == SpacingState::MidParagraph && self.last_char() != Some('\n') {
            self.buf.push_str("\\\\\n");
        }
    }

    /// Single source newline inside running text
    pub fn soft_newline(&mut self) {
        if self.state != SpacingState::Start && self.last_char() != Some('\n') {
            self.buf.push('\n');
        }
    }

    /// Inter-word space
    pub fn space(&mut self) {
        match self.last_char() {
            None | Some(' ') | Some('\n') => {}
            Some(_) => self.buf.push(' '),
        }
    }

    /// Finished text: trailing whitespace trimmed, one final newline
    pub fn finish(self) -> String {
        let trimmed = self.buf.trim_end();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        }
    }
}

/// Block environment opened by a begin token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnv {
    Center,
    Right,
}

impl BlockEnv {
    pub fn latex_name(self) -> &'static str {
        match self {
            BlockEnv::Center => "center",
            BlockEnv::Right => "flushright",
        }
    }
}

/// Per-page render state
pub struct RenderContext {
    /// Page output
    pub output: OutputSink,
    /// Conversion options
    pub options: W2LOptions,
    /// Current `:` indentation depth; reset at the end of the line
    pub indent_depth: usize,
    /// Ordered list nesting depth
    pub list_depth: usize,
    /// Stack of open block environments
    pub env_stack: Vec<BlockEnv>,
    /// Whether a TOC region is open
    pub in_toc: bool,
    /// Table under construction
    pub table: Option<Table>,
    /// Cell under construction
    pub cell: Option<Cell>,
    /// Outline under construction
    pub toc: Option<TocBuilder>,
    /// Page-quality level stamped on the page
    pub quality: Option<u8>,
}

impl RenderContext {
    pub fn new(options: W2LOptions) -> Self {
        Self {
            output: OutputSink::new(),
            options,
            indent_depth: 0,
            list_depth: 0,
            env_stack: Vec::new(),
            in_toc: false,
            table: None,
            cell: None,
            toc: None,
            quality: None,
        }
    }

    /// Sink that running text goes to: the open cell, else the page
    pub fn sink(&mut self) -> &mut OutputSink {
        match self.cell.as_mut() {
            Some(cell) => cell.sink_mut(),
            None => &mut self.output,
        }
    }

    /// Push a new block environment onto the stack
    pub fn push_env(&mut self, env: BlockEnv) {
        self.env_stack.push(env);
    }

    /// Pop the current block environment from the stack
    pub fn pop_env(&mut self) -> Option<BlockEnv> {
        self.env_stack.pop()
    }

    /// Check if we're in any list environment
    pub fn in_list(&self) -> bool {
        self.list_depth > 0
    }
}
