//! Core conversion modules
//!
//! - `lexer`: multi-mode tokenizer for one page of wiki markup
//! - `render`: token-driven LaTeX renderer
//! - `table`: two-pass `tabularx` builder
//! - `toc`: `easylist` outline builder
//! - `substitute`: inline template rewriting and escaping

pub mod lexer;
pub mod render;
pub mod substitute;
pub mod table;
pub mod toc;

pub use lexer::{tokenize, Token, TokenKind, TokenValue};
pub use render::{render_page, PageFragment, Renderer, W2LOptions};
pub use substitute::substitute;
