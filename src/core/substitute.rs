//! Inline template substitution
//!
//! Rewrites the inline constructs of a run of wiki text into LaTeX. Templates
//! are rewritten innermost-first; the LaTeX they produce is written with
//! private-use sentinels in place of `\`, `{` and `}` so that the reserved
//! character escaping pass, which runs last, never touches it.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::core::lexer::SizeScale;
use crate::data::constants::DEFAULT_GAP;
use crate::data::replacements::{accent, replacement, reserved};

const BACKSLASH: char = '\u{E000}';
const OPEN_BRACE: char = '\u{E001}';
const CLOSE_BRACE: char = '\u{E002}';

/// Upper bound on rewrite passes for nested templates
const MAX_PASSES: usize = 16;

lazy_static! {
    static ref FILE_LINK: Regex =
        Regex::new(r"\[\[\s*(?:File|Image)\s*:[^\[\]]*\]\]").unwrap();
    static ref INTERNAL_LINK: Regex =
        Regex::new(r"\[\[(?:[^\[\]|]*\|)?([^\[\]|]*)\]\]").unwrap();
    static ref EXTERNAL_LINK: Regex =
        Regex::new(r"\[(https?://[^\s\[\]]+)(?:\s+([^\[\]]*))?\]").unwrap();
    static ref POPUP_NOTE: Regex =
        Regex::new(r"(?i)\{\{\s*popup\s+note\s*\|[^{}|]*\|([^{}]*)\}\}").unwrap();
    static ref UNDERLINE: Regex = Regex::new(r"(?i)\{\{\s*u\s*\|([^{}]*)\}\}").unwrap();
    static ref SIZE: Regex = Regex::new(
        r"(?i)\{\{\s*(xx-smaller|x-smaller|smaller|small|larger|big|x-larger|xx-larger)\s*\|([^{}]*)\}\}"
    )
    .unwrap();
    static ref GAP: Regex =
        Regex::new(r"(?i)\{\{\s*gap\s*(?:\|\s*([^{}|]*?)\s*)?\}\}").unwrap();
    static ref NOP: Regex = Regex::new(r"(?i)\{\{\s*nop\s*\}\}").unwrap();
    static ref BOLD: Regex = Regex::new(r"'''(.+?)'''").unwrap();
    static ref ITALIC: Regex = Regex::new(r"''(.+?)''").unwrap();
    static ref HTML_UNDERLINE: Regex = Regex::new(r"(?is)<u>(.*?)</u>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
}

/// Encode LaTeX produced by a template so the escaping pass leaves it alone
fn protect(latex: &str) -> String {
    latex
        .chars()
        .map(|c| match c {
            '\\' => BACKSLASH,
            '{' => OPEN_BRACE,
            '}' => CLOSE_BRACE,
            other => other,
        })
        .collect()
}

fn wrap(command: &str, body: &str) -> String {
    format!("{}{}{}", protect(&format!("\\{}{{", command)), body, CLOSE_BRACE)
}

fn environment(name: &str, body: &str) -> String {
    format!(
        "{}{}{}",
        protect(&format!("\\begin{{{}}}", name)),
        body,
        protect(&format!("\\end{{{}}}", name))
    )
}

/// One rewrite pass over every template pattern
fn rewrite_templates(text: &str) -> String {
    let text = FILE_LINK.replace_all(text, "");
    let text = INTERNAL_LINK.replace_all(&text, "$1");
    let text = EXTERNAL_LINK.replace_all(&text, |caps: &Captures| {
        caps.get(2)
            .map(|label| label.as_str().to_string())
            .unwrap_or_else(|| caps[1].to_string())
    });
    let text = POPUP_NOTE.replace_all(&text, "$1");
    let text = UNDERLINE.replace_all(&text, |caps: &Captures| wrap("uline", &caps[1]));
    let text = SIZE.replace_all(&text, |caps: &Captures| {
        let env = SizeScale::from_keyword(&caps[1])
            .map(|scale| scale.environment())
            .unwrap_or("normalsize");
        environment(env, &caps[2])
    });
    let text = GAP.replace_all(&text, |caps: &Captures| {
        let width = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|w| !w.is_empty())
            .unwrap_or(DEFAULT_GAP);
        wrap("hspace", width)
    });
    let text = NOP.replace_all(&text, "");
    let text = BOLD.replace_all(&text, |caps: &Captures| wrap("textbf", &caps[1]));
    let text = ITALIC.replace_all(&text, |caps: &Captures| wrap("textit", &caps[1]));
    let text = HTML_UNDERLINE.replace_all(&text, |caps: &Captures| wrap("uline", &caps[1]));
    let text = LINE_BREAK.replace_all(&text, |_: &Captures| format!("{}\n", protect("\\\\")));
    text.into_owned()
}

/// Escape reserved characters and apply the fixed replacement table
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            BACKSLASH => out.push('\\'),
            OPEN_BRACE => out.push('{'),
            CLOSE_BRACE => out.push('}'),
            _ => match reserved(c).or_else(|| replacement(c)).or_else(|| accent(c)) {
                Some(s) => out.push_str(s),
                None => out.push(c),
            },
        }
    }
    out
}

/// Replace accented letters by their compose codes
pub fn replace_accents(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match accent(c) {
            Some(code) => out.push_str(code),
            None => out.push(c),
        }
    }
    out
}

/// Translate a run of inline wiki text into LaTeX
pub fn substitute(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        let next = rewrite_templates(&current);
        if next == current {
            break;
        }
        current = next;
    }
    escape_text(&current)
}
