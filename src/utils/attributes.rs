//! Attribute and template-argument parsing helpers
//!
//! Wiki tables carry HTML-like attributes (`colspan="2" style="width:85%"`),
//! and templates carry `|`-separated arguments that may themselves contain
//! nested templates or links.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'|]+))"#
    )
    .unwrap();
}

/// Ordered attribute map with lowercased keys
pub type Attributes = IndexMap<String, String>;

/// Parse `key="value"` pairs; quoting is optional
pub fn parse_attributes(input: &str) -> Attributes {
    let mut attrs = Attributes::new();
    for caps in ATTRIBUTE.captures_iter(input) {
        let key = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        attrs.insert(key, value);
    }
    attrs
}

/// Parse a CSS `style` attribute into its declarations
pub fn parse_style(style: &str) -> Attributes {
    style
        .split(';')
        .filter_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                return None;
            }
            Some((key, value.trim().to_string()))
        })
        .collect()
}

/// Look up a property either as an attribute or inside `style`
pub fn style_or_attribute(attrs: &Attributes, attr: &str, css: &str) -> Option<String> {
    if let Some(v) = attrs.get(attr) {
        return Some(v.clone());
    }
    let style = attrs.get("style")?;
    parse_style(style).get(css).cloned()
}

/// Parse a percentage such as `85%` or `85`
pub fn parse_percent(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_end_matches('%').trim();
    trimmed.parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// Find the byte offset just past the `}}` closing a template whose body
/// starts at `start` (nesting depth 1).
pub fn find_template_close(input: &str, start: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut depth = 1usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'{', b'{') => {
                depth += 1;
                i += 2;
            }
            (b'}', b'}') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Split template arguments on `|` that are not nested inside `{{ }}` or `[[ ]]`
pub fn split_template_args(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut args = Vec::new();
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut last = 0;
    let mut i = 0;
    while i < bytes.len() {
        let pair = bytes.get(i + 1).map(|&next| (bytes[i], next));
        match pair {
            Some((b'{', b'{')) => {
                braces += 1;
                i += 2;
                continue;
            }
            Some((b'}', b'}')) if braces > 0 => {
                braces -= 1;
                i += 2;
                continue;
            }
            Some((b'[', b'[')) => {
                brackets += 1;
                i += 2;
                continue;
            }
            Some((b']', b']')) if brackets > 0 => {
                brackets -= 1;
                i += 2;
                continue;
            }
            _ => {}
        }
        if bytes[i] == b'|' && braces == 0 && brackets == 0 {
            args.push(&inner[last..i]);
            last = i + 1;
        }
        i += 1;
    }
    args.push(&inner[last..]);
    args
}

/// Split a template argument into `name=value` when it is a named argument
pub fn named_arg(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some((name, value))
}
