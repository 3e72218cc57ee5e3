//! Structured token values built from matched text

use super::rules::Rule;
use super::token::{SizeScale, TokenKind, TokenValue};
use crate::utils::attributes::{named_arg, split_template_args};

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Template body without its `{{` and `}}`
fn template_inner(matched: &str) -> &str {
    let inner = matched.strip_prefix("{{").unwrap_or(matched);
    inner.strip_suffix("}}").unwrap_or(inner)
}

/// Arguments after the template name, rejoined
fn template_body(matched: &str) -> String {
    let args = split_template_args(template_inner(matched));
    args.get(1..).map(|rest| rest.join("|")).unwrap_or_default()
}

fn running_header(matched: &str) -> TokenValue {
    let mut fields: [Option<String>; 3] = [None, None, None];
    let mut positional = 0;
    for arg in split_template_args(template_inner(matched)).into_iter().skip(1) {
        match named_arg(arg) {
            Some(("left", v)) => fields[0] = non_empty(v),
            Some(("center", v)) => fields[1] = non_empty(v),
            Some(("right", v)) => fields[2] = non_empty(v),
            Some(_) => {}
            None => {
                if let Some(slot) = fields.get_mut(positional) {
                    *slot = non_empty(arg);
                }
                positional += 1;
            }
        }
    }
    let [left, center, right] = fields;
    TokenValue::RunningHeader {
        left,
        center,
        right,
    }
}

fn indent_block(matched: &str) -> TokenValue {
    let mut text = Vec::new();
    let mut offset = None;
    for arg in split_template_args(template_inner(matched)).into_iter().skip(1) {
        match named_arg(arg) {
            Some(("offset", v)) => offset = non_empty(v),
            _ => text.push(arg),
        }
    }
    TokenValue::Offset {
        text: text.join("|"),
        offset,
    }
}

fn size_template(matched: &str) -> TokenValue {
    let args = split_template_args(template_inner(matched));
    let scale = args
        .first()
        .and_then(|name| SizeScale::from_keyword(name))
        .unwrap_or(SizeScale::Smaller);
    TokenValue::Size {
        scale,
        text: template_body(matched),
    }
}

fn group(rule: &Rule, matched: &str, index: usize) -> Option<String> {
    rule.captures(matched)
        .and_then(|caps| caps.get(index).map(|m| m.as_str().to_string()))
}

fn attributes(rule: &Rule, matched: &str, header: bool) -> TokenValue {
    TokenValue::Attributes {
        header,
        attrs: group(rule, matched, 1)
            .map(|a| a.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Build the value of a token of `kind` that `rule` matched as `matched`
pub fn token_value(kind: TokenKind, rule: &Rule, matched: &str) -> TokenValue {
    use TokenKind::*;
    match kind {
        PageQuality => group(rule, matched, 1)
            .and_then(|level| level.parse().ok())
            .map(TokenValue::Quality)
            .unwrap_or_default(),
        RunningHeader => running_header(matched),
        IndentBlock => indent_block(matched),
        SizeTemplate => size_template(matched),
        Underline => {
            if matched.starts_with('<') {
                TokenValue::Text(group(rule, matched, 1).unwrap_or_default())
            } else {
                TokenValue::Text(template_body(matched))
            }
        }
        Bold | Italic | Gap | TableCaption | HtmlTagOpen | HtmlEndTag => {
            TokenValue::Text(group(rule, matched, 1).unwrap_or_default().trim().to_string())
        }
        InternalLink => match rule.captures(matched) {
            Some(caps) => TokenValue::Link {
                subpage: caps.get(1).and_then(|m| non_empty(m.as_str())),
                anchor: caps.get(2).and_then(|m| non_empty(m.as_str())),
                title: caps.get(3).and_then(|m| non_empty(m.as_str())),
            },
            None => TokenValue::Text(matched.to_string()),
        },
        ExternalLink => match rule.captures(matched) {
            Some(caps) => TokenValue::Text(
                caps.get(2)
                    .and_then(|m| non_empty(m.as_str()))
                    .unwrap_or_else(|| caps[1].to_string()),
            ),
            None => TokenValue::Text(matched.to_string()),
        },
        TableBegin | WikitableBegin | TableRow => attributes(rule, matched, false),
        CellBegin => attributes(rule, matched, matched.starts_with('!')),
        CellSeparator => attributes(rule, matched, matched.starts_with("!!")),
        Indent => TokenValue::Depth(matched.chars().filter(|&c| c == ':').count()),
        OrderedListItem => TokenValue::Depth(matched.chars().filter(|&c| c == '#').count()),
        Ellipses => TokenValue::Text("...".to_string()),
        NoInclude | NoIncludeEnd | HtmlTagClose | CellContinue | CellEnd | TableEnd | TocBegin
        | TocEnd | TocRow | TocNewPage | CenterBegin | CenterEnd | RightBegin | RightEnd
        | HorizontalRule | RefList | LineBreak => TokenValue::None,
        _ => TokenValue::Text(matched.to_string()),
    }
}
