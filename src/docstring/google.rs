//! Google-style extractor: an indented `Args:` section of
//! `name (type): description` units.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{ParamDoc, collapse_ws, push_param};
use crate::normalize::normalize;
use crate::types::CanonicalType;

static ARGS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)Args:[ \t]*$").unwrap());

static RETURNS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Returns:[ \t]*$").unwrap());

/// One `name (type):` unit. The type may carry back-ticks, namespacing,
/// bracket generics, and commas.
static PARAM_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\w+)\s?\(([`:\w+.\[\], ]+)\)\s?:").unwrap());

/// Extract `(summary, parameter map)` from a Google-style block.
pub(super) fn parse(text: &str) -> (String, IndexMap<String, ParamDoc>) {
    let Some(header) = ARGS_HEADER.find(text) else {
        // classified as Google but the section header is unusable
        tracing::debug!("Args: header not found in Google-style block");
        return (text.trim().to_string(), IndexMap::new());
    };
    let indent_len = header.as_str().find("Args:").unwrap_or(0);
    let indent = &header.as_str()[..indent_len];

    let summary = text[..header.start()].trim().to_string();
    let mut block = deindent(&text[header.end()..], indent);
    if let Some(cut) = RETURNS_HEADER.find(&block).map(|m| m.start()) {
        block.truncate(cut);
    }
    // the parameter units sit one level deeper than the header
    let body_indent = leading_whitespace(&block);
    let block = deindent(&block, &body_indent);

    let mut params = IndexMap::new();
    let matches: Vec<_> = PARAM_UNIT.captures_iter(&block).collect();
    for (i, caps) in matches.iter().enumerate() {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let type_text = caps.get(2).map_or("", |m| m.as_str());
        let end = caps.get(0).map_or(0, |m| m.end());
        let next_start = matches
            .get(i + 1)
            .and_then(|c| c.get(0))
            .map_or(block.len(), |m| m.start());
        let description = collapse_ws(&block[end..next_start]);
        let ty = resolve_type(type_text);
        push_param(&mut params, name, description, Some(ty));
    }
    (summary, params)
}

fn resolve_type(type_text: &str) -> CanonicalType {
    let cleaned = type_text.trim().trim_matches('`');
    if cleaned.is_empty() {
        return CanonicalType::String;
    }
    normalize(Some(&format!("({})", cleaned)), None).ty
}

/// Strip one copy of `indent` from the start of every line.
fn deindent(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_string();
    }
    text.lines()
        .map(|line| line.strip_prefix(indent).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(text: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .take_while(|c| c.is_whitespace())
                .collect::<String>()
        })
        .unwrap_or_default()
}
