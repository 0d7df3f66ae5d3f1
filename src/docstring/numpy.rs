//! NumPy-style extractor: a `Parameters` / `----------` header followed by
//! `name : type` lines with indented descriptions.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{ParamDoc, collapse_ws, push_param};
use crate::normalize::normalize;
use crate::types::CanonicalType;

const PARAMETERS_HEADER: &str = "\nParameters\n----------\n";

static SECTION_TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\nReturns\n-------\n|\nRaises\n------\n").unwrap());

/// `name : type` unit start.
static TYPED_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+) : ").unwrap());

/// Bare `name` line followed by an indented block.
static BARE_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\n    ").unwrap());

/// Extract `(summary, parameter map)` from a NumPy-style block.
pub(super) fn parse(text: &str) -> (String, IndexMap<String, ParamDoc>) {
    let body = text.trim_matches('\n');
    let indent = leading_spaces(body);
    let body = deindent(body, indent);
    let body = body.trim_start();

    let (summary, rest) = match body.split_once(PARAMETERS_HEADER) {
        Some((summary, rest)) => (summary, rest),
        None => {
            tracing::debug!("Parameters header not found in NumPy-style block");
            (body, "")
        }
    };
    let section = match SECTION_TRAILER.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    let mut params = IndexMap::new();
    let mut units = split_units(&TYPED_UNIT, section);
    if units.is_empty() && !rest.is_empty() {
        units = split_units(&BARE_UNIT, section);
    }
    for (name, body) in units {
        let description = collapse_ws(body);
        let ty = infer_type(body);
        push_param(&mut params, name, description, Some(ty));
    }
    (summary.trim().to_string(), params)
}

/// Pair every unit-start match with the text up to the next one.
fn split_units<'t>(pattern: &Regex, section: &'t str) -> Vec<(&'t str, &'t str)> {
    let matches: Vec<_> = pattern.captures_iter(section).collect();
    matches
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let name = caps.get(1)?.as_str();
            let end = caps.get(0)?.end();
            let next = matches
                .get(i + 1)
                .and_then(|c| c.get(0))
                .map_or(section.len(), |m| m.start());
            Some((name, &section[end..next]))
        })
        .collect()
}

/// The unit body starts with the declared type (when present); its first
/// token drives the type guess.
fn infer_type(body: &str) -> CanonicalType {
    let token = body
        .split([',', ' ', '\n'])
        .next()
        .unwrap_or("")
        .trim();
    if token.is_empty() {
        return CanonicalType::String;
    }
    normalize(Some(&format!("({})", token)), None).ty
}

fn leading_spaces(text: &str) -> usize {
    text.chars().take_while(|c| *c == ' ').count()
}

fn deindent(text: &str, indent: usize) -> String {
    if indent == 0 {
        return text.to_string();
    }
    let prefix = " ".repeat(indent);
    text.lines()
        .map(|line| line.strip_prefix(prefix.as_str()).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}
