//! reST-style extractor: `:param name: description` and `:type name:`
//! markers, with an optional trailing returns section.

use indexmap::IndexMap;

use super::{ParamDoc, collapse_ws, push_param};
use crate::normalize::normalize;
use crate::types::CanonicalType;

/// Extract `(summary, parameter map)` from a reST-style block.
///
/// The signature's `:type` entries override description-inferred types,
/// but only when the entry carries actual type text: an empty `:type`
/// block is treated as no override. A `:type` entry for a name with no
/// matching `:param` is reported and dropped.
pub(super) fn parse(text: &str) -> (String, IndexMap<String, ParamDoc>) {
    let body = strip_returns_section(text);

    // explicit per-parameter type overrides
    let mut explicit: IndexMap<String, String> = IndexMap::new();
    for fragment in body.split(":type").skip(1) {
        let line = fragment.replace('\n', " ");
        let Some(colon) = line.find(':') else {
            tracing::debug!("skipping type fragment without delimiter: {}", line.trim());
            continue;
        };
        let name = line[..colon].trim().to_string();
        let mut type_text = line[colon + 1..].trim().to_string();
        if let Some(stop) = type_text.find(":param") {
            type_text.truncate(stop);
        }
        explicit.insert(name, type_text.trim().to_string());
    }

    let mut params = IndexMap::new();
    let mut fragments = body.split(":param");
    let summary = fragments.next().unwrap_or("").trim().to_string();

    for fragment in fragments {
        let line = fragment.replace('\n', " ");
        let Some(colon) = line.find(':') else {
            tracing::debug!("skipping param fragment without delimiter: {}", line.trim());
            continue;
        };
        let name = line[..colon].trim();
        let mut description = line[colon + 1..].to_string();
        if let Some(stop) = description.find(":type") {
            description.truncate(stop);
        }
        let description = collapse_ws(&description);

        let ty = match explicit.get(name) {
            Some(type_text) if !type_text.is_empty() => {
                normalize(Some(&format!("({})", type_text)), None).ty
            }
            _ => infer_type(&description),
        };
        push_param(&mut params, name, description, Some(ty));
    }

    for name in explicit.keys() {
        if !params.contains_key(name) {
            tracing::warn!("type entry without matching parameter: {}", name);
        }
    }

    (summary, params)
}

/// Cut the block before any `Returns:` / `:returns` trailer.
fn strip_returns_section(text: &str) -> &str {
    if let Some(i) = text.find("Returns:") {
        &text[..i]
    } else if let Some(i) = text.find(":returns") {
        &text[..i]
    } else {
        text
    }
}

/// Guess a type from the description's leading token; anything that is
/// not a primitive keyword collapses to `String`.
fn infer_type(description: &str) -> CanonicalType {
    let token = description
        .split([',', ' '])
        .next()
        .unwrap_or("")
        .trim();
    if token.is_empty() {
        return CanonicalType::String;
    }
    normalize(Some(&format!("({})", token)), None).ty
}
