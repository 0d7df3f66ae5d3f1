//! Type Normalization Engine
//!
//! Produces exactly one canonical type tag for every parameter, from a raw
//! declared-type token and/or a raw default-value literal. Hints are
//! partial, conflicting, or absent; the resolution order is fixed:
//!
//! 1. A bracket- or paren-enclosed primitive keyword in the declared token
//!    wins and, when the default was empty, supplies a zero-value default.
//! 2. With no declared token, the default's own text is keyword-matched.
//! 3. Otherwise the default is interpreted as a structural literal
//!    (`literal` submodule) and its kind mapped to a tag.
//! 4. A `String` outcome is re-tested as an integer, real, or boolean
//!    spelling (booleans are lower-cased in the returned default).
//! 5. Finally the bare token is classified, stripped of any enclosing
//!    bracket wrapper; whatever remains unresolvable collapses to
//!    `String`.
//!
//! The function is pure, total, and deterministic: it never errors and
//! always returns a member of the closed [`CanonicalType`] set.

pub mod literal;

use std::sync::LazyLock;

use regex::Regex;

use crate::types::CanonicalType;
use literal::Literal;

/// Primitive keyword enclosed in brackets or parens, e.g. `(int)` or
/// `List[str]`.
static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\(\[](bool|boolean|int|float|string|str)[\]\)]").unwrap());

/// Outcome of a normalization: the canonical tag plus the (possibly
/// substituted or lower-cased) default literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub ty: CanonicalType,
    pub default: Option<String>,
}

impl Normalized {
    fn new(ty: CanonicalType, default: Option<String>) -> Self {
        Self { ty, default }
    }
}

/// Resolve one canonical type tag from a raw type token and/or default
/// literal. See the module docs for the priority order.
pub fn normalize(type_token: Option<&str>, default: Option<&str>) -> Normalized {
    let token = type_token.unwrap_or("").trim();
    let default_text = default.unwrap_or("").trim();

    if let Some(keyword) = keyword_in(token) {
        return apply_keyword(keyword, default_text);
    }
    if token.is_empty() && !default_text.is_empty() {
        if let Some(keyword) = keyword_in(default_text) {
            return apply_keyword(keyword, default_text);
        }
    }
    if !default_text.is_empty() && default_text != "None" {
        return guess_from_default(default_text);
    }

    let stripped = strip_wrapper(token);
    Normalized::new(
        CanonicalType::from_token(stripped),
        non_empty(default_text),
    )
}

fn keyword_in(text: &str) -> Option<&str> {
    KEYWORD_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn apply_keyword(keyword: &str, default_text: &str) -> Normalized {
    let (ty, zero) = match keyword {
        "bool" | "boolean" => (CanonicalType::Boolean, Some("False")),
        "int" => (CanonicalType::Integer, Some("0")),
        "float" => (CanonicalType::Float, Some("0")),
        _ => (CanonicalType::String, None),
    };
    let default = if default_text.is_empty() {
        zero.map(str::to_string)
    } else {
        Some(default_text.to_string())
    };
    Normalized::new(ty, default)
}

/// Steps 3 and 4: structural literal interpretation with the string
/// re-tests on top.
fn guess_from_default(default_text: &str) -> Normalized {
    let mut out_default = default_text.to_string();
    // the text the string re-tests run against: a quoted literal is
    // re-tested on its inner text
    let mut retest = default_text.to_string();

    let mut ty = match literal::parse(default_text) {
        Ok(Literal::Int(_)) => CanonicalType::Integer,
        Ok(Literal::Real(_)) => CanonicalType::Float,
        Ok(Literal::Bool(_)) => CanonicalType::Boolean,
        Ok(Literal::Seq) | Ok(Literal::Map) => CanonicalType::Json,
        Ok(Literal::Str(inner)) => {
            retest = inner;
            CanonicalType::String
        }
        Err(err) => {
            tracing::debug!("default literal falls back to String: {}", err);
            CanonicalType::String
        }
    };

    if ty == CanonicalType::String {
        if retest.parse::<i64>().is_ok() {
            ty = CanonicalType::Integer;
        } else if retest.parse::<f64>().is_ok() {
            ty = CanonicalType::Float;
        } else if retest.eq_ignore_ascii_case("true") || retest.eq_ignore_ascii_case("false") {
            ty = CanonicalType::Boolean;
            out_default = out_default.to_lowercase();
        }
    }

    Normalized::new(ty, Some(out_default))
}

/// Strip one enclosing bracket/paren wrapper: the token is split on any
/// bracket character and the enclosed piece wins when one exists.
fn strip_wrapper(token: &str) -> &str {
    let mut parts = token.split(['(', ')', '[', ']']);
    let first = parts.next().unwrap_or("");
    match parts.next() {
        Some(enclosed) => enclosed,
        None => first,
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
