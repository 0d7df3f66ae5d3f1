//! Restricted Structural Literal Parser
//!
//! Interprets a default-value string as a literal expression without any
//! evaluation capability. Only numeric literals, quoted strings, booleans,
//! and bracketed sequence/mapping literals are recognized; names, calls,
//! and operators are rejected and the caller falls back to `String`.
//!
//! JSON is accepted first via `serde_json` (it covers double-quoted
//! strings, numbers, `true`/`false`, arrays, and objects), then a small
//! scanner handles the source language's own flavor: single-quoted
//! strings, `True`/`False`, and tuple parentheses.

use crate::types::{DocweaveError, Result};

/// Structural kind of a recognized literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted string; carries the unquoted text.
    Str(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    /// List or tuple literal.
    Seq,
    /// Mapping literal.
    Map,
}

/// Parse a default-value string into its literal kind.
///
/// Never evaluates anything; a rejection is an ordinary `Err` the caller
/// maps to the `String` fallback.
pub fn parse(text: &str) -> Result<Literal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DocweaveError::literal(text, "empty input"));
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return from_json(trimmed, value);
    }
    parse_value(trimmed)
}

fn from_json(raw: &str, value: serde_json::Value) -> Result<Literal> {
    use serde_json::Value;
    match value {
        Value::Null => Err(DocweaveError::literal(raw, "null literal")),
        Value::Bool(b) => Ok(Literal::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Literal::Int(i))
            } else {
                Ok(Literal::Real(n.as_f64().unwrap_or(0.0)))
            }
        }
        Value::String(s) => Ok(Literal::Str(s)),
        Value::Array(_) => Ok(Literal::Seq),
        Value::Object(_) => Ok(Literal::Map),
    }
}

fn parse_value(text: &str) -> Result<Literal> {
    let t = text.trim();
    match t {
        "" => return Err(DocweaveError::literal(text, "empty element")),
        "True" | "true" => return Ok(Literal::Bool(true)),
        "False" | "false" => return Ok(Literal::Bool(false)),
        "None" | "null" => return Err(DocweaveError::literal(text, "null literal")),
        _ => {}
    }
    if let Ok(i) = t.parse::<i64>() {
        return Ok(Literal::Int(i));
    }
    if let Ok(f) = t.parse::<f64>() {
        return Ok(Literal::Real(f));
    }
    if let Some(inner) = quoted(t) {
        return Ok(Literal::Str(inner.to_string()));
    }
    if let Some(inner) = delimited(t, '[', ']') {
        elements(inner)?;
        return Ok(Literal::Seq);
    }
    if let Some(inner) = delimited(t, '{', '}') {
        return mapping(t, inner);
    }
    if let Some(inner) = delimited(t, '(', ')') {
        // a parenthesized single value is just that value; a comma makes
        // it a tuple
        return if split_top_level(inner).len() > 1 || inner.trim().is_empty() {
            elements(inner)?;
            Ok(Literal::Seq)
        } else {
            parse_value(inner)
        };
    }
    Err(DocweaveError::literal(text, "not a recognized literal"))
}

/// Inner text of a string quoted with `'` or `"`, if the quotes only
/// appear at the ends.
fn quoted(t: &str) -> Option<&str> {
    for q in ['\'', '"'] {
        if t.len() >= 2 && t.starts_with(q) && t.ends_with(q) {
            let inner = &t[1..t.len() - 1];
            if !inner.contains(q) {
                return Some(inner);
            }
        }
    }
    None
}

/// Inner text of a bracketed literal, if the delimiters balance.
fn delimited(t: &str, open: char, close: char) -> Option<&str> {
    if t.starts_with(open) && t.ends_with(close) && balanced(t) {
        Some(&t[open.len_utf8()..t.len() - close.len_utf8()])
    } else {
        None
    }
}

fn balanced(t: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for c in t.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            },
        }
    }
    depth == 0 && quote.is_none()
}

/// Split on commas at nesting depth zero, outside quotes.
fn split_top_level(t: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, c) in t.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                ',' if depth == 0 => {
                    parts.push(&t[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&t[start..]);
    parts
}

/// Validate every sequence element; a trailing comma leaves an empty
/// last element, which is tolerated.
fn elements(inner: &str) -> Result<()> {
    let parts = split_top_level(inner);
    for (i, part) in parts.iter().enumerate() {
        if part.trim().is_empty() {
            if i + 1 == parts.len() {
                continue;
            }
            return Err(DocweaveError::literal(inner, "empty sequence element"));
        }
        parse_value(part)?;
    }
    Ok(())
}

/// A braced literal is a mapping only when its entries carry top-level
/// `key: value` pairs; set-style contents are rejected so they fall back
/// to `String` upstream.
fn mapping(raw: &str, inner: &str) -> Result<Literal> {
    if inner.trim().is_empty() {
        return Ok(Literal::Map);
    }
    for entry in split_top_level(inner) {
        if entry.trim().is_empty() {
            continue;
        }
        let halves = split_on_top_level_colon(entry)
            .ok_or_else(|| DocweaveError::literal(raw, "braced literal without key: value"))?;
        parse_value(halves.0)?;
        parse_value(halves.1)?;
    }
    Ok(Literal::Map)
}

fn split_on_top_level_colon(entry: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for (i, c) in entry.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth -= 1,
                ':' if depth == 0 => return Some((&entry[..i], &entry[i + 1..])),
                _ => {}
            },
        }
    }
    None
}
