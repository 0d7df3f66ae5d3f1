//! Documentation Block Model
//!
//! Owns dialect classification and dispatch to the matching parameter
//! extractor. A [`DocBlock`] is built once per function or compound
//! docstring and is immutable afterwards; the tree walk reads its summary
//! and parameter map and never hands it on.
//!
//! Dispatch is a closed `match` over [`Dialect`], so adding a dialect is a
//! compile-time exhaustiveness error until its parser exists.

pub mod casa;
pub mod dialect;
pub mod google;
pub mod numpy;
pub mod rest;

use indexmap::IndexMap;

use crate::types::CanonicalType;
pub use dialect::Dialect;

/// Documentation-derived facts about one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDoc {
    /// Human-readable description; fragments for a recurring name
    /// accumulate in visitation order.
    pub description: String,
    /// Type hint resolved from the docstring, when the dialect carries one.
    pub ty: Option<CanonicalType>,
}

/// One classified and parsed documentation block.
#[derive(Debug, Clone)]
pub struct DocBlock {
    pub dialect: Dialect,
    /// Leading description text, before any parameter section.
    pub summary: String,
    pub params: IndexMap<String, ParamDoc>,
}

impl DocBlock {
    /// Classify `text` and run the matching extractor.
    ///
    /// An unknown dialect is not an error: the raw text passes through as
    /// the summary and the parameter map stays empty.
    pub fn parse(text: &str) -> Self {
        let dialect = Dialect::classify(text);
        let (summary, params) = match dialect {
            Dialect::Restructured => rest::parse(text),
            Dialect::Google => google::parse(text),
            Dialect::Numpy => numpy::parse(text),
            Dialect::Casa => casa::parse(text),
            Dialect::Unknown => (text.trim().to_string(), IndexMap::new()),
        };
        Self {
            dialect,
            summary,
            params,
        }
    }

    /// First-sentence short form of the summary.
    pub fn brief(&self) -> String {
        match self.summary.split('.').next() {
            Some(first) if !first.is_empty() => format!("{}.", first),
            _ => String::new(),
        }
    }

    /// Whether this block switches the owning walk into CASA mode.
    pub fn is_casa(&self) -> bool {
        self.dialect == Dialect::Casa
    }
}

/// Remove literal control characters and collapse interior whitespace to
/// single spaces.
pub(crate) fn collapse_ws(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Insert a parameter entry, accumulating the description when the name
/// recurs and filling the type only if still unset.
pub(crate) fn push_param(
    params: &mut IndexMap<String, ParamDoc>,
    name: &str,
    description: String,
    ty: Option<CanonicalType>,
) {
    match params.get_mut(name) {
        Some(existing) => {
            if !description.is_empty() {
                if !existing.description.is_empty() {
                    existing.description.push(' ');
                }
                existing.description.push_str(&description);
            }
            if existing.ty.is_none() {
                existing.ty = ty;
            }
        }
        None => {
            params.insert(name.to_string(), ParamDoc { description, ty });
        }
    }
}
