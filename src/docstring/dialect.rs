//! Docstring Dialect Classification
//!
//! A free-text documentation block is written in one of a fixed set of
//! human conventions, distinguished by structural markers. Classification
//! runs every signature pattern against a whitespace-normalized copy of
//! the text in a fixed order with **no early exit**: when more than one
//! signature matches, the last match in array order wins. The ordering is
//! the contract; keep it an explicit array, never an unordered map.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Documentation-writing convention of a docstring block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// reST-style `:param name:` / `:returns:` markers.
    Restructured,
    /// Google-style `Args:` section.
    Google,
    /// NumPy-style `Parameters` / `----------` header.
    Numpy,
    /// Tabular task dialect with a `---- parameter` banner.
    Casa,
    Unknown,
}

static SIGNATURES: LazyLock<[(Dialect, Regex); 4]> = LazyLock::new(|| {
    [
        (
            Dialect::Restructured,
            Regex::new(r"\n(:param|:returns|Returns:) .*").unwrap(),
        ),
        (Dialect::Google, Regex::new(r"\nArgs:").unwrap()),
        (Dialect::Numpy, Regex::new(r"\nParameters\n----------").unwrap()),
        (Dialect::Casa, Regex::new(r"\n-{2,20} parameter").unwrap()),
    ]
});

impl Dialect {
    /// Decide which dialect `text` is written in.
    ///
    /// Returns [`Dialect::Unknown`] (with a warning diagnostic) when no
    /// signature matches; that is a degraded mode, not an error.
    pub fn classify(text: &str) -> Self {
        let normalized = normalize_lines(text);
        let mut found = Dialect::Unknown;
        for (dialect, signature) in SIGNATURES.iter() {
            if signature.is_match(&normalized) {
                found = *dialect;
            }
        }
        if found == Dialect::Unknown {
            tracing::warn!("docstring matches no known dialect signature");
        }
        found
    }
}

/// Strip each line and rejoin so indentation never hides a marker.
fn normalize_lines(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}
