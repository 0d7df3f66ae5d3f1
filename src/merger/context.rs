//! Per-Traversal Context
//!
//! Everything an enclosing compound hands down to the reconciliation of
//! its function nodes. The CASA flag and the compound-level parameter
//! descriptions are inherited state, but they travel explicitly as a value
//! passed into every call, never as shared or global mutable state.

use indexmap::IndexMap;

use crate::docstring::{DocBlock, ParamDoc};
use crate::types::SourceKind;

#[derive(Debug, Clone, Default)]
pub struct WalkContext {
    /// Language tag selecting bookkeeping fields; caller-supplied.
    pub kind: SourceKind,
    /// Tabular-dialect interpretation mode inherited from the compound.
    pub casa_mode: bool,
    /// Parameter descriptions contributed by a CASA compound docstring,
    /// looked up by name during reconciliation.
    pub parent_docs: IndexMap<String, ParamDoc>,
}

impl WalkContext {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Derive the context for nodes nested under a compound with the given
    /// documentation block. Only a CASA compound switches the mode and
    /// contributes its parameter table.
    pub fn with_compound(&self, block: &DocBlock) -> Self {
        let mut child = self.clone();
        if block.is_casa() {
            child.casa_mode = true;
            child.parent_docs = block.params.clone();
        }
        child
    }
}
