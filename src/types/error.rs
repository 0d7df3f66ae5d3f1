//! Unified Error Type System
//!
//! The reconciliation pipeline is deliberately forgiving: almost every
//! malformed input degrades to a fallback value or a skipped fragment and is
//! reported through `tracing` rather than an error return. The variants here
//! cover the few genuinely structural failures that internal callers need to
//! branch on.
//!
//! ## Failure Model
//!
//! - **Literal**: the restricted literal parser rejected a default-value
//!   expression. Consumers fall back to the `String` type tag.
//! - **Definition**: a declaration string could not be split into a
//!   qualified path and name. Consumers produce the absent-member sentinel
//!   so sibling nodes keep processing.
//!
//! No variant is ever allowed to abort a whole tree walk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocweaveError {
    /// The restricted structural literal parser rejected the input.
    #[error("unparseable literal `{literal}`: {reason}")]
    Literal { literal: String, reason: String },

    /// A function declaration string had no usable path/name structure.
    #[error("malformed declaration string `{0}`")]
    Definition(String),
}

impl DocweaveError {
    /// Create a literal rejection with context.
    pub fn literal(literal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Literal {
            literal: literal.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocweaveError>;
