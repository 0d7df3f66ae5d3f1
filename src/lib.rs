//! Docweave - Docstring-to-Component-Description Normalizer
//!
//! Converts the structured documentation a documentation-generator exports
//! for a codebase (signatures plus free-text docstrings) into a normalized,
//! typed parameter/member model ready for a downstream component-description
//! emitter.
//!
//! ## Core Problems
//!
//! - **Dialect classification**: decide which documentation convention
//!   (reST, Google, NumPy, CASA) a free-text block uses
//! - **Parameter extraction**: parse that dialect into a structured
//!   parameter map
//! - **Type normalization**: infer one canonical type tag per parameter
//!   from partial, conflicting, or absent hints
//! - **Reconciliation**: merge the docstring-derived and signature-derived
//!   views into one member record, applying source-language
//!   calling-convention rules
//!
//! ## Quick Start
//!
//! ```
//! use docweave::{
//!     CompoundNode, FunctionChild, FunctionNode, SignatureParam, SourceKind,
//!     process_compound,
//! };
//!
//! let compound = CompoundNode::new(vec![FunctionNode::new(vec![
//!     FunctionChild::Definition("def pkg.mod.scale".to_string()),
//!     FunctionChild::Param(SignatureParam::named("factor").with_default("2")),
//!     FunctionChild::DetailedDescription(
//!         "Scales a value.\n:param factor: the scaling factor".to_string(),
//!     ),
//! ])]);
//! let members = process_compound(&compound, SourceKind::Interpreted);
//! assert_eq!(members[0].qualified_path, "pkg.mod.scale");
//! ```
//!
//! ## Modules
//!
//! - [`docstring`]: dialect classification and the four extractors
//! - [`normalize`]: the type-normalization engine
//! - [`merger`]: signature/documentation reconciliation and assembly
//! - [`types`]: the member/parameter data model and error types

pub mod constants;
pub mod docstring;
pub mod merger;
pub mod normalize;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Data Model
pub use types::{
    AccessMode, CanonicalType, ComponentCategory, Member, ParamKind, ParamRecord, PortUsage,
    SourceKind,
};

// Error Types
pub use types::error::{DocweaveError, Result};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use docstring::{Dialect, DocBlock, ParamDoc};
pub use merger::{
    CompoundNode, FunctionChild, FunctionNode, SignatureParam, WalkContext, assemble,
    process_compound, reconcile,
};
pub use normalize::{Normalized, normalize};
