//! Typed Node Model
//!
//! The upstream boundary: the shape of the documentation-generator export
//! this crate consumes, already lifted out of XML by the producing
//! collaborator. A function-like entity arrives as an ordered sequence of
//! typed sub-nodes; a compound (class or module) groups functions under an
//! optional compound-level docstring.
//!
//! Producers may present any subset of the kinds: a missing
//! `DetailedDescription` means an empty documentation block, a missing
//! default means no default. Unknown kinds travel as `Other` and are
//! ignored with a diagnostic.

/// Structural facts about one declared parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureParam {
    /// Declared name (`declname`/`defname`).
    pub name: Option<String>,
    /// Raw declared-type token, when present.
    pub declared_type: Option<String>,
    /// Named-reference token nested inside the type node, e.g. a
    /// referenced class.
    pub type_ref: Option<String>,
    /// Raw default-value literal, when present.
    pub default: Option<String>,
}

impl SignatureParam {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    pub fn with_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// One typed sub-node of a function-like node, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionChild {
    /// Bare function name.
    Name(String),
    /// Raw argument-list string, parens included.
    ArgsString(String),
    /// Attached free-text documentation block.
    DetailedDescription(String),
    /// One declared parameter.
    Param(SignatureParam),
    /// Fully-qualified declaration string, e.g. `def pkg.mod.Class.run`.
    Definition(String),
    /// Anything else the producer emitted; logged and ignored.
    Other(String),
}

/// One function-like node: its sub-nodes in document order.
#[derive(Debug, Clone, Default)]
pub struct FunctionNode {
    pub children: Vec<FunctionChild>,
}

impl FunctionNode {
    pub fn new(children: Vec<FunctionChild>) -> Self {
        Self { children }
    }
}

/// One compound (class/module) node: an optional compound-level docstring
/// plus the function-like nodes discovered beneath it.
#[derive(Debug, Clone, Default)]
pub struct CompoundNode {
    pub doc_text: Option<String>,
    pub functions: Vec<FunctionNode>,
}

impl CompoundNode {
    pub fn new(functions: Vec<FunctionNode>) -> Self {
        Self {
            doc_text: None,
            functions,
        }
    }

    pub fn with_doc(mut self, doc_text: impl Into<String>) -> Self {
        self.doc_text = Some(doc_text.into());
        self
    }
}
