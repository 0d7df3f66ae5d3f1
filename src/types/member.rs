//! Member and Parameter Record Model
//!
//! The reconciled, emission-ready shapes handed to the downstream record
//! emitter. A `Member` represents one function-like entity; its
//! `ParamRecord`s combine signature facts (defaults, declared types) with
//! docstring facts (descriptions, inferred types). Insertion order is
//! significant: signature declaration order first, bookkeeping fields
//! appended last, which `IndexMap` preserves through serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::canonical::CanonicalType;

/// Which bookkeeping and category fields the assembler synthesizes.
/// Supplied by the caller; never inferred from the tree itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Unknown,
    /// Native/compiled source tree: shared-library components.
    Compiled,
    /// Dynamically-interpreted source tree: import-path components.
    Interpreted,
}

/// Category tag attached by the assembler based on [`SourceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentCategory {
    DynlibApp,
    PythonApp,
}

/// Whether a field is a user-facing argument or component plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    ApplicationArgument,
    ComponentParameter,
}

/// Port exposure of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortUsage {
    InputPort,
    OutputPort,
    NoPort,
}

/// Mutability of a parameter from the component user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

/// One reconciled parameter, in the shape the record emitter consumes.
///
/// Created by the merger from a signature argument, then possibly augmented
/// with description text from matching docstring fragments. Records are
/// never removed once created, only appended to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub value: String,
    #[serde(rename = "defaultValue")]
    pub default_value: String,
    #[serde(rename = "type")]
    pub ty: CanonicalType,
    #[serde(rename = "parameterKind")]
    pub kind: ParamKind,
    pub usage: PortUsage,
    pub access: AccessMode,
    pub options: Option<Vec<String>>,
    pub readonly: bool,
    pub precious: bool,
    pub positional: bool,
    pub description: String,
}

impl ParamRecord {
    /// A readwrite application argument with no port, the shape every
    /// ordinary signature parameter starts from.
    pub fn argument(default: impl Into<String>, ty: CanonicalType) -> Self {
        let default = default.into();
        Self {
            value: default.clone(),
            default_value: default,
            ty,
            kind: ParamKind::ApplicationArgument,
            usage: PortUsage::NoPort,
            access: AccessMode::ReadWrite,
            options: None,
            readonly: false,
            precious: false,
            positional: false,
            description: String::new(),
        }
    }

    /// A component-level bookkeeping field.
    pub fn component(default: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            kind: ParamKind::ComponentParameter,
            ..Self::argument(default, ty)
        }
    }

    pub fn with_usage(mut self, usage: PortUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self.readonly = access == AccessMode::ReadOnly;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a further documentation fragment to the description.
    /// Fragments accumulate in visitation order; they never replace.
    pub fn append_description(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(fragment);
    }
}

/// One reconciled function-like entity.
///
/// Absence is expressed at the API level: merger entry points return
/// `Option<Member>`, where `None` marks a node that identity resolution
/// filtered out or failed on. That sentinel is distinct from a member with
/// an empty parameter map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Complete import path of the function, including its name.
    pub qualified_path: String,
    /// Human-facing title, e.g. `Class::method` or `Class.__init__`.
    pub display_title: String,
    pub return_type: String,
    pub is_constructor: bool,
    pub is_classmethod: bool,
    pub is_instance_method: bool,
    /// Tabular-dialect interpretation mode inherited from the enclosing
    /// compound or detected on this member's own docstring.
    pub casa_mode: bool,
    pub description: String,
    pub category: Option<ComponentCategory>,
    pub parameters: IndexMap<String, ParamRecord>,
}

impl Member {
    pub fn new(qualified_path: impl Into<String>) -> Self {
        let qualified_path = qualified_path.into();
        Self {
            display_title: qualified_path.clone(),
            qualified_path,
            return_type: "None".to_string(),
            is_constructor: false,
            is_classmethod: false,
            is_instance_method: false,
            casa_mode: false,
            description: String::new(),
            category: None,
            parameters: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_defaults() {
        let rec = ParamRecord::argument("5", CanonicalType::Integer);
        assert_eq!(rec.value, "5");
        assert_eq!(rec.default_value, "5");
        assert_eq!(rec.kind, ParamKind::ApplicationArgument);
        assert_eq!(rec.usage, PortUsage::NoPort);
        assert_eq!(rec.access, AccessMode::ReadWrite);
        assert!(!rec.readonly);
    }

    #[test]
    fn test_readonly_tracks_access() {
        let rec = ParamRecord::argument("", CanonicalType::String).with_access(AccessMode::ReadOnly);
        assert!(rec.readonly);
    }

    #[test]
    fn test_description_accumulates() {
        let mut rec = ParamRecord::argument("", CanonicalType::String);
        rec.append_description("first fragment");
        rec.append_description("second fragment");
        assert_eq!(rec.description, "first fragment second fragment");
    }

    #[test]
    fn test_record_serialized_field_names() {
        let rec = ParamRecord::component("pickle", CanonicalType::Select)
            .with_options(vec!["pickle".into(), "eval".into()]);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["defaultValue"], "pickle");
        assert_eq!(json["type"], "Select");
        assert_eq!(json["parameterKind"], "ComponentParameter");
        assert_eq!(json["usage"], "NoPort");
        assert_eq!(json["access"], "readwrite");
    }

    #[test]
    fn test_parameter_order_survives_serialization() {
        let mut member = Member::new("pkg.mod.func");
        member
            .parameters
            .insert("b".into(), ParamRecord::argument("", CanonicalType::String));
        member
            .parameters
            .insert("a".into(), ParamRecord::argument("", CanonicalType::String));
        let json = serde_json::to_string(&member).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
    }
}
