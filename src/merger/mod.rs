//! Signature/Documentation Merger
//!
//! Walks the typed sub-nodes of one function-like node in document order
//! and reconciles the structural argument list against the attached
//! documentation block, producing one [`Member`] per function.
//!
//! Reconciliation policy: the signature is authoritative for default
//! values and declared types; the documentation block is authoritative for
//! description text and supplies a type only when the signature carries no
//! type evidence at all. Description fragments for a recurring name
//! accumulate in visitation order, whichever side arrives first.
//!
//! Failures stay local: a malformed declaration or a filtered private name
//! yields the absent-member sentinel (`None`) and the surrounding walk
//! continues with sibling nodes.

pub mod assembler;
pub mod context;
pub mod node;

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::constants::{convention, summary};
use crate::docstring::{DocBlock, ParamDoc, push_param};
use crate::normalize::normalize;
use crate::types::{
    AccessMode, CanonicalType, DocweaveError, Member, ParamRecord, PortUsage, Result, SourceKind,
};

pub use assembler::assemble;
pub use context::WalkContext;
pub use node::{CompoundNode, FunctionChild, FunctionNode, SignatureParam};

/// Reconcile one function node against its documentation under `ctx`.
///
/// Returns `None` for nodes that identity resolution filters out (private
/// names, malformed declarations, no identity at all); callers skip those
/// and continue.
pub fn reconcile(function: &FunctionNode, ctx: &WalkContext) -> Option<Member> {
    let mut rec = Reconciliation::new(ctx);
    for child in &function.children {
        rec.visit(child);
    }
    rec.finish()
}

/// Process one compound node: classify its compound-level docstring once,
/// derive the nested context, and reconcile plus assemble every function
/// beneath it. Filtered members are skipped, never errors.
pub fn process_compound(compound: &CompoundNode, kind: SourceKind) -> Vec<Member> {
    let mut ctx = WalkContext::new(kind);
    if let Some(text) = &compound.doc_text {
        let block = DocBlock::parse(text);
        ctx = ctx.with_compound(&block);
    }
    compound
        .functions
        .iter()
        .filter_map(|function| reconcile(function, &ctx))
        .map(|mut member| {
            assemble(&mut member, kind);
            member
        })
        .collect()
}

/// Mutable state of one reconciliation walk.
struct Reconciliation<'ctx> {
    ctx: &'ctx WalkContext,
    func_path: String,
    func_name: Option<String>,
    func_title: String,
    return_type: String,
    is_constructor: bool,
    is_classmethod: bool,
    is_instance_method: bool,
    casa_mode: bool,
    discarded: bool,
    summary: String,
    /// Doc fragments seen before their structural declaration.
    pending_docs: IndexMap<String, ParamDoc>,
    /// Names whose signature carried no type evidence; a later doc type
    /// may still fill these.
    untyped: HashSet<String>,
    params: IndexMap<String, ParamRecord>,
}

impl<'ctx> Reconciliation<'ctx> {
    fn new(ctx: &'ctx WalkContext) -> Self {
        Self {
            ctx,
            func_path: String::new(),
            func_name: None,
            func_title: String::new(),
            return_type: "None".to_string(),
            is_constructor: false,
            is_classmethod: false,
            is_instance_method: false,
            casa_mode: ctx.casa_mode,
            discarded: false,
            summary: String::new(),
            pending_docs: IndexMap::new(),
            untyped: HashSet::new(),
            params: IndexMap::new(),
        }
    }

    fn visit(&mut self, child: &FunctionChild) {
        match child {
            FunctionChild::Name(name) => {
                if self.func_name.is_none() {
                    self.func_name = Some(name.clone());
                    self.func_title = name.clone();
                }
            }
            FunctionChild::ArgsString(args) => self.visit_argsstring(args),
            FunctionChild::DetailedDescription(text) => self.visit_description(text),
            FunctionChild::Param(param) => self.visit_param(param),
            FunctionChild::Definition(text) => self.visit_definition(text),
            FunctionChild::Other(kind) => {
                tracing::debug!("ignored sub-node kind: {}", kind);
            }
        }
    }

    /// The argument list decides the display-title separator: a class
    /// receiver marks a classmethod (`@`), an instance receiver a member
    /// function (`::`).
    fn visit_argsstring(&mut self, args: &str) {
        let inner = args
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let names: Vec<&str> = inner.split(',').map(str::trim).collect();
        if names.contains(&"cls") {
            self.func_title = self.func_title.replace('.', "@");
        } else if names.contains(&"self") {
            self.func_title = self.func_title.replace('.', "::");
        }
    }

    fn visit_description(&mut self, text: &str) {
        let block = DocBlock::parse(text);
        if block.is_casa() {
            self.casa_mode = true;
        }
        self.summary = block.summary.clone();
        for (name, doc) in &block.params {
            self.apply_doc(name, doc);
        }
    }

    /// Fold one documentation-derived parameter into the record map, or
    /// hold it until the structural declaration arrives.
    fn apply_doc(&mut self, name: &str, doc: &ParamDoc) {
        match self.params.get_mut(name) {
            Some(record) => {
                record.append_description(&doc.description);
                if self.untyped.contains(name)
                    && let Some(ty) = &doc.ty
                {
                    record.ty = ty.clone();
                    self.untyped.remove(name);
                }
            }
            None => {
                push_param(
                    &mut self.pending_docs,
                    name,
                    doc.description.clone(),
                    doc.ty.clone(),
                );
            }
        }
    }

    fn visit_param(&mut self, param: &SignatureParam) {
        let Some(name) = param.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
        else {
            tracing::debug!("skipping unnamed signature parameter");
            return;
        };
        if self.params.contains_key(name) {
            tracing::debug!("duplicate declaration of parameter {}", name);
            return;
        }

        let (ty, default, had_type_evidence) = self.resolve_type(param);

        if name == "self" || name == "cls" {
            self.insert_receiver(name, ty, default);
            return;
        }

        let mut record = ParamRecord::argument(default, ty)
            .with_usage(PortUsage::NoPort)
            .with_access(AccessMode::ReadWrite);
        let mut doc_supplied_type = false;
        if let Some(parent) = self.ctx.parent_docs.get(name) {
            record.append_description(&parent.description);
        }
        if let Some(doc) = self.pending_docs.shift_remove(name) {
            record.append_description(&doc.description);
            if !had_type_evidence && let Some(ty) = doc.ty {
                record.ty = ty;
                doc_supplied_type = true;
            }
        }
        if !had_type_evidence && !doc_supplied_type {
            self.untyped.insert(name.to_string());
        }
        self.params.insert(name.to_string(), record);
    }

    /// Resolve the canonical type and cleaned default of one declared
    /// parameter. A named cross-reference wins; any other non-canonical
    /// declared token is preserved as an `Object.` wrapping, which a
    /// parseable default literal may still override.
    fn resolve_type(&self, param: &SignatureParam) -> (CanonicalType, String, bool) {
        let token: Option<String> = if let Some(reference) = &param.type_ref {
            Some(format!("Object.{}", reference.trim()))
        } else {
            match param.declared_type.as_deref().map(str::trim) {
                Some(t) if !t.is_empty() => {
                    if CanonicalType::is_canonical_name(t) {
                        Some(t.to_string())
                    } else {
                        Some(format!("Object.{}", t))
                    }
                }
                _ => None,
            }
        };
        let had_type_evidence = token.is_some()
            || param
                .default
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty());

        let normalized = normalize(token.as_deref(), param.default.as_deref());
        let mut default = normalized.default.unwrap_or_default();
        if normalized.ty == CanonicalType::String {
            default = default.replace('\'', "");
            if default.contains('/') {
                default = format!("\"{}\"", default);
            }
        }
        (normalized.ty, default, had_type_evidence)
    }

    /// Receiver parameters (`self`/`cls`) carry fixed classification
    /// semantics instead of user documentation. Only `cls` forces the
    /// sentinel self-type; a plain `self` keeps its resolved type.
    fn insert_receiver(&mut self, name: &str, resolved: CanonicalType, default: String) {
        let mut usage = if self.is_entry_point() {
            PortUsage::OutputPort
        } else {
            PortUsage::InputPort
        };
        let ty = if name == "cls" {
            self.is_classmethod = true;
            usage = PortUsage::OutputPort;
            CanonicalType::object(convention::SELF_TYPE_NAME)
        } else {
            self.is_instance_method = true;
            resolved
        };
        let record = ParamRecord::argument(default, ty)
            .with_usage(usage)
            .with_access(AccessMode::ReadOnly)
            .with_description(convention::OBJECT_REFERENCE_DESCRIPTION);
        self.params.insert("self".to_string(), record);
    }

    fn is_entry_point(&self) -> bool {
        self.is_constructor
            || self.func_name.as_deref().is_some_and(|name| {
                convention::CONSTRUCTOR_MARKERS
                    .iter()
                    .any(|marker| name.ends_with(marker))
            })
    }

    fn visit_definition(&mut self, text: &str) {
        match parse_definition(text) {
            Err(err) => {
                tracing::debug!("discarding member: {}", err);
                self.discarded = true;
            }
            Ok((return_type, qualified)) => {
                self.return_type = if return_type == "def" {
                    "None".to_string()
                } else {
                    return_type
                };
                let name = match qualified.rsplit_once('.') {
                    Some((path, name)) => {
                        self.func_path = path.to_string();
                        name.to_string()
                    }
                    None => {
                        self.func_path.clear();
                        qualified.clone()
                    }
                };
                self.func_name = Some(name.clone());
                self.resolve_identity(&name);
            }
        }
    }

    fn resolve_identity(&mut self, name: &str) {
        if convention::CONSTRUCTOR_MARKERS.contains(&name) {
            self.is_constructor = true;
            if self.ctx.casa_mode {
                // task classes hide their private implementation module:
                // the title is the segment after the last `._` and the
                // path is truncated before the first
                self.func_title = match self.func_path.rfind("._") {
                    Some(i) => self.func_path[i + 2..].to_string(),
                    None => self.func_path.clone(),
                };
                if let Some(i) = self.func_path.find("._") {
                    self.func_path.truncate(i);
                }
            } else {
                let class = self.func_path.rsplit('.').next().unwrap_or("");
                self.func_title = format!("{}.{}", class, name);
            }
            self.func_name = Some(self.func_path.clone());
        } else if name.starts_with(convention::PRIVATE_PREFIX) || self.func_path.contains("._") {
            tracing::debug!("skipping private member {}.{}", self.func_path, name);
            self.discarded = true;
        } else if self.func_path.is_empty() {
            self.func_title = name.to_string();
            self.func_name = Some(name.to_string());
        } else {
            let tail = self.func_path.rsplit('.').next().unwrap_or("");
            self.func_title = format!("{}.{}", tail, name);
            self.func_name = Some(format!("{}.{}", self.func_path, name));
        }
    }

    fn finish(mut self) -> Option<Member> {
        if self.discarded {
            return None;
        }
        let qualified_path = self.func_name.filter(|n| !n.is_empty())?;
        if self.casa_mode {
            // tabular-documented entry points expose no receiver argument
            self.params.shift_remove("self");
        }
        let mut description = self.summary;
        if !description.is_empty() {
            if self.is_classmethod {
                description = format!("{}{}", summary::CLASSMETHOD_PREFIX, description);
            } else if self.is_instance_method {
                description = format!("{}{}", summary::MEMBERFUNCTION_PREFIX, description);
            }
        }
        for name in self.pending_docs.keys() {
            tracing::debug!("documented parameter {} has no declaration", name);
        }
        let display_title = if self.func_title.is_empty() {
            qualified_path.clone()
        } else {
            self.func_title
        };
        Some(Member {
            qualified_path,
            display_title,
            return_type: self.return_type,
            is_constructor: self.is_constructor,
            is_classmethod: self.is_classmethod,
            is_instance_method: self.is_instance_method,
            casa_mode: self.casa_mode,
            description,
            category: None,
            parameters: self.params,
        })
    }
}

/// Split a declaration string into its return-type word and qualified
/// declaration; rejects strings with no words at all.
fn parse_definition(text: &str) -> Result<(String, String)> {
    let mut words = text.split_whitespace();
    let first = words
        .next()
        .ok_or_else(|| DocweaveError::Definition(text.to_string()))?;
    let last = words.last().unwrap_or(first);
    Ok((first.to_string(), last.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> WalkContext {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        WalkContext::new(SourceKind::Interpreted)
    }

    fn method_node(doc: &str) -> FunctionNode {
        FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.Scaler.apply".to_string()),
            FunctionChild::ArgsString("(self, factor=2)".to_string()),
            FunctionChild::Name("apply".to_string()),
            FunctionChild::Param(SignatureParam::named("self")),
            FunctionChild::Param(SignatureParam::named("factor").with_default("2")),
            FunctionChild::DetailedDescription(doc.to_string()),
        ])
    }

    #[test]
    fn test_plain_function_reconciles() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::ArgsString("(factor)".to_string()),
            FunctionChild::Name("scale".to_string()),
            FunctionChild::Param(SignatureParam::named("factor").with_default("2")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(member.qualified_path, "pkg.mod.scale");
        assert_eq!(member.display_title, "mod.scale");
        assert_eq!(member.return_type, "None");
        let factor = &member.parameters["factor"];
        assert_eq!(factor.ty, CanonicalType::Integer);
        assert_eq!(factor.default_value, "2");
        assert_eq!(factor.access, AccessMode::ReadWrite);
        assert_eq!(factor.usage, PortUsage::NoPort);
    }

    #[test]
    fn test_doc_description_merges_into_signature() {
        let member = reconcile(
            &method_node("Scales things.\n:param factor: the scaling factor"),
            &plain_ctx(),
        )
        .unwrap();
        assert_eq!(
            member.parameters["factor"].description,
            "the scaling factor"
        );
        // signature default survives documentation
        assert_eq!(member.parameters["factor"].default_value, "2");
    }

    #[test]
    fn test_doc_before_declaration_accumulates() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::DetailedDescription(
                "Scales.\n:param factor: documented early".to_string(),
            ),
            FunctionChild::Param(SignatureParam::named("factor").with_default("2")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(
            member.parameters["factor"].description,
            "documented early"
        );
    }

    #[test]
    fn test_repeated_doc_fragments_concatenate() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Param(SignatureParam::named("factor")),
            FunctionChild::DetailedDescription(
                "Scales.\n:param factor: first part\n:param factor: second part".to_string(),
            ),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(
            member.parameters["factor"].description,
            "first part second part"
        );
    }

    #[test]
    fn test_doc_type_fills_untyped_signature() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Param(SignatureParam::named("factor")),
            FunctionChild::DetailedDescription(
                "Scales.\n:param factor: by how much\n:type factor: int".to_string(),
            ),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(member.parameters["factor"].ty, CanonicalType::Integer);
    }

    #[test]
    fn test_signature_type_beats_doc_type() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Param(SignatureParam::named("factor").with_type("(float)")),
            FunctionChild::DetailedDescription(
                "Scales.\n:param factor: by how much\n:type factor: int".to_string(),
            ),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(member.parameters["factor"].ty, CanonicalType::Float);
    }

    #[test]
    fn test_self_becomes_readonly_input_port() {
        let member = reconcile(&method_node("Scales things."), &plain_ctx()).unwrap();
        assert!(member.is_instance_method);
        let receiver = &member.parameters["self"];
        assert_eq!(receiver.access, AccessMode::ReadOnly);
        assert_eq!(receiver.usage, PortUsage::InputPort);
        assert_eq!(receiver.description, "Object reference");
        assert_eq!(member.display_title, "Scaler::apply");
        assert!(member.description.starts_with("memberfunction: "));
    }

    #[test]
    fn test_cls_renamed_and_classmethod() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.Scaler.of".to_string()),
            FunctionChild::ArgsString("(cls, factor)".to_string()),
            FunctionChild::Param(SignatureParam::named("cls")),
            FunctionChild::Param(SignatureParam::named("factor")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert!(member.is_classmethod);
        assert!(!member.parameters.contains_key("cls"));
        let receiver = &member.parameters["self"];
        assert_eq!(receiver.usage, PortUsage::OutputPort);
        assert_eq!(receiver.ty, CanonicalType::object("self"));
        assert_eq!(member.display_title, "Scaler@of");
    }

    #[test]
    fn test_constructor_gets_output_port_receiver() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.Scaler.__init__".to_string()),
            FunctionChild::ArgsString("(self, factor)".to_string()),
            FunctionChild::Param(SignatureParam::named("self")),
            FunctionChild::Param(SignatureParam::named("factor")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert!(member.is_constructor);
        assert_eq!(member.qualified_path, "pkg.mod.Scaler");
        assert_eq!(member.display_title, "Scaler::__init__");
        assert_eq!(member.parameters["self"].usage, PortUsage::OutputPort);
    }

    #[test]
    fn test_private_members_are_absent() {
        for definition in ["def pkg.mod._hidden", "def pkg._private.run"] {
            let node = FunctionNode::new(vec![FunctionChild::Definition(definition.to_string())]);
            assert!(reconcile(&node, &plain_ctx()).is_none(), "{}", definition);
        }
    }

    #[test]
    fn test_constructor_markers_survive_privacy_filter() {
        let node = FunctionNode::new(vec![FunctionChild::Definition(
            "def pkg.mod.Scaler.__call__".to_string(),
        )]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert!(member.is_constructor);
    }

    #[test]
    fn test_malformed_definition_is_absent_not_error() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("   ".to_string()),
            FunctionChild::Param(SignatureParam::named("x")),
        ]);
        assert!(reconcile(&node, &plain_ctx()).is_none());
    }

    #[test]
    fn test_node_without_identity_is_absent() {
        let node = FunctionNode::new(vec![FunctionChild::Param(SignatureParam::named("x"))]);
        assert!(reconcile(&node, &plain_ctx()).is_none());
    }

    #[test]
    fn test_unknown_child_kinds_are_tolerated() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Other("templateparamlist".to_string()),
            FunctionChild::Param(SignatureParam::named("factor")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert!(member.parameters.contains_key("factor"));
    }

    #[test]
    fn test_type_ref_becomes_object_reference() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Param(
                SignatureParam::named("grid")
                    .with_type("Grid")
                    .with_type_ref("pkg.mod.Grid"),
            ),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(
            member.parameters["grid"].ty,
            CanonicalType::object("pkg.mod.Grid")
        );
    }

    #[test]
    fn test_string_default_path_is_requoted() {
        let node = FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.load".to_string()),
            FunctionChild::Param(SignatureParam::named("path").with_default("'/tmp/data'")),
        ]);
        let member = reconcile(&node, &plain_ctx()).unwrap();
        assert_eq!(member.parameters["path"].default_value, "\"/tmp/data\"");
    }

    #[test]
    fn test_casa_compound_drops_receiver_and_feeds_descriptions() {
        let compound = CompoundNode::new(vec![FunctionNode::new(vec![
            FunctionChild::Definition("def casatasks.flag._flag.__call__".to_string()),
            FunctionChild::ArgsString("(self, vis)".to_string()),
            FunctionChild::Param(SignatureParam::named("self")),
            FunctionChild::Param(SignatureParam::named("vis")),
        ])])
        .with_doc("Flags data.\n-- parameter\nvis  input visibility file\n");
        let members = process_compound(&compound, SourceKind::Interpreted);
        assert_eq!(members.len(), 1);
        let member = &members[0];
        assert!(member.casa_mode);
        assert!(!member.parameters.contains_key("self"));
        assert_eq!(
            member.parameters["vis"].description,
            "input visibility file"
        );
        assert_eq!(member.display_title, "flag");
        assert_eq!(member.qualified_path, "casatasks.flag");
    }

    #[test]
    fn test_process_compound_assembles_bookkeeping() {
        let compound = CompoundNode::new(vec![FunctionNode::new(vec![
            FunctionChild::Definition("def pkg.mod.scale".to_string()),
            FunctionChild::Param(SignatureParam::named("factor").with_default("2")),
        ])]);
        let members = process_compound(&compound, SourceKind::Interpreted);
        assert_eq!(members.len(), 1);
        let member = &members[0];
        // signature order first, bookkeeping appended last
        let names: Vec<&str> = member.parameters.keys().map(String::as_str).collect();
        assert_eq!(names[0], "factor");
        assert_eq!(*names.last().unwrap(), "func_name");
        assert_eq!(member.parameters["func_name"].value, "pkg.mod.scale");
    }

    #[test]
    fn test_process_compound_skips_filtered_members() {
        let compound = CompoundNode::new(vec![
            FunctionNode::new(vec![FunctionChild::Definition(
                "def pkg.mod._hidden".to_string(),
            )]),
            FunctionNode::new(vec![FunctionChild::Definition(
                "def pkg.mod.visible".to_string(),
            )]),
        ]);
        let members = process_compound(&compound, SourceKind::Interpreted);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].qualified_path, "pkg.mod.visible");
    }
}
