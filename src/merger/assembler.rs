//! Member Assembler
//!
//! Appends the fixed bookkeeping parameters every emitted member carries
//! regardless of source dialect, and attaches the category tag selected by
//! the caller-supplied language tag. Bookkeeping fields never shadow a
//! same-named user parameter: the user parameter wins and the field is
//! skipped with a diagnostic.

use crate::constants::bookkeeping as bk;
use crate::types::{
    AccessMode, CanonicalType, ComponentCategory, Member, ParamRecord, SourceKind,
};

/// Finalize a reconciled member: bookkeeping fields appended last, in a
/// fixed order, then the category tag.
pub fn assemble(member: &mut Member, kind: SourceKind) {
    for (name, record) in bookkeeping_fields(member, kind) {
        if member.parameters.contains_key(name) {
            tracing::warn!(
                "user parameter `{}` shadows a bookkeeping field; keeping the user value",
                name
            );
            continue;
        }
        member.parameters.insert(name.to_string(), record);
    }
    member.category = match kind {
        SourceKind::Compiled => Some(ComponentCategory::DynlibApp),
        SourceKind::Interpreted => Some(ComponentCategory::PythonApp),
        SourceKind::Unknown => None,
    };
}

fn bookkeeping_fields(member: &Member, kind: SourceKind) -> Vec<(&'static str, ParamRecord)> {
    let parser_options: Vec<String> = bk::PARSER_OPTIONS.iter().map(|s| s.to_string()).collect();

    let mut fields = vec![
        (
            bk::INPUT_PARSER,
            ParamRecord::component(bk::PARSER_DEFAULT, CanonicalType::Select)
                .with_options(parser_options.clone())
                .with_description("Input port parsing technique"),
        ),
        (
            bk::OUTPUT_PARSER,
            ParamRecord::component(bk::PARSER_DEFAULT, CanonicalType::Select)
                .with_options(parser_options)
                .with_description("Output port parsing technique"),
        ),
        (
            bk::EXECUTION_TIME,
            ParamRecord::component(bk::EXECUTION_TIME_DEFAULT, CanonicalType::Integer)
                .with_description(bk::EXECUTION_TIME_DESCRIPTION),
        ),
        (
            bk::NUM_CPUS,
            ParamRecord::component(bk::NUM_CPUS_DEFAULT, CanonicalType::Integer)
                .with_description(bk::NUM_CPUS_DESCRIPTION),
        ),
        (
            bk::GROUP_START,
            ParamRecord::component(bk::GROUP_START_DEFAULT, CanonicalType::Boolean)
                .with_description(bk::GROUP_START_DESCRIPTION),
        ),
    ];

    match kind {
        SourceKind::Compiled => fields.push((
            bk::LIBPATH,
            ParamRecord::component("", CanonicalType::String)
                .with_description(bk::LIBPATH_DESCRIPTION),
        )),
        SourceKind::Interpreted => fields.push((
            bk::DROPCLASS,
            ParamRecord::component(bk::DROPCLASS_DEFAULT, CanonicalType::String)
                .with_access(AccessMode::ReadOnly)
                .with_description(bk::DROPCLASS_DESCRIPTION),
        )),
        SourceKind::Unknown => {}
    }

    fields.push((
        bk::FUNC_NAME,
        ParamRecord::component(member.qualified_path.clone(), CanonicalType::String)
            .with_access(AccessMode::ReadOnly)
            .with_description(bk::FUNC_NAME_DESCRIPTION),
    ));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamKind, PortUsage};

    fn member() -> Member {
        Member::new("pkg.mod.run")
    }

    #[test]
    fn test_bookkeeping_appended_in_order() {
        let mut m = member();
        assemble(&mut m, SourceKind::Interpreted);
        let names: Vec<&str> = m.parameters.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "input_parser",
                "output_parser",
                "execution_time",
                "num_cpus",
                "group_start",
                "dropclass",
                "func_name"
            ]
        );
    }

    #[test]
    fn test_parser_fields_are_selects() {
        let mut m = member();
        assemble(&mut m, SourceKind::Interpreted);
        let input = &m.parameters["input_parser"];
        assert_eq!(input.ty, CanonicalType::Select);
        assert_eq!(input.kind, ParamKind::ComponentParameter);
        assert_eq!(input.usage, PortUsage::NoPort);
        assert_eq!(
            input.options.as_deref().unwrap(),
            ["pickle", "eval", "npy", "path", "dataurl"]
        );
    }

    #[test]
    fn test_func_name_carries_import_path() {
        let mut m = member();
        assemble(&mut m, SourceKind::Interpreted);
        let func_name = &m.parameters["func_name"];
        assert_eq!(func_name.value, "pkg.mod.run");
        assert!(func_name.readonly);
    }

    #[test]
    fn test_compiled_gets_libpath_and_dynlib_category() {
        let mut m = member();
        assemble(&mut m, SourceKind::Compiled);
        assert!(m.parameters.contains_key("libpath"));
        assert!(!m.parameters.contains_key("dropclass"));
        assert_eq!(m.category, Some(ComponentCategory::DynlibApp));
    }

    #[test]
    fn test_unknown_kind_gets_no_category_field() {
        let mut m = member();
        assemble(&mut m, SourceKind::Unknown);
        assert!(!m.parameters.contains_key("libpath"));
        assert!(!m.parameters.contains_key("dropclass"));
        assert_eq!(m.category, None);
    }

    #[test]
    fn test_user_parameter_wins_collision() {
        let mut m = member();
        m.parameters.insert(
            "execution_time".to_string(),
            ParamRecord::argument("30", CanonicalType::Integer)
                .with_description("user-declared runtime knob"),
        );
        assemble(&mut m, SourceKind::Interpreted);
        let rec = &m.parameters["execution_time"];
        assert_eq!(rec.value, "30");
        assert_eq!(rec.description, "user-declared runtime knob");
        assert_eq!(rec.kind, ParamKind::ApplicationArgument);
    }
}
