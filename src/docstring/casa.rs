//! CASA task extractor: a tabular dialect bounded by `---- parameter` and
//! `---- example` banner lines. Top-level `name description…` rows start an
//! entry; indented continuation lines append to it. Detecting this dialect
//! also switches the owning walk into CASA mode (see the merger context).

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use super::{ParamDoc, collapse_ws, push_param};

static PARAMETER_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{1,20} parameter").unwrap());

static EXAMPLE_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{1,20} example").unwrap());

/// ANSI escape remnants embedded in task help text.
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-?]*[ -/]*[@-~]").unwrap());

/// Extract `(summary, parameter map)` from a CASA-style block. The region
/// between the banners is the parameter table; text above the parameter
/// banner is the summary. No type information is produced.
pub(super) fn parse(text: &str) -> (String, IndexMap<String, ParamDoc>) {
    let cleaned = ANSI_ESCAPE.replace_all(text, "");
    let lines: Vec<&str> = cleaned.lines().collect();

    let start = lines
        .iter()
        .position(|line| PARAMETER_BANNER.is_match(line))
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = lines
        .iter()
        .position(|line| EXAMPLE_BANNER.is_match(line))
        .unwrap_or(lines.len());

    let summary = if start > 0 {
        lines[..start - 1].join("\n").trim().to_string()
    } else {
        String::new()
    };

    let mut params = IndexMap::new();
    let mut current: Option<(String, String)> = None;
    for line in lines[start.min(end)..end].iter() {
        if line.trim().is_empty() {
            continue;
        }
        if !line.starts_with(char::is_whitespace) {
            if let Some((name, doc)) = current.take() {
                push_param(&mut params, &name, collapse_ws(&doc), None);
            }
            let mut words = line.trim().splitn(2, ' ');
            let name = words.next().unwrap_or("").to_string();
            let doc = words.next().unwrap_or("").trim().to_string();
            current = Some((name, doc));
        } else if let Some((_, doc)) = current.as_mut() {
            // indented continuation joins on one space
            if !doc.is_empty() {
                doc.push(' ');
            }
            doc.push_str(line.trim());
        }
    }
    if let Some((name, doc)) = current.take() {
        push_param(&mut params, &name, collapse_ws(&doc), None);
    }

    (summary, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Flags visibility data.\nOperates in place.\n---------- parameter dictionary ----------\nvis  input visibility file\nmode  flagging mode\n      one of manual, clip\n---------- example -----------------------\nflagdata(vis='x.ms')\n";

    #[test]
    fn test_table_rows_become_params() {
        let (summary, params) = parse(DOC);
        assert_eq!(summary, "Flags visibility data.\nOperates in place.");
        assert_eq!(params.len(), 2);
        assert_eq!(params["vis"].description, "input visibility file");
        assert_eq!(params["vis"].ty, None);
    }

    #[test]
    fn test_continuation_lines_append() {
        let (_, params) = parse(DOC);
        assert_eq!(
            params["mode"].description,
            "flagging mode one of manual, clip"
        );
    }

    #[test]
    fn test_example_section_excluded() {
        let (_, params) = parse(DOC);
        assert!(!params.keys().any(|k| k.contains("flagdata")));
    }

    #[test]
    fn test_missing_example_banner_runs_to_end() {
        let doc = "Summary.\n-- parameter\nvis  the input\n      continued\n";
        let (_, params) = parse(doc);
        assert_eq!(params["vis"].description, "the input continued");
    }

    #[test]
    fn test_ansi_escapes_removed() {
        let doc = "Summary.\n-- parameter\nvis  \u{1b}[1mbold\u{1b}[0m input\n";
        let (_, params) = parse(doc);
        assert_eq!(params["vis"].description, "bold input");
    }

    #[test]
    fn test_single_word_row_gets_empty_description() {
        let doc = "Summary.\n-- parameter\nasync\n";
        let (_, params) = parse(doc);
        assert_eq!(params["async"].description, "");
    }
}
