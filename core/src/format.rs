//! Usage synopsis and help summary rendering.

use std::path::Path;

use tracing::warn;

use crate::{HelpText, OptionDescriptor, OptionTable};

/// Builds the one-line usage synopsis.
///
/// The prefix is the runner (`argv[0]`) and the file name of the script
/// path (`argv[1]`). Required options follow unbracketed in declaration
/// order, then optional ones in `[ ]`.
///
/// # Examples
///
/// ```
/// use cliargs_core::{compile, format_usage, OptionSpec};
///
/// let table = compile(&OptionSpec::from(vec!["verbose", "out:!", "n:"]));
/// let usage = format_usage(&["node", "/usr/lib/tool/app.js"], &table);
/// assert_eq!(usage, "node app.js --out value [--verbose] [-n value]");
/// ```
pub fn format_usage<S: AsRef<str>>(argv: &[S], table: &OptionTable) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(table.len() + 2);

    match argv {
        [runner, script, ..] => {
            segments.push(runner.as_ref().to_string());
            segments.push(script_name(script.as_ref()));
        }
        [runner] => {
            warn!("invocation context has no script path");
            segments.push(runner.as_ref().to_string());
        }
        [] => warn!("empty invocation context"),
    }

    segments.extend(table.required().map(usage_segment));
    segments.extend(
        table
            .iter()
            .filter(|o| !o.is_required)
            .map(|o| format!("[{}]", usage_segment(o))),
    );

    segments.join(" ")
}

/// Builds the multi-line help summary.
///
/// Layout: `Usage: <usage>`, the optional pre line, an `Options:` header
/// followed by one tab-indented line per described option, and the
/// optional post line. Help entries naming options missing from the table
/// are skipped, a name listed twice keeps its first position and last
/// text, empty pre/post lines are dropped, and the header is omitted when
/// nothing is listed.
///
/// # Examples
///
/// ```
/// use cliargs_core::{compile, format_summary, HelpText, OptionSpec};
///
/// let table = compile(&OptionSpec::from("vo:"));
/// let help = HelpText::new()
///     .with_option("o", "write output here")
///     .with_option("z", "not declared");
///
/// let summary = format_summary("tool [-v] [-o value]", &table, Some(&help));
/// assert_eq!(summary, "Usage: tool [-v] [-o value]\nOptions:\n\t-o\twrite output here");
/// ```
pub fn format_summary(usage: &str, table: &OptionTable, help: Option<&HelpText>) -> String {
    let mut lines = vec![format!("Usage: {usage}")];

    let Some(help) = help else {
        return lines.join("\n");
    };

    if let Some(pre) = help.pre.as_deref().filter(|pre| !pre.is_empty()) {
        lines.push(pre.to_string());
    }

    let listed: Vec<String> = help
        .described()
        .filter(|h| !h.text.is_empty())
        .filter_map(|h| {
            table
                .get(&h.name)
                .map(|o| format!("\t{}\t{}", o.display_name(), h.text))
        })
        .collect();
    if !listed.is_empty() {
        lines.push("Options:".to_string());
        lines.extend(listed);
    }

    if let Some(post) = help.post.as_deref().filter(|post| !post.is_empty()) {
        lines.push(post.to_string());
    }

    lines.join("\n")
}

fn usage_segment(option: &OptionDescriptor) -> String {
    if option.needs_value {
        format!("{} value", option.display_name())
    } else {
        option.display_name()
    }
}

fn script_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
