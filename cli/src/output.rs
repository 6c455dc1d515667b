//! Output formatting for parse results and option tables.

use cliargs_core::{OptionTable, OptionValue, ParsedArgs};

/// Supported output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Formats a parse result in the requested output format.
pub fn format_parsed(parsed: &ParsedArgs, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(parsed)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(parsed).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(parsed_to_text(parsed)),
    }
}

/// Formats a compiled option table in the requested output format.
pub fn format_table(table: &OptionTable, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(table)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(table).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(table_to_text(table)),
    }
}

fn parsed_to_text(parsed: &ParsedArgs) -> String {
    let mut out = String::new();

    for (name, value) in &parsed.options {
        match value {
            OptionValue::Present => out.push_str(&format!("{name}=true\n")),
            OptionValue::Value(v) => out.push_str(&format!("{name}={v}\n")),
        }
    }
    for operand in &parsed.non_opt {
        out.push_str(&format!("nonOpt: {operand}\n"));
    }

    out
}

fn table_to_text(table: &OptionTable) -> String {
    let name_width = table
        .iter()
        .map(|o| o.display_name().len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut out = format!("{:<name_width$}  VALUE  REQUIRED\n", "OPTION");
    for option in table.iter() {
        out.push_str(&format!(
            "{:<name_width$}  {:<5}  {}\n",
            option.display_name(),
            if option.needs_value { "yes" } else { "no" },
            if option.is_required { "yes" } else { "no" },
        ));
    }

    out
}
