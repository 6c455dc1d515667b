//! Argument scanner.
//!
//! A single left-to-right pass over the user arguments, dispatching each
//! token against a compiled [`OptionTable`]:
//!
//! - `--` ends option scanning; everything after it is a non-option.
//! - `--name` is looked up as a whole; a value-needing long option takes
//!   the next argument verbatim.
//! - `-abc` is a cluster of short options. A value-needing option takes
//!   the rest of the cluster as its value (`-ofile`), or the next argument
//!   when it is last in the cluster (`-o file`).
//! - Anything else, including a bare `-`, is a non-option.
//!
//! After the pass, every required option must be present.
//!
//! # Examples
//!
//! ```
//! use cliargs_core::{compile, scan, OptionSpec, OptionValue};
//!
//! let table = compile(&OptionSpec::from("ab:c"));
//! let result = scan(&["-ab", "val", "file", "--", "-c"], &table).unwrap();
//!
//! assert_eq!(result.options["a"], OptionValue::Present);
//! assert_eq!(result.options["b"], OptionValue::Value("val".into()));
//! assert!(!result.options.contains_key("c"));
//! assert_eq!(result.non_opt, ["file", "-c"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ArgumentError, Result};
use crate::{OptionTable, OptionValue, ParseResult};

/// Option token prefix: one or two dashes followed by a name character.
// SAFETY: This regex is a compile-time constant and is validated by tests.
static OPTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-{1,2})[A-Za-z0-9 ,]").expect("static regex must compile"));

/// Scans `args` (user arguments only, without runner and script path).
///
/// # Errors
///
/// - [`ArgumentError::UnrecognizedOption`] for a long name or clustered
///   character the table does not declare.
/// - [`ArgumentError::MissingArgument`] when a value-needing option has no
///   attached remainder and no following argument.
/// - [`ArgumentError::RequiredOptionMissing`] when a required option never
///   appeared.
pub fn scan<S: AsRef<str>>(args: &[S], table: &OptionTable) -> Result<ParseResult> {
    let mut result = ParseResult::default();

    if table.is_empty() {
        debug!(count = args.len(), "empty option table, all arguments are non-options");
        result.non_opt = args.iter().map(|a| a.as_ref().to_string()).collect();
        return Ok(result);
    }

    let mut pos = 0;
    while pos < args.len() {
        let arg = args[pos].as_ref();
        pos += 1;

        if arg == "--" {
            debug!(remaining = args.len() - pos, "option terminator");
            result
                .non_opt
                .extend(args[pos..].iter().map(|a| a.as_ref().to_string()));
            break;
        }

        let Some(caps) = OPTION_TOKEN.captures(arg) else {
            result.non_opt.push(arg.to_string());
            continue;
        };
        let dashes = caps[1].len();
        let text = &arg[dashes..];

        if dashes == 2 {
            scan_long(text, args, &mut pos, table, &mut result)?;
        } else {
            scan_cluster(text, args, &mut pos, table, &mut result)?;
        }
    }

    if let Some(missing) = table
        .required()
        .find(|o| !result.options.contains_key(&o.name))
    {
        return Err(ArgumentError::RequiredOptionMissing(missing.name.clone()));
    }

    Ok(result)
}

fn scan_long<S: AsRef<str>>(
    name: &str,
    args: &[S],
    pos: &mut usize,
    table: &OptionTable,
    result: &mut ParseResult,
) -> Result<()> {
    let Some(option) = table.get(name) else {
        return Err(ArgumentError::UnrecognizedOption(name.to_string()));
    };

    let value = if option.needs_value {
        let Some(next) = args.get(*pos) else {
            return Err(ArgumentError::MissingArgument(name.to_string()));
        };
        *pos += 1;
        OptionValue::Value(next.as_ref().to_string())
    } else {
        OptionValue::Present
    };

    debug!(option = name, ?value, "matched long option");
    result.options.insert(name.to_string(), value);
    Ok(())
}

fn scan_cluster<S: AsRef<str>>(
    cluster: &str,
    args: &[S],
    pos: &mut usize,
    table: &OptionTable,
    result: &mut ParseResult,
) -> Result<()> {
    for (offset, ch) in cluster.char_indices() {
        let mut buf = [0u8; 4];
        let name: &str = ch.encode_utf8(&mut buf);

        let Some(option) = table.get(name) else {
            return Err(ArgumentError::UnrecognizedOption(name.to_string()));
        };

        if !option.needs_value {
            debug!(option = name, "matched short flag");
            result.options.insert(name.to_string(), OptionValue::Present);
            continue;
        }

        let remainder = &cluster[offset + ch.len_utf8()..];
        let value = if !remainder.is_empty() {
            remainder.to_string()
        } else if let Some(next) = args.get(*pos) {
            *pos += 1;
            next.as_ref().to_string()
        } else {
            return Err(ArgumentError::MissingArgument(name.to_string()));
        };

        debug!(option = name, value = %value, "matched short option with value");
        result
            .options
            .insert(name.to_string(), OptionValue::Value(value));
        break;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{compile_chars, compile_list};

    fn value(result: &ParseResult, name: &str) -> Option<OptionValue> {
        result.options.get(name).cloned()
    }

    fn text(s: &str) -> Option<OptionValue> {
        Some(OptionValue::Value(s.to_string()))
    }

    #[test]
    fn test_option_token_pattern() {
        assert!(OPTION_TOKEN.is_match("-a"));
        assert!(OPTION_TOKEN.is_match("--opt"));
        assert!(OPTION_TOKEN.is_match("- a"));
        assert!(!OPTION_TOKEN.is_match("-"));
        assert!(!OPTION_TOKEN.is_match("---a"));
        assert!(!OPTION_TOKEN.is_match("-$"));
        assert!(!OPTION_TOKEN.is_match("a-b"));
    }

    #[test]
    fn test_empty_table_returns_everything_as_non_options() {
        let result = scan(&["-abc", "def", "--", "x"], &OptionTable::new()).unwrap();
        assert!(result.options.is_empty());
        assert_eq!(result.non_opt, ["-abc", "def", "--", "x"]);
    }

    #[test]
    fn test_terminator_stops_scanning() {
        let table = compile_chars("a:b");
        let result = scan(&["-a", "aVal", "--", "-a", "-b"], &table).unwrap();
        assert_eq!(value(&result, "a"), text("aVal"));
        assert_eq!(value(&result, "b"), None);
        assert_eq!(result.non_opt, ["-a", "-b"]);
    }

    #[test]
    fn test_bare_dash_is_non_option() {
        let table = compile_chars("a");
        let result = scan(&["-", "-a", "-"], &table).unwrap();
        assert_eq!(value(&result, "a"), Some(OptionValue::Present));
        assert_eq!(result.non_opt, ["-", "-"]);
    }

    #[test]
    fn test_cluster_flags_then_value() {
        let table = compile_chars("ab:c");
        let result = scan(&["-abc"], &table).unwrap();
        assert_eq!(value(&result, "a"), Some(OptionValue::Present));
        assert_eq!(value(&result, "b"), text("c"));
        assert_eq!(value(&result, "c"), None);
    }

    #[test]
    fn test_value_taken_from_next_argument_verbatim() {
        let table = compile_chars("a:b");
        let result = scan(&["-a", "-b"], &table).unwrap();
        assert_eq!(value(&result, "a"), text("-b"));
        assert_eq!(value(&result, "b"), None);
    }

    #[test]
    fn test_attached_value_keeps_any_characters() {
        let table = compile_chars("o:");
        let result = scan(&["-o/tmp/out.txt"], &table).unwrap();
        assert_eq!(value(&result, "o"), text("/tmp/out.txt"));

        let result = scan(&["-oval1,  val2,val3"], &table).unwrap();
        assert_eq!(value(&result, "o"), text("val1,  val2,val3"));
    }

    #[test]
    fn test_unknown_character_in_cluster() {
        let table = compile_chars("ab");
        let err = scan(&["-axb"], &table).unwrap_err();
        assert_eq!(err, ArgumentError::UnrecognizedOption("x".into()));
    }

    #[test]
    fn test_missing_value_at_end_of_stream() {
        let table = compile_chars("a:b:");
        let err = scan(&["-a", "aVal", "-b"], &table).unwrap_err();
        assert_eq!(err, ArgumentError::MissingArgument("b".into()));
    }

    #[test]
    fn test_long_options() {
        let table = compile_list(&["opt1", "opt2:", "opt3"]);
        let result = scan(&["--opt1", "--opt2", "--opt3"], &table).unwrap();
        assert_eq!(value(&result, "opt1"), Some(OptionValue::Present));
        assert_eq!(value(&result, "opt2"), text("--opt3"));
        assert_eq!(value(&result, "opt3"), None);
    }

    #[test]
    fn test_long_option_with_hyphenated_name() {
        let table = compile_list(&["dry-run", "log-level:"]);
        let result = scan(&["--dry-run", "--log-level", "debug"], &table).unwrap();
        assert_eq!(value(&result, "dry-run"), Some(OptionValue::Present));
        assert_eq!(value(&result, "log-level"), text("debug"));
    }

    #[test]
    fn test_long_errors() {
        let table = compile_list(&["opt1:"]);
        assert_eq!(
            scan(&["--opt2"], &table).unwrap_err(),
            ArgumentError::UnrecognizedOption("opt2".into())
        );
        assert_eq!(
            scan(&["--opt1"], &table).unwrap_err(),
            ArgumentError::MissingArgument("opt1".into())
        );
    }

    #[test]
    fn test_trailing_text_is_part_of_the_option_name() {
        let table = compile_list(&["opt:"]);
        assert_eq!(
            scan(&["--opt=val"], &table).unwrap_err(),
            ArgumentError::UnrecognizedOption("opt=val".into())
        );

        let table = compile_chars("ab");
        assert_eq!(
            scan(&["-a.b"], &table).unwrap_err(),
            ArgumentError::UnrecognizedOption(".".into())
        );
    }

    #[test]
    fn test_required_checked_after_scan() {
        let table = compile_chars("a!b");
        let err = scan(&["-b"], &table).unwrap_err();
        assert_eq!(err, ArgumentError::RequiredOptionMissing("a".into()));

        let result = scan(&["-b", "-a"], &table).unwrap();
        assert_eq!(result.options.len(), 2);
    }

    #[test]
    fn test_missing_argument_precedes_required_check() {
        let table = compile_chars("a:!");
        let err = scan(&["-a"], &table).unwrap_err();
        assert_eq!(err, ArgumentError::MissingArgument("a".into()));
    }

    #[test]
    fn test_non_matching_tokens_keep_order() {
        let table = compile_chars("v");
        let result = scan(&["one", "-v", "-$", "two", "---x"], &table).unwrap();
        assert_eq!(result.non_opt, ["one", "-$", "two", "---x"]);
    }
}
