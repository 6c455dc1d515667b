//! Declarative option specifications and POSIX-style argument scanning.
//!
//! This crate turns a compact option specification into an option table
//! and scans a raw argument vector against it:
//!
//! - [`OptionSpec`] — the declarative input, either a string such as
//!   `"ab:c!"` or a list such as `["verbose", "output:"]`.
//! - [`compile`] — builds an [`OptionTable`] of [`OptionDescriptor`]s.
//! - [`scan`] — dispatches user arguments against the table, producing a
//!   [`ParseResult`] or an [`ArgumentError`].
//! - [`format_usage`] / [`format_summary`] — usage synopsis and help text.
//!
//! [`parse_args`] composes all of them over a full invocation context
//! (`argv[0]` runner, `argv[1]` script path, user arguments after that).
//!
//! # Example
//!
//! ```
//! use cliargs_core::*;
//!
//! let help = HelpText::new()
//!     .with_option("in", "file to read")
//!     .with_option("f", "overwrite existing output");
//!
//! let parsed = parse_args(
//!     vec!["in:!", "f"],
//!     Some(&help),
//!     &["node", "copy.js", "--in", "a.txt", "-f", "b.txt"],
//! )
//! .unwrap();
//!
//! assert_eq!(parsed.value("in"), Some("a.txt"));
//! assert!(parsed.is_set("f"));
//! assert_eq!(parsed.non_opt(), ["b.txt"]);
//! assert_eq!(parsed.usage(), "node copy.js --in value [-f]");
//! assert!(parsed.summary().starts_with("Usage: node copy.js"));
//!
//! let err = parse_args(vec!["in:!"], None, &["node", "copy.js"]).unwrap_err();
//! assert_eq!(err.kind(), ArgumentErrorKind::RequiredOptionMissing);
//! ```

mod compile;
mod error;
mod format;
mod scan;
mod types;

pub use compile::{compile, compile_chars, compile_list};
pub use error::{ArgumentError, ArgumentErrorKind, Result};
pub use format::{format_summary, format_usage};
pub use scan::scan;
pub use types::*;

/// Index of the first user argument in an invocation context.
pub const FIRST_USER_ARG: usize = 2;

/// Parses a full invocation context against `spec`.
///
/// Compiles the specification, scans `argv[2..]`, and attaches the
/// context together with the usage synopsis and help summary. Each call
/// is independent; nothing is cached between invocations.
///
/// # Errors
///
/// Propagates the [`ArgumentError`] raised by [`scan`].
pub fn parse_args<S: AsRef<str>>(
    spec: impl Into<OptionSpec>,
    help: Option<&HelpText>,
    argv: &[S],
) -> Result<ParsedArgs> {
    let spec = spec.into();
    let table = compile(&spec);
    tracing::debug!(options = table.len(), args = argv.len(), "compiled option table");

    let user_args = argv.get(FIRST_USER_ARG..).unwrap_or_default();
    let ParseResult { options, non_opt } = scan(user_args, &table)?;

    let usage = format_usage(argv, &table);
    let summary = format_summary(&usage, &table, help);

    Ok(ParsedArgs {
        options,
        non_opt,
        argv: argv.iter().map(|a| a.as_ref().to_string()).collect(),
        info: UsageInfo { usage, summary },
    })
}

