//! Option specification compiler.
//!
//! Turns an [`OptionSpec`] into an [`OptionTable`]. The compiler never
//! fails: entries that do not name an ASCII alphanumeric option are
//! dropped and reported at `debug` level.
//!
//! # Examples
//!
//! ```
//! use cliargs_core::{compile, OptionSpec};
//!
//! let table = compile(&OptionSpec::from("ab:c!d:!"));
//! assert_eq!(table.len(), 4);
//! assert!(table.get("b").unwrap().needs_value);
//! assert!(table.get("c").unwrap().is_required);
//!
//! let d = table.get("d").unwrap();
//! assert!(d.needs_value && d.is_required);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{OptionDescriptor, OptionSpec, OptionTable};

// SAFETY: These regexes are compile-time constants and are validated by tests.
static ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+").expect("static regex must compile"));
static LEADING_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]").expect("static regex must compile"));

/// Compiles either specification form into an option table.
///
/// An empty specification yields an empty table, which makes the scanner
/// treat every argument as a non-option.
pub fn compile(spec: &OptionSpec) -> OptionTable {
    match spec {
        OptionSpec::Chars(chars) => compile_chars(chars),
        OptionSpec::List(entries) => compile_list(entries),
    }
}

/// Compiles the string form (`"ab:c!d:!"`).
///
/// Each sigil binds to the nearest preceding character: `:` marks that
/// character as needing a value; `!` marks it required, and when `!`
/// directly follows `:` it applies to the character before the `:` and
/// keeps the needs-value flag. Only ASCII alphanumerics become names.
pub fn compile_chars(spec: &str) -> OptionTable {
    let chars: Vec<char> = spec.chars().collect();
    let mut table = OptionTable::new();

    for (idx, &ch) in chars.iter().enumerate() {
        let back = |n: usize| idx.checked_sub(n).map(|i| chars[i]);

        let (name, needs_value, is_required) = match ch {
            '!' if back(1) == Some(':') => (back(2), true, true),
            '!' => (back(1), false, true),
            ':' => (back(1), true, false),
            _ => (Some(ch), false, false),
        };

        match name {
            Some(name) if name.is_ascii_alphanumeric() => {
                table.insert(OptionDescriptor::short(name, needs_value, is_required));
            }
            _ => debug!(position = idx, sigil = %ch, "dropping spec character without option name"),
        }
    }

    table
}

/// Compiles the array form (`["verbose", "output:", "input:!"]`).
///
/// Names longer than one character are long options.
pub fn compile_list<S: AsRef<str>>(entries: &[S]) -> OptionTable {
    let mut table = OptionTable::new();

    for entry in entries {
        let entry = entry.as_ref();
        match compile_entry(entry) {
            Some(descriptor) => table.insert(descriptor),
            None => debug!(entry, "dropping spec entry without alphanumeric name"),
        }
    }

    table
}

fn compile_entry(entry: &str) -> Option<OptionDescriptor> {
    let (name, needs_value, is_required) = if let Some(rest) = entry.strip_suffix('!') {
        let name = ALNUM_RUN.find(entry)?.as_str();
        (name, rest.ends_with(':'), true)
    } else if let Some(rest) = entry.strip_suffix(':') {
        (rest, true, false)
    } else {
        (entry, false, false)
    };

    if !LEADING_ALNUM.is_match(name) {
        return None;
    }

    Some(OptionDescriptor::new(name, needs_value, is_required))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(table: &OptionTable, name: &str) -> (bool, bool, bool) {
        let d = table.get(name).unwrap();
        (d.needs_value, d.is_required, d.is_long)
    }

    #[test]
    fn test_chars_plain_and_sigils() {
        let table = compile_chars("ab:c!d:!");
        let names: Vec<&str> = table.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(flags(&table, "a"), (false, false, false));
        assert_eq!(flags(&table, "b"), (true, false, false));
        assert_eq!(flags(&table, "c"), (false, true, false));
        assert_eq!(flags(&table, "d"), (true, true, false));
    }

    #[test]
    fn test_chars_drops_non_alphanumeric() {
        assert!(compile_chars("$:?:").is_empty());
        assert!(compile_chars(":!").is_empty());
        assert!(compile_chars("").is_empty());

        let table = compile_chars("-a");
        assert_eq!(table.len(), 1);
        assert!(table.contains("a"));
    }

    #[test]
    fn test_chars_stray_sigils_bind_to_nothing() {
        let table = compile_chars("a::!");
        assert_eq!(table.len(), 1);
        assert_eq!(flags(&table, "a"), (true, false, false));

        let table = compile_chars("a!!");
        assert_eq!(flags(&table, "a"), (false, true, false));
    }

    #[test]
    fn test_chars_later_entries_win() {
        let table = compile_chars("a:ba");
        assert_eq!(table.len(), 2);
        assert_eq!(flags(&table, "a"), (false, false, false));
    }

    #[test]
    fn test_list_sigils_and_long_detection() {
        let table = compile_list(&["opt1", "opt2:", "opt3!", "opt4:!", "x:"]);
        assert_eq!(flags(&table, "opt1"), (false, false, true));
        assert_eq!(flags(&table, "opt2"), (true, false, true));
        assert_eq!(flags(&table, "opt3"), (false, true, true));
        assert_eq!(flags(&table, "opt4"), (true, true, true));
        assert_eq!(flags(&table, "x"), (true, false, false));
    }

    #[test]
    fn test_list_required_name_is_first_alphanumeric_run() {
        let table = compile_list(&["--verbose!"]);
        assert_eq!(flags(&table, "verbose"), (false, true, true));
    }

    #[test]
    fn test_list_keeps_hyphenated_names() {
        let table = compile_list(&["dry-run", "log-level:"]);
        assert_eq!(flags(&table, "dry-run"), (false, false, true));
        assert_eq!(flags(&table, "log-level"), (true, false, true));
    }

    #[test]
    fn test_list_drops_entries_without_alphanumeric_prefix() {
        let table = compile_list(&["", ":", "!", "-x", "$opt:", "ok"]);
        let names: Vec<&str> = table.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_compile_dispatches_on_form() {
        assert_eq!(compile(&OptionSpec::default()).len(), 0);
        assert_eq!(compile(&OptionSpec::from("ab")).len(), 2);
        assert!(compile(&OptionSpec::from(vec!["ab"])).get("ab").unwrap().is_long);
    }
}
