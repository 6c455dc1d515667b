//! Option table and parse result type definitions.
//!
//! This module defines the data model shared by the compiler, the scanner
//! and the formatter. The types are designed for serialization with
//! [`serde`] so parse results can be emitted as JSON or YAML.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize, Serializer};

/// Declarative option specification.
///
/// Two representations are accepted:
///
/// - [`Chars`](OptionSpec::Chars): a compact string where each ASCII
///   alphanumeric character names a short option, optionally followed by
///   `:` (needs a value) and/or `!` (required), e.g. `"ab:c!d:!"`.
/// - [`List`](OptionSpec::List): one entry per option, with the same
///   trailing sigils. Names longer than one character are long options.
///
/// # Examples
///
/// ```
/// use cliargs_core::OptionSpec;
///
/// let short: OptionSpec = "a:b!".into();
/// assert!(matches!(short, OptionSpec::Chars(_)));
///
/// let long: OptionSpec = vec!["verbose", "output:"].into();
/// assert!(matches!(long, OptionSpec::List(_)));
///
/// assert!(OptionSpec::default().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    /// String form (`"a:b!"`).
    Chars(String),
    /// Array form (`["opt1", "opt2:"]`).
    List(Vec<String>),
}

impl OptionSpec {
    /// Returns `true` when the specification declares nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Chars(chars) => chars.is_empty(),
            Self::List(entries) => entries.is_empty(),
        }
    }
}

impl Default for OptionSpec {
    fn default() -> Self {
        Self::Chars(String::new())
    }
}

impl From<&str> for OptionSpec {
    fn from(chars: &str) -> Self {
        Self::Chars(chars.to_string())
    }
}

impl From<String> for OptionSpec {
    fn from(chars: String) -> Self {
        Self::Chars(chars)
    }
}

impl From<Vec<String>> for OptionSpec {
    fn from(entries: Vec<String>) -> Self {
        Self::List(entries)
    }
}

impl From<Vec<&str>> for OptionSpec {
    fn from(entries: Vec<&str>) -> Self {
        Self::List(entries.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for OptionSpec {
    fn from(entries: &[&str]) -> Self {
        Self::List(entries.iter().map(|e| e.to_string()).collect())
    }
}

/// Compiled description of a single recognized option.
///
/// # Examples
///
/// ```
/// use cliargs_core::OptionDescriptor;
///
/// let short = OptionDescriptor::new("o", true, false);
/// assert!(!short.is_long);
/// assert_eq!(short.display_name(), "-o");
///
/// let long = OptionDescriptor::new("output", true, true);
/// assert!(long.is_long);
/// assert_eq!(long.display_name(), "--output");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Option name without dashes (e.g. "a" or "output")
    pub name: String,
    /// Must be followed by (or have attached) a value
    pub needs_value: bool,
    /// Omission is an error
    pub is_required: bool,
    /// Invoked as `--name` rather than clustered `-n`
    pub is_long: bool,
}

impl OptionDescriptor {
    /// Creates a descriptor; names longer than one character are long-form.
    pub fn new(name: &str, needs_value: bool, is_required: bool) -> Self {
        Self {
            name: name.to_string(),
            needs_value,
            is_required,
            is_long: name.chars().count() > 1,
        }
    }

    /// Creates a single-character descriptor, as produced by the string form.
    pub fn short(name: char, needs_value: bool, is_required: bool) -> Self {
        Self {
            name: name.to_string(),
            needs_value,
            is_required,
            is_long: false,
        }
    }

    /// Returns the name as typed on a command line (`-a` or `--name`).
    pub fn display_name(&self) -> String {
        if self.is_long {
            format!("--{}", self.name)
        } else {
            format!("-{}", self.name)
        }
    }
}

/// Name-unique, declaration-ordered collection of [`OptionDescriptor`]s.
///
/// Inserting a name that already exists replaces its descriptor in place,
/// so later specification entries win without changing iteration order.
///
/// # Examples
///
/// ```
/// use cliargs_core::{OptionDescriptor, OptionTable};
///
/// let mut table = OptionTable::new();
/// table.insert(OptionDescriptor::short('b', false, false));
/// table.insert(OptionDescriptor::short('a', true, false));
/// table.insert(OptionDescriptor::short('b', false, true));
///
/// let names: Vec<&str> = table.iter().map(|o| o.name.as_str()).collect();
/// assert_eq!(names, vec!["b", "a"]);
/// assert!(table.get("b").unwrap().is_required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionTable {
    entries: Vec<OptionDescriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl OptionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a descriptor keyed by its name.
    pub fn insert(&mut self, descriptor: OptionDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&slot) => self.entries[slot] = descriptor,
            None => {
                self.index
                    .insert(descriptor.name.clone(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    /// Looks up a descriptor by option name (without dashes).
    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Returns `true` if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.entries.iter()
    }

    /// Iterates descriptors marked required, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.entries.iter().filter(|o| o.is_required)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<OptionDescriptor> for OptionTable {
    fn from_iter<I: IntoIterator<Item = OptionDescriptor>>(iter: I) -> Self {
        let mut table = Self::new();
        for descriptor in iter {
            table.insert(descriptor);
        }
        table
    }
}

/// Value recorded for an option that appeared on the command line.
///
/// Serializes as `true` for [`Present`](OptionValue::Present) and as a
/// plain string for [`Value`](OptionValue::Value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Value-less option was supplied.
    Present,
    /// Value consumed by a value-needing option, verbatim.
    Value(String),
}

impl OptionValue {
    /// Returns the consumed value, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present => serializer.serialize_bool(true),
            Self::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// Output of a single scan over the user arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Options that appeared, keyed by name. Absent means not supplied.
    pub options: BTreeMap<String, OptionValue>,
    /// Operands, everything after `--`, and bare `-`, in input order
    #[serde(rename = "nonOpt")]
    pub non_opt: Vec<String>,
}

/// Help text for a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionHelp {
    /// Option name without dashes
    pub name: String,
    /// One-line description
    pub text: String,
}

/// Help text used to assemble the summary.
///
/// # Examples
///
/// ```
/// use cliargs_core::HelpText;
///
/// let help = HelpText::new()
///     .with_pre("Copies things around.")
///     .with_option("v", "print each file as it is copied")
///     .with_post("Report bugs to the issue tracker.");
///
/// assert_eq!(help.text_for("v"), Some("print each file as it is copied"));
/// assert_eq!(help.text_for("q"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpText {
    /// Line printed before the option listing
    #[serde(default)]
    pub pre: Option<String>,
    /// Line printed after the option listing
    #[serde(default)]
    pub post: Option<String>,
    /// Per-option descriptions, listed in this order
    #[serde(default)]
    pub options: Vec<OptionHelp>,
}

impl HelpText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line printed before the option listing.
    pub fn with_pre(mut self, pre: &str) -> Self {
        self.pre = Some(pre.to_string());
        self
    }

    /// Sets the line printed after the option listing.
    pub fn with_post(mut self, post: &str) -> Self {
        self.post = Some(post.to_string());
        self
    }

    /// Adds a description for `name`, replacing an earlier one in place.
    pub fn with_option(mut self, name: &str, text: &str) -> Self {
        match self.options.iter_mut().find(|h| h.name == name) {
            Some(existing) => existing.text = text.to_string(),
            None => self.options.push(OptionHelp {
                name: name.to_string(),
                text: text.to_string(),
            }),
        }
        self
    }

    /// Returns the description registered for `name`.
    ///
    /// When a name is listed more than once, the last entry wins.
    pub fn text_for(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .rfind(|h| h.name == name)
            .map(|h| h.text.as_str())
    }

    /// Returns one entry per name, at the position of its first
    /// occurrence and carrying the text of its last.
    ///
    /// # Examples
    ///
    /// ```
    /// use cliargs_core::{HelpText, OptionHelp};
    ///
    /// let help = HelpText {
    ///     options: vec![
    ///         OptionHelp { name: "a".into(), text: "one".into() },
    ///         OptionHelp { name: "b".into(), text: "bee".into() },
    ///         OptionHelp { name: "a".into(), text: "two".into() },
    ///     ],
    ///     ..HelpText::default()
    /// };
    ///
    /// let described: Vec<(&str, &str)> = help
    ///     .described()
    ///     .map(|h| (h.name.as_str(), h.text.as_str()))
    ///     .collect();
    /// assert_eq!(described, vec![("a", "two"), ("b", "bee")]);
    /// ```
    pub fn described(&self) -> impl Iterator<Item = &OptionHelp> {
        self.options.iter().enumerate().filter_map(|(idx, h)| {
            let first = self.options.iter().position(|o| o.name == h.name)?;
            if first != idx {
                return None;
            }
            self.options.iter().rfind(|o| o.name == h.name)
        })
    }
}

/// Usage synopsis and help summary attached to a [`ParsedArgs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageInfo {
    /// One-line synopsis, e.g. `node app.js -a value [-v]`
    pub usage: String,
    /// Multi-line help summary starting with `Usage: `
    pub summary: String,
}

/// Final result of [`parse_args`](crate::parse_args).
///
/// # Examples
///
/// ```
/// use cliargs_core::{parse_args, OptionValue};
///
/// let parsed = parse_args("vo:", None, &["node", "app.js", "-vo", "out.txt", "in.txt"]).unwrap();
/// assert_eq!(parsed.get("v"), Some(&OptionValue::Present));
/// assert_eq!(parsed.value("o"), Some("out.txt"));
/// assert_eq!(parsed.non_opt(), ["in.txt"]);
/// assert_eq!(parsed.usage(), "node app.js [-v] [-o value]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArgs {
    /// Options that appeared, keyed by name
    pub options: BTreeMap<String, OptionValue>,
    /// Non-option operands
    #[serde(rename = "nonOpt")]
    pub non_opt: Vec<String>,
    /// Full invocation context as supplied by the caller
    pub argv: Vec<String>,
    /// Usage synopsis and help summary
    pub info: UsageInfo,
}

impl ParsedArgs {
    /// Returns the recorded value for `name`.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Returns the string value consumed by `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(OptionValue::as_str)
    }

    /// Returns `true` if `name` appeared on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn non_opt(&self) -> &[String] {
        &self.non_opt
    }

    pub fn usage(&self) -> &str {
        &self.info.usage
    }

    pub fn summary(&self) -> &str {
        &self.info.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_long_inferred_from_length() {
        assert!(!OptionDescriptor::new("a", false, false).is_long);
        assert!(OptionDescriptor::new("ab", false, false).is_long);
        assert_eq!(OptionDescriptor::short('x', true, true).display_name(), "-x");
    }

    #[test]
    fn test_table_replace_keeps_position() {
        let table: OptionTable = [
            OptionDescriptor::short('a', true, false),
            OptionDescriptor::short('b', false, false),
            OptionDescriptor::short('a', false, true),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 2);
        let first = table.iter().next().unwrap();
        assert_eq!(first.name, "a");
        assert!(!first.needs_value);
        assert!(first.is_required);
        assert_eq!(table.required().count(), 1);
    }

    #[test]
    fn test_option_value_serializes_as_bool_or_string() {
        let mut result = ParseResult::default();
        result.options.insert("a".into(), OptionValue::Present);
        result
            .options
            .insert("b".into(), OptionValue::Value("val".into()));
        result.non_opt.push("file".into());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "options": { "a": true, "b": "val" }, "nonOpt": ["file"] })
        );
    }

    #[test]
    fn test_spec_deserializes_untagged() {
        let chars: OptionSpec = serde_json::from_str(r#""a:b!""#).unwrap();
        assert_eq!(chars, OptionSpec::Chars("a:b!".into()));

        let list: OptionSpec = serde_json::from_str(r#"["opt1", "opt2:"]"#).unwrap();
        assert_eq!(list, OptionSpec::from(vec!["opt1", "opt2:"]));
    }

    #[test]
    fn test_help_with_option_replaces_in_place() {
        let help = HelpText::new()
            .with_option("a", "one")
            .with_option("b", "bee")
            .with_option("a", "two");

        assert_eq!(help.options.len(), 2);
        assert_eq!(help.options[0].name, "a");
        assert_eq!(help.text_for("a"), Some("two"));
    }

    #[test]
    fn test_table_serializes_as_sequence() {
        let table: OptionTable = [OptionDescriptor::new("out", true, false)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["name"], "out");
        assert_eq!(json[0]["is_long"], true);
    }
}
