//! Option definition files.
//!
//! A definition bundles an option specification with its help text so a
//! tool's options can live next to it as YAML (or JSON, which the YAML
//! loader accepts as well).
//!
//! # Example YAML
//!
//! ```yaml
//! spec: ["verbose", "output:", "input:!"]
//! help:
//!   pre: "Converts input files."
//!   options:
//!     - name: input
//!       text: "file to read"
//!     - name: output
//!       text: "file to write"
//!   post: "Exit status is 0 on success."
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use cliargs_core::{HelpText, OptionSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or saving a definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`DefinitionError`].
pub type Result<T> = std::result::Result<T, DefinitionError>;

/// Option specification plus optional help text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserDefinition {
    /// String or list specification.
    #[serde(default)]
    pub spec: OptionSpec,
    /// Help text used for the summary.
    #[serde(default)]
    pub help: Option<HelpText>,
}

impl ParserDefinition {
    /// Loads a definition from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DefinitionError::IoError) if the file cannot be
    /// read, or [`YamlError`](DefinitionError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let definition = serde_yaml::from_reader(reader)?;
        Ok(definition)
    }

    /// Saves the definition as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DefinitionError::IoError) if the file cannot be
    /// written, or [`YamlError`](DefinitionError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
