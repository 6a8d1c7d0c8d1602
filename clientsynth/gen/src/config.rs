//! Naming configuration for generated locals.
//!
//! Every identifier the synthesizer introduces into a method body comes from
//! [`Naming`]. The defaults match the conventional short names (`p`, `q`,
//! `req`, `resp`, `iter`, `err`); a TOML file can override any subset:
//!
//! ```toml
//! [naming]
//! query = "values"
//! bytes_suffix = "Text"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::GeneratorError;

/// Identifiers used for the locals and members of a synthesized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Naming {
    /// Request context argument.
    pub context: String,
    /// Type name of the request context argument.
    pub context_type: String,
    /// Request path local.
    pub path: String,
    /// Query collection local.
    pub query: String,
    /// Request local.
    pub request: String,
    /// Decoded response local.
    pub response: String,
    /// Iterator state local.
    pub iterator: String,
    /// Error local.
    pub error: String,
    /// Loop element binding for multi-valued parameters.
    pub item: String,
    /// Marshaled bytes binding inside loops and option guards.
    pub item_bytes: String,
    /// Suffix appended to an argument name for its marshaled bytes.
    pub bytes_suffix: String,
    /// Receiver member holding the backend capability.
    pub backend: String,
    /// Iterator member receiving the decoded page.
    pub page_field: String,
    /// Iterator member recording failures.
    pub iterator_error_field: String,
    /// Iterator member holding the cursor position.
    pub cursor_field: String,
    /// Iterator member flagging the first fetch.
    pub first_field: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            context: "ctx".to_string(),
            context_type: "Context".to_string(),
            path: "p".to_string(),
            query: "q".to_string(),
            request: "req".to_string(),
            response: "resp".to_string(),
            iterator: "iter".to_string(),
            error: "err".to_string(),
            item: "v".to_string(),
            item_bytes: "b".to_string(),
            bytes_suffix: "Bytes".to_string(),
            backend: "backend".to_string(),
            page_field: "page".to_string(),
            iterator_error_field: "err".to_string(),
            cursor_field: "i".to_string(),
            first_field: "first".to_string(),
        }
    }
}

impl Naming {
    /// Locals a method body may bind, which arguments must not shadow.
    pub fn locals(&self) -> [(&'static str, &str); 9] {
        [
            ("context", self.context.as_str()),
            ("path", self.path.as_str()),
            ("query", self.query.as_str()),
            ("request", self.request.as_str()),
            ("response", self.response.as_str()),
            ("iterator", self.iterator.as_str()),
            ("error", self.error.as_str()),
            ("item", self.item.as_str()),
            ("item_bytes", self.item_bytes.as_str()),
        ]
    }

    /// Members of the receiver and iterator state the body refers to.
    pub fn members(&self) -> [(&'static str, &str); 6] {
        [
            ("context_type", self.context_type.as_str()),
            ("backend", self.backend.as_str()),
            ("page_field", self.page_field.as_str()),
            ("iterator_error_field", self.iterator_error_field.as_str()),
            ("cursor_field", self.cursor_field.as_str()),
            ("first_field", self.first_field.as_str()),
        ]
    }

    /// The local holding `arg`'s marshaled bytes.
    pub fn bytes_for(&self, arg: &str) -> String {
        format!("{arg}{}", self.bytes_suffix)
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Identifiers for generated locals.
    pub naming: Naming,
}

impl SynthConfig {
    /// Parses configuration from TOML text.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientsynth_gen::config::SynthConfig;
    ///
    /// let config = SynthConfig::from_toml_str("naming.query = \"values\"", "inline").unwrap();
    /// assert_eq!(config.naming.query, "values");
    /// assert_eq!(config.naming.path, "p");
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ParseError`] for malformed TOML.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, GeneratorError> {
        toml::from_str(text).map_err(|e| GeneratorError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads configuration from a TOML file.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }
}
