//! Error types for the method-body synthesizer.

use clientsynth_define::{Collection, Kind};
use thiserror::Error;

/// Structural defects found while synthesizing a method body.
///
/// A defect means the method description violates an invariant the
/// synthesizer relies on. Defects are fatal for the whole package.
#[derive(Debug, Error)]
pub enum SynthError {
    /// A string conversion was requested for a non-identifier type.
    #[error("Unknown type for string conversion: {ty}")]
    NonScalarStringify {
        /// Display form of the offending type.
        ty: String,
    },

    /// A multi-valued parameter whose type is not a sequence.
    #[error("Parameter '{arg}' is multi-valued but its type {ty} is not a slice")]
    CollectionTypeMismatch {
        /// Argument or field name.
        arg: String,
        /// Display form of the declared type.
        ty: String,
    },

    /// A collection format the parameter location cannot encode.
    #[error("Unhandled collection format '{collection}' for {kind} parameter '{arg}'")]
    UnsupportedCollection {
        /// Argument name.
        arg: String,
        /// Parameter location.
        kind: Kind,
        /// The rejected collection format.
        collection: Collection,
    },

    /// An options-struct field that is not transmitted in the query string.
    #[error("Unhandled location for optional arg '{field}': {kind}")]
    UnhandledOptionalLocation {
        /// Field name.
        field: String,
        /// The field's declared location.
        kind: Kind,
    },

    /// An options-struct field whose type is not an optional wrapper.
    #[error("Optional field '{field}' must be a pointer type, got {ty}")]
    OptionalFieldNotPointer {
        /// Field name.
        field: String,
        /// Display form of the declared type.
        ty: String,
    },

    /// An options parameter naming a type the package does not declare.
    #[error("Options type '{name}' is not declared")]
    UnresolvedOptions {
        /// The referenced type name.
        name: String,
    },

    /// An options parameter that does not resolve to a struct.
    #[error("Options parameter '{arg}' does not resolve to a struct: {ty}")]
    OptionsNotStruct {
        /// Argument name.
        arg: String,
        /// Display form of the resolved type.
        ty: String,
    },

    /// More than one request body.
    #[error("Method declares {count} body parameters; at most one is allowed")]
    MultipleBodies {
        /// Number of body parameters found.
        count: usize,
    },

    /// More than one options parameter.
    #[error("Method declares {count} options parameters; at most one is allowed")]
    MultipleOptions {
        /// Number of options parameters found.
        count: usize,
    },

    /// Path parameters that do not fill the template's substitution slots.
    #[error("Path template '{template}' has {slots} substitution slots but {params} path parameters")]
    PathSlotMismatch {
        /// The path template.
        template: String,
        /// Number of `{name}` slots in the template.
        slots: usize,
        /// Number of path parameters.
        params: usize,
    },

    /// An iterator return accompanied by other returns.
    #[error("Iterator return must be the only return type, found {count} returns")]
    IteratorWithExtraReturns {
        /// Total number of declared returns.
        count: usize,
    },

    /// More value returns than any supported return shape allows.
    #[error("Unsupported return list: {count} value returns (at most one is allowed)")]
    UnsupportedReturns {
        /// Number of value returns.
        count: usize,
    },

    /// An argument shadowing one of the generated locals.
    #[error("Argument '{arg}' collides with a generated local of the same name")]
    ReservedIdentifier {
        /// The colliding argument name.
        arg: String,
    },

    /// Two parameters declared with the same argument name.
    #[error("Argument '{arg}' is declared more than once")]
    DuplicateArgument {
        /// The repeated argument name.
        arg: String,
    },

    /// A defect attributed to a specific method.
    #[error("{client}.{method}: {source}")]
    InMethod {
        /// Client type name.
        client: String,
        /// Method name.
        method: String,
        /// The underlying defect.
        #[source]
        source: Box<SynthError>,
    },
}

impl SynthError {
    /// Attributes this defect to a method.
    pub fn in_method(self, client: impl Into<String>, method: impl Into<String>) -> Self {
        Self::InMethod {
            client: client.into(),
            method: method.into(),
            source: Box::new(self),
        }
    }
}

/// Errors that can occur while loading input, synthesizing and writing output.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a package description or configuration file
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Input file with an extension no loader handles
    #[error("Unsupported input format '{path}': expected .json, .yaml or .yml")]
    UnsupportedInput { path: String },

    /// Invalid naming configuration.
    ///
    /// Generated locals must be valid, distinct identifiers.
    #[error("Invalid naming for '{field}' ('{value}'): {reason}")]
    InvalidNaming {
        /// The configuration key.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },

    /// Failed to serialize the synthesized IR
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A method could not be synthesized
    #[error(transparent)]
    Synth(#[from] SynthError),
}
