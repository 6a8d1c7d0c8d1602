//! Method parameters and their transmission locations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::types::Type;

/// Where a parameter is transmitted.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientsynth_define::Kind;
///
/// assert_eq!(Kind::Header.to_string(), "header");
/// assert_eq!(Kind::from_str("opts").unwrap(), Kind::Opts);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Kind {
    /// Substituted into the path template.
    Path,
    /// Added to the query string.
    Query,
    /// Set as a request header.
    Header,
    /// Sent as the request body.
    Body,
    /// A struct bundling several optional parameters.
    Opts,
}

/// Whether a parameter carries one value or a sequence.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// A single value (`none` in API descriptions).
    #[default]
    #[serde(rename = "none", alias = "single")]
    #[strum(to_string = "none")]
    Single,
    /// A sequence encoded as repeated entries under one wire name.
    Multi,
}

/// A single method parameter.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{Collection, Kind, Param, Type};
///
/// let tags = Param::new("tags", Kind::Query, Type::slice(Type::ident("string")))
///     .with_orig("tag")
///     .multi();
///
/// assert_eq!(tags.wire_name(), "tag");
/// assert_eq!(tags.collection, Collection::Multi);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Argument identifier in the generated signature.
    pub arg: String,
    /// Transmission location.
    pub kind: Kind,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Wire name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig: Option<String>,
    /// Single value or repeated entries.
    #[serde(default)]
    pub collection: Collection,
}

impl Param {
    /// Creates a single-valued parameter without a wire name override.
    pub fn new(arg: impl Into<String>, kind: Kind, ty: Type) -> Self {
        Self {
            arg: arg.into(),
            kind,
            ty,
            orig: None,
            collection: Collection::Single,
        }
    }

    /// Sets the wire name override.
    pub fn with_orig(mut self, orig: impl Into<String>) -> Self {
        self.orig = Some(orig.into());
        self
    }

    /// Marks the parameter as multi-valued.
    pub fn multi(mut self) -> Self {
        self.collection = Collection::Multi;
        self
    }

    /// The name the parameter is transmitted under.
    pub fn wire_name(&self) -> &str {
        self.orig.as_deref().unwrap_or(&self.arg)
    }
}
