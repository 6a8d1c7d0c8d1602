//! Type descriptions for parameters, fields and return values.
//!
//! - [`Type`] - Tagged variant over identifiers, pointers, slices, structs and iterators
//! - [`Field`] - A member of an "options" struct

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::param::{Collection, Kind};

/// Name of the identifier used for the trailing error slot of a method.
pub const ERROR_TYPE_NAME: &str = "error";

/// A type as described by the API-description parser.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::Type;
///
/// let page = Type::iterator(Type::pointer(Type::ident("WidgetIter")));
/// assert_eq!(page.to_string(), "iter<*WidgetIter>");
///
/// let id = Type::marshal_ident("WidgetID");
/// assert!(id.supports_marshal());
/// assert!(!Type::ident("string").supports_marshal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// A named type.
    Ident {
        /// The type name (e.g. `int`, `string`, `Widget`).
        name: String,
        /// Whether values of this type can text-marshal themselves.
        #[serde(default)]
        marshal: bool,
    },
    /// A pointer (or optional wrapper) around another type.
    Pointer(Box<Type>),
    /// A sequence of values.
    Slice(Box<Type>),
    /// An inline struct with ordered fields.
    Struct(Vec<Field>),
    /// A stateful cursor over paginated results.
    Iterator(Box<Type>),
}

impl Type {
    /// Creates an identifier type without text-marshal support.
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident {
            name: name.into(),
            marshal: false,
        }
    }

    /// Creates an identifier type that supports text-marshal.
    pub fn marshal_ident(name: impl Into<String>) -> Self {
        Self::Ident {
            name: name.into(),
            marshal: true,
        }
    }

    /// Wraps a type in a pointer.
    pub fn pointer(inner: Type) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps a type in a slice.
    pub fn slice(inner: Type) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Wraps a type in an iterator.
    pub fn iterator(inner: Type) -> Self {
        Self::Iterator(Box::new(inner))
    }

    /// The identifier name, looking through any number of pointers.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Ident { name, .. } => Some(name),
            Self::Pointer(inner) => inner.name(),
            _ => None,
        }
    }

    /// Returns `true` for identifier types that declare text-marshal support.
    pub fn supports_marshal(&self) -> bool {
        matches!(self, Self::Ident { marshal: true, .. })
    }

    /// Returns `true` for the identifier naming the error slot.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Ident { name, .. } if name == ERROR_TYPE_NAME)
    }

    /// The type a pointer points to, or `None` for non-pointers.
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Self::Pointer(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident { name, .. } => f.write_str(name),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Slice(inner) => write!(f, "[{inner}]"),
            Self::Iterator(inner) => write!(f, "iter<{inner}>"),
            Self::Struct(fields) => {
                f.write_str("struct{")?;
                for (idx, field) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.ty)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A member of an "options" struct.
///
/// Fields mirror [`crate::Param`] but live inside the struct referenced by an
/// `Opts` parameter. Their type is a [`Type::Pointer`] around the value type:
/// a field is only transmitted when the pointer is non-null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Struct member name.
    pub name: String,
    /// Where the field is transmitted.
    pub kind: Kind,
    /// Optional wrapper around the value type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Wire name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig: Option<String>,
    /// Single value or repeated entries.
    #[serde(default)]
    pub collection: Collection,
}

impl Field {
    /// Creates an optional query field of the given value type.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientsynth_define::{Field, Kind, Type};
    ///
    /// let limit = Field::optional_query("limit", Type::ident("int"));
    /// assert_eq!(limit.kind, Kind::Query);
    /// assert_eq!(limit.ty, Type::pointer(Type::ident("int")));
    /// ```
    pub fn optional_query(name: impl Into<String>, value: Type) -> Self {
        Self {
            name: name.into(),
            kind: Kind::Query,
            ty: Type::pointer(value),
            orig: None,
            collection: Collection::Single,
        }
    }

    /// Sets the wire name override.
    pub fn with_orig(mut self, orig: impl Into<String>) -> Self {
        self.orig = Some(orig.into());
        self
    }

    /// Marks the field as a repeated (multi-valued) entry.
    pub fn multi(mut self) -> Self {
        self.collection = Collection::Multi;
        self
    }

    /// The name the field is transmitted under.
    pub fn wire_name(&self) -> &str {
        self.orig.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_looks_through_pointers() {
        let ty = Type::pointer(Type::pointer(Type::ident("ListOpts")));
        assert_eq!(ty.name(), Some("ListOpts"));
        assert_eq!(Type::slice(Type::ident("int")).name(), None);
    }

    #[test]
    fn marshal_only_on_identifiers() {
        assert!(Type::marshal_ident("Date").supports_marshal());
        assert!(!Type::pointer(Type::marshal_ident("Date")).supports_marshal());
    }

    #[test]
    fn error_identifier_detected() {
        assert!(Type::ident("error").is_error());
        assert!(!Type::ident("Error").is_error());
    }

    #[test]
    fn display_nested_types() {
        let ty = Type::slice(Type::pointer(Type::ident("Widget")));
        assert_eq!(ty.to_string(), "[*Widget]");

        let opts = Type::Struct(vec![Field::optional_query("limit", Type::ident("int"))]);
        assert_eq!(opts.to_string(), "struct{limit: *int}");
    }

    #[test]
    fn deserialize_with_default_marshal() {
        let ty: Type = serde_json::from_str(r#"{"ident":{"name":"string"}}"#).unwrap();
        assert_eq!(ty, Type::ident("string"));

        let ty: Type =
            serde_json::from_str(r#"{"pointer":{"ident":{"name":"Date","marshal":true}}}"#)
                .unwrap();
        assert_eq!(ty, Type::pointer(Type::marshal_ident("Date")));
    }

    #[test]
    fn field_wire_name_prefers_orig() {
        let field = Field::optional_query("pageSize", Type::ident("int")).with_orig("page_size");
        assert_eq!(field.wire_name(), "page_size");
        assert_eq!(
            Field::optional_query("limit", Type::ident("int")).wire_name(),
            "limit"
        );
    }
}
