//! Method descriptors.
//!
//! - [`Method`] - A single client method to synthesize
//! - [`Receiver`] - The client value a method is attached to
//! - [`RestMethod`] - HTTP verbs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::param::{Kind, Param};
use crate::status::Errors;
use crate::types::Type;

/// HTTP methods supported by generated clients.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use clientsynth_define::RestMethod;
///
/// assert_eq!(RestMethod::from_str("PATCH").unwrap(), RestMethod::Patch);
/// assert_eq!(RestMethod::Delete.to_string(), "DELETE");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

/// The client value a generated method is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Identifier bound to the receiver inside the method body (e.g. `c`).
    pub id: String,
    /// The receiver's type name (e.g. `WidgetsClient`).
    pub type_name: String,
}

impl Receiver {
    /// Creates a receiver.
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
        }
    }
}

/// A single client method.
///
/// `returns` lists the value returns only. The error slot is implied by the
/// return shape; a trailing `error` identifier is tolerated and ignored.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{Kind, Method, Param, Receiver, RestMethod, Type};
///
/// let method = Method::new("Get", Receiver::new("c", "WidgetsClient"), RestMethod::Get, "/widgets/{id}")
///     .with_param(Param::new("id", Kind::Path, Type::ident("string")))
///     .with_return(Type::pointer(Type::ident("Widget")));
///
/// assert_eq!(method.params_of(Kind::Path).count(), 1);
/// assert!(!method.returns_iterator());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// The client the method is attached to.
    pub receiver: Receiver,
    /// HTTP verb.
    pub verb: RestMethod,
    /// Path template with `{name}` substitution slots.
    pub path: String,
    /// Ordered parameters.
    #[serde(default)]
    pub params: Vec<Param>,
    /// Ordered value return types.
    #[serde(default)]
    pub returns: Vec<Type>,
    /// Documentation text.
    #[serde(default)]
    pub doc: String,
    /// Status-code to error-constructor mapping.
    #[serde(default)]
    pub errors: Errors,
}

impl Method {
    /// Creates a method with no parameters, returns or error mapping.
    pub fn new(
        name: impl Into<String>,
        receiver: Receiver,
        verb: RestMethod,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            receiver,
            verb,
            path: path.into(),
            params: vec![],
            returns: vec![],
            doc: String::new(),
            errors: Errors::default(),
        }
    }

    /// Appends a parameter.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a return type.
    pub fn with_return(mut self, ty: Type) -> Self {
        self.returns.push(ty);
        self
    }

    /// Sets the error mapping.
    pub fn with_errors(mut self, errors: Errors) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the documentation text.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Parameters of the given kind, in declaration order.
    pub fn params_of(&self, kind: Kind) -> impl Iterator<Item = &Param> + '_ {
        self.params.iter().filter(move |param| param.kind == kind)
    }

    /// Value returns with any trailing `error` identifier removed.
    pub fn value_returns(&self) -> &[Type] {
        match self.returns.split_last() {
            Some((last, rest)) if last.is_error() => rest,
            _ => &self.returns,
        }
    }

    /// Returns `true` when the first return type is an iterator.
    pub fn returns_iterator(&self) -> bool {
        matches!(self.returns.first(), Some(Type::Iterator(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn receiver() -> Receiver {
        Receiver::new("c", "Client")
    }

    #[test]
    fn rest_method_display_uppercase() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Post.to_string(), "POST");
        assert_eq!(RestMethod::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn rest_method_from_str_is_case_sensitive() {
        assert_eq!(RestMethod::from_str("PUT").unwrap(), RestMethod::Put);
        assert!(RestMethod::from_str("put").is_err());
        assert!(RestMethod::from_str("").is_err());
    }

    #[test]
    fn rest_method_iter_all_variants() {
        assert_eq!(RestMethod::iter().count(), 7);
    }

    #[test]
    fn rest_method_serde_uppercase() {
        let serialized = serde_json::to_string(&RestMethod::Head).unwrap();
        assert_eq!(serialized, "\"HEAD\"");
    }

    #[test]
    fn value_returns_strip_trailing_error() {
        let method = Method::new("Get", receiver(), RestMethod::Get, "/")
            .with_return(Type::pointer(Type::ident("Widget")))
            .with_return(Type::ident("error"));

        assert_eq!(
            method.value_returns(),
            &[Type::pointer(Type::ident("Widget"))]
        );
    }

    #[test]
    fn value_returns_keep_non_error_types() {
        let method = Method::new("Get", receiver(), RestMethod::Get, "/")
            .with_return(Type::ident("Widget"));
        assert_eq!(method.value_returns().len(), 1);

        let bare = Method::new("Delete", receiver(), RestMethod::Delete, "/");
        assert!(bare.value_returns().is_empty());
    }

    #[test]
    fn params_of_preserves_order() {
        let method = Method::new("List", receiver(), RestMethod::Get, "/")
            .with_param(Param::new("a", Kind::Query, Type::ident("string")))
            .with_param(Param::new("h", Kind::Header, Type::ident("string")))
            .with_param(Param::new("b", Kind::Query, Type::ident("int")));

        let names: Vec<_> = method.params_of(Kind::Query).map(|p| p.arg.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn method_deserializes_with_defaults() {
        let method: Method = serde_json::from_str(
            r#"{"name":"Ping","receiver":{"id":"c","type_name":"Client"},"verb":"GET","path":"/ping"}"#,
        )
        .unwrap();

        assert!(method.params.is_empty());
        assert!(method.errors.is_empty());
        assert_eq!(method.doc, "");
    }
}
