//! Package-level containers for methods and declared types.

use serde::{Deserialize, Serialize};

use crate::method::Method;
use crate::types::Type;

/// A named type declaration (e.g. an options struct).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Declared name.
    pub name: String,
    /// The declared type.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Documentation text.
    #[serde(default)]
    pub doc: String,
}

/// A client grouping related methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client type name.
    pub name: String,
    /// Documentation text.
    #[serde(default)]
    pub doc: String,
    /// Methods attached to the client.
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// Everything an API-description parser hands to the synthesizer.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{Field, Package, Type, TypeDecl};
///
/// let package = Package {
///     name: "widgets".to_string(),
///     clients: vec![],
///     types: vec![TypeDecl {
///         name: "ListOpts".to_string(),
///         ty: Type::Struct(vec![Field::optional_query("limit", Type::ident("int"))]),
///         doc: String::new(),
///     }],
/// };
///
/// assert!(package.find_type("ListOpts").is_some());
/// assert!(package.find_type("Missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Clients in declaration order.
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Declared types referenced by method parameters.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl Package {
    /// Looks up a declared type by name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| decl.name == name)
    }

    /// Total number of methods across all clients.
    pub fn method_count(&self) -> usize {
        self.clients.iter().map(|client| client.methods.len()).sum()
    }
}
