//! Clientsynth Definition Library
//!
//! Read-only descriptions of REST client methods, produced by an
//! API-description parser and consumed by `clientsynth-gen`.
//!
//! ## Core Types
//!
//! - [`Method`] - HTTP verb, path template, parameters, returns and error mapping
//! - [`Param`] - An argument plus where it is transmitted ([`Kind`]) and how ([`Collection`])
//! - [`Type`] - Identifier, pointer, slice, struct or iterator
//! - [`Field`] - A member of an options struct
//! - [`Errors`] - Status-code to [`ErrorCtor`] mapping with an optional default
//! - [`Package`] - Clients plus the type declarations their methods reference
//!
//! ## Examples
//!
//! ```
//! use clientsynth_define::{ErrorCtor, Errors, Kind, Method, Param, Receiver, RestMethod, Type};
//!
//! let method = Method::new(
//!     "Get",
//!     Receiver::new("c", "WidgetsClient"),
//!     RestMethod::Get,
//!     "/widgets/{id}",
//! )
//! .with_param(Param::new("id", Kind::Path, Type::ident("string")))
//! .with_return(Type::pointer(Type::ident("Widget")))
//! .with_errors(Errors::default().with_code(404, ErrorCtor::new(Type::ident("NotFound"))));
//!
//! assert_eq!(method.verb.to_string(), "GET");
//! ```

pub mod error;
pub mod method;
pub mod package;
pub mod param;
pub mod prelude;
pub mod status;
pub mod types;

pub use error::DefinitionError;
pub use method::{Method, Receiver, RestMethod};
pub use package::{Client, Package, TypeDecl};
pub use param::{Collection, Kind, Param};
pub use status::{DEFAULT_STATUS_KEY, ErrorCtor, Errors, Literal};
pub use types::{ERROR_TYPE_NAME, Field, Type};
