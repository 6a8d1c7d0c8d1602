//! Convenient re-exports for building method descriptors.
//!
//! ```
//! use clientsynth_define::prelude::*;
//!
//! let method = Method::new("Delete", Receiver::new("c", "Client"), RestMethod::Delete, "/items/{id}")
//!     .with_param(Param::new("id", Kind::Path, Type::ident("string")));
//! assert_eq!(method.params.len(), 1);
//! ```

pub use crate::error::DefinitionError;
pub use crate::method::{Method, Receiver, RestMethod};
pub use crate::package::{Client, Package, TypeDecl};
pub use crate::param::{Collection, Kind, Param};
pub use crate::status::{ErrorCtor, Errors, Literal};
pub use crate::types::{Field, Type};
