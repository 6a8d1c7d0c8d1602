//! Status-code to error-constructor mappings.
//!
//! A method may map specific HTTP status codes to typed errors, plus an
//! optional default used when no specific code matches. API-description
//! parsers commonly produce a sparse map with a sentinel key
//! ([`DEFAULT_STATUS_KEY`]) for the default; [`Errors::from_sparse`] converts
//! that form into the two-part [`Errors`] structure. Package files may use
//! either form: deserialization accepts both and always serializes the
//! two-part one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::types::Type;

/// Sentinel key denoting the default constructor in sparse mappings.
pub const DEFAULT_STATUS_KEY: i32 = -1;

/// A literal construction argument for an error constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
        }
    }
}

/// A reference to an error constructor.
///
/// Two constructors are equal when they build the same error type with the
/// same arguments.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{ErrorCtor, Literal, Type};
///
/// let a = ErrorCtor::new(Type::pointer(Type::ident("NotFound")));
/// let b = ErrorCtor::new(Type::pointer(Type::ident("NotFound")));
/// assert_eq!(a, b);
///
/// let c = ErrorCtor::new(Type::pointer(Type::ident("NotFound")))
///     .with_arg(Literal::Str("gone".into()));
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCtor {
    /// The error type being constructed.
    #[serde(rename = "type")]
    pub ty: Type,
    /// Ordered construction arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Literal>,
}

impl ErrorCtor {
    /// Creates a constructor with no arguments.
    pub fn new(ty: Type) -> Self {
        Self { ty, args: vec![] }
    }

    /// Appends a construction argument.
    pub fn with_arg(mut self, arg: Literal) -> Self {
        self.args.push(arg);
        self
    }
}

impl fmt::Display for ErrorCtor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "new {}(", self.ty)?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Status-code to error-constructor mapping for one method.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{ErrorCtor, Errors, Type};
///
/// let not_found = ErrorCtor::new(Type::pointer(Type::ident("NotFound")));
/// let errors = Errors::default()
///     .with_code(404, not_found.clone())
///     .with_default(ErrorCtor::new(Type::pointer(Type::ident("ApiError"))));
///
/// assert!(!errors.is_empty());
/// assert_eq!(errors.codes.get(&404), Some(&not_found));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ErrorsRepr")]
pub struct Errors {
    /// Constructors for specific status codes, ordered by code.
    #[serde(default)]
    pub codes: BTreeMap<u16, ErrorCtor>,
    /// Fallback constructor used when no specific code matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ErrorCtor>,
}

impl Errors {
    /// Returns `true` when neither codes nor a default are present.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty() && self.default.is_none()
    }

    /// Adds a constructor for a specific status code.
    pub fn with_code(mut self, code: u16, ctor: ErrorCtor) -> Self {
        self.codes.insert(code, ctor);
        self
    }

    /// Sets the fallback constructor.
    pub fn with_default(mut self, ctor: ErrorCtor) -> Self {
        self.default = Some(ctor);
        self
    }

    /// Converts a sparse mapping keyed by status code, where
    /// [`DEFAULT_STATUS_KEY`] denotes the default constructor.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use clientsynth_define::{ErrorCtor, Errors, Type};
    ///
    /// let ctor = ErrorCtor::new(Type::ident("ApiError"));
    /// let sparse = BTreeMap::from([(-1, ctor.clone()), (500, ctor.clone())]);
    ///
    /// let errors = Errors::from_sparse(sparse).unwrap();
    /// assert_eq!(errors.default, Some(ctor));
    /// assert_eq!(errors.codes.len(), 1);
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`DefinitionError::InvalidStatusCode`] for keys that are
    /// neither the sentinel nor a valid `u16` status code.
    pub fn from_sparse(sparse: BTreeMap<i32, ErrorCtor>) -> Result<Self, DefinitionError> {
        let mut errors = Self::default();
        for (key, ctor) in sparse {
            if key == DEFAULT_STATUS_KEY {
                errors.default = Some(ctor);
                continue;
            }
            errors.codes.insert(status_code(key)?, ctor);
        }
        Ok(errors)
    }
}

impl TryFrom<BTreeMap<i32, ErrorCtor>> for Errors {
    type Error = DefinitionError;

    fn try_from(value: BTreeMap<i32, ErrorCtor>) -> Result<Self, Self::Error> {
        Self::from_sparse(value)
    }
}

/// The two-part form as it appears in package files.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TwoPartErrors {
    #[serde(default)]
    codes: BTreeMap<String, ErrorCtor>,
    #[serde(default)]
    default: Option<ErrorCtor>,
}

/// Either accepted on-disk form of [`Errors`].
///
/// Keys are read as strings: buffered untagged content cannot hand map keys
/// to integer deserializers.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorsRepr {
    TwoPart(TwoPartErrors),
    Sparse(BTreeMap<String, ErrorCtor>),
}

impl TryFrom<ErrorsRepr> for Errors {
    type Error = DefinitionError;

    fn try_from(repr: ErrorsRepr) -> Result<Self, Self::Error> {
        match repr {
            ErrorsRepr::TwoPart(TwoPartErrors { codes, default }) => {
                let codes = codes
                    .into_iter()
                    .map(|(key, ctor)| -> Result<_, DefinitionError> {
                        Ok((status_code(parse_status_key(&key)?)?, ctor))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Self { codes, default })
            }
            ErrorsRepr::Sparse(sparse) => {
                let sparse = sparse
                    .into_iter()
                    .map(|(key, ctor)| -> Result<_, DefinitionError> {
                        Ok((parse_status_key(&key)?, ctor))
                    })
                    .collect::<Result<_, _>>()?;
                Self::from_sparse(sparse)
            }
        }
    }
}

fn parse_status_key(key: &str) -> Result<i32, DefinitionError> {
    key.trim()
        .parse()
        .map_err(|_| DefinitionError::InvalidStatusKey {
            key: key.to_string(),
        })
}

fn status_code(key: i32) -> Result<u16, DefinitionError> {
    u16::try_from(key).map_err(|_| DefinitionError::InvalidStatusCode { code: key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctor(name: &str) -> ErrorCtor {
        ErrorCtor::new(Type::pointer(Type::ident(name)))
    }

    #[test]
    fn empty_mapping() {
        assert!(Errors::default().is_empty());
        assert!(!Errors::default().with_default(ctor("E")).is_empty());
    }

    #[test]
    fn sparse_sentinel_becomes_default() {
        let sparse = BTreeMap::from([(-1, ctor("Fallback")), (404, ctor("NotFound"))]);
        let errors = Errors::from_sparse(sparse).unwrap();

        assert_eq!(errors.default, Some(ctor("Fallback")));
        assert_eq!(errors.codes.keys().copied().collect::<Vec<_>>(), vec![404]);
    }

    #[test]
    fn sparse_rejects_other_negative_keys() {
        let sparse = BTreeMap::from([(-2, ctor("Broken"))]);
        let err = Errors::from_sparse(sparse).unwrap_err();
        assert!(matches!(err, DefinitionError::InvalidStatusCode { code: -2 }));
    }

    #[test]
    fn sparse_rejects_out_of_range_keys() {
        let sparse = BTreeMap::from([(70_000, ctor("Broken"))]);
        assert!(Errors::try_from(sparse).is_err());
    }

    #[test]
    fn constructor_equality_includes_arguments() {
        let plain = ctor("Conflict");
        let with_arg = ctor("Conflict").with_arg(Literal::Int(2));
        assert_ne!(plain, with_arg);
        assert_eq!(with_arg, ctor("Conflict").with_arg(Literal::Int(2)));
    }

    #[test]
    fn deserialize_numeric_code_keys() {
        let errors: Errors = serde_json::from_str(
            r#"{"codes":{"404":{"type":{"ident":{"name":"NotFound"}}}},"default":{"type":{"ident":{"name":"ApiError"}},"args":["x",1,true]}}"#,
        )
        .unwrap();

        assert_eq!(errors.codes.len(), 1);
        let default = errors.default.unwrap();
        assert_eq!(
            default.args,
            vec![
                Literal::Str("x".into()),
                Literal::Int(1),
                Literal::Bool(true)
            ]
        );
    }

    #[test]
    fn deserialize_sparse_form() {
        let errors: Errors = serde_json::from_str(
            r#"{"-1":{"type":{"ident":{"name":"ApiError"}}},"409":{"type":{"ident":{"name":"Conflict"}}}}"#,
        )
        .unwrap();

        assert_eq!(errors.default, Some(ErrorCtor::new(Type::ident("ApiError"))));
        assert_eq!(errors.codes.keys().copied().collect::<Vec<_>>(), vec![409]);
    }

    #[test]
    fn deserialize_empty_mapping() {
        let errors: Errors = serde_json::from_str("{}").unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn deserialize_rejects_bad_keys() {
        let negative = serde_json::from_str::<Errors>(
            r#"{"-2":{"type":{"ident":{"name":"Broken"}}}}"#,
        );
        assert!(negative.unwrap_err().to_string().contains("-2"));

        let two_part = serde_json::from_str::<Errors>(
            r#"{"codes":{"-1":{"type":{"ident":{"name":"Broken"}}}}}"#,
        );
        assert!(two_part.is_err());

        let word = serde_json::from_str::<Errors>(
            r#"{"oops":{"type":{"ident":{"name":"Broken"}}}}"#,
        );
        assert!(word.unwrap_err().to_string().contains("oops"));
    }

    #[test]
    fn serializes_two_part_form() {
        let errors = Errors::default()
            .with_code(404, ctor("NotFound"))
            .with_default(ctor("ApiError"));
        let json = serde_json::to_value(&errors).unwrap();

        assert!(json["codes"]["404"].is_object());
        assert!(json["default"].is_object());
        assert_eq!(serde_json::from_value::<Errors>(json).unwrap(), errors);
    }

    #[test]
    fn display_constructor() {
        let ctor = ctor("Conflict").with_arg(Literal::Str("dup".into()));
        assert_eq!(ctor.to_string(), r#"new *Conflict("dup")"#);
    }
}
