//! Scalar-to-string conversion.

use clientsynth_define::Type;

use crate::errors::SynthError;
use crate::ir::{Expr, ScalarFormat};

/// Identifier of the integer scalar type.
pub const INTEGER_TYPE: &str = "int";
/// Identifier of the 64-bit float scalar type.
pub const FLOAT_TYPE: &str = "float64";
/// Identifier of the boolean scalar type.
pub const BOOL_TYPE: &str = "bool";

/// The conversion a scalar identifier needs, or `None` if its values are
/// already strings.
pub fn scalar_format(name: &str) -> Option<ScalarFormat> {
    match name {
        INTEGER_TYPE => Some(ScalarFormat::Integer),
        FLOAT_TYPE => Some(ScalarFormat::Float),
        BOOL_TYPE => Some(ScalarFormat::Bool),
        _ => None,
    }
}

/// Returns an expression producing `value`'s string form.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::Type;
/// use clientsynth_gen::ir::{Expr, ScalarFormat};
/// use clientsynth_gen::synth::scalar::stringify;
///
/// let limit = stringify(&Type::ident("int"), Expr::var("limit")).unwrap();
/// assert_eq!(limit, Expr::var("limit").stringify(ScalarFormat::Integer));
///
/// let name = stringify(&Type::ident("string"), Expr::var("name")).unwrap();
/// assert_eq!(name, Expr::var("name"));
/// ```
///
/// ## Errors
///
/// Returns [`SynthError::NonScalarStringify`] for non-identifier types.
pub fn stringify(ty: &Type, value: Expr) -> Result<Expr, SynthError> {
    let Type::Ident { name, .. } = ty else {
        return Err(SynthError::NonScalarStringify { ty: ty.to_string() });
    };

    Ok(match scalar_format(name) {
        Some(format) => value.stringify(format),
        None => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_and_bool_formats() {
        assert_eq!(
            stringify(&Type::ident("float64"), Expr::var("ratio")).unwrap(),
            Expr::var("ratio").stringify(ScalarFormat::Float)
        );
        assert_eq!(
            stringify(&Type::ident("bool"), Expr::var("all")).unwrap(),
            Expr::var("all").stringify(ScalarFormat::Bool)
        );
    }

    #[test]
    fn named_string_types_pass_through() {
        let value = stringify(&Type::ident("WidgetKind"), Expr::var("kind")).unwrap();
        assert_eq!(value, Expr::var("kind"));
    }

    #[test]
    fn non_identifier_is_a_defect() {
        let err = stringify(&Type::slice(Type::ident("int")), Expr::var("ids")).unwrap_err();
        assert!(matches!(err, SynthError::NonScalarStringify { ref ty } if ty == "[int]"));

        let err = stringify(&Type::pointer(Type::ident("int")), Expr::var("n")).unwrap_err();
        assert!(matches!(err, SynthError::NonScalarStringify { .. }));
    }
}
