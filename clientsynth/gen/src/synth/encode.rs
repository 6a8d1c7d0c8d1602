//! Shared value encoding for query, options and header synthesis.

use clientsynth_define::{Collection, Type};

use super::BodyContext;
use super::scalar::stringify;
use crate::errors::SynthError;
use crate::ir::{Expr, Stmt};

/// Encodes one value as a string and hands it to `emit`.
///
/// Marshal-capable types are marshaled into `bytes` first, with an early
/// return on failure. Everything else goes through the scalar stringifier.
pub(crate) fn encode_value<F>(
    ctx: &BodyContext<'_>,
    ty: &Type,
    value: Expr,
    bytes: &str,
    emit: F,
) -> Result<Vec<Stmt>, SynthError>
where
    F: FnOnce(Expr) -> Stmt,
{
    if ty.supports_marshal() {
        return Ok(vec![
            ctx.marshal(bytes, value),
            ctx.return_if_err(),
            emit(Expr::var(bytes).bytes_to_string()),
        ]);
    }
    Ok(vec![emit(stringify(ty, value)?)])
}

/// A query-string entry to encode.
pub(crate) struct QueryEntry<'e> {
    /// Argument or field name, for diagnostics.
    pub name: &'e str,
    /// Wire name.
    pub key: &'e str,
    /// Value type (already unwrapped for optional fields).
    pub ty: &'e Type,
    /// Single value or repeated entries.
    pub collection: Collection,
    /// Expression producing the value.
    pub value: Expr,
    /// Bytes local for single marshal-capable values.
    pub bytes: String,
}

/// Encodes a query entry: `set` for single values, a loop of `add` for
/// multi-valued ones.
pub(crate) fn encode_query_entry(
    ctx: &BodyContext<'_>,
    entry: QueryEntry<'_>,
) -> Result<Vec<Stmt>, SynthError> {
    let query = ctx.naming.query.clone();
    let key = entry.key.to_string();

    match entry.collection {
        Collection::Single => encode_value(ctx, entry.ty, entry.value, &entry.bytes, |value| {
            Stmt::QuerySet { query, key, value }
        }),
        Collection::Multi => {
            let Type::Slice(element) = entry.ty else {
                return Err(SynthError::CollectionTypeMismatch {
                    arg: entry.name.to_string(),
                    ty: entry.ty.to_string(),
                });
            };
            let item = &ctx.naming.item;
            let body = encode_value(
                ctx,
                element,
                Expr::var(item),
                &ctx.naming.item_bytes,
                |value| Stmt::QueryAdd { query, key, value },
            )?;
            Ok(vec![Stmt::ForEach {
                item: item.clone(),
                seq: entry.value,
                body,
            }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{error_only_context, naming};

    #[test]
    fn marshal_value_checks_error_before_emitting() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let stmts = encode_value(
            &ctx,
            &Type::marshal_ident("Date"),
            Expr::var("since"),
            "sinceBytes",
            |value| Stmt::HeaderSet {
                request: "req".into(),
                key: "Since".into(),
                value,
            },
        )
        .unwrap();

        assert_eq!(stmts.len(), 3);
        assert!(matches!(&stmts[0], Stmt::Marshal { bytes, .. } if bytes == "sinceBytes"));
        assert!(matches!(&stmts[1], Stmt::ReturnIfErr { .. }));
        assert!(matches!(
            &stmts[2],
            Stmt::HeaderSet { value: Expr::BytesToString { .. }, .. }
        ));
    }

    #[test]
    fn multi_entry_requires_slice() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let ty = Type::ident("string");
        let err = encode_query_entry(
            &ctx,
            QueryEntry {
                name: "tags",
                key: "tags",
                ty: &ty,
                collection: Collection::Multi,
                value: Expr::var("tags"),
                bytes: "tagsBytes".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, SynthError::CollectionTypeMismatch { ref arg, .. } if arg == "tags"));
    }

    #[test]
    fn multi_marshal_elements_use_item_bytes() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let ty = Type::slice(Type::marshal_ident("Date"));
        let stmts = encode_query_entry(
            &ctx,
            QueryEntry {
                name: "days",
                key: "day",
                ty: &ty,
                collection: Collection::Multi,
                value: Expr::var("days"),
                bytes: "daysBytes".into(),
            },
        )
        .unwrap();

        let Stmt::ForEach { item, body, .. } = &stmts[0] else {
            panic!("expected a loop, got {stmts:?}");
        };
        assert_eq!(item, "v");
        assert!(matches!(&body[0], Stmt::Marshal { bytes, value, .. } if bytes == "b" && *value == Expr::var("v")));
        assert!(matches!(&body[2], Stmt::QueryAdd { key, .. } if key == "day"));
    }
}
