//! Required query parameters.

use clientsynth_define::Param;

use super::BodyContext;
use super::encode::{QueryEntry, encode_query_entry};
use crate::errors::SynthError;
use crate::ir::{Expr, Stmt};

/// Synthesizes the query collection for the required query parameters.
///
/// Emits nothing for an empty list; otherwise initializes the collection and
/// encodes each parameter in declaration order.
///
/// ## Errors
///
/// Returns a [`SynthError`] for a multi-valued parameter whose type is not a
/// slice, or a value type that cannot be stringified.
pub fn synthesize_query(
    ctx: &BodyContext<'_>,
    params: &[&Param],
) -> Result<Vec<Stmt>, SynthError> {
    if params.is_empty() {
        return Ok(vec![]);
    }

    let mut stmts = vec![Stmt::InitQuery {
        name: ctx.naming.query.clone(),
    }];
    for param in params {
        stmts.extend(encode_query_entry(
            ctx,
            QueryEntry {
                name: &param.arg,
                key: param.wire_name(),
                ty: &param.ty,
                collection: param.collection,
                value: Expr::var(&param.arg),
                bytes: ctx.naming.bytes_for(&param.arg),
            },
        )?);
    }
    Ok(stmts)
}
