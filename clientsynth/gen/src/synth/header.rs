//! Header assignments on the constructed request.

use clientsynth_define::{Collection, Param};

use super::BodyContext;
use super::encode::encode_value;
use crate::errors::SynthError;
use crate::ir::{Expr, Stmt};

/// Synthesizes header assignments for `params`, in declaration order.
///
/// ## Errors
///
/// Returns [`SynthError::UnsupportedCollection`] for multi-valued headers
/// and [`SynthError::NonScalarStringify`] for values that cannot be
/// converted to strings.
pub fn synthesize_headers(
    ctx: &BodyContext<'_>,
    params: &[&Param],
) -> Result<Vec<Stmt>, SynthError> {
    let mut stmts = Vec::new();
    for param in params {
        if param.collection != Collection::Single {
            return Err(SynthError::UnsupportedCollection {
                arg: param.arg.clone(),
                kind: param.kind,
                collection: param.collection,
            });
        }

        let request = ctx.naming.request.clone();
        let key = param.wire_name().to_string();
        stmts.extend(encode_value(
            ctx,
            &param.ty,
            Expr::var(&param.arg),
            &ctx.naming.bytes_for(&param.arg),
            |value| Stmt::HeaderSet {
                request,
                key,
                value,
            },
        )?);
    }
    Ok(stmts)
}
