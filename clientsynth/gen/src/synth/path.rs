//! Request path construction.

use clientsynth_define::Param;
use tracing::warn;

use super::BodyContext;
use super::scalar::stringify;
use crate::errors::SynthError;
use crate::ir::{Expr, Stmt};
use crate::parser::extract_path_params;

/// Checks that `params` fill the template's substitution slots one-to-one.
///
/// Returns the slot names in template order.
///
/// ## Errors
///
/// Returns [`SynthError::PathSlotMismatch`] when the counts differ.
pub fn check_slots<'t>(template: &'t str, params: &[&Param]) -> Result<Vec<&'t str>, SynthError> {
    let slots = extract_path_params(template);
    if slots.len() != params.len() {
        return Err(SynthError::PathSlotMismatch {
            template: template.to_string(),
            slots: slots.len(),
            params: params.len(),
        });
    }
    Ok(slots)
}

/// Synthesizes the statements binding the request path local.
///
/// Without path parameters the template is used verbatim. Otherwise each
/// parameter is marshaled or stringified and substituted positionally.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{Kind, Param, Type};
/// use clientsynth_gen::config::Naming;
/// use clientsynth_gen::ir::{Expr, Stmt};
/// use clientsynth_gen::synth::BodyContext;
/// use clientsynth_gen::synth::path::synthesize_path;
/// use clientsynth_gen::synth::shape::ReturnShape;
///
/// let naming = Naming::default();
/// let ctx = BodyContext::new(&naming, &ReturnShape::ErrorOnly);
/// let id = Param::new("id", Kind::Path, Type::ident("string"));
///
/// let stmts = synthesize_path(&ctx, "/widgets/{id}", &[&id]).unwrap();
/// assert_eq!(
///     stmts,
///     vec![Stmt::Let {
///         name: "p".into(),
///         value: Expr::Format {
///             template: "/widgets/{id}".into(),
///             args: vec![Expr::var("id")],
///         },
///     }]
/// );
/// ```
///
/// ## Errors
///
/// Returns a [`SynthError`] if the parameters do not match the template's
/// slots or a parameter type cannot be stringified.
pub fn synthesize_path(
    ctx: &BodyContext<'_>,
    template: &str,
    params: &[&Param],
) -> Result<Vec<Stmt>, SynthError> {
    let slots = check_slots(template, params)?;
    let path = ctx.naming.path.clone();

    if params.is_empty() {
        return Ok(vec![Stmt::Let {
            name: path,
            value: Expr::str(template),
        }]);
    }

    let mut stmts = Vec::new();
    let mut args = Vec::with_capacity(params.len());
    for (slot, param) in slots.iter().zip(params) {
        if *slot != param.wire_name() {
            warn!(
                template,
                slot,
                param = param.wire_name(),
                "path slot name differs from parameter; substituting by position"
            );
        }

        if param.ty.supports_marshal() {
            let bytes = ctx.naming.bytes_for(&param.arg);
            stmts.push(ctx.marshal(&bytes, Expr::var(&param.arg)));
            stmts.push(ctx.return_if_err());
            args.push(Expr::var(bytes).bytes_to_string());
        } else {
            args.push(stringify(&param.ty, Expr::var(&param.arg))?);
        }
    }

    stmts.push(Stmt::Let {
        name: path,
        value: Expr::Format {
            template: template.to_string(),
            args,
        },
    });
    Ok(stmts)
}
