//! Method assembly.
//!
//! Orchestrates the component synthesizers into one phase-ordered body:
//!
//! ```text
//! State -> Path -> Query -> Options -> Request -> Headers -> Dispatch -> Return
//! ```
//!
//! Every failure inside the body (marshal, request construction, dispatch)
//! becomes an immediate return of the shape's error values.

use clientsynth_define::{Kind, Method, Param, Type, TypeDecl};
use tracing::debug;

use super::BodyContext;
use super::header::synthesize_headers;
use super::options::{merge_options, resolve_option_fields};
use super::path::synthesize_path;
use super::query::synthesize_query;
use super::selector::build_error_selector;
use super::shape::ReturnShape;
use crate::config::Naming;
use crate::errors::SynthError;
use crate::ir::{Expr, MethodBody, Phase, Signature, SignatureParam, Stmt, SynthesizedMethod};
use crate::validation::validate_method;

/// A method's parameters grouped by transmission location.
#[derive(Debug, Default)]
struct Classified<'m> {
    path: Vec<&'m Param>,
    query: Vec<&'m Param>,
    header: Vec<&'m Param>,
    body: Option<&'m Param>,
    opts: Option<&'m Param>,
}

impl<'m> Classified<'m> {
    fn from_params(params: &'m [Param]) -> Self {
        let mut classified = Self::default();
        for param in params {
            match param.kind {
                Kind::Path => classified.path.push(param),
                Kind::Query => classified.query.push(param),
                Kind::Header => classified.header.push(param),
                Kind::Body => classified.body = Some(param),
                Kind::Opts => classified.opts = Some(param),
            }
        }
        classified
    }
}

/// Synthesizes the body of `method`.
///
/// `types` resolves named options structs.
///
/// ## Errors
///
/// Returns the first [`SynthError`] found while validating the method or
/// synthesizing any of its phases.
pub fn synthesize_body(
    method: &Method,
    types: &[TypeDecl],
    naming: &Naming,
) -> Result<MethodBody, SynthError> {
    validate_method(method, naming)?;

    let params = Classified::from_params(&method.params);
    let shape = ReturnShape::from_returns(&method.returns)?;
    let ctx = BodyContext::new(naming, &shape);
    let mut body = MethodBody::default();

    body.push(Phase::State, shape.prologue(naming));
    body.push(
        Phase::Path,
        synthesize_path(&ctx, &method.path, &params.path)?,
    );
    body.push(Phase::Query, synthesize_query(&ctx, &params.query)?);

    let merge = match params.opts {
        Some(opts) => {
            let fields = resolve_option_fields(opts, types)?;
            merge_options(&ctx, &opts.arg, fields, !params.query.is_empty())?
        }
        None => merge_options(&ctx, "", &[], !params.query.is_empty())?,
    };
    body.push(Phase::Options, merge.stmts);

    let backend = Expr::field(Expr::var(&method.receiver.id), &naming.backend);
    body.push(
        Phase::Request,
        vec![
            Stmt::NewRequest {
                request: naming.request.clone(),
                backend: backend.clone(),
                verb: method.verb,
                path: Expr::var(&naming.path),
                query: merge.query,
                body: params
                    .body
                    .map_or(Expr::Null, |param| Expr::var(&param.arg)),
                err: ctx.err.clone(),
            },
            ctx.return_if_err(),
        ],
    );

    body.push(Phase::Headers, synthesize_headers(&ctx, &params.header)?);

    let mut dispatch: Vec<Stmt> = shape.response_decl(naming).into_iter().collect();
    dispatch.push(Stmt::Dispatch {
        backend,
        context: Expr::var(&naming.context),
        request: naming.request.clone(),
        target: shape.bind_target(naming),
        classifier: build_error_selector(&method.errors),
        err: ctx.err.clone(),
    });
    // Iterators surface dispatch failures through their own error member.
    if !shape.is_iterator() {
        dispatch.push(ctx.return_if_err());
    }
    body.push(Phase::Dispatch, dispatch);

    body.push(
        Phase::Return,
        vec![Stmt::Return {
            values: shape.success_return(naming),
        }],
    );

    Ok(body)
}

/// Builds the generated signature of `method`: the context argument first,
/// then every parameter in declaration order.
///
/// ## Errors
///
/// Returns a [`SynthError`] if the return list has no supported shape.
pub fn synthesize_signature(method: &Method, naming: &Naming) -> Result<Signature, SynthError> {
    let shape = ReturnShape::from_returns(&method.returns)?;

    let mut params = vec![SignatureParam {
        name: naming.context.clone(),
        ty: Type::ident(&naming.context_type),
    }];
    params.extend(method.params.iter().map(|param| SignatureParam {
        name: param.arg.clone(),
        ty: param.ty.clone(),
    }));

    Ok(Signature {
        receiver: method.receiver.clone(),
        name: method.name.clone(),
        params,
        results: shape.results(),
    })
}

/// Synthesizes a complete method of `client`.
///
/// ## Examples
///
/// ```
/// use clientsynth_define::{Kind, Method, Param, Receiver, RestMethod, Type};
/// use clientsynth_gen::config::Naming;
/// use clientsynth_gen::ir::Phase;
/// use clientsynth_gen::synth::method::synthesize_method;
///
/// let method = Method::new("Get", Receiver::new("c", "WidgetsClient"), RestMethod::Get, "/widgets/{id}")
///     .with_param(Param::new("id", Kind::Path, Type::ident("string")))
///     .with_return(Type::pointer(Type::ident("Widget")));
///
/// let synthesized = synthesize_method("WidgetsClient", &method, &[], &Naming::default()).unwrap();
/// assert_eq!(
///     synthesized.body.phases(),
///     vec![Phase::Path, Phase::Request, Phase::Dispatch, Phase::Return]
/// );
/// ```
///
/// ## Errors
///
/// Returns [`SynthError::InMethod`] wrapping the first defect found.
pub fn synthesize_method(
    client: &str,
    method: &Method,
    types: &[TypeDecl],
    naming: &Naming,
) -> Result<SynthesizedMethod, SynthError> {
    let synthesized = synthesize_signature(method, naming).and_then(|signature| {
        Ok(SynthesizedMethod {
            client: client.to_string(),
            doc: method.doc.clone(),
            signature,
            body: synthesize_body(method, types, naming)?,
        })
    });

    let synthesized = synthesized.map_err(|e| e.in_method(client, &method.name))?;
    debug!(
        client,
        method = %method.name,
        sections = synthesized.body.sections.len(),
        statements = synthesized.body.statements().count(),
        "synthesized method body"
    );
    Ok(synthesized)
}
