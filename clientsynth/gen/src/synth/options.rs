//! Optional query parameters carried by an options struct.
//!
//! An `Opts` parameter bundles optional fields into one struct argument.
//! Every field is an optional wrapper and is only transmitted when present;
//! the struct itself may also be null. The merged statements look like:
//!
//! ```text
//! var q: query              (only when no required query params exist)
//! if opts != null {
//!     q = new query          (same condition)
//!     if opts.limit != null {
//!         q.set("limit", integer_to_string(*opts.limit))
//!     }
//! }
//! ```

use clientsynth_define::{Field, Kind, Param, Type, TypeDecl};

use super::BodyContext;
use super::encode::{QueryEntry, encode_query_entry};
use crate::errors::SynthError;
use crate::ir::{Expr, Stmt};

/// Resolves the fields of the struct an options parameter refers to.
///
/// Inline struct types are used directly and named types are looked up in
/// `types`. Either may sit behind a pointer.
///
/// ## Errors
///
/// Returns [`SynthError::UnresolvedOptions`] for an undeclared name and
/// [`SynthError::OptionsNotStruct`] when the type is not a struct.
pub fn resolve_option_fields<'a>(
    param: &'a Param,
    types: &'a [TypeDecl],
) -> Result<&'a [Field], SynthError> {
    if let Type::Struct(fields) = param.ty.pointee().unwrap_or(&param.ty) {
        return Ok(fields);
    }

    let not_struct = |ty: &Type| SynthError::OptionsNotStruct {
        arg: param.arg.clone(),
        ty: ty.to_string(),
    };

    let name = param.ty.name().ok_or_else(|| not_struct(&param.ty))?;
    let decl = types
        .iter()
        .find(|decl| decl.name == name)
        .ok_or_else(|| SynthError::UnresolvedOptions {
            name: name.to_string(),
        })?;

    match &decl.ty {
        Type::Struct(fields) => Ok(fields),
        other => Err(not_struct(other)),
    }
}

/// The result of merging optional fields into the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsMerge {
    /// Statements to emit, possibly empty.
    pub stmts: Vec<Stmt>,
    /// The query argument for request construction: the collection, or null
    /// when no collection exists.
    pub query: Expr,
}

/// Merges an options struct's optional query fields into the query collection.
///
/// `query_initialized` tells whether required query parameters already
/// created the collection.
///
/// ## Errors
///
/// Returns a [`SynthError`] for non-query fields, fields that are not
/// optional wrappers, or values that cannot be encoded.
pub fn merge_options(
    ctx: &BodyContext<'_>,
    opts_arg: &str,
    fields: &[Field],
    query_initialized: bool,
) -> Result<OptionsMerge, SynthError> {
    let query = ctx.naming.query.clone();

    if fields.is_empty() {
        let query = if query_initialized {
            Expr::var(query)
        } else {
            Expr::Null
        };
        return Ok(OptionsMerge {
            stmts: vec![],
            query,
        });
    }

    let opts = Expr::var(opts_arg);
    let mut stmts = Vec::new();
    let mut guarded = Vec::new();
    if !query_initialized {
        stmts.push(Stmt::DeclareQuery {
            name: query.clone(),
        });
        guarded.push(Stmt::InitQuery {
            name: query.clone(),
        });
    }

    for field in fields {
        if field.kind != Kind::Query {
            return Err(SynthError::UnhandledOptionalLocation {
                field: field.name.clone(),
                kind: field.kind,
            });
        }
        let Type::Pointer(value_ty) = &field.ty else {
            return Err(SynthError::OptionalFieldNotPointer {
                field: field.name.clone(),
                ty: field.ty.to_string(),
            });
        };

        let present = Expr::field(opts.clone(), &field.name);
        let body = encode_query_entry(
            ctx,
            QueryEntry {
                name: &field.name,
                key: field.wire_name(),
                ty: &**value_ty,
                collection: field.collection,
                value: present.clone().deref(),
                bytes: ctx.naming.item_bytes.clone(),
            },
        )?;
        guarded.push(Stmt::IfNotNull {
            value: present,
            body,
        });
    }

    stmts.push(Stmt::IfNotNull {
        value: opts,
        body: guarded,
    });
    Ok(OptionsMerge {
        stmts,
        query: Expr::var(query),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ScalarFormat;
    use crate::test_utils::{error_only_context, list_opts_decl, naming};

    #[test]
    fn no_fields_and_no_query_passes_null() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let merge = merge_options(&ctx, "opts", &[], false).unwrap();

        assert!(merge.stmts.is_empty());
        assert_eq!(merge.query, Expr::Null);
    }

    #[test]
    fn no_fields_with_query_passes_collection() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let merge = merge_options(&ctx, "opts", &[], true).unwrap();

        assert!(merge.stmts.is_empty());
        assert_eq!(merge.query, Expr::var("q"));
    }

    #[test]
    fn declares_collection_when_absent() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let fields = vec![Field::optional_query("limit", Type::ident("int"))];
        let merge = merge_options(&ctx, "opts", &fields, false).unwrap();

        assert_eq!(merge.stmts.len(), 2);
        assert_eq!(merge.stmts[0], Stmt::DeclareQuery { name: "q".into() });
        let Stmt::IfNotNull { value, body } = &merge.stmts[1] else {
            panic!("expected the options guard");
        };
        assert_eq!(value, &Expr::var("opts"));
        assert_eq!(body[0], Stmt::InitQuery { name: "q".into() });
        assert_eq!(
            body[1],
            Stmt::IfNotNull {
                value: Expr::field(Expr::var("opts"), "limit"),
                body: vec![Stmt::QuerySet {
                    query: "q".into(),
                    key: "limit".into(),
                    value: Expr::field(Expr::var("opts"), "limit")
                        .deref()
                        .stringify(ScalarFormat::Integer),
                }],
            }
        );
    }

    #[test]
    fn reuses_existing_collection() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let fields = vec![Field::optional_query("cursor", Type::ident("string"))];
        let merge = merge_options(&ctx, "opts", &fields, true).unwrap();

        assert_eq!(merge.stmts.len(), 1);
        let Stmt::IfNotNull { body, .. } = &merge.stmts[0] else {
            panic!("expected the options guard");
        };
        assert!(matches!(body[0], Stmt::IfNotNull { .. }));
    }

    #[test]
    fn multi_field_iterates_dereferenced_sequence() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let fields = vec![
            Field::optional_query("labels", Type::slice(Type::ident("string")))
                .with_orig("label")
                .multi(),
        ];
        let merge = merge_options(&ctx, "filter", &fields, true).unwrap();

        let Stmt::IfNotNull { body, .. } = &merge.stmts[0] else {
            panic!("expected the options guard");
        };
        let Stmt::IfNotNull { body: inner, .. } = &body[0] else {
            panic!("expected a presence check");
        };
        assert_eq!(
            inner[0],
            Stmt::ForEach {
                item: "v".into(),
                seq: Expr::field(Expr::var("filter"), "labels").deref(),
                body: vec![Stmt::QueryAdd {
                    query: "q".into(),
                    key: "label".into(),
                    value: Expr::var("v"),
                }],
            }
        );
    }

    #[test]
    fn single_marshal_field_uses_item_bytes() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let fields = vec![Field::optional_query("since", Type::marshal_ident("Date"))];
        let merge = merge_options(&ctx, "opts", &fields, true).unwrap();

        let Stmt::IfNotNull { body, .. } = &merge.stmts[0] else {
            panic!("expected the options guard");
        };
        let Stmt::IfNotNull { body: inner, .. } = &body[0] else {
            panic!("expected a presence check");
        };
        assert!(matches!(&inner[0], Stmt::Marshal { bytes, .. } if bytes == "b"));
    }

    #[test]
    fn header_field_is_a_defect() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let mut field = Field::optional_query("trace", Type::ident("string"));
        field.kind = Kind::Header;

        let err = merge_options(&ctx, "opts", &[field], false).unwrap_err();
        assert!(matches!(
            err,
            SynthError::UnhandledOptionalLocation { kind: Kind::Header, .. }
        ));
    }

    #[test]
    fn non_pointer_field_is_a_defect() {
        let naming = naming();
        let ctx = error_only_context(&naming);
        let mut field = Field::optional_query("limit", Type::ident("int"));
        field.ty = Type::ident("int");

        let err = merge_options(&ctx, "opts", &[field], false).unwrap_err();
        assert!(matches!(err, SynthError::OptionalFieldNotPointer { .. }));
    }

    #[test]
    fn resolves_named_struct_through_pointer() {
        let decl = list_opts_decl();
        let param = Param::new(
            "opts",
            Kind::Opts,
            Type::pointer(Type::ident("ListWidgetsOpts")),
        );

        let fields = resolve_option_fields(&param, std::slice::from_ref(&decl)).unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn resolves_inline_struct() {
        let param = Param::new(
            "opts",
            Kind::Opts,
            Type::Struct(vec![Field::optional_query("limit", Type::ident("int"))]),
        );
        assert_eq!(resolve_option_fields(&param, &[]).unwrap().len(), 1);
    }

    #[test]
    fn resolves_inline_struct_through_pointer() {
        let param = Param::new(
            "opts",
            Kind::Opts,
            Type::pointer(Type::Struct(vec![
                Field::optional_query("limit", Type::ident("int")),
                Field::optional_query("cursor", Type::ident("string")),
            ])),
        );

        let fields = resolve_option_fields(&param, &[]).unwrap();
        let names: Vec<_> = fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "cursor"]);
    }

    #[test]
    fn unresolved_name_is_a_defect() {
        let param = Param::new("opts", Kind::Opts, Type::pointer(Type::ident("Missing")));
        let err = resolve_option_fields(&param, &[]).unwrap_err();
        assert!(matches!(err, SynthError::UnresolvedOptions { ref name } if name == "Missing"));
    }

    #[test]
    fn non_struct_declaration_is_a_defect() {
        let decl = TypeDecl {
            name: "Opts".into(),
            ty: Type::ident("string"),
            doc: String::new(),
        };
        let param = Param::new("opts", Kind::Opts, Type::ident("Opts"));
        let err = resolve_option_fields(&param, std::slice::from_ref(&decl)).unwrap_err();
        assert!(matches!(err, SynthError::OptionsNotStruct { .. }));
    }
}
