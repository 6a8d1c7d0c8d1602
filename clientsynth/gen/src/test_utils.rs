//! Shared fixtures for unit tests.

use clientsynth_define::prelude::*;

use crate::config::Naming;
use crate::synth::BodyContext;
use crate::synth::shape::ReturnShape;

pub fn naming() -> Naming {
    Naming::default()
}

/// Context for a method returning only an error: failures go to `err` and
/// early returns are `[err]`.
pub fn error_only_context(naming: &Naming) -> BodyContext<'_> {
    BodyContext::new(naming, &ReturnShape::ErrorOnly)
}

pub fn ctor(name: &str) -> ErrorCtor {
    ErrorCtor::new(Type::pointer(Type::ident(name)))
}

fn receiver() -> Receiver {
    Receiver::new("c", "WidgetsClient")
}

/// `GET /widgets/{id}` returning `*Widget`.
pub fn get_widget() -> Method {
    Method::new("Get", receiver(), RestMethod::Get, "/widgets/{id}")
        .with_param(Param::new("id", Kind::Path, Type::ident("string")))
        .with_return(Type::pointer(Type::ident("Widget")))
        .with_doc("Get retrieves a widget.")
}

/// `GET /widgets` with a multi-valued query, an options struct, and an
/// iterator return.
pub fn list_widgets() -> Method {
    Method::new("List", receiver(), RestMethod::Get, "/widgets")
        .with_param(Param::new("tags", Kind::Query, Type::slice(Type::ident("string"))).multi())
        .with_param(Param::new(
            "opts",
            Kind::Opts,
            Type::pointer(Type::ident("ListWidgetsOpts")),
        ))
        .with_return(Type::iterator(Type::pointer(Type::ident("WidgetIter"))))
}

/// `POST /widgets` with a body and a header.
pub fn create_widget() -> Method {
    Method::new("Create", receiver(), RestMethod::Post, "/widgets")
        .with_param(Param::new(
            "widget",
            Kind::Body,
            Type::pointer(Type::ident("Widget")),
        ))
        .with_param(
            Param::new("idempotencyKey", Kind::Header, Type::ident("string"))
                .with_orig("Idempotency-Key"),
        )
        .with_return(Type::pointer(Type::ident("Widget")))
        .with_errors(
            Errors::default()
                .with_code(400, ctor("BadRequest"))
                .with_code(409, ctor("Conflict"))
                .with_default(ctor("ApiError")),
        )
}

/// `DELETE /widgets/{id}` with a marshal-capable id and no value return.
pub fn delete_widget() -> Method {
    Method::new("Delete", receiver(), RestMethod::Delete, "/widgets/{id}")
        .with_param(Param::new("id", Kind::Path, Type::marshal_ident("WidgetID")))
}

pub fn list_opts_decl() -> TypeDecl {
    TypeDecl {
        name: "ListWidgetsOpts".to_string(),
        ty: Type::Struct(vec![
            Field::optional_query("limit", Type::ident("int")),
            Field::optional_query("cursor", Type::ident("string")).with_orig("page_token"),
        ]),
        doc: String::new(),
    }
}

pub fn widgets_package() -> Package {
    Package {
        name: "widgets".to_string(),
        clients: vec![Client {
            name: "WidgetsClient".to_string(),
            doc: "WidgetsClient manages widgets.".to_string(),
            methods: vec![get_widget(), list_widgets(), create_widget(), delete_widget()],
        }],
        types: vec![list_opts_decl()],
    }
}
