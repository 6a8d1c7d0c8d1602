//! Intermediate representation of a synthesized method body.
//!
//! The synthesizer never emits source text. Each component returns plain IR
//! values that an external serializer translates into a procedure body:
//!
//! - [`Expr`] - Value-producing expressions (identifiers, field access, conversions)
//! - [`Stmt`] - Instructions (marshal, query/header assignment, request, dispatch, return)
//! - [`ErrorSelector`] - The status-code classification passed to dispatch
//! - [`MethodBody`] - Phase-tagged [`Section`]s in emission order
//! - [`SynthesizedMethod`] - A body plus its [`Signature`] and documentation
//!
//! All IR types serialize with serde; the `listing` submodule renders them as
//! deterministic, human-readable text.

mod listing;

use clientsynth_define::{ErrorCtor, Literal, Receiver, RestMethod, Type};
use serde::Serialize;
use strum::{Display, EnumIter};

/// String conversions the Scalar Stringifier can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScalarFormat {
    /// Base-10 integer conversion.
    Integer,
    /// Shortest round-trippable decimal representation of a 64-bit float.
    Float,
    /// `"true"` / `"false"`.
    Bool,
}

/// A value-producing expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    /// A local variable or argument.
    Var {
        /// Identifier.
        name: String,
    },
    /// Member access.
    Field {
        /// The value holding the member.
        base: Box<Expr>,
        /// Member name.
        name: String,
    },
    /// Dereference of an optional wrapper.
    Deref {
        /// The pointer being dereferenced.
        value: Box<Expr>,
    },
    /// Address of a value.
    AddrOf {
        /// The addressed value.
        value: Box<Expr>,
    },
    /// String literal.
    Str {
        /// Literal contents.
        value: String,
    },
    /// The null value.
    Null,
    /// The zero value of a type.
    Zero {
        /// The type whose zero value is produced.
        ty: Type,
    },
    /// Scalar-to-string conversion.
    Stringify {
        /// Conversion to apply.
        format: ScalarFormat,
        /// Value being converted.
        value: Box<Expr>,
    },
    /// Conversion of marshaled bytes to a string.
    BytesToString {
        /// The marshaled bytes.
        bytes: Box<Expr>,
    },
    /// Positional substitution of `args` into `template`'s slots.
    Format {
        /// Template with substitution slots.
        template: String,
        /// Substituted values, in slot order.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// A local variable or argument.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var { name: name.into() }
    }

    /// Member access on `base`.
    pub fn field(base: Expr, name: impl Into<String>) -> Self {
        Self::Field {
            base: Box::new(base),
            name: name.into(),
        }
    }

    /// A string literal.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    /// Dereferences this expression.
    pub fn deref(self) -> Self {
        Self::Deref {
            value: Box::new(self),
        }
    }

    /// Takes the address of this expression.
    pub fn addr_of(self) -> Self {
        Self::AddrOf {
            value: Box::new(self),
        }
    }

    /// Converts marshaled bytes to a string.
    pub fn bytes_to_string(self) -> Self {
        Self::BytesToString {
            bytes: Box::new(self),
        }
    }

    /// Applies a scalar string conversion.
    pub fn stringify(self, format: ScalarFormat) -> Self {
        Self::Stringify {
            format,
            value: Box::new(self),
        }
    }
}

/// A named field initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInit {
    /// Member name.
    pub name: String,
    /// Initial value.
    pub value: Literal,
}

/// A single instruction of a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    /// Binds a new local.
    Let {
        /// Local name.
        name: String,
        /// Bound value.
        value: Expr,
    },
    /// Declares a zero-initialized local of the given type.
    DeclareVar {
        /// Local name.
        name: String,
        /// Declared type.
        ty: Type,
    },
    /// Declares the iterator state value.
    DeclareIterator {
        /// Local name.
        name: String,
        /// Iterator state type.
        ty: Type,
        /// Initial field values.
        init: Vec<FieldInit>,
    },
    /// Invokes `value`'s text-marshal operation, binding the bytes to
    /// `bytes` and any failure to `err`.
    Marshal {
        /// Local receiving the marshaled bytes.
        bytes: String,
        /// Value being marshaled.
        value: Expr,
        /// Where a failure is stored.
        err: Expr,
    },
    /// Returns `values` immediately when `err` is non-null.
    ReturnIfErr {
        /// The failure being checked.
        err: Expr,
        /// Fully populated return values.
        values: Vec<Expr>,
    },
    /// Declares an uninitialized (null) query collection.
    DeclareQuery {
        /// Local name.
        name: String,
    },
    /// Initializes an empty query collection.
    InitQuery {
        /// Local name.
        name: String,
    },
    /// Replaces every value of `key` in the query collection.
    QuerySet {
        /// Query collection local.
        query: String,
        /// Wire name.
        key: String,
        /// String value.
        value: Expr,
    },
    /// Appends a value for `key` in the query collection.
    QueryAdd {
        /// Query collection local.
        query: String,
        /// Wire name.
        key: String,
        /// String value.
        value: Expr,
    },
    /// Runs `body` once per element of `seq`, binding each to `item`.
    ForEach {
        /// Element binding.
        item: String,
        /// The sequence iterated.
        seq: Expr,
        /// Loop body.
        body: Vec<Stmt>,
    },
    /// Runs `body` only when `value` is non-null.
    IfNotNull {
        /// The value checked.
        value: Expr,
        /// Guarded instructions.
        body: Vec<Stmt>,
    },
    /// Constructs the HTTP request through the backend.
    NewRequest {
        /// Local receiving the request.
        request: String,
        /// The backend capability.
        backend: Expr,
        /// HTTP verb.
        verb: RestMethod,
        /// Request path.
        path: Expr,
        /// Query collection, or null.
        query: Expr,
        /// Body reference, or null.
        body: Expr,
        /// Where a failure is stored.
        err: Expr,
    },
    /// Sets a header on the constructed request.
    HeaderSet {
        /// Request local.
        request: String,
        /// Wire name.
        key: String,
        /// String value.
        value: Expr,
    },
    /// Sends the request through the backend and binds the decoded response.
    Dispatch {
        /// The backend capability.
        backend: Expr,
        /// Request context.
        context: Expr,
        /// Request local.
        request: String,
        /// Where the decoded response is bound, or null to discard it.
        target: Expr,
        /// Status-code classification; `None` passes a null classifier.
        classifier: Option<ErrorSelector>,
        /// Where a failure is stored.
        err: Expr,
    },
    /// Returns from the method.
    Return {
        /// Returned values.
        values: Vec<Expr>,
    },
}

/// One case of a multi-way error selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCase {
    /// Status codes sharing this constructor, ascending.
    pub codes: Vec<u16>,
    /// Constructor returned for these codes.
    pub error: ErrorCtor,
}

/// A status-code to typed-error decision function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "selector", rename_all = "snake_case")]
pub enum ErrorSelector {
    /// Returns `error` for every status code.
    Always {
        /// Constructor returned unconditionally.
        error: ErrorCtor,
    },
    /// Returns `error` when the status equals `code`, null otherwise.
    Single {
        /// Matched status code.
        code: u16,
        /// Constructor returned on a match.
        error: ErrorCtor,
    },
    /// Multi-way decision; `default` (or null) when no case matches.
    Switch {
        /// Cases in ascending code order.
        cases: Vec<ErrorCase>,
        /// Fallback constructor.
        default: Option<ErrorCtor>,
    },
}

/// The position of a [`Section`] in a method body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Return-shape state (iterator declaration).
    State,
    /// Path building.
    Path,
    /// Required query parameters.
    Query,
    /// Optional query parameters from the options struct.
    Options,
    /// Request construction.
    Request,
    /// Header assignment.
    Headers,
    /// Backend dispatch and response binding.
    Dispatch,
    /// Final success return.
    Return,
}

/// Instructions emitted for one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// The phase these instructions belong to.
    pub phase: Phase,
    /// Instructions in emission order.
    pub stmts: Vec<Stmt>,
}

/// A complete method body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodBody {
    /// Non-empty sections in phase order.
    pub sections: Vec<Section>,
}

impl MethodBody {
    /// Appends a section, skipping empty instruction lists.
    pub fn push(&mut self, phase: Phase, stmts: Vec<Stmt>) {
        if !stmts.is_empty() {
            self.sections.push(Section { phase, stmts });
        }
    }

    /// The section for `phase`, if any instructions were emitted for it.
    pub fn section(&self, phase: Phase) -> Option<&Section> {
        self.sections.iter().find(|section| section.phase == phase)
    }

    /// Phases present in the body, in emission order.
    pub fn phases(&self) -> Vec<Phase> {
        self.sections.iter().map(|section| section.phase).collect()
    }

    /// All top-level instructions, flattened in emission order.
    pub fn statements(&self) -> impl Iterator<Item = &Stmt> + '_ {
        self.sections.iter().flat_map(|section| section.stmts.iter())
    }
}

/// A parameter of the generated method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureParam {
    /// Argument identifier.
    pub name: String,
    /// Argument type.
    #[serde(rename = "type")]
    pub ty: Type,
}

/// The generated method's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// The client value the method is attached to.
    pub receiver: Receiver,
    /// Method name.
    pub name: String,
    /// Context first, then the method's parameters in declaration order.
    pub params: Vec<SignatureParam>,
    /// Result types, including the error slot where one exists.
    pub results: Vec<Type>,
}

/// One synthesized method, ready for an external serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedMethod {
    /// Name of the client the method belongs to.
    pub client: String,
    /// Documentation text.
    pub doc: String,
    /// Generated signature.
    pub signature: Signature,
    /// Generated body.
    pub body: MethodBody,
}
