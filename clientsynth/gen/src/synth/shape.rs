//! Return shapes.
//!
//! The return-type list of a method decides how the decoded response is
//! bound and what every early and final return looks like:
//!
//! | Shape | Bind target | Success | Failure |
//! |-------|-------------|---------|---------|
//! | Iterator | `&iter.page` | `&iter` | `&iter` (failure recorded on `iter.err`) |
//! | Pointer | `&resp` | `&resp, null` | `null, err` |
//! | Value | `resp` | `resp, null` | `zero(T), err` |
//! | ErrorOnly | `null` | `null` | `err` |

use clientsynth_define::{ERROR_TYPE_NAME, Literal, Type};

use crate::config::Naming;
use crate::errors::SynthError;
use crate::ir::{Expr, FieldInit, Stmt};

/// How a method returns its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// A stateful cursor; `state` is the iterator state type it points to.
    Iterator {
        /// The declared iterator type.
        declared: Type,
        /// The state type the iterator local holds.
        state: Type,
    },
    /// A pointer to the decoded response.
    Pointer {
        /// The declared pointer type.
        declared: Type,
        /// The type the response local holds.
        pointee: Type,
    },
    /// The decoded response by value.
    Value {
        /// The declared (and held) type.
        ty: Type,
    },
    /// Only an error is returned.
    ErrorOnly,
}

impl ReturnShape {
    /// Determines the shape from a method's return list.
    ///
    /// A trailing `error` identifier is treated as the implicit error slot.
    ///
    /// ## Examples
    ///
    /// ```
    /// use clientsynth_define::Type;
    /// use clientsynth_gen::synth::shape::ReturnShape;
    ///
    /// let shape = ReturnShape::from_returns(&[Type::pointer(Type::ident("Widget"))]).unwrap();
    /// assert!(matches!(shape, ReturnShape::Pointer { .. }));
    ///
    /// let shape = ReturnShape::from_returns(&[Type::ident("error")]).unwrap();
    /// assert_eq!(shape, ReturnShape::ErrorOnly);
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`SynthError::IteratorWithExtraReturns`] when an iterator is
    /// accompanied by other returns and [`SynthError::UnsupportedReturns`]
    /// for more than one value return.
    pub fn from_returns(returns: &[Type]) -> Result<Self, SynthError> {
        if matches!(returns.first(), Some(Type::Iterator(_))) && returns.len() > 1 {
            return Err(SynthError::IteratorWithExtraReturns {
                count: returns.len(),
            });
        }

        let values = match returns.split_last() {
            Some((last, rest)) if last.is_error() => rest,
            _ => returns,
        };

        match values {
            [] => Ok(Self::ErrorOnly),
            [Type::Iterator(inner)] => {
                let state = inner.pointee().unwrap_or(&**inner).clone();
                Ok(Self::Iterator {
                    declared: values[0].clone(),
                    state,
                })
            }
            [Type::Pointer(inner)] => Ok(Self::Pointer {
                declared: values[0].clone(),
                pointee: (**inner).clone(),
            }),
            [ty] => Ok(Self::Value { ty: ty.clone() }),
            _ => Err(SynthError::UnsupportedReturns {
                count: values.len(),
            }),
        }
    }

    /// Returns `true` for the iterator shape.
    pub fn is_iterator(&self) -> bool {
        matches!(self, Self::Iterator { .. })
    }

    /// Where failures are stored.
    pub fn error_target(&self, naming: &Naming) -> Expr {
        match self {
            Self::Iterator { .. } => {
                Expr::field(Expr::var(&naming.iterator), &naming.iterator_error_field)
            }
            _ => Expr::var(&naming.error),
        }
    }

    /// Where the decoded response is bound.
    pub fn bind_target(&self, naming: &Naming) -> Expr {
        match self {
            Self::Iterator { .. } => {
                Expr::field(Expr::var(&naming.iterator), &naming.page_field).addr_of()
            }
            Self::Pointer { .. } => Expr::var(&naming.response).addr_of(),
            Self::Value { .. } => Expr::var(&naming.response),
            Self::ErrorOnly => Expr::Null,
        }
    }

    /// Values returned on success.
    pub fn success_return(&self, naming: &Naming) -> Vec<Expr> {
        match self {
            Self::Iterator { .. } => vec![Expr::var(&naming.iterator).addr_of()],
            Self::Pointer { .. } => vec![Expr::var(&naming.response).addr_of(), Expr::Null],
            Self::Value { .. } => vec![Expr::var(&naming.response), Expr::Null],
            Self::ErrorOnly => vec![Expr::Null],
        }
    }

    /// Values returned on an early failure.
    pub fn error_return(&self, naming: &Naming) -> Vec<Expr> {
        match self {
            Self::Iterator { .. } => vec![Expr::var(&naming.iterator).addr_of()],
            Self::Pointer { .. } => vec![Expr::Null, Expr::var(&naming.error)],
            Self::Value { ty } => vec![Expr::Zero { ty: ty.clone() }, Expr::var(&naming.error)],
            Self::ErrorOnly => vec![Expr::var(&naming.error)],
        }
    }

    /// Statements declaring shape state before any other work.
    pub fn prologue(&self, naming: &Naming) -> Vec<Stmt> {
        match self {
            Self::Iterator { state, .. } => vec![Stmt::DeclareIterator {
                name: naming.iterator.clone(),
                ty: state.clone(),
                init: vec![
                    FieldInit {
                        name: naming.cursor_field.clone(),
                        value: Literal::Int(-1),
                    },
                    FieldInit {
                        name: naming.first_field.clone(),
                        value: Literal::Bool(true),
                    },
                ],
            }],
            _ => vec![],
        }
    }

    /// The response local declared just before dispatch, if any.
    pub fn response_decl(&self, naming: &Naming) -> Option<Stmt> {
        let ty = match self {
            Self::Pointer { pointee, .. } => pointee,
            Self::Value { ty } => ty,
            Self::Iterator { .. } | Self::ErrorOnly => return None,
        };
        Some(Stmt::DeclareVar {
            name: naming.response.clone(),
            ty: ty.clone(),
        })
    }

    /// Result types of the generated signature.
    pub fn results(&self) -> Vec<Type> {
        let error = Type::ident(ERROR_TYPE_NAME);
        match self {
            Self::Iterator { declared, .. } => vec![declared.clone()],
            Self::Pointer { declared, .. } => vec![declared.clone(), error],
            Self::Value { ty } => vec![ty.clone(), error],
            Self::ErrorOnly => vec![error],
        }
    }
}
