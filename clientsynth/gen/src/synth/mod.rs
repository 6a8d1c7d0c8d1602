//! Method-body synthesis components.
//!
//! Each component is a pure function from part of a [`clientsynth_define::Method`]
//! to IR. Components never share mutable state; they read the naming
//! configuration and the method's early-return shape through [`BodyContext`].
//!
//! - [`scalar`] - Typed scalar to string-producing expression
//! - [`path`] - Request path from template and path parameters
//! - [`query`] - Required query parameters
//! - [`options`] - Guarded merge of an options struct's optional query fields
//! - [`header`] - Header assignments
//! - [`selector`] - Status-code to error-constructor decision function
//! - [`shape`] - Return-type list to return shape
//! - [`method`] - Orchestrates all of the above into a [`crate::ir::MethodBody`]

mod encode;
pub mod header;
pub mod method;
pub mod options;
pub mod path;
pub mod query;
pub mod scalar;
pub mod selector;
pub mod shape;

use crate::config::Naming;
use crate::ir::{Expr, Stmt};
use shape::ReturnShape;

/// Read-only state shared by the components synthesizing one method.
#[derive(Debug, Clone)]
pub struct BodyContext<'a> {
    /// Identifiers for generated locals.
    pub naming: &'a Naming,
    /// Where failures are stored.
    pub err: Expr,
    /// Values returned when a failure is detected.
    pub error_return: Vec<Expr>,
}

impl<'a> BodyContext<'a> {
    /// Builds the context for a method with the given return shape.
    pub fn new(naming: &'a Naming, shape: &ReturnShape) -> Self {
        Self {
            naming,
            err: shape.error_target(naming),
            error_return: shape.error_return(naming),
        }
    }

    /// Marshals `value` into the `bytes` local.
    pub fn marshal(&self, bytes: &str, value: Expr) -> Stmt {
        Stmt::Marshal {
            bytes: bytes.to_string(),
            value,
            err: self.err.clone(),
        }
    }

    /// Returns the method's error values if the last operation failed.
    pub fn return_if_err(&self) -> Stmt {
        Stmt::ReturnIfErr {
            err: self.err.clone(),
            values: self.error_return.clone(),
        }
    }
}
