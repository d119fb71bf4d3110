//! Error types for path resolution and filter compilation.

use thiserror::Error;

use crate::ast::Expr;
use crate::naming::TypeRef;

/// A specialized Result type for filter compilation operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while resolving paths or compiling filters.
///
/// All failures are immediate and non-retryable: compilation is
/// all-or-nothing, and no partial output is ever produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The required expression argument was absent.
    #[error("filter expression is missing")]
    MissingExpression,

    /// A node of an unsupported kind appeared where a specific shape is
    /// required.
    #[error("invalid {kind} node where a property path is required: {expr}")]
    InvalidShape {
        /// The offending node's kind name.
        kind: &'static str,
        /// A rendering of the offending subtree.
        expr: String,
    },

    /// A referenced member does not exist on its declaring type.
    #[error("unknown member {member} on type {type_name}")]
    UnknownMember {
        /// The declaring type's name.
        type_name: &'static str,
        /// The missing member name.
        member: String,
    },

    /// The right side of a comparison cannot be reduced to a literal value.
    #[error("right operand cannot be reduced to a literal: {expr}")]
    UnsupportedOperand {
        /// A rendering of the offending subtree.
        expr: String,
    },

    /// The top-level node kind is not recognized by the compiler.
    #[error("unsupported {kind} node in filter expression: {expr}")]
    UnsupportedShape {
        /// The offending node's kind name.
        kind: &'static str,
        /// A rendering of the offending subtree.
        expr: String,
    },
}

impl FilterError {
    /// Creates an invalid-shape error from the offending node.
    pub fn invalid_shape(expr: &Expr) -> Self {
        FilterError::InvalidShape {
            kind: expr.kind(),
            expr: expr.to_string(),
        }
    }

    /// Creates an unknown-member error.
    pub fn unknown_member(ty: TypeRef, member: impl Into<String>) -> Self {
        FilterError::UnknownMember {
            type_name: ty.name(),
            member: member.into(),
        }
    }

    /// Creates an unsupported-operand error from the offending node.
    pub fn unsupported_operand(expr: &Expr) -> Self {
        FilterError::UnsupportedOperand {
            expr: expr.to_string(),
        }
    }

    /// Creates an unsupported-shape error from the offending node.
    pub fn unsupported_shape(expr: &Expr) -> Self {
        FilterError::UnsupportedShape {
            kind: expr.kind(),
            expr: expr.to_string(),
        }
    }
}
