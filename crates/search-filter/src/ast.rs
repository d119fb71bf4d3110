//! Abstract syntax tree for typed filter predicates.
//!
//! The `Expr` enum is a predicate over a model, built as data through
//! combinator constructors rather than captured as an opaque closure. The
//! tree is immutable once constructed; compilation only reads it.
//!
//! # Example
//!
//! ```
//! use search_filter_rs::{Expr, TypeRef};
//!
//! const DOCUMENT: TypeRef = TypeRef::new("Document");
//!
//! // _.Int32 == 1 && _.Int32 != 2
//! let root = Expr::param("_");
//! let predicate = root
//!     .clone()
//!     .member(DOCUMENT, "Int32")
//!     .eq(1)
//!     .and_also(root.member(DOCUMENT, "Int32").ne(2));
//! assert_eq!(predicate.kind(), "boolean composition");
//! ```

use std::fmt;

use crate::naming::TypeRef;
use crate::value::{Thunk, Value};

/// Comparison operators, rendered as OData filter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `eq`
    Eq,
    /// `ne`
    Ne,
    /// `gt`
    Gt,
    /// `ge`
    Ge,
    /// `lt`
    Lt,
    /// `le`
    Le,
}

impl CompareOp {
    /// The filter-grammar token for this operator.
    pub fn token(self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }
}

/// Unary boolean operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation, rendered `not {operand}`.
    Not,
    /// Truthy member reference, rendered as the bare operand path.
    IsTrue,
    /// Falsy member reference, rendered `not {operand}`.
    IsFalse,
}

/// Binary boolean operators.
///
/// Eager and short-circuit spellings exist so callers can mirror either
/// source form; both compile to identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    /// Eager AND.
    And,
    /// Short-circuit AND.
    AndAlso,
    /// Eager OR.
    Or,
    /// Short-circuit OR.
    OrElse,
}

impl LogicOp {
    /// The filter-grammar token for this operator.
    pub fn token(self) -> &'static str {
        match self {
            LogicOp::And | LogicOp::AndAlso => "and",
            LogicOp::Or | LogicOp::OrElse => "or",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            LogicOp::And | LogicOp::AndAlso => "&&",
            LogicOp::Or | LogicOp::OrElse => "||",
        }
    }
}

/// A typed predicate expression over a model.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The lambda root or a quantifier's range variable.
    Parameter(String),
    /// Member access on a target, recording the declaring model type for
    /// metadata lookup.
    Member {
        /// The expression the member is accessed on.
        target: Box<Expr>,
        /// The model type declaring the member.
        declaring_type: TypeRef,
        /// The member's raw (source) name.
        name: String,
    },
    /// A literal value.
    Constant(Value),
    /// A bound zero-argument computation, folded at compile time.
    Computed(Thunk),
    /// A conversion wrapper; identity under constant folding.
    Convert(Box<Expr>),
    /// A binary comparison.
    Compare {
        /// The comparison operator.
        op: CompareOp,
        /// The path side.
        left: Box<Expr>,
        /// The literal side, reduced by the value evaluator.
        right: Box<Expr>,
    },
    /// A unary boolean operation.
    Unary {
        /// The unary operator.
        op: UnaryOp,
        /// The operand; must be a member access.
        operand: Box<Expr>,
    },
    /// A binary boolean composition.
    Logic {
        /// The boolean operator.
        op: LogicOp,
        /// Left sub-predicate.
        left: Box<Expr>,
        /// Right sub-predicate.
        right: Box<Expr>,
    },
    /// A recognized function call.
    Call(Call),
}

/// Function calls recognized by the resolver and compiler.
///
/// Calls are typed variants rather than a `{name, arguments}` pair, so a
/// wrong-arity call is unrepresentable; shape errors remain possible when a
/// call appears in a position that requires a different node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// Existential quantifier over a collection member.
    Any {
        /// The collection the quantifier ranges over.
        source: Box<Expr>,
        /// The range variable name (e.g. `c`).
        range: String,
        /// The inner predicate, rooted at the range variable.
        body: Box<Expr>,
    },
    /// Universal quantifier over a collection member.
    All {
        /// The collection the quantifier ranges over.
        source: Box<Expr>,
        /// The range variable name.
        range: String,
        /// The inner predicate, rooted at the range variable.
        body: Box<Expr>,
    },
    /// Projection of a member out of a collection; path-equivalent to
    /// `First` followed by the member access.
    Select {
        /// The collection being projected.
        source: Box<Expr>,
        /// The element type declaring the projected member.
        declaring_type: TypeRef,
        /// The projected member's raw name.
        member: String,
    },
    /// First element of a collection; transparent for path purposes.
    First {
        /// The collection.
        source: Box<Expr>,
    },
    /// `search.in(field, values...)`.
    SearchIn {
        /// The field whose value is tested for membership.
        field: Box<Expr>,
        /// The candidate values, joined verbatim.
        values: Vec<String>,
    },
    /// `search.ismatch(search, fields...)`.
    IsMatch {
        /// The full-text search expression.
        search: String,
        /// The field paths searched.
        fields: Vec<Expr>,
    },
    /// `search.ismatchscoring(search, fields...)`.
    IsMatchScoring {
        /// The full-text search expression.
        search: String,
        /// The field paths searched.
        fields: Vec<Expr>,
    },
    /// The `search.score()` pseudo-field.
    Score,
}

impl Expr {
    /// Creates a lambda root / range-variable reference.
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Parameter(name.into())
    }

    /// Accesses a member declared on `declaring_type`.
    pub fn member(self, declaring_type: TypeRef, name: impl Into<String>) -> Self {
        Expr::Member {
            target: Box::new(self),
            declaring_type,
            name: name.into(),
        }
    }

    /// Creates a literal.
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    /// Creates a bound zero-argument computation.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Expr::Computed(Thunk::new(f))
    }

    /// Wraps this expression in a conversion node.
    pub fn convert(self) -> Self {
        Expr::Convert(Box::new(self))
    }

    fn compare(self, op: CompareOp, right: impl Into<Expr>) -> Self {
        Expr::Compare {
            op,
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    /// `self eq right`.
    pub fn eq(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Eq, right)
    }

    /// `self ne right`.
    pub fn ne(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Ne, right)
    }

    /// `self gt right`.
    pub fn gt(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Gt, right)
    }

    /// `self ge right`.
    pub fn ge(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Ge, right)
    }

    /// `self lt right`.
    pub fn lt(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Lt, right)
    }

    /// `self le right`.
    pub fn le(self, right: impl Into<Expr>) -> Self {
        self.compare(CompareOp::Le, right)
    }

    /// Negates this predicate.
    pub fn not(self) -> Self {
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// Uses this member as a truthy predicate.
    pub fn is_true(self) -> Self {
        Expr::Unary {
            op: UnaryOp::IsTrue,
            operand: Box::new(self),
        }
    }

    /// Uses this member as a falsy predicate.
    pub fn is_false(self) -> Self {
        Expr::Unary {
            op: UnaryOp::IsFalse,
            operand: Box::new(self),
        }
    }

    fn logic(self, op: LogicOp, other: Self) -> Self {
        Expr::Logic {
            op,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Eager AND composition.
    pub fn and(self, other: Self) -> Self {
        self.logic(LogicOp::And, other)
    }

    /// Short-circuit AND composition. Compiles identically to [`Expr::and`].
    pub fn and_also(self, other: Self) -> Self {
        self.logic(LogicOp::AndAlso, other)
    }

    /// Eager OR composition.
    pub fn or(self, other: Self) -> Self {
        self.logic(LogicOp::Or, other)
    }

    /// Short-circuit OR composition. Compiles identically to [`Expr::or`].
    pub fn or_else(self, other: Self) -> Self {
        self.logic(LogicOp::OrElse, other)
    }

    /// Existential quantifier over this collection.
    pub fn any(self, range: impl Into<String>, body: Expr) -> Self {
        Expr::Call(Call::Any {
            source: Box::new(self),
            range: range.into(),
            body: Box::new(body),
        })
    }

    /// Universal quantifier over this collection.
    pub fn all(self, range: impl Into<String>, body: Expr) -> Self {
        Expr::Call(Call::All {
            source: Box::new(self),
            range: range.into(),
            body: Box::new(body),
        })
    }

    /// Projects a member out of this collection for path purposes.
    pub fn select_member(self, declaring_type: TypeRef, member: impl Into<String>) -> Self {
        Expr::Call(Call::Select {
            source: Box::new(self),
            declaring_type,
            member: member.into(),
        })
    }

    /// First element of this collection; transparent for path purposes.
    pub fn first(self) -> Self {
        Expr::Call(Call::First {
            source: Box::new(self),
        })
    }

    /// `search.in(field, values...)`.
    pub fn search_in<I, S>(field: Expr, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Call(Call::SearchIn {
            field: Box::new(field),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// `search.ismatch(search, fields...)`.
    pub fn is_match(search: impl Into<String>, fields: Vec<Expr>) -> Self {
        Expr::Call(Call::IsMatch {
            search: search.into(),
            fields,
        })
    }

    /// `search.ismatchscoring(search, fields...)`.
    pub fn is_match_scoring(search: impl Into<String>, fields: Vec<Expr>) -> Self {
        Expr::Call(Call::IsMatchScoring {
            search: search.into(),
            fields,
        })
    }

    /// The `search.score()` pseudo-field.
    pub fn score() -> Self {
        Expr::Call(Call::Score)
    }

    /// A short node-kind name, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Parameter(_) => "parameter",
            Expr::Member { .. } => "member access",
            Expr::Constant(_) => "constant",
            Expr::Computed(_) => "computed value",
            Expr::Convert(_) => "conversion",
            Expr::Compare { .. } => "comparison",
            Expr::Unary { .. } => "unary boolean",
            Expr::Logic { .. } => "boolean composition",
            Expr::Call(call) => call.kind(),
        }
    }
}

impl Call {
    /// A short call-kind name, used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Call::Any { .. } => "any quantifier",
            Call::All { .. } => "all quantifier",
            Call::Select { .. } => "select projection",
            Call::First { .. } => "first element",
            Call::SearchIn { .. } => "search.in call",
            Call::IsMatch { .. } => "search.ismatch call",
            Call::IsMatchScoring { .. } => "search.ismatchscoring call",
            Call::Score => "search.score call",
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Constant(value)
    }
}

macro_rules! expr_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::Constant(value.into())
                }
            }
        )*
    };
}

expr_from_literal!(
    bool,
    i32,
    i64,
    u32,
    u64,
    f32,
    f64,
    &str,
    String,
    uuid::Uuid,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::Duration,
);

/// Source-like rendering of the subtree, used for diagnostics only.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parameter(name) => f.write_str(name),
            Expr::Member { target, name, .. } => write!(f, "{target}.{name}"),
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Computed(_) => f.write_str("<computed>"),
            Expr::Convert(inner) => write!(f, "convert({inner})"),
            Expr::Compare { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Not => write!(f, "!({operand})"),
                UnaryOp::IsTrue => write!(f, "({operand} is true)"),
                UnaryOp::IsFalse => write!(f, "({operand} is false)"),
            },
            Expr::Logic { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Any { source, range, body } => {
                write!(f, "{source}.any({range} => {body})")
            }
            Call::All { source, range, body } => {
                write!(f, "{source}.all({range} => {body})")
            }
            Call::Select { source, member, .. } => write!(f, "{source}.select({member})"),
            Call::First { source } => write!(f, "{source}.first()"),
            Call::SearchIn { field, values } => {
                write!(f, "search.in({field}, [{}])", values.join(", "))
            }
            Call::IsMatch { search, fields } => {
                write!(f, "search.ismatch(\"{search}\"")?;
                for field in fields {
                    write!(f, ", {field}")?;
                }
                f.write_str(")")
            }
            Call::IsMatchScoring { search, fields } => {
                write!(f, "search.ismatchscoring(\"{search}\"")?;
                for field in fields {
                    write!(f, ", {field}")?;
                }
                f.write_str(")")
            }
            Call::Score => f.write_str("search.score()"),
        }
    }
}
