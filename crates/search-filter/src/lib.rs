//! Typed filter expression compiler for OData-style search queries.
//!
//! This crate turns strongly-typed predicate trees over a model into the
//! textual filter grammar a search service consumes, plus the `/`-delimited
//! field paths used by ordering and selection clauses. Predicates are built
//! as data through combinator constructors on [`Expr`]; member naming is
//! driven by a read-only metadata table ([`Schema`]) registered by the model
//! layer.
//!
//! # Example
//!
//! ```
//! use search_filter_rs::{
//!     compile_filter, Expr, FieldMeta, NamingOptions, StaticSchema, TypeRef,
//! };
//!
//! const DOCUMENT: TypeRef = TypeRef::new("Document");
//!
//! let schema = StaticSchema::new()
//!     .with_camel_case_type(DOCUMENT)
//!     .with_field(DOCUMENT, "Int32", FieldMeta::new());
//! let naming = NamingOptions::new(&schema);
//!
//! let root = Expr::param("_");
//! let predicate = root
//!     .clone()
//!     .member(DOCUMENT, "Int32")
//!     .eq(1)
//!     .and_also(root.member(DOCUMENT, "Int32").ne(2));
//!
//! let filter = compile_filter(Some(&predicate), &naming).unwrap();
//! assert_eq!(filter, "(int32 eq 1) and (int32 ne 2)");
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod naming;
pub mod path;
pub mod value;

pub use ast::{Call, CompareOp, Expr, LogicOp, UnaryOp};
pub use compiler::compile_filter;
pub use error::{FilterError, FilterResult};
pub use naming::{FieldMeta, NamingOptions, Schema, StaticSchema, TypeRef};
pub use path::{resolve_property_path, PropertyName};
pub use value::{Thunk, Value};
