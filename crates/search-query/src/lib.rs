//! Fluent search-request builder over typed filter expressions.
//!
//! This crate assembles the query portion of a search request body from the
//! predicate and path expressions compiled by `search_filter_rs`. The
//! [`QueryBuilder`] accumulates clauses fluently and produces a serializable
//! [`SearchRequest`]; it never performs I/O.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use search_filter_rs::{Expr, FieldMeta, StaticSchema, TypeRef};
//! use search_query_rs::QueryBuilder;
//!
//! const HOTEL: TypeRef = TypeRef::new("Hotel");
//!
//! let schema = StaticSchema::new()
//!     .with_camel_case_type(HOTEL)
//!     .with_field(HOTEL, "Rating", FieldMeta::new());
//!
//! let request = QueryBuilder::new(Arc::new(schema))
//!     .search("budget")
//!     .filter(&Expr::param("_").member(HOTEL, "Rating").ge(3))
//!     .unwrap()
//!     .order_by_descending(&Expr::param("_").member(HOTEL, "Rating"))
//!     .unwrap()
//!     .top(10)
//!     .build();
//!
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["filter"], "rating ge 3");
//! assert_eq!(json["orderby"], "rating desc");
//! ```

pub mod builder;
pub mod error;
pub mod request;

pub use builder::QueryBuilder;
pub use error::{QueryError, QueryResult};
pub use request::SearchRequest;
