//! Fluent accumulation of query clauses.

use std::fmt;
use std::sync::Arc;

use search_filter_rs::{compile_filter, resolve_property_path, Expr, NamingOptions, Schema};

use crate::error::{QueryError, QueryResult};
use crate::request::SearchRequest;

/// Builds a [`SearchRequest`] from typed predicate and path expressions.
///
/// Successive [`filter`](QueryBuilder::filter) calls refine the query: each
/// new filter is AND-ed onto the accumulated one, with both sides
/// parenthesized. Ordering, selection, and search-field clauses accumulate as
/// resolved path lists. The builder owns its state exclusively; it is not
/// meant to be shared across threads.
///
/// Fallible methods return `QueryResult<Self>` so an unsupported expression
/// aborts the build at the call site with no partial output.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use search_filter_rs::{Expr, FieldMeta, StaticSchema, TypeRef};
/// use search_query_rs::QueryBuilder;
///
/// const DOCUMENT: TypeRef = TypeRef::new("Document");
///
/// let schema = StaticSchema::new()
///     .with_camel_case_type(DOCUMENT)
///     .with_field(DOCUMENT, "Int32", FieldMeta::new());
///
/// let request = QueryBuilder::new(Arc::new(schema))
///     .filter(&Expr::param("_").member(DOCUMENT, "Int32").eq(1))
///     .unwrap()
///     .order_by(&Expr::param("_").member(DOCUMENT, "Int32"))
///     .unwrap()
///     .top(10)
///     .build();
///
/// assert_eq!(request.filter.as_deref(), Some("int32 eq 1"));
/// assert_eq!(request.order_by.as_deref(), Some("int32"));
/// ```
pub struct QueryBuilder {
    schema: Arc<dyn Schema + Send + Sync>,
    camel_case: bool,
    search: Option<String>,
    filter: Option<String>,
    order_by: Vec<String>,
    select: Vec<String>,
    search_fields: Vec<String>,
    top: Option<u32>,
    skip: Option<u32>,
    include_total_count: Option<bool>,
    minimum_coverage: Option<f64>,
}

impl QueryBuilder {
    /// Creates a builder over the model layer's metadata table.
    pub fn new(schema: Arc<dyn Schema + Send + Sync>) -> Self {
        QueryBuilder {
            schema,
            camel_case: false,
            search: None,
            filter: None,
            order_by: Vec::new(),
            select: Vec::new(),
            search_fields: Vec::new(),
            top: None,
            skip: None,
            include_total_count: None,
            minimum_coverage: None,
        }
    }

    /// Sets the caller-wide default camelCase flag for every resolution.
    pub fn with_camel_case(mut self, camel_case: bool) -> Self {
        self.camel_case = camel_case;
        self
    }

    fn naming(&self) -> NamingOptions<'_> {
        NamingOptions::new(&*self.schema).with_camel_case(self.camel_case)
    }

    /// Compiles `expr` and AND-joins it onto the accumulated filter.
    ///
    /// # Errors
    ///
    /// Propagates any compilation failure; the accumulated filter is left
    /// untouched only in the sense that the whole builder is dropped with
    /// the error (all-or-nothing).
    pub fn filter(mut self, expr: &Expr) -> QueryResult<Self> {
        let compiled = compile_filter(Some(expr), &self.naming())?;
        self.filter = Some(match self.filter.take() {
            Some(existing) => format!("({existing}) and ({compiled})"),
            None => compiled,
        });
        Ok(self)
    }

    /// Appends an ascending ordering clause for the resolved path.
    pub fn order_by(mut self, expr: &Expr) -> QueryResult<Self> {
        let path = resolve_property_path(expr, &self.naming())?;
        self.order_by.push(path);
        Ok(self)
    }

    /// Appends a descending ordering clause for the resolved path.
    pub fn order_by_descending(mut self, expr: &Expr) -> QueryResult<Self> {
        let path = resolve_property_path(expr, &self.naming())?;
        self.order_by.push(format!("{path} desc"));
        Ok(self)
    }

    /// Appends a field path to the selection list.
    pub fn select(mut self, expr: &Expr) -> QueryResult<Self> {
        let path = resolve_property_path(expr, &self.naming())?;
        self.select.push(path);
        Ok(self)
    }

    /// Appends a field path to the search-fields list.
    pub fn search_field(mut self, expr: &Expr) -> QueryResult<Self> {
        let path = resolve_property_path(expr, &self.naming())?;
        self.search_fields.push(path);
        Ok(self)
    }

    /// Sets the full-text search expression.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Sets the maximum number of results.
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the number of results to skip.
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Requests a total match count alongside results.
    pub fn include_total_count(mut self, include: bool) -> Self {
        self.include_total_count = Some(include);
        self
    }

    /// Sets the minimum index coverage percentage.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ValueOutOfRange`] unless `0.0 <= coverage <= 100.0`.
    pub fn minimum_coverage(mut self, coverage: f64) -> QueryResult<Self> {
        if !(0.0..=100.0).contains(&coverage) {
            return Err(QueryError::ValueOutOfRange {
                name: "minimum_coverage",
                value: coverage,
                min: 0.0,
                max: 100.0,
            });
        }
        self.minimum_coverage = Some(coverage);
        Ok(self)
    }

    /// Produces the request body from the accumulated clauses.
    pub fn build(self) -> SearchRequest {
        SearchRequest {
            search: self.search,
            filter: self.filter,
            order_by: join_clauses(self.order_by),
            select: join_clauses(self.select),
            search_fields: join_clauses(self.search_fields),
            top: self.top,
            skip: self.skip,
            include_total_count: self.include_total_count,
            minimum_coverage: self.minimum_coverage,
        }
    }
}

fn join_clauses(clauses: Vec<String>) -> Option<String> {
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(", "))
    }
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("camel_case", &self.camel_case)
            .field("search", &self.search)
            .field("filter", &self.filter)
            .field("order_by", &self.order_by)
            .field("select", &self.select)
            .field("search_fields", &self.search_fields)
            .field("top", &self.top)
            .field("skip", &self.skip)
            .field("include_total_count", &self.include_total_count)
            .field("minimum_coverage", &self.minimum_coverage)
            .finish_non_exhaustive()
    }
}
