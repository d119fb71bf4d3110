//! Error types for the query builder.

use search_filter_rs::FilterError;
use thiserror::Error;

/// A specialized Result type for query building operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while building a search request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// A configuration value fell outside its documented bound.
    #[error("{name} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        /// The option's name.
        name: &'static str,
        /// The supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// An expression failed to compile or resolve.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
