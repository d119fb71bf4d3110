//! Search request body types.

use serde::{Deserialize, Serialize};

/// The query portion of a search request body.
///
/// Field names serialize in the camelCase form the search service expects;
/// unset options are omitted entirely. The builder produces this struct as
/// pure data — embedding it in an outbound payload is the caller's concern.
///
/// # Examples
///
/// ```
/// use search_query_rs::SearchRequest;
///
/// let request = SearchRequest {
///     filter: Some("int32 eq 1".to_string()),
///     top: Some(10),
///     ..SearchRequest::default()
/// };
///
/// let json = serde_json::to_string(&request).unwrap();
/// assert_eq!(json, r#"{"filter":"int32 eq 1","top":10}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Full-text search expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// The compiled filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Comma-joined ordering clauses (e.g. `"rating desc, id"`).
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "orderby")]
    pub order_by: Option<String>,

    /// Comma-joined field paths to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,

    /// Comma-joined field paths to scope the full-text search to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<String>,

    /// Maximum number of results to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,

    /// Number of results to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,

    /// Whether to request a total match count alongside results.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "count")]
    pub include_total_count: Option<bool>,

    /// Minimum index coverage percentage (0–100) required to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_coverage: Option<f64>,
}
