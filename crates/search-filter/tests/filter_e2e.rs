//! End-to-end tests for filter compilation.
//!
//! These tests drive the public API the way a model layer would: a metadata
//! table registered once, predicate trees built through the combinator
//! constructors, and the compiled output checked against the exact filter
//! grammar the search service accepts.

use chrono::{TimeZone, Utc};
use search_filter_rs::{
    compile_filter, Expr, FieldMeta, FilterError, NamingOptions, StaticSchema, TypeRef, Value,
};
use uuid::Uuid;

const DOCUMENT: TypeRef = TypeRef::new("Document");
const NESTED: TypeRef = TypeRef::new("Nested");

fn schema() -> StaticSchema {
    StaticSchema::new()
        .with_camel_case_type(DOCUMENT)
        .with_camel_case_type(NESTED)
        .with_field(DOCUMENT, "Id", FieldMeta::new())
        .with_field(DOCUMENT, "Int32", FieldMeta::new())
        .with_field(DOCUMENT, "Boolean", FieldMeta::new())
        .with_field(DOCUMENT, "Rating", FieldMeta::new())
        .with_field(DOCUMENT, "Guid", FieldMeta::new())
        .with_field(DOCUMENT, "Timestamp", FieldMeta::new())
        .with_field(DOCUMENT, "CollectionSimple", FieldMeta::new())
        .with_field(DOCUMENT, "CollectionComplex", FieldMeta::new())
        .with_field(DOCUMENT, "Complex", FieldMeta::new())
        .with_field(NESTED, "Id", FieldMeta::new())
}

fn field(name: &str) -> Expr {
    Expr::param("_").member(DOCUMENT, name)
}

fn compile(expr: &Expr) -> Result<String, FilterError> {
    let schema = schema();
    let naming = NamingOptions::new(&schema);
    compile_filter(Some(expr), &naming)
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_boolean_equality() {
    let expr = field("Boolean").eq(true);
    assert_eq!(compile(&expr).unwrap(), "boolean eq true");
}

#[test]
fn test_guid_literal_is_lowercase_quoted() {
    let guid = Uuid::parse_str("5BE8D2E7-9913-43F7-A5E1-02A921EF31A4").unwrap();
    let expr = field("Guid").eq(guid);
    assert_eq!(
        compile(&expr).unwrap(),
        "guid eq '5be8d2e7-9913-43f7-a5e1-02a921ef31a4'"
    );
}

#[test]
fn test_utc_datetime_literal_renders_with_z_suffix() {
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let expr = field("Timestamp").lt(when);
    assert_eq!(compile(&expr).unwrap(), "timestamp lt '2024-03-01T12:30:00Z'");
}

#[test]
fn test_string_literal_is_single_quoted_verbatim() {
    let expr = field("Id").eq("abc");
    assert_eq!(compile(&expr).unwrap(), "id eq 'abc'");
}

#[test]
fn test_float_literal_is_bare() {
    let expr = field("Rating").ge(3.5);
    assert_eq!(compile(&expr).unwrap(), "rating ge 3.5");
}

#[test]
fn test_computed_operand_folds_to_its_value() {
    let base = 40;
    let expr = field("Int32").le(Expr::computed(move || Value::Int(base + 2)));
    assert_eq!(compile(&expr).unwrap(), "int32 le 42");
}

// ============================================================================
// Boolean composition
// ============================================================================

#[test]
fn test_and_composition_parenthesizes_both_sides() {
    let expr = field("Int32").eq(1).and(field("Int32").ne(2));
    assert_eq!(compile(&expr).unwrap(), "(int32 eq 1) and (int32 ne 2)");
}

#[test]
fn test_nested_composition() {
    let expr = field("Int32")
        .eq(1)
        .or_else(field("Boolean").is_true())
        .and_also(field("Rating").gt(2));
    assert_eq!(
        compile(&expr).unwrap(),
        "((int32 eq 1) or (boolean)) and (rating gt 2)"
    );
}

#[test]
fn test_negated_member() {
    let expr = field("Boolean").not();
    assert_eq!(compile(&expr).unwrap(), "not boolean");
}

// ============================================================================
// Quantifiers
// ============================================================================

#[test]
fn test_all_over_simple_collection() {
    let expr = field("CollectionSimple").all("c", Expr::param("c").eq("Foo"));
    assert_eq!(compile(&expr).unwrap(), "collectionSimple/all(c:c eq 'Foo')");
}

#[test]
fn test_any_over_complex_collection() {
    let body = Expr::param("c").member(NESTED, "Id").eq("123");
    let expr = field("CollectionComplex").any("c", body);
    assert_eq!(
        compile(&expr).unwrap(),
        "collectionComplex/any(c:c/id eq '123')"
    );
}

#[test]
fn test_any_with_composed_body() {
    let body = Expr::param("c")
        .member(NESTED, "Id")
        .eq("1")
        .or(Expr::param("c").member(NESTED, "Id").eq("2"));
    let expr = field("CollectionComplex").any("c", body);
    assert_eq!(
        compile(&expr).unwrap(),
        "collectionComplex/any(c:(c/id eq '1') or (c/id eq '2'))"
    );
}

// ============================================================================
// Search functions
// ============================================================================

#[test]
fn test_search_ismatch_with_field_list() {
    let fields = vec![field("Id"), field("Complex").member(NESTED, "Id")];
    let expr = Expr::is_match("5", fields);
    assert_eq!(
        compile(&expr).unwrap(),
        "search.ismatch('5', 'id, complex/id')"
    );
}

#[test]
fn test_search_ismatchscoring() {
    let expr = Expr::is_match_scoring("hotel", vec![field("Id")]);
    assert_eq!(compile(&expr).unwrap(), "search.ismatchscoring('hotel', 'id')");
}

#[test]
fn test_search_in_membership() {
    let expr = Expr::search_in(field("Id"), ["1", "2"]);
    assert_eq!(compile(&expr).unwrap(), "search.in('id', '1, 2')");
}

#[test]
fn test_score_threshold() {
    let expr = Expr::score().gt(0.9);
    assert_eq!(compile(&expr).unwrap(), "search.score() gt 0.9");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_expression_is_rejected() {
    let schema = schema();
    let naming = NamingOptions::new(&schema);
    assert_eq!(
        compile_filter(None, &naming),
        Err(FilterError::MissingExpression)
    );
}

#[test]
fn test_unknown_member_names_type_and_field() {
    let expr = field("DoesNotExist").eq(1);
    assert_eq!(
        compile(&expr),
        Err(FilterError::UnknownMember {
            type_name: "Document",
            member: "DoesNotExist".to_string(),
        })
    );
}

#[test]
fn test_member_to_member_comparison_is_rejected() {
    let expr = field("Int32").eq(field("Rating"));
    assert!(matches!(
        compile(&expr),
        Err(FilterError::UnsupportedOperand { .. })
    ));
}
