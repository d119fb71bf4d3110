//! Filter-expression compilation.
//!
//! A one-shot recursive dispatch over the predicate tree: each node kind has
//! exactly one rendering rule, member-access leaves delegate to the path
//! resolver, and comparison right-hand sides are constant-folded down to a
//! literal before formatting. Compilation is all-or-nothing; any unsupported
//! shape aborts the whole build.

use crate::ast::{Call, Expr, UnaryOp};
use crate::error::{FilterError, FilterResult};
use crate::naming::NamingOptions;
use crate::path::resolve_property_path;
use crate::value::Value;

/// Compiles a predicate expression into a filter string.
///
/// # Errors
///
/// Returns [`FilterError::MissingExpression`] if `expr` is `None`, and the
/// respective shape/member/operand errors for unsupported trees. No partial
/// output is produced on failure.
///
/// # Examples
///
/// ```
/// use search_filter_rs::{
///     compile_filter, Expr, FieldMeta, NamingOptions, StaticSchema, TypeRef,
/// };
///
/// const DOCUMENT: TypeRef = TypeRef::new("Document");
///
/// let schema = StaticSchema::new().with_field(DOCUMENT, "Boolean", FieldMeta::camel_case());
/// let naming = NamingOptions::new(&schema);
///
/// let expr = Expr::param("_").member(DOCUMENT, "Boolean").eq(true);
/// assert_eq!(compile_filter(Some(&expr), &naming).unwrap(), "boolean eq true");
/// ```
pub fn compile_filter(expr: Option<&Expr>, naming: &NamingOptions) -> FilterResult<String> {
    let expr = expr.ok_or(FilterError::MissingExpression)?;
    compile(expr, naming)
}

fn compile(expr: &Expr, naming: &NamingOptions) -> FilterResult<String> {
    match expr {
        Expr::Compare { op, left, right } => {
            // A bare root parameter on the left contributes no path; this
            // keeps the leading space that the quantifier separator rule
            // keys on.
            let left_path = match left.as_ref() {
                Expr::Parameter(_) => String::new(),
                other => resolve_property_path(other, naming)?,
            };
            let literal = fold_literal(right)?.to_filter_literal();
            Ok(format!("{left_path} {} {literal}", op.token()))
        }

        Expr::Unary { op, operand } => {
            if !matches!(operand.as_ref(), Expr::Member { .. }) {
                return Err(FilterError::invalid_shape(operand));
            }
            let path = resolve_property_path(operand, naming)?;
            match op {
                UnaryOp::Not | UnaryOp::IsFalse => Ok(format!("not {path}")),
                UnaryOp::IsTrue => Ok(path),
            }
        }

        // Unconditional parentheses keep precedence unambiguous at any
        // nesting depth.
        Expr::Logic { op, left, right } => {
            let left = compile(left, naming)?;
            let right = compile(right, naming)?;
            Ok(format!("({left}) {} ({right})", op.token()))
        }

        Expr::Call(call) => compile_call(expr, call, naming),

        // A bare literal passes through verbatim as a pre-formed fragment.
        Expr::Constant(value) => Ok(value.to_string()),

        _ => Err(FilterError::unsupported_shape(expr)),
    }
}

fn compile_call(expr: &Expr, call: &Call, naming: &NamingOptions) -> FilterResult<String> {
    match call {
        Call::Any {
            source,
            range,
            body,
        } => compile_quantifier("any", source, range, body, naming),
        Call::All {
            source,
            range,
            body,
        } => compile_quantifier("all", source, range, body, naming),

        Call::SearchIn { field, values } => {
            let path = resolve_property_path(field, naming)?;
            Ok(format!("search.in('{path}', '{}')", values.join(", ")))
        }

        Call::IsMatch { search, fields } => {
            compile_match("search.ismatch", search, fields, naming)
        }
        Call::IsMatchScoring { search, fields } => {
            compile_match("search.ismatchscoring", search, fields, naming)
        }

        Call::Score => Ok("search.score()".to_string()),

        // Projections are path shapes, not predicates.
        Call::Select { .. } | Call::First { .. } => Err(FilterError::unsupported_shape(expr)),
    }
}

fn compile_quantifier(
    keyword: &str,
    source: &Expr,
    range: &str,
    body: &Expr,
    naming: &NamingOptions,
) -> FilterResult<String> {
    let path = resolve_property_path(source, naming)?;
    let inner = compile(body, naming)?;

    // Compatibility rule: insert the path separator only when the inner
    // filter is path-rooted. A comparison on the bare range variable compiles
    // with a leading space and must not receive one.
    let separator = if inner.starts_with(' ') { "" } else { "/" };

    Ok(format!("{path}/{keyword}({range}:{range}{separator}{inner})"))
}

fn compile_match(
    function: &str,
    search: &str,
    fields: &[Expr],
    naming: &NamingOptions,
) -> FilterResult<String> {
    let paths = fields
        .iter()
        .map(|field| resolve_property_path(field, naming))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(format!("{function}('{search}', '{}')", paths.join(", ")))
}

/// Constant-folds a comparison's right-hand subtree down to a literal value.
///
/// Supported: constants, bound zero-argument computations, and nested
/// conversion wrappers. Anything else is an unsupported operand.
fn fold_literal(expr: &Expr) -> FilterResult<Value> {
    match expr {
        Expr::Constant(value) => Ok(value.clone()),
        Expr::Computed(thunk) => Ok(thunk.invoke()),
        Expr::Convert(inner) => fold_literal(inner),
        other => Err(FilterError::unsupported_operand(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{FieldMeta, StaticSchema, TypeRef};

    const DOCUMENT: TypeRef = TypeRef::new("Document");

    fn schema() -> StaticSchema {
        StaticSchema::new()
            .with_camel_case_type(DOCUMENT)
            .with_field(DOCUMENT, "Id", FieldMeta::new())
            .with_field(DOCUMENT, "Int32", FieldMeta::new())
            .with_field(DOCUMENT, "Boolean", FieldMeta::new())
            .with_field(DOCUMENT, "CollectionSimple", FieldMeta::new())
    }

    fn field(name: &str) -> Expr {
        Expr::param("_").member(DOCUMENT, name)
    }

    fn compile_one(expr: &Expr) -> FilterResult<String> {
        let schema = schema();
        let naming = NamingOptions::new(&schema);
        compile_filter(Some(expr), &naming)
    }

    #[test]
    fn test_missing_expression() {
        let schema = schema();
        let naming = NamingOptions::new(&schema);
        assert_eq!(
            compile_filter(None, &naming),
            Err(FilterError::MissingExpression)
        );
    }

    #[test]
    fn test_comparison_operators_render_tokens() {
        assert_eq!(compile_one(&field("Int32").eq(1)).unwrap(), "int32 eq 1");
        assert_eq!(compile_one(&field("Int32").ne(2)).unwrap(), "int32 ne 2");
        assert_eq!(compile_one(&field("Int32").gt(3)).unwrap(), "int32 gt 3");
        assert_eq!(compile_one(&field("Int32").ge(4)).unwrap(), "int32 ge 4");
        assert_eq!(compile_one(&field("Int32").lt(5)).unwrap(), "int32 lt 5");
        assert_eq!(compile_one(&field("Int32").le(6)).unwrap(), "int32 le 6");
    }

    #[test]
    fn test_comparison_on_bare_parameter_keeps_leading_space() {
        let expr = Expr::param("c").eq("Foo");
        assert_eq!(compile_one(&expr).unwrap(), " eq 'Foo'");
    }

    #[test]
    fn test_computed_right_operand_is_folded() {
        let expr = field("Int32").eq(Expr::computed(|| Value::Int(41 + 1)));
        assert_eq!(compile_one(&expr).unwrap(), "int32 eq 42");
    }

    #[test]
    fn test_nested_conversions_fold_through() {
        let expr = field("Int32").eq(Expr::constant(7).convert().convert());
        assert_eq!(compile_one(&expr).unwrap(), "int32 eq 7");
    }

    #[test]
    fn test_member_right_operand_is_unsupported() {
        let expr = field("Int32").eq(field("Id"));
        match compile_one(&expr) {
            Err(FilterError::UnsupportedOperand { expr }) => assert!(expr.contains("_.Id")),
            other => panic!("expected UnsupportedOperand, got {other:?}"),
        }
    }

    #[test]
    fn test_negation_renders_not() {
        let expr = field("Boolean").not();
        assert_eq!(compile_one(&expr).unwrap(), "not boolean");
    }

    #[test]
    fn test_is_false_renders_not() {
        let expr = field("Boolean").is_false();
        assert_eq!(compile_one(&expr).unwrap(), "not boolean");
    }

    #[test]
    fn test_is_true_renders_bare_member() {
        let expr = field("Boolean").is_true();
        assert_eq!(compile_one(&expr).unwrap(), "boolean");
    }

    #[test]
    fn test_unary_over_non_member_fails() {
        let expr = field("Int32").eq(1).not();
        match compile_one(&expr) {
            Err(FilterError::InvalidShape { kind, .. }) => assert_eq!(kind, "comparison"),
            other => panic!("expected InvalidShape, got {other:?}"),
        }
    }

    #[test]
    fn test_logic_parenthesizes_unconditionally() {
        let expr = field("Int32").eq(1).and(field("Int32").ne(2));
        assert_eq!(
            compile_one(&expr).unwrap(),
            "(int32 eq 1) and (int32 ne 2)"
        );
    }

    #[test]
    fn test_eager_and_short_circuit_spellings_match() {
        let eager = field("Int32").eq(1).or(field("Boolean").is_true());
        let short = field("Int32").eq(1).or_else(field("Boolean").is_true());
        assert_eq!(compile_one(&eager).unwrap(), compile_one(&short).unwrap());
    }

    #[test]
    fn test_quantifier_with_path_rooted_body_inserts_separator() {
        let body = Expr::param("c").member(DOCUMENT, "Id").eq("v");
        let expr = field("CollectionSimple").any("c", body);
        assert_eq!(
            compile_one(&expr).unwrap(),
            "collectionSimple/any(c:c/id eq 'v')"
        );
    }

    #[test]
    fn test_quantifier_with_bare_range_body_omits_separator() {
        let expr = field("CollectionSimple").all("c", Expr::param("c").eq("Foo"));
        assert_eq!(
            compile_one(&expr).unwrap(),
            "collectionSimple/all(c:c eq 'Foo')"
        );
    }

    #[test]
    fn test_search_in_joins_values() {
        let expr = Expr::search_in(field("Id"), ["1", "2", "3"]);
        assert_eq!(compile_one(&expr).unwrap(), "search.in('id', '1, 2, 3')");
    }

    #[test]
    fn test_score_compiles_to_literal_call() {
        assert_eq!(compile_one(&Expr::score()).unwrap(), "search.score()");
    }

    #[test]
    fn test_score_comparison_uses_call_as_path() {
        let expr = Expr::score().ge(0.5);
        assert_eq!(compile_one(&expr).unwrap(), "search.score() ge 0.5");
    }

    #[test]
    fn test_constant_passes_through_verbatim() {
        let expr = Expr::constant("id eq '5'");
        assert_eq!(compile_one(&expr).unwrap(), "id eq '5'");
    }

    #[test]
    fn test_parameter_at_top_level_is_unsupported() {
        match compile_one(&Expr::param("_")) {
            Err(FilterError::UnsupportedShape { kind, .. }) => assert_eq!(kind, "parameter"),
            other => panic!("expected UnsupportedShape, got {other:?}"),
        }
    }

    #[test]
    fn test_projection_at_top_level_is_unsupported() {
        let expr = field("CollectionSimple").first();
        match compile_one(&expr) {
            Err(FilterError::UnsupportedShape { kind, .. }) => {
                assert_eq!(kind, "first element");
            }
            other => panic!("expected UnsupportedShape, got {other:?}"),
        }
    }
}
