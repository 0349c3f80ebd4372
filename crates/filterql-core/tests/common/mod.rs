#![allow(dead_code)]

use std::collections::BTreeMap;

use filterql_core::schema::{FieldInfo, FieldKind, FieldMap};
use filterql_core::{ExpressionNode, ParseError, PostgresGenerator, SpannerGenerator, SqlValue};

/// Field map used by most tests: snake_case filter names, PascalCase columns.
pub fn fields() -> FieldMap {
    [
        ("status", "Status", FieldKind::String),
        ("user_id", "UserId", FieldKind::Int),
        ("price", "Price", FieldKind::Float64),
        ("stock", "Stock", FieldKind::Int),
        ("rating", "Rating", FieldKind::Int),
        ("name", "Name", FieldKind::String),
        ("age", "Age", FieldKind::Int64),
        ("category", "Category", FieldKind::String),
        ("email", "Email", FieldKind::String),
        ("active", "Active", FieldKind::Bool),
        ("field", "Field", FieldKind::String),
    ]
    .into_iter()
    .map(|(name, column, kind)| (String::from(name), FieldInfo::new(column, kind).indexed()))
    .collect()
}

/// Field map whose filter names map to identically named columns.
pub fn identity_fields() -> FieldMap {
    [
        ("status", FieldKind::String),
        ("category", FieldKind::String),
        ("price", FieldKind::String),
        ("name", FieldKind::String),
        ("user_id", FieldKind::Int64),
        ("age", FieldKind::Int64),
        ("active", FieldKind::Bool),
    ]
    .into_iter()
    .map(|(name, kind)| (String::from(name), FieldInfo::new(name, kind)))
    .collect()
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

pub fn parse(filter: &str) -> ExpressionNode {
    parse_with(filter, &fields())
}

pub fn parse_with(filter: &str, fields: &FieldMap) -> ExpressionNode {
    filterql_core::parse_filter(filter, fields)
        .unwrap_or_else(|e| panic!("Failed to parse: {filter}\nError: {e:?}"))
        .unwrap_or_else(|| panic!("Expected an expression for: {filter}"))
}

pub fn parse_err(filter: &str) -> ParseError {
    filterql_core::parse_filter(filter, &fields())
        .expect_err(&format!("Expected parse error for: {filter}"))
}

pub fn spanner(filter: &str) -> (String, BTreeMap<String, SqlValue>) {
    let tree = parse(filter);
    SpannerGenerator::new()
        .generate_sql(Some(&tree))
        .unwrap_or_else(|e| panic!("Failed to generate: {filter}\nError: {e:?}"))
}

pub fn postgres(filter: &str) -> (String, Vec<SqlValue>) {
    let tree = parse(filter);
    PostgresGenerator::new()
        .generate_sql(Some(&tree))
        .unwrap_or_else(|e| panic!("Failed to generate: {filter}\nError: {e:?}"))
}

/// Builds named parameters from `(name, value)` pairs.
pub fn named(pairs: &[(&str, SqlValue)]) -> BTreeMap<String, SqlValue> {
    pairs
        .iter()
        .map(|(name, value)| (String::from(*name), value.clone()))
        .collect()
}

/// Verifies that rendering a parsed tree yields filter text that parses to
/// the same tree.
pub fn round_trip(filter: &str) {
    let fields = identity_fields();
    let first = parse_with(filter, &fields);
    let rendered = first.to_string();
    let second = parse_with(&rendered, &fields);
    assert_eq!(
        first, second,
        "Round-trip changed the tree.\n  Input:    {filter}\n  Rendered: {rendered}"
    );
    assert_eq!(
        rendered,
        second.to_string(),
        "Rendering is not a fixed point.\n  Input: {filter}"
    );
}
