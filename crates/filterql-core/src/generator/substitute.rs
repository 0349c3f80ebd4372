//! Debug rendering of generated SQL with values inlined.

use super::BoundParams;
use crate::value::SqlValue;

/// Replaces placeholders with their values for logging.
///
/// Text is single-quoted with `''` escaping. Placeholders without a value are
/// left as they are. The result is for humans only and must never be
/// executed.
#[must_use]
pub fn substitute_params(sql: &str, params: &BoundParams) -> String {
    if sql.is_empty() {
        return String::new();
    }

    let mut out = String::from(sql);
    match params {
        BoundParams::Named(values) => {
            // Longest names first so `@p1` cannot clobber `@p10`.
            let mut names: Vec<&String> = values.keys().collect();
            names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));
            for name in names {
                out = out.replace(&format!("@{name}"), &literal(&values[name]));
            }
        }
        BoundParams::Positional(values) => {
            for (index, value) in values.iter().enumerate().rev() {
                out = out.replace(&format!("${}", index + 1), &literal(value));
            }
        }
    }
    out
}

fn literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Text(_) | SqlValue::Null => value.to_sql_inline(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn named(pairs: &[(&str, SqlValue)]) -> BoundParams {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), v.clone()))
            .collect::<BTreeMap<_, _>>()
            .into()
    }

    #[test]
    fn test_empty_sql() {
        let params = BoundParams::from(vec![SqlValue::Int(1)]);
        assert_eq!(substitute_params("", &params), "");
    }

    #[test]
    fn test_named_quotes_text() {
        let params = named(&[
            ("p1", SqlValue::Text(String::from("O'Brien"))),
            ("p2", SqlValue::Int(30)),
        ]);
        assert_eq!(
            substitute_params("`Name` = @p1 AND `Age` > @p2", &params),
            "`Name` = 'O''Brien' AND `Age` > 30"
        );
    }

    #[test]
    fn test_named_longest_first() {
        let pairs: Vec<(String, SqlValue)> = (1..=10)
            .map(|i| (format!("p{i}"), SqlValue::Int(i * 100)))
            .collect();
        let params = BoundParams::Named(pairs.into_iter().collect());
        assert_eq!(
            substitute_params("a = @p1 OR b = @p10", &params),
            "a = 100 OR b = 1000"
        );
    }

    #[test]
    fn test_positional_highest_first() {
        let values: Vec<SqlValue> = (1..=11).map(SqlValue::Int).collect();
        let params = BoundParams::from(values);
        assert_eq!(
            substitute_params("x = $1 OR y = $11 OR z = $10", &params),
            "x = 1 OR y = 11 OR z = 10"
        );
    }

    #[test]
    fn test_missing_values_are_kept() {
        let params = BoundParams::from(vec![SqlValue::Bool(true)]);
        assert_eq!(
            substitute_params("a = $1 AND b = $2", &params),
            "a = true AND b = $2"
        );
        let params = named(&[]);
        assert_eq!(substitute_params("a = @p1", &params), "a = @p1");
    }
}
