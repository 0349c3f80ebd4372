//! Conversion of raw condition values to typed values.

use crate::error::ParseError;
use crate::schema::FieldKind;
use crate::value::SqlValue;

/// Converts a trimmed raw value according to the field kind.
///
/// `condition` is the raw condition text, used for error context only.
pub(super) fn convert_value(
    raw: &str,
    kind: &FieldKind,
    condition: &str,
) -> Result<SqlValue, ParseError> {
    let invalid = |reason: String| ParseError::InvalidValueFormat {
        value: String::from(raw),
        condition: String::from(condition),
        reason,
    };

    match kind {
        FieldKind::String | FieldKind::Struct => Ok(SqlValue::Text(String::from(raw))),
        FieldKind::Int | FieldKind::Int64 => raw
            .parse::<i64>()
            .map(SqlValue::Int)
            .map_err(|e| invalid(format!("not a valid {kind}: {e}"))),
        FieldKind::Int8 => raw
            .parse::<i8>()
            .map(|n| SqlValue::Int(i64::from(n)))
            .map_err(|e| invalid(format!("not a valid {kind}: {e}"))),
        FieldKind::Int16 => raw
            .parse::<i16>()
            .map(|n| SqlValue::Int(i64::from(n)))
            .map_err(|e| invalid(format!("not a valid {kind}: {e}"))),
        FieldKind::Int32 => raw
            .parse::<i32>()
            .map(|n| SqlValue::Int(i64::from(n)))
            .map_err(|e| invalid(format!("not a valid {kind}: {e}"))),
        FieldKind::Bool => parse_bool(raw)
            .map(SqlValue::Bool)
            .ok_or_else(|| invalid(String::from("not a valid boolean"))),
        FieldKind::Float32 => raw
            .parse::<f64>()
            .map(|f| {
                #[allow(clippy::cast_possible_truncation)]
                let narrowed = f as f32;
                SqlValue::Float32(narrowed)
            })
            .map_err(|e| invalid(format!("not a valid float: {e}"))),
        FieldKind::Float64 => raw
            .parse::<f64>()
            .map(SqlValue::Float)
            .map_err(|e| invalid(format!("not a valid float: {e}"))),
        FieldKind::Bytes | FieldKind::List(_) => {
            Err(invalid(format!("unsupported data type {kind}")))
        }
    }
}

/// Parses the accepted boolean spellings.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(raw: &str, kind: &FieldKind) -> Result<SqlValue, ParseError> {
        convert_value(raw, kind, "field:eq:value")
    }

    #[test]
    fn test_string_and_struct_pass_through() {
        assert_eq!(
            convert("John Doe", &FieldKind::String).unwrap(),
            SqlValue::Text(String::from("John Doe"))
        );
        assert_eq!(
            convert("2024-01-01", &FieldKind::Struct).unwrap(),
            SqlValue::Text(String::from("2024-01-01"))
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(convert("42", &FieldKind::Int).unwrap(), SqlValue::Int(42));
        assert_eq!(convert("-7", &FieldKind::Int64).unwrap(), SqlValue::Int(-7));
        assert_eq!(convert("127", &FieldKind::Int8).unwrap(), SqlValue::Int(127));
        assert!(convert("128", &FieldKind::Int8).is_err());
        assert!(convert("40000", &FieldKind::Int16).is_err());
        assert!(convert("3000000000", &FieldKind::Int32).is_err());
        assert!(convert("abc", &FieldKind::Int).is_err());
        assert!(convert("1.5", &FieldKind::Int).is_err());
    }

    #[test]
    fn test_booleans() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(convert(raw, &FieldKind::Bool).unwrap(), SqlValue::Bool(true));
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(convert(raw, &FieldKind::Bool).unwrap(), SqlValue::Bool(false));
        }
        assert!(convert("yes", &FieldKind::Bool).is_err());
        assert!(convert("tRuE", &FieldKind::Bool).is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            convert("100", &FieldKind::Float64).unwrap(),
            SqlValue::Float(100.0)
        );
        assert_eq!(
            convert("1.5", &FieldKind::Float32).unwrap(),
            SqlValue::Float32(1.5)
        );
        assert!(convert("abc", &FieldKind::Float64).is_err());
    }

    #[test]
    fn test_unsupported_kinds() {
        let err = convert("x", &FieldKind::Bytes).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValueFormat { .. }));
        assert!(err.to_string().contains("unsupported data type bytes"));

        let list = FieldKind::List(Box::new(FieldKind::String));
        assert!(convert("x", &list).is_err());
    }

    #[test]
    fn test_error_carries_context() {
        let err = convert_value("abc", &FieldKind::Int, "stock:gt:abc").unwrap_err();
        match err {
            ParseError::InvalidValueFormat {
                value, condition, ..
            } => {
                assert_eq!(value, "abc");
                assert_eq!(condition, "stock:gt:abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
