//! Field-name policy for loosely shaped backend responses
//!
//! The backend names the same logical value in more than one way. Each
//! logical value gets an ordered candidate list here. Two lookup rules
//! walk those lists:
//!
//! | Lookup            | Skips                              | Used for            |
//! |-------------------|------------------------------------|---------------------|
//! | [`first_present`] | missing, `null`                    | match indicator     |
//! | [`first_truthy`]  | missing, `null`, `false`, `0`, `""` | receipt identifiers |

use serde_json::{Map, Value};

/// Transaction identifier in an upload response
pub const TX_HASH_FIELDS: &[&str] = &["txHash", "transactionHash"];

/// Content hash in an upload response
pub const FILE_HASH_FIELDS: &[&str] = &["fileHash", "hash"];

/// Match indicator in a verification response, in precedence order
pub const MATCH_FIELDS: &[&str] = &["match", "verified", "exists"];

/// First candidate field present on `payload`
///
/// Missing fields and explicit `null` both count as absent. A non-object
/// payload has no fields.
pub fn first_present<'a>(payload: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let object = payload.as_object()?;
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| !value.is_null())
}

/// First candidate field on `payload` that is truthy
///
/// An empty or zero identifier falls through to the next candidate.
pub fn first_truthy<'a>(payload: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let object = payload.as_object()?;
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| is_truthy(value))
}

/// Loose truthiness of a JSON value as the backend's clients read it
///
/// `false`, `0`, `""` and `null` are falsy; everything else, including empty
/// arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Match indicator of a verification payload, `false` when none is present
pub fn match_indicator(payload: &Value) -> bool {
    first_present(payload, MATCH_FIELDS)
        .map(is_truthy)
        .unwrap_or(false)
}

/// Display text of an identifier field, resolved with [`first_truthy`]
///
/// Strings are shown bare; other JSON values in their compact form.
pub fn display_field(payload: &Value, names: &[&str]) -> Option<String> {
    first_truthy(payload, names).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Empty JSON object, the stand-in for any body that failed to parse
pub fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_present_respects_order() {
        let payload = json!({ "transactionHash": "0xbb", "txHash": "0xaa" });
        assert_eq!(first_present(&payload, TX_HASH_FIELDS), Some(&json!("0xaa")));
    }

    #[test]
    fn test_first_present_falls_back() {
        let payload = json!({ "hash": "0xcc" });
        assert_eq!(display_field(&payload, FILE_HASH_FIELDS).as_deref(), Some("0xcc"));
        assert_eq!(display_field(&payload, TX_HASH_FIELDS), None);
    }

    #[test]
    fn test_null_counts_as_absent() {
        let payload = json!({ "match": null, "verified": true });
        assert!(match_indicator(&payload));
    }

    #[test]
    fn test_false_wins_over_later_fields() {
        let payload = json!({ "match": false, "exists": true });
        assert!(!match_indicator(&payload));
    }

    #[test]
    fn test_match_defaults_to_false() {
        assert!(!match_indicator(&json!({ "detail": "x" })));
        assert!(!match_indicator(&json!([true])));
        assert!(!match_indicator(&empty_object()));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_empty_identifier_falls_through() {
        let payload = json!({ "txHash": "", "transactionHash": "0xabc" });
        assert_eq!(display_field(&payload, TX_HASH_FIELDS).as_deref(), Some("0xabc"));

        let payload = json!({ "fileHash": 0, "hash": "0xdef" });
        assert_eq!(display_field(&payload, FILE_HASH_FIELDS).as_deref(), Some("0xdef"));

        let payload = json!({ "fileHash": false });
        assert_eq!(display_field(&payload, FILE_HASH_FIELDS), None);
    }

    #[test]
    fn test_two_lookup_rules_differ_on_falsy() {
        let payload = json!({ "match": false, "verified": true });
        assert_eq!(first_present(&payload, MATCH_FIELDS), Some(&json!(false)));
        assert_eq!(first_truthy(&payload, MATCH_FIELDS), Some(&json!(true)));
    }

    #[test]
    fn test_display_field_non_string() {
        let payload = json!({ "txHash": 42 });
        assert_eq!(display_field(&payload, TX_HASH_FIELDS).as_deref(), Some("42"));
    }
}
