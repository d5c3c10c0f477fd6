//! Template JSON parsing and placeholder substitution

use crate::{DataMap, Result, Template, TemplateError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

/// `{{name}}` where name is anything but `}`
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Invalid placeholder regex"));

/// Parse a template record from JSON string
pub fn parse_template(json: &str) -> Result<Template> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Turn caller-supplied JSON into a data map
///
/// `null` and non-object values give an empty map.
pub fn data_from_value(value: Value) -> DataMap {
    match value {
        Value::Object(map) => map,
        Value::Null => DataMap::new(),
        other => {
            log::warn!("Ignoring non-object render data: {other}");
            DataMap::new()
        }
    }
}

/// Replace every `{{name}}` in `text` with the stringified `data[name]`
///
/// Names are trimmed before lookup. Missing and null values become the empty
/// string; text outside placeholders is kept as is.
pub fn resolve_placeholders(text: &str, data: &DataMap) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures| {
            data.get(caps[1].trim())
                .map(value_to_string)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> DataMap {
        data_from_value(value)
    }

    #[test]
    fn test_resolve_simple_placeholder() {
        let d = data(json!({ "name": "Ayşe" }));
        assert_eq!(resolve_placeholders("Hello {{name}}", &d), "Hello Ayşe");
    }

    #[test]
    fn test_resolve_trims_names() {
        let d = data(json!({ "name": "John" }));
        assert_eq!(resolve_placeholders("Hi {{  name }}!", &d), "Hi John!");
    }

    #[test]
    fn test_resolve_missing_and_null() {
        let d = data(json!({ "empty": null }));
        assert_eq!(resolve_placeholders("[{{missing}}][{{empty}}]", &d), "[][]");
    }

    #[test]
    fn test_resolve_multiple_placeholders() {
        let d = data(json!({ "a": 1, "b": true, "c": 2.5 }));
        assert_eq!(
            resolve_placeholders("{{a}}-{{b}}-{{c}}-{{a}}", &d),
            "1-true-2.5-1"
        );
    }

    #[test]
    fn test_unmatched_braces_pass_through() {
        let d = data(json!({ "a": "x" }));
        assert_eq!(resolve_placeholders("{{a", &d), "{{a");
        assert_eq!(resolve_placeholders("a}}", &d), "a}}");
        assert_eq!(resolve_placeholders("{{}}", &d), "{{}}");
        assert_eq!(resolve_placeholders("{{a}b}}", &d), "{{a}b}}");
        assert_eq!(resolve_placeholders("{a}", &d), "{a}");
    }

    #[test]
    fn test_resolve_is_idempotent_without_placeholders() {
        let d = data(json!({ "a": "x" }));
        let text = "Plain text with { single } braces";
        let once = resolve_placeholders(text, &d);
        assert_eq!(once, text);
        assert_eq!(resolve_placeholders(&once, &d), once);
    }

    #[test]
    fn test_replacement_is_literal() {
        let d = data(json!({ "a": "$1 {{b}}", "b": "nope" }));
        assert_eq!(resolve_placeholders("{{a}}", &d), "$1 {{b}}");
    }

    #[test]
    fn test_adversarial_input() {
        let d = data(json!({}));
        let text = "{{".repeat(50_000) + &"}".repeat(3);
        let resolved = resolve_placeholders(&text, &d);
        assert!(resolved.len() <= text.len());
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("hello")), "hello");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(100.0)), "100.0");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_data_from_value() {
        assert!(data_from_value(json!(null)).is_empty());
        assert!(data_from_value(json!([1, 2])).is_empty());
        assert_eq!(data_from_value(json!({ "a": 1 })).len(), 1);
    }

    #[test]
    fn test_parse_template() {
        let json = r#"{
            "id": "tmpl-1",
            "name": "Receipt",
            "category": "PAYMENT_RECEIPT"
        }"#;

        let template = parse_template(json).unwrap();
        assert_eq!(template.id, "tmpl-1");
        assert_eq!(template.category, crate::TemplateCategory::PaymentReceipt);
        assert!(template.schema.is_none());
        assert!(template.active);
    }

    #[test]
    fn test_parse_template_invalid() {
        let result = parse_template(r#"{ "id": 1 }"#);
        assert!(matches!(result, Err(TemplateError::ParseError(_))));
    }
}
