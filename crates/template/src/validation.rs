//! Schema validation for template authoring
//!
//! Rendering is lenient and never calls into this module. These checks are
//! meant for the surface that accepts new templates.

use serde_json::{Map, Value};
use thiserror::Error;

const ELEMENT_TYPES: [&str; 6] = ["TEXT", "TABLE", "IMAGE", "SHAPE", "CONTAINER", "DATA_FIELD"];
const PAGE_SIZES: [&str; 4] = ["A4", "A3", "LETTER", "LEGAL"];
const ORIENTATIONS: [&str; 2] = ["PORTRAIT", "LANDSCAPE"];
const POSITION_FIELDS: [&str; 4] = ["x", "y", "width", "height"];
const MARGIN_FIELDS: [&str; 4] = ["top", "right", "bottom", "left"];

/// Every problem found in a schema
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Template validation failed: {}", .errors.join("; "))]
pub struct ValidationErrors {
    pub errors: Vec<String>,
}

/// Check a raw schema against the authoring rules
pub fn validate_schema(schema: &Value) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    match schema.as_object() {
        Some(schema) if !schema.is_empty() => check_schema(schema, &mut errors),
        _ => errors.push("Template schema is required".to_string()),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn check_schema(schema: &Map<String, Value>, errors: &mut Vec<String>) {
    if !schema.contains_key("layout") {
        errors.push("Schema must contain 'layout' configuration".to_string());
    }

    match schema.get("elements") {
        None => errors.push("Schema must contain 'elements' array".to_string()),
        Some(Value::Array(elements)) if elements.is_empty() => {
            errors.push("Template must contain at least one element".to_string())
        }
        Some(Value::Array(elements)) => {
            for (i, element) in elements.iter().enumerate() {
                check_element(element, &format!("Element[{i}]: "), errors);
            }
        }
        Some(_) => errors.push("Schema 'elements' must be an array".to_string()),
    }

    match schema.get("layout") {
        None => {}
        Some(Value::Object(layout)) => check_layout(layout, errors),
        Some(_) => errors.push("Schema 'layout' must be an object".to_string()),
    }
}

fn check_element(element: &Value, prefix: &str, errors: &mut Vec<String>) {
    let Some(element) = element.as_object() else {
        errors.push(format!("{prefix}Element must be an object"));
        return;
    };

    if present(element, "id").is_none() {
        errors.push(format!("{prefix}Element must have an 'id' field"));
    }

    match present(element, "type") {
        None => errors.push(format!("{prefix}Element must have a 'type' field")),
        Some(kind) => {
            let kind = display(kind);
            if !ELEMENT_TYPES.contains(&kind.as_str()) {
                errors.push(format!("{prefix}Invalid element type: {kind}"));
            }
        }
    }

    match present(element, "position") {
        None => errors.push(format!("{prefix}Element must have a 'position' field")),
        Some(Value::Object(position)) => {
            for field in POSITION_FIELDS {
                if let Some(problem) = check_number(position, field) {
                    errors.push(format!("{prefix}Position {problem}"));
                }
            }
        }
        Some(_) => errors.push(format!("{prefix}Position must be an object")),
    }
}

fn check_layout(layout: &Map<String, Value>, errors: &mut Vec<String>) {
    if let Some(page_size) = layout.get("pageSize") {
        let page_size = display(page_size);
        if !PAGE_SIZES.contains(&page_size.as_str()) {
            errors.push(format!(
                "Invalid page size: {page_size}. Supported: A4, A3, LETTER, LEGAL"
            ));
        }
    }

    if let Some(orientation) = layout.get("orientation") {
        let orientation = display(orientation);
        if !ORIENTATIONS.contains(&orientation.as_str()) {
            errors.push(format!(
                "Invalid orientation: {orientation}. Supported: PORTRAIT, LANDSCAPE"
            ));
        }
    }

    match layout.get("margins") {
        None => {}
        Some(Value::Object(margins)) => {
            for field in MARGIN_FIELDS {
                if margins.contains_key(field) {
                    if let Some(problem) = check_number(margins, field) {
                        errors.push(format!("Margin {problem}"));
                    }
                }
            }
        }
        Some(_) => errors.push("Layout margins must be an object".to_string()),
    }
}

/// Value of `key` unless absent or null
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Problem with a required non-negative number, phrased after the subject
fn check_number(map: &Map<String, Value>, field: &str) -> Option<String> {
    match map.get(field) {
        None => Some(format!("must contain '{field}' field")),
        Some(value) => match value.as_f64() {
            None => Some(format!("'{field}' must be a number")),
            Some(n) if n < 0.0 => Some(format!("'{field}' must be non-negative")),
            Some(_) => None,
        },
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn errors(schema: Value) -> Vec<String> {
        validate_schema(&schema).map(|_| Vec::new()).unwrap_or_else(|e| e.errors)
    }

    fn element() -> Value {
        json!({
            "id": "e1",
            "type": "TEXT",
            "position": { "x": 0, "y": 0, "width": 100, "height": 20 }
        })
    }

    #[test]
    fn test_valid_schema() {
        let schema = json!({
            "layout": {
                "pageSize": "A4",
                "orientation": "PORTRAIT",
                "margins": { "top": 20, "bottom": 20 }
            },
            "elements": [element()]
        });
        assert_eq!(validate_schema(&schema), Ok(()));
    }

    #[test]
    fn test_missing_parts() {
        assert_eq!(errors(json!({})), vec!["Template schema is required"]);
        assert_eq!(
            errors(json!({ "title": "x" })),
            vec![
                "Schema must contain 'layout' configuration",
                "Schema must contain 'elements' array",
            ]
        );
        assert_eq!(
            errors(json!({ "layout": {}, "elements": [] })),
            vec!["Template must contain at least one element"]
        );
        assert_eq!(
            errors(json!({ "layout": [], "elements": {} })),
            vec![
                "Schema 'elements' must be an array",
                "Schema 'layout' must be an object",
            ]
        );
    }

    #[test]
    fn test_element_rules() {
        let schema = json!({
            "layout": {},
            "elements": [
                { "type": "CIRCLE", "position": { "x": -1, "y": "0", "width": 5 } }
            ]
        });

        assert_eq!(
            errors(schema),
            vec![
                "Element[0]: Element must have an 'id' field",
                "Element[0]: Invalid element type: CIRCLE",
                "Element[0]: Position 'x' must be non-negative",
                "Element[0]: Position 'y' must be a number",
                "Element[0]: Position must contain 'height' field",
            ]
        );
    }

    #[test]
    fn test_layout_rules() {
        let schema = json!({
            "layout": {
                "pageSize": "B5",
                "orientation": "portrait",
                "margins": { "top": -5, "left": "wide" }
            },
            "elements": [element()]
        });

        assert_eq!(
            errors(schema),
            vec![
                "Invalid page size: B5. Supported: A4, A3, LETTER, LEGAL",
                "Invalid orientation: portrait. Supported: PORTRAIT, LANDSCAPE",
                "Margin 'top' must be non-negative",
                "Margin 'left' must be a number",
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let err = validate_schema(&json!(null)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Template validation failed: Template schema is required"
        );
    }
}
