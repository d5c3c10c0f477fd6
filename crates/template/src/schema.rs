//! Template record and layout schema types

use pdf_core::{Margins, PageSize};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Margin applied on any side the schema leaves out or sets to a non-number
pub const DEFAULT_MARGIN: f32 = 20.0;

/// Default column width for table columns without a numeric `width`
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Document family, used to pick a rendering when a template has no elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    CreditCardStatement,
    HealthInsurancePolicy,
    AccountStatement,
    PaymentReceipt,
    Invoice,
    Contract,
    Report,
    Certificate,
    Other,
}

impl TemplateCategory {
    /// Human readable (Turkish) name shown to users
    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateCategory::CreditCardStatement => "Kredi Kartı Tahsilat Belgesi",
            TemplateCategory::HealthInsurancePolicy => "Sağlık Sigortası Poliçesi",
            TemplateCategory::AccountStatement => "Hesap Ekstresi",
            TemplateCategory::PaymentReceipt => "Ödeme Makbuzu",
            TemplateCategory::Invoice => "Fatura",
            TemplateCategory::Contract => "Sözleşme",
            TemplateCategory::Report => "Rapor",
            TemplateCategory::Certificate => "Sertifika",
            TemplateCategory::Other => "Diğer",
        }
    }
}

/// Stored template record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique identifier
    pub id: String,

    /// Display name, used as title by the category renderings
    pub name: String,

    /// Document family
    pub category: TemplateCategory,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Layout schema; kept raw and parsed at render time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Free-form metadata, not used for rendering
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,

    /// Inactive templates are still renderable; the flag is informational
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Template {
    /// Create a template without a schema
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: TemplateCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: None,
            schema: None,
            metadata: Map::new(),
            active: true,
        }
    }

    /// Attach a layout schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Schema parsing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("schema must be a JSON object")]
    NotAnObject,

    #[error("invalid schema at '{path}': {reason}")]
    Invalid { path: String, reason: String },

    #[error("elements nested deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
}

impl SchemaError {
    fn invalid(path: &str, reason: impl Into<String>) -> Self {
        SchemaError::Invalid {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Named page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSizeName {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
}

impl PageSizeName {
    /// Parse a page size name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "A4" => Some(PageSizeName::A4),
            "A3" => Some(PageSizeName::A3),
            "LETTER" => Some(PageSizeName::Letter),
            "LEGAL" => Some(PageSizeName::Legal),
            _ => None,
        }
    }

    /// Physical dimensions in portrait orientation
    pub fn dimensions(&self) -> PageSize {
        match self {
            PageSizeName::A4 => PageSize::A4,
            PageSizeName::A3 => PageSize::A3,
            PageSizeName::Letter => PageSize::LETTER,
            PageSizeName::Legal => PageSize::LEGAL,
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Document-level layout settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Declared page size
    pub page_size: PageSizeName,

    /// Declared orientation
    pub orientation: Orientation,

    /// Page margins; `None` when the schema gives no (or an empty) margins object
    pub margins: Option<Margins>,
}

impl Layout {
    /// Page size or orientation differ from portrait A4
    pub fn has_custom_page_setup(&self) -> bool {
        self.page_size != PageSizeName::default() || self.orientation != Orientation::default()
    }
}

/// Text alignment within the content width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// Parse an alignment name; anything unrecognized is left aligned
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            "justify" => TextAlign::Justify,
            _ => TextAlign::Left,
        }
    }
}

/// TEXT element properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextElement {
    /// Text with `{{placeholders}}`
    pub text: String,

    /// Font size in points; document default when `None`
    pub font_size: Option<f32>,

    /// `fontWeight` equal to "bold" (any case)
    pub bold: bool,

    /// Horizontal alignment
    pub align: TextAlign,

    /// Properties without a meaning for text
    pub extra: Map<String, Value>,
}

/// Table column definition
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    /// Header text
    pub header: String,

    /// Relative width
    pub width: f32,

    /// Data field shown in this column for every row
    pub data_key: Option<String>,
}

/// Table row definition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Row label (not rendered)
    pub label: Option<String>,

    /// Cell text with `{{placeholders}}`, used by columns without `data_key`
    pub value: Option<String>,
}

/// TABLE element properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableElement {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub extra: Map<String, Value>,
}

/// IMAGE element properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageElement {
    /// Image source reference
    pub src: Option<String>,

    pub extra: Map<String, Value>,
}

/// Layout element
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextElement),
    Table(TableElement),
    Image(ImageElement),
    Container(Vec<Element>),
    /// Element type without a renderer of its own; drawn as text
    Unsupported { kind: String, text: TextElement },
}

impl Element {
    /// Upper-case type name as declared in the schema
    pub fn kind(&self) -> &str {
        match self {
            Element::Text(_) => "TEXT",
            Element::Table(_) => "TABLE",
            Element::Image(_) => "IMAGE",
            Element::Container(_) => "CONTAINER",
            Element::Unsupported { kind, .. } => kind,
        }
    }
}

/// Parsed layout schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub layout: Layout,
    pub elements: Vec<Element>,
}

impl Schema {
    /// Whether a raw schema should be rendered element by element
    ///
    /// False for `null`, `{}`, and objects whose `elements` is absent, null or
    /// an empty array. Any other value (including a non-object) is true, so it
    /// goes through [`Schema::parse`].
    pub fn declares_elements(raw: &Value) -> bool {
        match raw {
            Value::Null => false,
            Value::Object(map) => match map.get("elements") {
                None | Some(Value::Null) => false,
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            },
            _ => true,
        }
    }

    /// Parse a raw JSON schema
    ///
    /// Containers nested more than `max_depth` levels are rejected.
    pub fn parse(raw: &Value, max_depth: usize) -> Result<Schema, SchemaError> {
        let root = raw.as_object().ok_or(SchemaError::NotAnObject)?;

        let layout = match root.get("layout") {
            None | Some(Value::Null) => Layout::default(),
            Some(Value::Object(layout)) => parse_layout(layout)?,
            Some(_) => return Err(SchemaError::invalid("layout", "expected an object")),
        };

        let elements = match root.get("elements") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => parse_elements(items, "elements", 0, max_depth)?,
            Some(_) => return Err(SchemaError::invalid("elements", "expected an array")),
        };

        Ok(Schema { layout, elements })
    }
}

fn parse_layout(layout: &Map<String, Value>) -> Result<Layout, SchemaError> {
    let page_size = match optional_str(layout, "pageSize", "layout")? {
        None => PageSizeName::default(),
        Some(name) => PageSizeName::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown page size '{name}', using A4");
            PageSizeName::default()
        }),
    };

    let orientation = match layout.get("orientation").and_then(Value::as_str) {
        Some(o) if o.eq_ignore_ascii_case("landscape") => Orientation::Landscape,
        _ => Orientation::Portrait,
    };

    let margins = match layout.get("margins") {
        Some(Value::Object(m)) if !m.is_empty() => {
            let side = |key: &str| {
                m.get(key).and_then(finite_f32).unwrap_or(DEFAULT_MARGIN)
            };
            Some(Margins::new(
                side("top"),
                side("right"),
                side("bottom"),
                side("left"),
            ))
        }
        _ => None,
    };

    Ok(Layout {
        page_size,
        orientation,
        margins,
    })
}

fn parse_elements(
    items: &[Value],
    path: &str,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<Element>, SchemaError> {
    if depth > max_depth {
        return Err(SchemaError::TooDeep { max_depth });
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_element(item, &format!("{path}[{i}]"), depth, max_depth))
        .collect()
}

fn parse_element(
    item: &Value,
    path: &str,
    depth: usize,
    max_depth: usize,
) -> Result<Element, SchemaError> {
    let element = item
        .as_object()
        .ok_or_else(|| SchemaError::invalid(path, "expected an object"))?;

    // Absent means TEXT; a null type is malformed
    let kind = match element.get("type") {
        None => "TEXT".to_string(),
        Some(Value::String(kind)) => kind.to_ascii_uppercase(),
        Some(_) => return Err(SchemaError::invalid(&format!("{path}.type"), "expected a string")),
    };

    // Non-object properties are treated as empty
    let empty = Map::new();
    let props = element
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let props_path = format!("{path}.properties");

    let parsed = match kind.as_str() {
        "TEXT" => Element::Text(parse_text(props, &props_path)?),
        "TABLE" => Element::Table(parse_table(props, &props_path)?),
        "IMAGE" => Element::Image(ImageElement {
            src: optional_str(props, "src", &props_path)?.map(str::to_string),
            extra: unknown_keys(props, &["src"]),
        }),
        "CONTAINER" => {
            let children = match element.get("children") {
                Some(Value::Array(children)) => children.as_slice(),
                _ => &[],
            };
            Element::Container(parse_elements(
                children,
                &format!("{path}.children"),
                depth + 1,
                max_depth,
            )?)
        }
        _ => Element::Unsupported {
            text: parse_text(props, &props_path)?,
            kind: kind.clone(),
        },
    };

    Ok(parsed)
}

fn parse_text(props: &Map<String, Value>, path: &str) -> Result<TextElement, SchemaError> {
    let text = optional_str(props, "text", path)?.unwrap_or_default().to_string();
    let font_size = props.get("fontSize").and_then(finite_f32);
    let bold = optional_str(props, "fontWeight", path)?
        .is_some_and(|w| w.eq_ignore_ascii_case("bold"));
    let align = optional_str(props, "textAlign", path)?
        .map(TextAlign::from_name)
        .unwrap_or_default();

    Ok(TextElement {
        text,
        font_size,
        bold,
        align,
        extra: unknown_keys(props, &["text", "fontSize", "fontWeight", "textAlign"]),
    })
}

fn parse_table(props: &Map<String, Value>, path: &str) -> Result<TableElement, SchemaError> {
    let columns = match props.get("columns") {
        Some(Value::Array(columns)) => columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let col_path = format!("{path}.columns[{i}]");
                let column = column
                    .as_object()
                    .ok_or_else(|| SchemaError::invalid(&col_path, "expected an object"))?;
                Ok(TableColumn {
                    header: optional_str(column, "header", &col_path)?
                        .unwrap_or_default()
                        .to_string(),
                    width: column
                        .get("width")
                        .and_then(finite_f32)
                        .unwrap_or(DEFAULT_COLUMN_WIDTH),
                    data_key: optional_str(column, "dataKey", &col_path)?.map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?,
        _ => Vec::new(),
    };

    let rows = match props.get("rows") {
        Some(Value::Array(rows)) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row_path = format!("{path}.rows[{i}]");
                let row = row
                    .as_object()
                    .ok_or_else(|| SchemaError::invalid(&row_path, "expected an object"))?;
                Ok(TableRow {
                    label: optional_str(row, "label", &row_path)?.map(str::to_string),
                    value: optional_str(row, "value", &row_path)?.map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?,
        _ => Vec::new(),
    };

    Ok(TableElement {
        columns,
        rows,
        extra: unknown_keys(props, &["columns", "rows"]),
    })
}

/// Copy of `props` without the keys a renderer understands
fn unknown_keys(props: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    props
        .iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Number that fits an `f32`; anything else counts as non-numeric
fn finite_f32(value: &Value) -> Option<f32> {
    value
        .as_f64()
        .map(|v| v as f32)
        .filter(|v| v.is_finite())
}

/// String property that may be absent or null, but not another type
fn optional_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>, SchemaError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(SchemaError::invalid(
            &format!("{path}.{key}"),
            "expected a string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_category_serde_names() {
        let category: TemplateCategory = serde_json::from_value(json!("CREDIT_CARD_STATEMENT")).unwrap();
        assert_eq!(category, TemplateCategory::CreditCardStatement);
        assert_eq!(
            serde_json::to_value(TemplateCategory::HealthInsurancePolicy).unwrap(),
            json!("HEALTH_INSURANCE_POLICY")
        );
        assert_eq!(TemplateCategory::PaymentReceipt.display_name(), "Ödeme Makbuzu");
    }

    #[test]
    fn test_declares_elements() {
        assert!(!Schema::declares_elements(&json!(null)));
        assert!(!Schema::declares_elements(&json!({})));
        assert!(!Schema::declares_elements(&json!({ "layout": {} })));
        assert!(!Schema::declares_elements(&json!({ "elements": [] })));
        assert!(!Schema::declares_elements(&json!({ "elements": null })));
        assert!(Schema::declares_elements(&json!({ "elements": [{}] })));
        assert!(Schema::declares_elements(&json!({ "elements": "oops" })));
        assert!(Schema::declares_elements(&json!("not a schema")));
    }

    #[test]
    fn test_parse_full_schema() {
        let raw = json!({
            "layout": {
                "pageSize": "letter",
                "orientation": "LANDSCAPE",
                "margins": { "top": 10, "left": "wide" }
            },
            "elements": [
                {
                    "id": "title",
                    "type": "text",
                    "properties": {
                        "text": "Hello {{name}}",
                        "fontSize": 18,
                        "fontWeight": "BOLD",
                        "textAlign": "center"
                    }
                },
                {
                    "type": "TABLE",
                    "properties": {
                        "columns": [
                            { "header": "Name", "width": 30, "dataKey": "name" },
                            { "header": "Value" }
                        ],
                        "rows": [{ "label": "x", "value": "{{amount}}" }]
                    }
                },
                { "type": "IMAGE", "properties": { "src": "logo.png" } },
                { "type": "CONTAINER", "children": [{ "properties": { "text": "child" } }] },
                { "type": "SHAPE", "properties": { "text": "shape", "fill": "#ff0000" } }
            ]
        });

        let schema = Schema::parse(&raw, 64).unwrap();

        assert_eq!(schema.layout.page_size, PageSizeName::Letter);
        assert_eq!(schema.layout.page_size.dimensions(), PageSize::LETTER);
        assert_eq!(schema.layout.orientation, Orientation::Landscape);
        assert_eq!(
            schema.layout.margins,
            Some(Margins::new(10.0, 20.0, 20.0, 20.0))
        );

        assert_eq!(schema.elements.len(), 5);
        assert_eq!(
            schema.elements[0],
            Element::Text(TextElement {
                text: "Hello {{name}}".to_string(),
                font_size: Some(18.0),
                bold: true,
                align: TextAlign::Center,
                extra: Map::new(),
            })
        );

        let Element::Table(table) = &schema.elements[1] else {
            panic!("expected table");
        };
        assert_eq!(table.columns[0].width, 30.0);
        assert_eq!(table.columns[0].data_key.as_deref(), Some("name"));
        assert_eq!(table.columns[1].width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(table.rows[0].value.as_deref(), Some("{{amount}}"));

        assert_eq!(
            schema.elements[2],
            Element::Image(ImageElement {
                src: Some("logo.png".to_string()),
                extra: Map::new(),
            })
        );

        let Element::Container(children) = &schema.elements[3] else {
            panic!("expected container");
        };
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].kind(), "TEXT");

        let Element::Unsupported { kind, text } = &schema.elements[4] else {
            panic!("expected unsupported element");
        };
        assert_eq!(kind, "SHAPE");
        assert_eq!(text.text, "shape");
        assert_eq!(text.extra.get("fill"), Some(&json!("#ff0000")));
    }

    #[test]
    fn test_empty_margins_object_is_ignored() {
        let schema = Schema::parse(&json!({ "layout": { "margins": {} } }), 64).unwrap();
        assert_eq!(schema.layout.margins, None);
        assert_eq!(schema.layout.page_size, PageSizeName::A4);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            Schema::parse(&json!([1, 2]), 64),
            Err(SchemaError::NotAnObject)
        );
        assert!(matches!(
            Schema::parse(&json!({ "elements": "oops" }), 64),
            Err(SchemaError::Invalid { .. })
        ));
        assert!(matches!(
            Schema::parse(&json!({ "layout": 5, "elements": [{}] }), 64),
            Err(SchemaError::Invalid { .. })
        ));

        let err = Schema::parse(
            &json!({ "elements": [{ "type": "TEXT", "properties": { "text": 42 } }] }),
            64,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::Invalid {
                path: "elements[0].properties.text".to_string(),
                reason: "expected a string".to_string(),
            }
        );
    }

    #[test]
    fn test_out_of_range_numbers_fall_back() {
        let raw = json!({
            "layout": { "margins": { "top": 1e39, "left": -1e39, "right": 5 } },
            "elements": [
                { "type": "TEXT", "properties": { "text": "x", "fontSize": 1e39 } },
                { "type": "TABLE", "properties": { "columns": [{ "header": "A", "width": 1e300 }] } }
            ]
        });

        let schema = Schema::parse(&raw, 64).unwrap();
        assert_eq!(
            schema.layout.margins,
            Some(Margins::new(DEFAULT_MARGIN, 5.0, DEFAULT_MARGIN, DEFAULT_MARGIN))
        );

        let Element::Text(text) = &schema.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(text.font_size, None);

        let Element::Table(table) = &schema.elements[1] else {
            panic!("expected table");
        };
        assert_eq!(table.columns[0].width, DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_null_type_is_malformed() {
        assert_eq!(
            Schema::parse(&json!({ "elements": [{ "type": null }] }), 64),
            Err(SchemaError::Invalid {
                path: "elements[0].type".to_string(),
                reason: "expected a string".to_string(),
            })
        );

        let schema = Schema::parse(&json!({ "elements": [{}] }), 64).unwrap();
        assert_eq!(schema.elements[0].kind(), "TEXT");
    }

    #[test]
    fn test_custom_page_setup() {
        assert!(!Layout::default().has_custom_page_setup());

        let schema = Schema::parse(&json!({ "layout": { "pageSize": "A4", "orientation": "PORTRAIT" } }), 64).unwrap();
        assert!(!schema.layout.has_custom_page_setup());

        let schema = Schema::parse(&json!({ "layout": { "pageSize": "LEGAL" } }), 64).unwrap();
        assert!(schema.layout.has_custom_page_setup());

        let schema = Schema::parse(&json!({ "layout": { "orientation": "landscape" } }), 64).unwrap();
        assert!(schema.layout.has_custom_page_setup());
    }

    #[test]
    fn test_parse_depth_limit() {
        let mut raw = json!({ "type": "TEXT" });
        for _ in 0..5 {
            raw = json!({ "type": "CONTAINER", "children": [raw] });
        }
        let schema = json!({ "elements": [raw] });

        assert!(Schema::parse(&schema, 5).is_ok());
        assert_eq!(
            Schema::parse(&schema, 4),
            Err(SchemaError::TooDeep { max_depth: 4 })
        );
    }

    #[test]
    fn test_template_serde() {
        let template: Template = serde_json::from_value(json!({
            "id": "t1",
            "name": "Statement",
            "category": "ACCOUNT_STATEMENT",
            "schema": { "elements": [] },
            "active": false
        }))
        .unwrap();

        assert_eq!(template.id, "t1");
        assert!(!template.active);
        assert_eq!(template.schema, Some(json!({ "elements": [] })));

        let built = Template::new("t2", "Receipt", TemplateCategory::PaymentReceipt)
            .with_schema(json!({}));
        assert!(built.active);
        assert!(built.schema.is_some());
    }
}
