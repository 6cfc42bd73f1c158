//! Field schema of a comparison table record
//!
//! Describes the fields an editor fills in for every table: which meta keys
//! exist, their input type, help text and when they are visible. An admin UI
//! can render its form from [`comparison_table_schema`] (it serializes to
//! JSON), and [`validate_record`] checks raw stored data against it.
//!
//! Conditional fields that are hidden (for example the badge selection while
//! "Show Badge?" is unchecked) are not validated.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::constants::{POST_TYPE, PRODUCTS_META_KEY};
use crate::store::parse_checkbox;

/// Layout of a repeatable group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexLayout {
    TabbedVertical,
    TabbedHorizontal,
}

/// Input type of a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    /// Text input with `type="url"`
    Url,
    /// Reference to an image attachment
    Image,
    Checkbox,
    /// One of a fixed set of `(value, label)` options
    Radio { options: Vec<(&'static str, &'static str)> },
    /// Repeatable group of sub-fields
    Complex {
        layout: ComplexLayout,
        fields: Vec<FieldDef>,
    },
}

/// Comparison in a visibility condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compare {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

/// Visibility condition on a sibling field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub field: &'static str,
    pub value: Value,
    pub compare: Compare,
}

impl Condition {
    pub fn equals(field: &'static str, value: impl Into<Value>) -> Self {
        Condition {
            field,
            value: value.into(),
            compare: Compare::Equal,
        }
    }

    /// Evaluate against the sibling values of one group entry
    pub fn holds(&self, siblings: &Map<String, Value>) -> bool {
        let actual = siblings.get(self.field).unwrap_or(&Value::Null);
        let equal = match &self.value {
            Value::Bool(expected) => parse_checkbox(actual).unwrap_or(false) == *expected,
            expected => actual == expected,
        };
        match self.compare {
            Compare::Equal => equal,
            Compare::NotEqual => !equal,
        }
    }
}

/// One field of the schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
    /// All conditions must hold for the field to be shown
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl FieldDef {
    pub fn new(kind: FieldKind, name: &'static str, label: &'static str) -> Self {
        FieldDef {
            name,
            label,
            kind,
            help_text: None,
            conditions: Vec::new(),
        }
    }

    pub fn help_text(mut self, text: &'static str) -> Self {
        self.help_text = Some(text);
        self
    }

    pub fn shown_when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_visible(&self, siblings: &Map<String, Value>) -> bool {
        self.conditions.iter().all(|c| c.holds(siblings))
    }
}

/// A group of fields attached to one record type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerDef {
    pub title: &'static str,
    pub post_type: &'static str,
    pub fields: Vec<FieldDef>,
}

/// The schema of a comparison table record
pub fn comparison_table_schema() -> ContainerDef {
    let product_fields = vec![
        FieldDef::new(FieldKind::Image, "comparison_image", "Image")
            .help_text("Please use square images. Minimum size: 125 x 125px"),
        FieldDef::new(FieldKind::Text, "comparison_product_name", "Product Name"),
        FieldDef::new(FieldKind::Checkbox, "comparison_badge_visibility", "Show Badge?"),
        FieldDef::new(
            FieldKind::Radio {
                options: vec![
                    ("best_value", "Best Value"),
                    ("best_overall", "Best Overall"),
                    ("premium_choice", "Premium Choice"),
                    ("custom", "Custom"),
                ],
            },
            "comparison_badge",
            "Comparison Badge",
        )
        .shown_when(Condition::equals("comparison_badge_visibility", true)),
        FieldDef::new(
            FieldKind::Text,
            "comparison_custom_badge_text",
            "Custom Badge Text",
        )
        .shown_when(Condition::equals("comparison_badge", "custom")),
        FieldDef::new(
            FieldKind::Complex {
                layout: ComplexLayout::TabbedHorizontal,
                fields: vec![FieldDef::new(
                    FieldKind::Text,
                    "comparison_feature_name",
                    "Feature Name",
                )],
            },
            "comparison_features",
            "Features",
        ),
        FieldDef::new(FieldKind::Url, "comparison_link", "Product Link"),
    ];

    ContainerDef {
        title: "Winner Comparison Table",
        post_type: POST_TYPE,
        fields: vec![FieldDef::new(
            FieldKind::Complex {
                layout: ComplexLayout::TabbedVertical,
                fields: product_fields,
            },
            PRODUCTS_META_KEY,
            "Products",
        )],
    }
}

/// A problem found by [`validate_record`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Location such as `crb_slides[1].comparison_badge`
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a raw record (the JSON object holding the container's fields)
pub fn validate_record(schema: &ContainerDef, record: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    match record.as_object() {
        Some(object) => validate_group(&schema.fields, object, "", &mut issues),
        None => issues.push(ValidationIssue {
            path: String::new(),
            message: "record must be an object".to_string(),
        }),
    }
    issues
}

fn validate_group(
    fields: &[FieldDef],
    values: &Map<String, Value>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for field in fields {
        if !field.is_visible(values) {
            continue;
        }
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        match values.get(field.name) {
            None | Some(Value::Null) => {}
            Some(value) => validate_value(field, value, &path, issues),
        }
    }
}

fn validate_value(field: &FieldDef, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let message = match &field.kind {
        FieldKind::Text => (!value.is_string()).then(|| "expected text".to_string()),
        FieldKind::Url => match value.as_str() {
            Some(url) if url.is_empty() || looks_like_url(url) => None,
            Some(url) => Some(format!("'{}' is not a valid URL", url)),
            None => Some("expected a URL".to_string()),
        },
        // Image references are opaque keys, stored as text or a numeric id
        FieldKind::Image => {
            let valid = match value {
                Value::Number(n) => n.is_u64(),
                Value::String(_) => true,
                _ => false,
            };
            (!valid).then(|| "expected an image reference".to_string())
        }
        FieldKind::Checkbox => parse_checkbox(value)
            .is_none()
            .then(|| "expected a checkbox value".to_string()),
        FieldKind::Radio { options } => match value.as_str() {
            Some(selected) if options.iter().any(|(v, _)| *v == selected) => None,
            Some(selected) => Some(format!(
                "'{}' is not one of: {}",
                selected,
                options
                    .iter()
                    .map(|(v, _)| *v)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            None => Some("expected one of the listed options".to_string()),
        },
        FieldKind::Complex { fields, .. } => match value.as_array() {
            Some(entries) => {
                for (idx, entry) in entries.iter().enumerate() {
                    let entry_path = format!("{}[{}]", path, idx);
                    match entry.as_object() {
                        Some(object) => validate_group(fields, object, &entry_path, issues),
                        None => issues.push(ValidationIssue {
                            path: entry_path,
                            message: "expected an object".to_string(),
                        }),
                    }
                }
                None
            }
            None => Some("expected a list".to_string()),
        },
    };

    if let Some(message) = message {
        issues.push(ValidationIssue {
            path: path.to_string(),
            message,
        });
    }
}

/// Absolute http(s) URL with a host, or a site-relative path
fn looks_like_url(url: &str) -> bool {
    let url = url.trim();
    if url.starts_with('/') {
        return true;
    }
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
            && url.len() > scheme.len()
            && !url[scheme.len()..].starts_with('/')
    })
}
