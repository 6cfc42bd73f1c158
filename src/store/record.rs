//! Stored table and product records
//!
//! Field names follow the meta keys the admin screen writes
//! (`comparison_product_name`, `crb_slides`, ...). Every product field is
//! optional: a missing, `null` or wrongly-typed value deserializes to its
//! default so that one bad field never hides a whole table.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::data::constants::{BADGE_LABELS, DEFAULT_BADGE_LABEL, POST_TYPE, PUBLISHED_STATUS};

/// Badge selection of a product
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BadgeKind {
    BestOverall,
    BestValue,
    PremiumChoice,
    Custom,
    /// Any other stored value, including an empty selection
    Other(String),
    #[default]
    Unset,
}

impl BadgeKind {
    /// Parse a stored selection slug
    pub fn from_slug(slug: &str) -> Self {
        match slug.trim() {
            "best_overall" => BadgeKind::BestOverall,
            "best_value" => BadgeKind::BestValue,
            "premium_choice" => BadgeKind::PremiumChoice,
            "custom" => BadgeKind::Custom,
            "" => BadgeKind::Unset,
            other => BadgeKind::Other(other.to_string()),
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            BadgeKind::BestOverall => "best_overall",
            BadgeKind::BestValue => "best_value",
            BadgeKind::PremiumChoice => "premium_choice",
            BadgeKind::Custom => "custom",
            BadgeKind::Other(slug) => slug,
            BadgeKind::Unset => "",
        }
    }

    /// Whether the selection is one of the four known kinds
    pub fn is_recognized(&self) -> bool {
        !matches!(self, BadgeKind::Other(_) | BadgeKind::Unset)
    }

    /// Display label; `custom_text` is only consulted for [`BadgeKind::Custom`]
    pub fn label<'a>(&self, custom_text: &'a str) -> &'a str {
        match self {
            BadgeKind::Custom => custom_text,
            kind => BADGE_LABELS
                .get(kind.slug())
                .copied()
                .unwrap_or(DEFAULT_BADGE_LABEL),
        }
    }
}

impl fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl Serialize for BadgeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for BadgeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(|slug| BadgeKind::from_slug(&slug))
    }
}

/// Opaque reference to an image asset (attachment id or key)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        ImageRef(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_string(deserializer).map(ImageRef)
    }
}

/// One entry of a product's feature list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    #[serde(
        rename = "comparison_feature_name",
        deserialize_with = "lenient_string"
    )]
    pub name: String,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Feature { name: name.into() }
    }
}

/// One row of a comparison table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(
        rename = "comparison_product_name",
        deserialize_with = "lenient_string"
    )]
    pub name: String,
    #[serde(rename = "comparison_image")]
    pub image: ImageRef,
    #[serde(rename = "comparison_features", deserialize_with = "lenient_list")]
    pub features: Vec<Feature>,
    #[serde(
        rename = "comparison_badge_visibility",
        deserialize_with = "lenient_bool"
    )]
    pub badge_enabled: bool,
    #[serde(rename = "comparison_badge")]
    pub badge_kind: BadgeKind,
    #[serde(
        rename = "comparison_custom_badge_text",
        deserialize_with = "lenient_string"
    )]
    pub badge_custom_text: String,
    #[serde(rename = "comparison_link", deserialize_with = "lenient_string")]
    pub link: String,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Product {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = ImageRef::new(image);
        self
    }

    pub fn with_features<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = names.into_iter().map(Feature::new).collect();
        self
    }

    pub fn with_badge(mut self, kind: BadgeKind) -> Self {
        self.badge_enabled = true;
        self.badge_kind = kind;
        self
    }

    pub fn with_custom_badge(mut self, text: impl Into<String>) -> Self {
        self.badge_enabled = true;
        self.badge_kind = BadgeKind::Custom;
        self.badge_custom_text = text.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Alt text of the product image
    pub fn image_alt(&self) -> String {
        format!("{} Image", self.name)
    }
}

/// A stored comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    #[serde(alias = "ID", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "crb_slides", default, deserialize_with = "lenient_list")]
    pub products: Vec<Product>,
}

impl TableRecord {
    pub fn new(id: impl Into<String>, products: Vec<Product>) -> Self {
        TableRecord {
            id: id.into(),
            title: String::new(),
            post_type: default_post_type(),
            status: default_status(),
            products,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether the front end may display this record
    pub fn is_published(&self) -> bool {
        self.post_type == POST_TYPE && self.status == PUBLISHED_STATUS
    }
}

fn default_post_type() -> String {
    POST_TYPE.to_string()
}

fn default_status() -> String {
    PUBLISHED_STATUS.to_string()
}

/// Any scalar a store may hold in a text field
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Other(_) => String::new(),
    })
}

/// Read a stored checkbox value.
///
/// Checked: `true`, a non-zero number, `"yes"`, `"true"`, `"on"`, `"1"`.
/// Unchecked: `null`, `false`, `0`, `""`, `"no"`, `"false"`, `"off"`, `"0"`.
/// Anything else is not a checkbox value and yields `None`; the store reader
/// treats it as unchecked and the schema validator reports it.
pub fn parse_checkbox(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Some(true),
            "" | "no" | "false" | "off" | "0" => Some(false),
            _ => None,
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_checkbox(&value).unwrap_or(false))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeItem<T> {
    Item(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeList<T> {
    List(Vec<MaybeItem<T>>),
    Other(IgnoredAny),
}

/// A list whose malformed entries are skipped one by one
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = match MaybeList::deserialize(deserializer)? {
        MaybeList::List(entries) => entries,
        MaybeList::Other(_) => return Ok(Vec::new()),
    };

    let total = entries.len();
    let items: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            MaybeItem::Item(item) => Some(item),
            MaybeItem::Other(_) => None,
        })
        .collect();
    if items.len() < total {
        warn!(skipped = total - items.len(), "skipped malformed list entries");
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_badge_kind_labels() {
        assert_eq!(BadgeKind::BestOverall.label("x"), "Best Overall");
        assert_eq!(BadgeKind::BestValue.label("x"), "Best Value");
        assert_eq!(BadgeKind::PremiumChoice.label("x"), "Premium Choice");
        assert_eq!(BadgeKind::Custom.label("Editor's Pick"), "Editor's Pick");
        assert_eq!(BadgeKind::from_slug("gold").label("x"), "Best Overall");
        assert_eq!(BadgeKind::Unset.label("x"), "Best Overall");
    }

    #[test]
    fn test_badge_kind_slug_roundtrip() {
        for slug in ["best_overall", "best_value", "premium_choice", "custom", "gold"] {
            assert_eq!(BadgeKind::from_slug(slug).slug(), slug);
        }
        assert!(!BadgeKind::from_slug("gold").is_recognized());
        assert!(BadgeKind::from_slug(" custom ").is_recognized());
    }

    #[test]
    fn test_product_from_stored_meta() {
        let json = r#"{
            "comparison_image": 42,
            "comparison_product_name": "Widget A",
            "comparison_badge_visibility": "yes",
            "comparison_badge": "best_value",
            "comparison_custom_badge_text": "",
            "comparison_features": [
                {"_type": "_", "comparison_feature_name": "Fast"},
                {"comparison_feature_name": "Quiet"}
            ],
            "comparison_link": "http://x.test"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Widget A");
        assert_eq!(product.image, ImageRef::new("42"));
        assert!(product.badge_enabled);
        assert_eq!(product.badge_kind, BadgeKind::BestValue);
        assert_eq!(
            product.features,
            vec![Feature::new("Fast"), Feature::new("Quiet")]
        );
        assert_eq!(product.link, "http://x.test");
    }

    #[test]
    fn test_product_missing_and_null_fields() {
        let json = r#"{
            "comparison_product_name": null,
            "comparison_features": null,
            "comparison_badge": null,
            "comparison_badge_visibility": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, Product::default());
    }

    #[test]
    fn test_product_wrong_types_fall_back() {
        let json = r#"{
            "comparison_product_name": 7,
            "comparison_features": "none",
            "comparison_badge_visibility": 1,
            "comparison_link": {"url": "x"}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "7");
        assert!(product.features.is_empty());
        assert!(product.badge_enabled);
        assert_eq!(product.link, "");
    }

    #[test]
    fn test_checkbox_values() {
        for (value, expected) in [
            ("true", true),
            ("\"yes\"", true),
            ("\"on\"", true),
            ("\"1\"", true),
            ("\"maybe\"", false),
            ("\"\"", false),
            ("false", false),
            ("0", false),
        ] {
            let json = format!(r#"{{"comparison_badge_visibility": {}}}"#, value);
            let product: Product = serde_json::from_str(&json).unwrap();
            assert_eq!(product.badge_enabled, expected, "value {}", value);
        }
    }

    #[test]
    fn test_parse_checkbox() {
        use serde_json::json;

        for value in [json!(true), json!(1), json!("1"), json!("on"), json!(" YES ")] {
            assert_eq!(parse_checkbox(&value), Some(true), "value {}", value);
        }
        for value in [json!(null), json!(false), json!(0), json!(""), json!("off"), json!("no")] {
            assert_eq!(parse_checkbox(&value), Some(false), "value {}", value);
        }
        for value in [json!("maybe"), json!([true]), json!({"checked": true})] {
            assert_eq!(parse_checkbox(&value), None, "value {}", value);
        }
    }

    #[test]
    fn test_malformed_products_are_skipped_individually() {
        let json = r#"{
            "ID": 5,
            "crb_slides": [
                {"comparison_product_name": "A"},
                null,
                "junk",
                {"comparison_product_name": "B"}
            ]
        }"#;
        let record: TableRecord = serde_json::from_str(json).unwrap();
        let names: Vec<_> = record.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_malformed_features_are_skipped_individually() {
        let json = r#"{
            "comparison_features": [
                {"comparison_feature_name": "Fast"},
                42,
                {"comparison_feature_name": "Quiet"}
            ]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(
            product.features,
            vec![Feature::new("Fast"), Feature::new("Quiet")]
        );
    }

    #[test]
    fn test_table_record_defaults() {
        let record: TableRecord = serde_json::from_str(r#"{"ID": 5}"#).unwrap();
        assert_eq!(record.id, "5");
        assert!(record.is_published());
        assert!(record.products.is_empty());

        let draft = TableRecord::new("6", vec![]).with_status("draft");
        assert!(!draft.is_published());
    }

    #[test]
    fn test_image_alt() {
        assert_eq!(Product::new("Widget A").image_alt(), "Widget A Image");
        assert_eq!(Product::default().image_alt(), " Image");
    }
}
