//! Field stores - where table records come from
//!
//! The renderer never looks up records on its own; it is handed a
//! [`FieldStore`]. Implementations:
//! - `MemoryFieldStore`: records held in memory (hosts that already loaded
//!   their data, tests)
//! - `FileFieldStore`: a JSON / TOML / YAML document on disk, re-read on every
//!   fetch so edits show up on the next render
//! - `NoopFieldStore`: knows no tables

mod record;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::features::assets::Attachment;
use crate::utils::error::{StoreError, StoreResult};

pub use record::{parse_checkbox, BadgeKind, Feature, ImageRef, Product, TableRecord};

/// Read access to stored comparison tables
pub trait FieldStore: Send + Sync {
    /// Fetch the published table with this identifier.
    ///
    /// Drafts, other record types and unknown identifiers all yield `Ok(None)`.
    fn fetch_table(&self, id: &str) -> StoreResult<Option<TableRecord>>;

    /// Identifiers of all published tables, in store order
    fn table_ids(&self) -> StoreResult<Vec<String>>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    records: Vec<TableRecord>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, rejecting duplicate published identifiers
    pub fn from_records(records: Vec<TableRecord>) -> StoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.add_table(record)?;
        }
        Ok(store)
    }

    /// Add a record; a second published record with the same id is an error
    pub fn add_table(&mut self, record: TableRecord) -> StoreResult<()> {
        if record.is_published()
            && self
                .records
                .iter()
                .any(|r| r.is_published() && r.id == record.id)
        {
            return Err(StoreError::DuplicateTable(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// All records, published or not
    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FieldStore for MemoryFieldStore {
    fn fetch_table(&self, id: &str) -> StoreResult<Option<TableRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.is_published() && r.id == id)
            .cloned())
    }

    fn table_ids(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.is_published())
            .map(|r| r.id.clone())
            .collect())
    }
}

/// Store that knows no tables
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFieldStore;

impl FieldStore for NoopFieldStore {
    fn fetch_table(&self, _id: &str) -> StoreResult<Option<TableRecord>> {
        Ok(None)
    }

    fn table_ids(&self) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Serialization format of a store document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Json,
    Toml,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl StoreFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(StoreFormat::Json),
            "toml" => Ok(StoreFormat::Toml),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Ok(StoreFormat::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Deserialize a document of this format
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> StoreResult<T> {
        match self {
            StoreFormat::Json => {
                serde_json::from_str(text).map_err(|e| StoreError::parse(self.name(), e))
            }
            StoreFormat::Toml => {
                toml::from_str(text).map_err(|e| StoreError::parse(self.name(), e))
            }
            #[cfg(feature = "yaml")]
            StoreFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| StoreError::parse(self.name(), e))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreFormat::Json => "json",
            StoreFormat::Toml => "toml",
            #[cfg(feature = "yaml")]
            StoreFormat::Yaml => "yaml",
        }
    }
}

/// On-disk layout of a store: table records plus the attachment library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDocument {
    pub tables: Vec<TableRecord>,
    /// Image attachments keyed by reference
    pub attachments: IndexMap<String, Attachment>,
}

impl StoreDocument {
    /// Parse a document in the given format
    pub fn parse(text: &str, format: StoreFormat) -> StoreResult<Self> {
        format.deserialize(text)
    }

    /// Read and parse a document, choosing the format by extension
    pub fn load(path: &Path) -> StoreResult<Self> {
        let document: Self = load_as(path)?;
        debug!(
            path = %path.display(),
            tables = document.tables.len(),
            attachments = document.attachments.len(),
            "loaded store document"
        );
        Ok(document)
    }

    /// Move the table records into a memory store
    pub fn into_store(self) -> StoreResult<MemoryFieldStore> {
        MemoryFieldStore::from_records(self.tables)
    }
}

/// Read a store file as untyped JSON, for validation against the field schema
pub fn load_raw_document(path: &Path) -> StoreResult<Value> {
    load_as(path)
}

fn load_as<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let format = StoreFormat::from_path(path)?;
    if !path.exists() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    format.deserialize(&text)
}

/// Store backed by a document on disk
#[derive(Debug, Clone)]
pub struct FileFieldStore {
    path: PathBuf,
}

impl FileFieldStore {
    /// Open a store file; the file is read once here to validate it
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        StoreDocument::load(&path)?.into_store()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the whole document
    pub fn document(&self) -> StoreResult<StoreDocument> {
        StoreDocument::load(&self.path)
    }

    fn snapshot(&self) -> StoreResult<MemoryFieldStore> {
        self.document()?.into_store()
    }
}

impl FieldStore for FileFieldStore {
    fn fetch_table(&self, id: &str) -> StoreResult<Option<TableRecord>> {
        self.snapshot()?.fetch_table(id)
    }

    fn table_ids(&self) -> StoreResult<Vec<String>> {
        self.snapshot()?.table_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn sample_records() -> Vec<TableRecord> {
        vec![
            TableRecord::new("5", vec![Product::new("Widget A")]),
            TableRecord::new("6", vec![Product::new("Draft")]).with_status("draft"),
            TableRecord::new("7", vec![Product::new("Widget B"), Product::new("Widget C")]),
        ]
    }

    #[test]
    fn test_memory_store_fetch() {
        let store = MemoryFieldStore::from_records(sample_records()).unwrap();
        let table = store.fetch_table("5").unwrap().unwrap();
        assert_eq!(table.products[0].name, "Widget A");
        assert_eq!(store.fetch_table("404").unwrap(), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_memory_store_hides_drafts() {
        let store = MemoryFieldStore::from_records(sample_records()).unwrap();
        assert_eq!(store.fetch_table("6").unwrap(), None);
        assert_eq!(store.table_ids().unwrap(), vec!["5", "7"]);
    }

    #[test]
    fn test_memory_store_hides_other_post_types() {
        let mut record = TableRecord::new("8", vec![]);
        record.post_type = "page".to_string();
        let store = MemoryFieldStore::from_records(vec![record]).unwrap();
        assert_eq!(store.fetch_table("8").unwrap(), None);
    }

    #[test]
    fn test_memory_store_rejects_duplicate_published() {
        let result = MemoryFieldStore::from_records(vec![
            TableRecord::new("5", vec![]),
            TableRecord::new("5", vec![]),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateTable(id)) if id == "5"));

        // A draft may share the id of a published table
        let result = MemoryFieldStore::from_records(vec![
            TableRecord::new("5", vec![]),
            TableRecord::new("5", vec![]).with_status("draft"),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_noop_store() {
        assert_eq!(NoopFieldStore.fetch_table("5").unwrap(), None);
        assert!(NoopFieldStore.table_ids().unwrap().is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            StoreFormat::from_path(Path::new("tables.JSON")).unwrap(),
            StoreFormat::Json
        );
        assert_eq!(
            StoreFormat::from_path(Path::new("tables.toml")).unwrap(),
            StoreFormat::Toml
        );
        assert!(matches!(
            StoreFormat::from_path(Path::new("tables.csv")),
            Err(StoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_toml_document() {
        let text = r#"
[[tables]]
id = "5"
title = "Best widgets"

[[tables.crb_slides]]
comparison_product_name = "Widget A"
comparison_badge_visibility = true
comparison_badge = "premium_choice"
comparison_link = "https://x.test"

[[tables.crb_slides.comparison_features]]
comparison_feature_name = "Fast"

[attachments.12]
url = "https://cdn.test/a.png"
"#;
        let doc = StoreDocument::parse(text, StoreFormat::Toml).unwrap();
        assert_eq!(doc.tables.len(), 1);
        let product = &doc.tables[0].products[0];
        assert_eq!(product.badge_kind, BadgeKind::PremiumChoice);
        assert_eq!(product.features, vec![Feature::new("Fast")]);
        assert!(doc.attachments.contains_key("12"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = StoreDocument::parse("{ not json", StoreFormat::Json);
        assert!(matches!(result, Err(StoreError::Parse { format: "json", .. })));
    }

    #[test]
    fn test_file_store_rereads_on_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, r#"{"tables": [{"id": "5", "crb_slides": []}]}"#).unwrap();

        let store = FileFieldStore::open(&path).unwrap();
        assert!(store.fetch_table("5").unwrap().unwrap().products.is_empty());

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(
            br#"{"tables": [{"id": "5", "crb_slides": [{"comparison_product_name": "New"}]}]}"#,
        )
        .unwrap();
        drop(file);

        let table = store.fetch_table("5").unwrap().unwrap();
        assert_eq!(table.products[0].name, "New");
    }

    #[test]
    fn test_load_raw_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.toml");
        fs::write(&path, "[[tables]]\nid = \"5\"\n").unwrap();
        let raw = load_raw_document(&path).unwrap();
        assert_eq!(raw["tables"][0]["id"], "5");
    }

    #[test]
    fn test_file_store_missing_file() {
        let result = FileFieldStore::open("/nonexistent/tables.json");
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
