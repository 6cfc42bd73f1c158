//! # comparison-table
//!
//! Renders product comparison tables as HTML fragments.
//!
//! ## Features
//!
//! - **Fixed layout**: a header row plus one five-cell row per product
//!   (badge/rank, image, name, features, call to action)
//! - **Ranking badges**: configurable label per product, medal image for the
//!   top three
//! - **Injected collaborators**: records come from a [`FieldStore`], images
//!   from an [`AssetResolver`]
//! - **Shortcodes**: expands `[winner_comparison_table id="N"]` in content
//! - **Safe output**: every store value is escaped, resolver markup is
//!   sanitized
//!
//! ## Usage Examples
//!
//! ### Rendering a Table
//!
//! ```rust
//! use comparison_table::features::assets::NoopAssetResolver;
//! use comparison_table::store::{BadgeKind, MemoryFieldStore, Product, TableRecord};
//! use comparison_table::render_comparison_table;
//!
//! let store = MemoryFieldStore::from_records(vec![TableRecord::new(
//!     "5",
//!     vec![Product::new("Widget A")
//!         .with_badge(BadgeKind::BestValue)
//!         .with_features(["Fast"])
//!         .with_link("https://example.com/a")],
//! )])
//! .unwrap();
//!
//! let html = render_comparison_table("5", &store, &NoopAssetResolver);
//! assert!(html.starts_with(r#"<div class="wc-table"><table id="ct-5""#));
//! assert!(html.contains("Best Value"));
//! ```
//!
//! ### Expanding Shortcodes
//!
//! ```rust
//! use comparison_table::features::assets::NoopAssetResolver;
//! use comparison_table::store::NoopFieldStore;
//! use comparison_table::expand_shortcodes;
//!
//! let page = expand_shortcodes(
//!     r#"<p>Intro</p>[winner_comparison_table id="9"]"#,
//!     &NoopFieldStore,
//!     &NoopAssetResolver,
//! );
//! assert!(page.starts_with(r#"<p>Intro</p><div class="wc-table">"#));
//! ```

/// Configuration and render options
pub mod config;

/// Core rendering modules
pub mod core;

/// Data layer - static names, labels and markup
pub mod data;

/// Feature modules - asset resolution and field schema
pub mod features;

/// Field stores and table records
pub mod store;

/// Utility modules
pub mod utils;

// Re-export core rendering types
pub use crate::core::renderer::ComparisonTableRenderer;
pub use crate::core::shortcode::{
    parse_shortcode_attrs, shortcode_for, shortcode_hint_html, ShortcodeAtts, ShortcodeProcessor,
};
pub use crate::core::table::{header_row, ComparisonTableGenerator};

pub use config::{Config, RenderOptions};

// Re-export collaborator seams
pub use features::assets::{AssetResolver, AttachmentLibrary, NoopAssetResolver};
pub use features::schema::{comparison_table_schema, validate_record, ValidationIssue};
pub use store::{FieldStore, FileFieldStore, MemoryFieldStore, NoopFieldStore, TableRecord};

// Re-export utilities
pub use utils::error::{RenderOutput, RenderWarning, StoreError, StoreResult, WarningKind};

/// Render the table `table_id` with default options
///
/// # Arguments
/// * `table_id` - Identifier of a published comparison table
/// * `store` - Where the table record is looked up
/// * `assets` - Resolves product image references to markup
///
/// # Returns
/// The HTML fragment; an empty table when the identifier is unknown
pub fn render_comparison_table(
    table_id: &str,
    store: &dyn FieldStore,
    assets: &dyn AssetResolver,
) -> String {
    ComparisonTableRenderer::new(store, assets).render(table_id)
}

/// Render the table `table_id` with custom options
pub fn render_comparison_table_with_options(
    table_id: &str,
    store: &dyn FieldStore,
    assets: &dyn AssetResolver,
    options: &RenderOptions,
) -> String {
    ComparisonTableRenderer::with_options(store, assets, options.clone()).render(table_id)
}

/// Render the table and collect render warnings
pub fn render_comparison_table_with_diagnostics(
    table_id: &str,
    store: &dyn FieldStore,
    assets: &dyn AssetResolver,
) -> RenderOutput {
    ComparisonTableRenderer::new(store, assets).render_with_diagnostics(table_id)
}

/// Handle one shortcode invocation given its attribute text
pub fn render_shortcode(
    attr_text: &str,
    store: &dyn FieldStore,
    assets: &dyn AssetResolver,
) -> String {
    ComparisonTableRenderer::new(store, assets).render_shortcode(attr_text)
}

/// Replace every table shortcode in `content` with its rendered table
pub fn expand_shortcodes(
    content: &str,
    store: &dyn FieldStore,
    assets: &dyn AssetResolver,
) -> String {
    ComparisonTableRenderer::new(store, assets).expand_shortcodes(content)
}
