//! Comparison table rendering pipeline
//!
//! # Architecture
//!
//! ```text
//! TableRecord -> Product rows -> Cell generators -> HTML fragment
//! ```
//!
//! The header row is fixed. Every product becomes one row with five cells
//! (badge/rank, image, name, features, link), and the rows are wrapped in
//! `div.wc-table > table#ct-<id> > tbody`.
//!
//! # Example
//!
//! ```
//! use comparison_table::config::RenderOptions;
//! use comparison_table::core::table::ComparisonTableGenerator;
//! use comparison_table::features::assets::NoopAssetResolver;
//! use comparison_table::store::{BadgeKind, Product};
//!
//! let options = RenderOptions::default();
//! let mut gen = ComparisonTableGenerator::new("5", &options, &NoopAssetResolver);
//! gen.process_product(&Product::new("Widget A").with_badge(BadgeKind::BestValue));
//! let html = gen.generate_html();
//! assert!(html.contains(r#"<table id="ct-5" class="comparison-table">"#));
//! assert!(html.contains("Best Value"));
//! ```

mod cells;
mod generator;
mod header;


// Re-export public API
pub use cells::{
    badge_cell, build_image_cell, feature_list_cell, image_cell, link_cell, name_cell, ImageCell,
};
pub use generator::ComparisonTableGenerator;
pub use header::{header_row, ColumnDef, COLUMNS};
