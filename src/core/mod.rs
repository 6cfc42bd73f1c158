//! Core rendering modules
//!
//! This module contains the rendering pipeline:
//! - `table`: header row, cell generators and the table assembler
//! - `shortcode`: finding and parsing shortcodes in content
//! - `renderer`: the entry point tying a field store to the assembler

pub mod renderer;
pub mod shortcode;
pub mod table;

// Re-export main types and functions
pub use renderer::ComparisonTableRenderer;
pub use shortcode::{
    parse_shortcode_attrs, shortcode_for, shortcode_hint_html, ShortcodeAtts, ShortcodeAttrs,
    ShortcodeProcessor,
};
pub use table::{header_row, ColumnDef, ComparisonTableGenerator, COLUMNS};
