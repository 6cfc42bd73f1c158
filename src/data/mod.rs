//! Data layer - Static names, labels and markup
//!
//! This module contains the fixed data the renderer embeds in its output:
//! - Badge labels and medal images
//! - CSS class names
//! - Shortcode tag and record type names

pub mod constants;

// Re-export commonly used items
pub use constants::{
    classes, BADGE_LABELS, CHECK_ICON_SVG, DEFAULT_BADGE_LABEL, DEFAULT_MEDAL_URLS, POST_TYPE,
    SHORTCODE_TAG,
};
