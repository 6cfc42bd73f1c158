//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and render warnings
//! - Typed HTML fragment builder
//! - Escaping and sanitizing

pub mod error;
pub mod html;
pub mod sanitize;

// Re-export commonly used items
pub use error::{
    ConfigError, ConfigResult, RenderOutput, RenderWarning, StoreError, StoreResult,
    WarningKind,
};
pub use html::{Element, Node};
pub use sanitize::{escape_html, sanitize_inline_html};
