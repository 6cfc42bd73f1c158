//! Feature modules - collaborators of the rendering pipeline
//!
//! This module contains:
//! - Image asset resolution (attachment library, resolver trait)
//! - The field schema editors fill in, and its validator

pub mod assets;
pub mod schema;

// Re-export commonly used types
pub use assets::{AssetResolver, Attachment, AttachmentLibrary, ImageAttributes, NoopAssetResolver};
pub use schema::{comparison_table_schema, validate_record, ContainerDef, FieldDef, ValidationIssue};
