//! Image asset resolution
//!
//! The image cell does not know how image references map to files. It asks an
//! [`AssetResolver`] for ready-made `<img>` markup, the same way a CMS turns an
//! attachment id into an image tag for a named size.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::store::ImageRef;
use crate::utils::html::Element;

/// Attributes the caller wants on the resolved `<img>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttributes {
    pub class: String,
    pub alt: String,
}

/// Turns an image reference into renderable markup
pub trait AssetResolver: Send + Sync {
    /// Markup for `image` at the size named by `size`.
    ///
    /// Returns an empty string when the reference cannot be resolved.
    fn resolve_image(&self, image: &ImageRef, size: &str, attrs: &ImageAttributes) -> String;
}

/// One rendition of an attachment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rendition {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A stored image with its named size renditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    /// Full-size URL
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Renditions keyed by size name (`thumbnail`, `medium`, ...)
    pub sizes: IndexMap<String, Rendition>,
}

impl Attachment {
    pub fn new(url: impl Into<String>) -> Self {
        Attachment {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, name: &str, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.sizes.insert(
            name.to_string(),
            Rendition {
                url: url.into(),
                width: Some(width),
                height: Some(height),
            },
        );
        self
    }

    /// The rendition for `size`, falling back to the full image
    pub fn rendition(&self, size: &str) -> Rendition {
        self.sizes.get(size).cloned().unwrap_or_else(|| Rendition {
            url: self.url.clone(),
            width: self.width,
            height: self.height,
        })
    }
}

/// Resolver over an in-memory attachment library
#[derive(Debug, Clone, Default)]
pub struct AttachmentLibrary {
    attachments: IndexMap<String, Attachment>,
}

impl AttachmentLibrary {
    pub fn new(attachments: IndexMap<String, Attachment>) -> Self {
        Self { attachments }
    }

    pub fn add(&mut self, reference: impl Into<String>, attachment: Attachment) {
        self.attachments.insert(reference.into(), attachment);
    }

    pub fn get(&self, image: &ImageRef) -> Option<&Attachment> {
        self.attachments.get(image.as_str().trim())
    }
}

impl AssetResolver for AttachmentLibrary {
    fn resolve_image(&self, image: &ImageRef, size: &str, attrs: &ImageAttributes) -> String {
        let Some(attachment) = self.get(image) else {
            trace!(image = image.as_str(), "no attachment for image reference");
            return String::new();
        };
        let rendition = attachment.rendition(size);
        if rendition.url.is_empty() {
            return String::new();
        }

        let mut img = Element::void("img");
        if let Some(width) = rendition.width {
            img = img.attr("width", width.to_string());
        }
        if let Some(height) = rendition.height {
            img = img.attr("height", height.to_string());
        }
        img.attr("src", rendition.url)
            .attr("class", attrs.class.as_str())
            .attr("alt", attrs.alt.as_str())
            .attr("decoding", "async")
            .render()
    }
}

/// Resolver that never finds an image
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAssetResolver;

impl AssetResolver for NoopAssetResolver {
    fn resolve_image(&self, _image: &ImageRef, _size: &str, _attrs: &ImageAttributes) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs() -> ImageAttributes {
        ImageAttributes {
            class: "comparison_image".to_string(),
            alt: "Widget A Image".to_string(),
        }
    }

    #[test]
    fn test_resolve_named_size() {
        let mut library = AttachmentLibrary::default();
        library.add(
            "12",
            Attachment::new("https://cdn.test/a.png").with_size(
                "thumbnail",
                "https://cdn.test/a-150x150.png",
                150,
                150,
            ),
        );
        assert_eq!(
            library.resolve_image(&ImageRef::new("12"), "thumbnail", &attrs()),
            r#"<img width="150" height="150" src="https://cdn.test/a-150x150.png" class="comparison_image" alt="Widget A Image" decoding="async">"#
        );
    }

    #[test]
    fn test_resolve_falls_back_to_full_size() {
        let mut library = AttachmentLibrary::default();
        library.add("12", Attachment::new("https://cdn.test/a.png"));
        let html = library.resolve_image(&ImageRef::new("12"), "thumbnail", &attrs());
        assert!(html.contains(r#"src="https://cdn.test/a.png""#));
        assert!(!html.contains("width"));
    }

    #[test]
    fn test_unknown_reference_is_empty() {
        let library = AttachmentLibrary::default();
        assert_eq!(
            library.resolve_image(&ImageRef::new("99"), "thumbnail", &attrs()),
            ""
        );
        assert_eq!(
            NoopAssetResolver.resolve_image(&ImageRef::new("12"), "thumbnail", &attrs()),
            ""
        );
    }

    #[test]
    fn test_alt_text_escaped() {
        let mut library = AttachmentLibrary::default();
        library.add("1", Attachment::new("a.png"));
        let html = library.resolve_image(
            &ImageRef::new("1"),
            "full",
            &ImageAttributes {
                class: "comparison_image".to_string(),
                alt: r#""><script>"#.to_string(),
            },
        );
        assert!(html.contains(r#"alt="&quot;&gt;&lt;script&gt;""#));
    }
}
