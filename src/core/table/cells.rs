//! Per-column cell generators
//!
//! Each generator maps one product's field values to a `<td>` element. They
//! are pure: the only outside input is the asset resolver used by the image
//! cell.

use crate::config::RenderOptions;
use crate::data::constants::{classes, CHECK_ICON_SVG};
use crate::features::assets::{AssetResolver, ImageAttributes};
use crate::store::{BadgeKind, Feature, ImageRef};
use crate::utils::html::Element;
use crate::utils::sanitize::sanitize_inline_html;

/// Badge text and rank medal.
///
/// The two parts are independent: badge text depends only on
/// `badge_enabled`, the medal only on `rank` (1, 2 or 3).
pub fn badge_cell(
    badge_enabled: bool,
    badge_kind: &BadgeKind,
    badge_custom_text: &str,
    rank: i64,
    options: &RenderOptions,
) -> Element {
    let mut cell = Element::new("td").class(classes::BADGE_CELL);

    if badge_enabled {
        cell = cell.child(
            Element::new("span")
                .class(classes::BADGE_TEXT)
                .text(badge_kind.label(badge_custom_text)),
        );
    }

    if let Some(url) = options.medal_url(rank) {
        cell = cell.child(
            Element::new("span")
                .class(classes::BADGE_IMAGE)
                .child(Element::void("img").attr("src", url)),
        );
    }

    cell
}

/// Image cell together with what happened while resolving it
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCell {
    pub element: Element,
    /// The resolver returned markup
    pub resolved: bool,
    /// The sanitizer removed something from that markup
    pub stripped: bool,
}

/// Resolve and sanitize the product image, reporting what happened
pub fn build_image_cell(
    image: &ImageRef,
    alt: &str,
    assets: &dyn AssetResolver,
    options: &RenderOptions,
) -> ImageCell {
    let attrs = ImageAttributes {
        class: classes::IMAGE.to_string(),
        alt: alt.to_string(),
    };
    let markup = assets.resolve_image(image, &options.image_size, &attrs);
    let sanitized = sanitize_inline_html(&markup);

    ImageCell {
        element: Element::new("td")
            .class(classes::IMAGE_CELL)
            .trusted(sanitized.html),
        resolved: !markup.is_empty(),
        stripped: sanitized.modified,
    }
}

/// Product image cell
pub fn image_cell(
    image: &ImageRef,
    alt: &str,
    assets: &dyn AssetResolver,
    options: &RenderOptions,
) -> Element {
    build_image_cell(image, alt, assets, options).element
}

/// Product name, escaped
pub fn name_cell(name: &str) -> Element {
    Element::new("td").class(classes::NAME_CELL).text(name)
}

/// Feature list: one `<li>` per feature, each with the checkmark icon
pub fn feature_list_cell(features: &[Feature]) -> Element {
    let items = features.iter().map(|feature| {
        Element::new("li")
            .trusted(CHECK_ICON_SVG)
            .text(" ")
            .text(feature.name.as_str())
    });

    Element::new("td")
        .class(classes::FEATURES_CELL)
        .child(Element::new("ul").children(items))
}

/// Call-to-action link opening in a new tab; the URL is escaped, not validated
pub fn link_cell(url: &str, options: &RenderOptions) -> Element {
    Element::new("td").class(classes::LINK_CELL).child(
        Element::new("a")
            .class(classes::BUTTON)
            .attr("href", url)
            .attr("target", "_blank")
            .text(options.cta_label.as_str()),
    )
}
