//! Fixed names, labels and markup shared by the renderer
//!
//! CSS class names form a contract with the accompanying stylesheets and must
//! not change between releases.

use phf::phf_map;

/// Shortcode tag that embeds a table in page content
pub const SHORTCODE_TAG: &str = "winner_comparison_table";

/// Record type holding comparison tables
pub const POST_TYPE: &str = "comparison_table";

/// Record status visible to the front end
pub const PUBLISHED_STATUS: &str = "publish";

/// Meta key of the product list on a table record
pub const PRODUCTS_META_KEY: &str = "crb_slides";

/// Prefix of the table element's `id` attribute
pub const TABLE_ID_PREFIX: &str = "ct-";

/// Image size keyword requested from the asset resolver
pub const DEFAULT_IMAGE_SIZE: &str = "thumbnail";

/// Label of the call-to-action button
pub const DEFAULT_CTA_LABEL: &str = "Check Prices";

/// Fallback label for unrecognized badge selections
pub const DEFAULT_BADGE_LABEL: &str = "Best Overall";

/// Medal images for ranks 1, 2 and 3
pub const DEFAULT_MEDAL_URLS: [&str; 3] = [
    "https://petkeen.com/wp-content/uploads/2020/09/Gold-medal.webp",
    "https://petkeen.com/wp-content/uploads/2020/09/Silver-medal.webp",
    "https://petkeen.com/wp-content/uploads/2020/09/Bronze-medal.webp",
];

/// Badge selection slugs mapped to their display labels
pub static BADGE_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "best_overall" => "Best Overall",
    "best_value" => "Best Value",
    "premium_choice" => "Premium Choice",
};

/// Checkmark icon in front of every feature
pub const CHECK_ICON_SVG: &str = r#"<svg class="sui-svg" width="15" height="15" preserveAspectRatio="none" viewBox="0 0 1636 1792" style="fill:#3bb1a9" xmlns="http://www.w3.org/2000/svg"><path d="M1671 566c0 25-10 50-28 68l-724 724-136 136c-18 18-43 28-68 28s-50-10-68-28l-136-136-362-362c-18-18-28-43-28-68s10-50 28-68l136-136c18-18 43-28 68-28s50 10 68 28l294 295 656-657c18-18 43-28 68-28s50 10 68 28l136 136c18 18 28 43 28 68z"></path></svg>"#;

/// CSS class names
pub mod classes {
    pub const HEAD_PREFIX: &str = "wc-";
    pub const HEAD_ROW: &str = "table-head";
    pub const HEAD_COL: &str = "wc-head-col";

    pub const WRAPPER: &str = "wc-table";
    pub const TABLE: &str = "comparison-table";
    pub const ROW: &str = "comparison-row";
    pub const ROW_HAS_BADGE: &str = "has-badge";

    pub const BADGE_CELL: &str = "comparison_badge";
    pub const BADGE_TEXT: &str = "wc-badge-text";
    pub const BADGE_IMAGE: &str = "wc-badge-image";

    pub const IMAGE_CELL: &str = "comparison_product_image";
    pub const IMAGE: &str = "comparison_image";

    pub const NAME_CELL: &str = "comparison-product_name";
    pub const FEATURES_CELL: &str = "comparison-feature_list";
    pub const LINK_CELL: &str = "comparison-link";
    pub const BUTTON: &str = "wc-button";

    pub const SHORTCODE_HINT: &str = "comparison-shortcode";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_labels() {
        assert_eq!(BADGE_LABELS.get("best_value"), Some(&"Best Value"));
        assert_eq!(BADGE_LABELS.get("custom"), None);
        assert_eq!(BADGE_LABELS.len(), 3);
    }

    #[test]
    fn test_icon_is_single_svg() {
        assert!(CHECK_ICON_SVG.starts_with("<svg"));
        assert!(CHECK_ICON_SVG.ends_with("</svg>"));
    }
}
