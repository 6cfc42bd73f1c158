//! Table assembler

use tracing::trace;

use super::cells::{badge_cell, build_image_cell, feature_list_cell, link_cell, name_cell};
use super::header::header_row;
use crate::config::RenderOptions;
use crate::data::constants::classes;
use crate::features::assets::AssetResolver;
use crate::store::Product;
use crate::utils::error::{RenderOutput, RenderWarning, WarningKind};
use crate::utils::html::Element;

/// Assembles product rows into the comparison table fragment.
///
/// Rows are numbered in the order they are processed; the rank of a product
/// is its 1-based position and drives the medal decoration.
pub struct ComparisonTableGenerator<'a> {
    /// Table identifier, used in the table element id
    pub table_id: String,
    options: &'a RenderOptions,
    assets: &'a dyn AssetResolver,
    rows: Vec<Element>,
    warnings: Vec<RenderWarning>,
}

impl<'a> ComparisonTableGenerator<'a> {
    /// Create a generator for one table
    pub fn new(
        table_id: impl Into<String>,
        options: &'a RenderOptions,
        assets: &'a dyn AssetResolver,
    ) -> Self {
        ComparisonTableGenerator {
            table_id: table_id.into(),
            options,
            assets,
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Number of product rows processed so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    /// Record a warning that does not belong to a row
    pub fn add_warning(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    /// Render one product as the next row
    pub fn process_product(&mut self, product: &Product) {
        let rank = self.rows.len() + 1;
        trace!(table = %self.table_id, rank, name = %product.name, "processing product");

        if product.badge_enabled && !product.badge_kind.is_recognized() {
            self.warnings.push(
                RenderWarning::new(
                    WarningKind::UnknownBadgeKind,
                    format!("unknown badge selection '{}'", product.badge_kind),
                )
                .at_row(rank)
                .with_suggestion("showing 'Best Overall'"),
            );
        }

        let image = build_image_cell(
            &product.image,
            &product.image_alt(),
            self.assets,
            self.options,
        );
        if !image.resolved && !product.image.is_empty() {
            self.warnings.push(
                RenderWarning::new(
                    WarningKind::UnresolvedImage,
                    format!("image '{}' could not be resolved", product.image.as_str()),
                )
                .at_row(rank),
            );
        }
        if image.stripped {
            self.warnings.push(
                RenderWarning::new(
                    WarningKind::SanitizedMarkup,
                    "unsafe content removed from image markup",
                )
                .at_row(rank),
            );
        }

        let badge_class = if product.badge_enabled {
            classes::ROW_HAS_BADGE
        } else {
            ""
        };

        let row = Element::new("tr")
            .classes(&[classes::ROW, badge_class])
            .child(badge_cell(
                product.badge_enabled,
                &product.badge_kind,
                &product.badge_custom_text,
                rank as i64,
                self.options,
            ))
            .child(image.element)
            .child(name_cell(&product.name))
            .child(feature_list_cell(&product.features))
            .child(link_cell(&product.link, self.options));

        self.rows.push(row);
    }

    /// Render every product in order
    pub fn process_products<'p>(&mut self, products: impl IntoIterator<Item = &'p Product>) {
        for product in products {
            self.process_product(product);
        }
    }

    /// Generate the complete fragment:
    /// `div.wc-table > table#<prefix><id>.comparison-table > tbody`
    pub fn generate_html(&self) -> String {
        let table_id = format!("{}{}", self.options.table_id_prefix, self.table_id);

        let body = Element::new("tbody")
            .child(header_row())
            .text(" ")
            .children(self.rows.iter().cloned());

        Element::new("div")
            .class(classes::WRAPPER)
            .child(
                Element::new("table")
                    .attr("id", table_id)
                    .class(classes::TABLE)
                    .child(body),
            )
            .render()
    }

    /// Generate the fragment and hand over the collected warnings
    pub fn into_output(self) -> RenderOutput {
        let html = self.generate_html();
        RenderOutput::with_warnings(html, self.warnings)
    }
}
