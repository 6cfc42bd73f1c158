//! Rendering entry point
//!
//! [`ComparisonTableRenderer`] ties a field store, an asset resolver and the
//! render options together. It is what a host calls when it meets a
//! shortcode: look the table up, assemble it, return HTML. Nothing is cached;
//! every call fetches from the store again.

use tracing::{debug, warn};

use super::shortcode::{shortcode_hint_html, ShortcodeAtts, ShortcodeProcessor};
use super::table::ComparisonTableGenerator;
use crate::config::RenderOptions;
use crate::features::assets::AssetResolver;
use crate::store::FieldStore;
use crate::utils::error::{RenderOutput, RenderWarning, WarningKind};

/// Renders comparison tables from injected collaborators
pub struct ComparisonTableRenderer<'a> {
    store: &'a dyn FieldStore,
    assets: &'a dyn AssetResolver,
    options: RenderOptions,
    shortcodes: ShortcodeProcessor,
}

impl<'a> ComparisonTableRenderer<'a> {
    /// Create a renderer with default options
    pub fn new(store: &'a dyn FieldStore, assets: &'a dyn AssetResolver) -> Self {
        Self::with_options(store, assets, RenderOptions::default())
    }

    /// Create a renderer with custom options
    pub fn with_options(
        store: &'a dyn FieldStore,
        assets: &'a dyn AssetResolver,
        options: RenderOptions,
    ) -> Self {
        let shortcodes = ShortcodeProcessor::new(&options.shortcode_tag);
        ComparisonTableRenderer {
            store,
            assets,
            options,
            shortcodes,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the table with this identifier
    pub fn render(&self, table_id: &str) -> String {
        self.render_with_diagnostics(table_id).html
    }

    /// Render the table and report what went wrong along the way.
    ///
    /// A missing table or a failing store still yields a valid fragment with
    /// the header row and no products.
    pub fn render_with_diagnostics(&self, table_id: &str) -> RenderOutput {
        let mut gen = ComparisonTableGenerator::new(table_id, &self.options, self.assets);

        match self.store.fetch_table(table_id) {
            Ok(Some(record)) => {
                debug!(
                    table = table_id,
                    products = record.products.len(),
                    "rendering comparison table"
                );
                gen.process_products(&record.products);
            }
            Ok(None) => {
                debug!(table = table_id, "no published comparison table");
                gen.add_warning(RenderWarning::new(
                    WarningKind::MissingTable,
                    format!("no published table with id '{}'", table_id),
                ));
            }
            Err(err) => {
                warn!(table = table_id, error = %err, "field store lookup failed");
                gen.add_warning(RenderWarning::new(
                    WarningKind::StoreUnavailable,
                    format!("store lookup for table '{}' failed: {}", table_id, err),
                ));
            }
        }

        let output = gen.into_output();
        for warning in &output.warnings {
            debug!(table = table_id, "{}", warning);
        }
        output
    }

    /// Handle one shortcode invocation given its attribute text
    pub fn render_shortcode(&self, attr_text: &str) -> String {
        let atts = ShortcodeAtts::parse(attr_text);
        self.render(&atts.id)
    }

    /// Replace every table shortcode in `content` with its rendered table
    pub fn expand_shortcodes(&self, content: &str) -> String {
        self.expand_shortcodes_with_diagnostics(content).html
    }

    /// Expand shortcodes and collect the warnings of every table rendered
    pub fn expand_shortcodes_with_diagnostics(&self, content: &str) -> RenderOutput {
        let mut warnings = Vec::new();
        let html = self.shortcodes.expand(content, |attrs| {
            let output = self.render_with_diagnostics(&ShortcodeAtts::from_attrs(attrs).id);
            warnings.extend(output.warnings);
            output.html
        });
        RenderOutput::with_warnings(html, warnings)
    }

    /// Whether `content` embeds a table; hosts use this to decide whether to
    /// load the table stylesheet
    pub fn has_shortcode(&self, content: &str) -> bool {
        self.shortcodes.has_shortcode(content)
    }

    /// Edit-screen hint with the shortcode for `table_id`
    pub fn shortcode_hint(&self, table_id: &str) -> String {
        shortcode_hint_html(&self.options.shortcode_tag, table_id)
    }
}
