//! Fixed header row of the comparison table

use crate::data::constants::classes;
use crate::utils::html::Element;

/// One column of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Header text; empty for the rating and link columns
    pub title: &'static str,
    /// Column class, appended to the shared header prefix
    pub class: &'static str,
}

/// Columns in display order
pub const COLUMNS: [ColumnDef; 5] = [
    ColumnDef {
        title: "",
        class: "rating",
    },
    ColumnDef {
        title: "Image",
        class: "image",
    },
    ColumnDef {
        title: "Product",
        class: "product",
    },
    ColumnDef {
        title: "Details",
        class: "features",
    },
    ColumnDef {
        title: "",
        class: "link",
    },
];

/// Build the header row: `<tr class="table-head">` with one `<th>` per column
pub fn header_row() -> Element {
    Element::new("tr")
        .class(classes::HEAD_ROW)
        .children(COLUMNS.iter().map(|col| {
            let column_class = format!("{}{}", classes::HEAD_PREFIX, col.class);
            Element::new("th")
                .classes(&[classes::HEAD_COL, column_class.as_str()])
                .text(col.title)
        }))
}
