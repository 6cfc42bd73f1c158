//! Typed HTML fragment builder
//!
//! Cell generators describe their output as a small tree of [`Element`]s and
//! [`Node`]s instead of concatenating strings. Escaping happens in one place,
//! when the tree is written out:
//!
//! - attribute values and [`Node::Text`] are always escaped
//! - [`Node::Trusted`] is written verbatim and must come from a sanitizer or
//!   a static constant
//!
//! # Example
//!
//! ```
//! use comparison_table::utils::html::Element;
//!
//! let cell = Element::new("td").class("comparison-product_name").text("<b>Widget</b>");
//! assert_eq!(
//!     cell.render(),
//!     r#"<td class="comparison-product_name">&lt;b&gt;Widget&lt;/b&gt;</td>"#
//! );
//! ```

use std::fmt;

use indexmap::IndexMap;

use super::sanitize::escape_html;

/// A piece of an HTML fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output
    Text(String),
    /// Markup written as-is
    Trusted(String),
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.write_to(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Trusted(markup) => out.push_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An HTML element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: IndexMap<&'static str, String>,
    pub children: Vec<Node>,
    /// Void elements (`img`, `br`) have no children and no closing tag
    pub is_void: bool,
}

impl Element {
    /// Create a new element
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: IndexMap::new(),
            children: Vec::new(),
            is_void: false,
        }
    }

    /// Create a void element such as `img`
    pub fn void(tag: &'static str) -> Self {
        Element {
            is_void: true,
            ..Element::new(tag)
        }
    }

    /// Set an attribute, replacing an earlier value
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    /// Set the `class` attribute
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Set the `class` attribute from a list of class names; empty names are skipped
    pub fn classes(self, classes: &[&str]) -> Self {
        let joined = classes
            .iter()
            .filter(|c| !c.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        self.attr("class", joined)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append escaped text
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Append markup verbatim
    pub fn trusted(self, markup: impl Into<String>) -> Self {
        self.child(Node::Trusted(markup.into()))
    }

    /// Render to an HTML string
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if self.is_void {
            return;
        }

        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_elements() {
        let row = Element::new("tr")
            .class("comparison-row")
            .child(Element::new("td").text("a"))
            .child(Element::new("td").text("b"));
        assert_eq!(
            row.render(),
            r#"<tr class="comparison-row"><td>a</td><td>b</td></tr>"#
        );
    }

    #[test]
    fn test_void_element_ignores_children() {
        let img = Element::void("img").attr("src", "a.png").text("ignored");
        assert_eq!(img.render(), r#"<img src="a.png">"#);
    }

    #[test]
    fn test_attribute_values_escaped() {
        let a = Element::new("a").attr("href", r#"x" onclick="alert(1)"#);
        assert_eq!(
            a.render(),
            r#"<a href="x&quot; onclick=&quot;alert(1)"></a>"#
        );
    }

    #[test]
    fn test_trusted_written_verbatim() {
        let li = Element::new("li").trusted("<svg></svg>").text(" <ok>");
        assert_eq!(li.render(), "<li><svg></svg> &lt;ok&gt;</li>");
    }

    #[test]
    fn test_class_list_skips_empty() {
        let row = Element::new("tr").classes(&["comparison-row", ""]);
        assert_eq!(row.render(), r#"<tr class="comparison-row"></tr>"#);

        let row = Element::new("tr").classes(&["comparison-row", "has-badge"]);
        assert_eq!(row.render(), r#"<tr class="comparison-row has-badge"></tr>"#);
    }

    #[test]
    fn test_display_matches_render() {
        let el = Element::new("span").class("wc-badge-text").text("Best Value");
        assert_eq!(el.to_string(), el.render());
    }
}
