//! Shortcode parsing and expansion
//!
//! A table is embedded in page content with
//! `[winner_comparison_table id="5"]`. This module finds those directives,
//! parses their attributes and replaces them with rendered output.
//!
//! Attribute syntax follows the common CMS convention:
//! - `key="value"`, `key='value'` and `key=value` set named attributes
//! - bare `"value"`, `'value'` or `value` become positional attributes
//! - keys are case-insensitive
//!
//! `[[tag ...]]` escapes a directive and renders the literal `[tag ...]`.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::constants::{classes, SHORTCODE_TAG};
use crate::utils::html::Element;

lazy_static! {
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([\w-]+)\s*=\s*"([^"]*)"(?:\s|$)|([\w-]+)\s*=\s*'([^']*)'(?:\s|$)|([\w-]+)\s*=\s*([^\s'"]+)(?:\s|$)|"([^"]*)"(?:\s|$)|'([^']*)'(?:\s|$)|(\S+)(?:\s|$)"#
    )
    .unwrap();
}

/// Attributes written on a shortcode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttrs {
    pub named: IndexMap<String, String>,
    pub positional: Vec<String>,
}

impl ShortcodeAttrs {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }
}

/// Parse the attribute text of a shortcode (everything after the tag name)
pub fn parse_shortcode_attrs(text: &str) -> ShortcodeAttrs {
    let mut attrs = ShortcodeAttrs::default();

    for caps in ATTRIBUTE.captures_iter(text) {
        let pair = [(1, 2), (3, 4), (5, 6)]
            .into_iter()
            .find_map(|(k, v)| Some((caps.get(k)?, caps.get(v)?)));

        if let Some((key, value)) = pair {
            attrs
                .named
                .insert(key.as_str().to_lowercase(), value.as_str().to_string());
        } else if let Some(value) = caps.get(7).or_else(|| caps.get(8)).or_else(|| caps.get(9)) {
            attrs.positional.push(value.as_str().to_string());
        }
    }

    attrs
}

/// Recognized attributes of the table shortcode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAtts {
    /// Table identifier; empty when not given
    pub id: String,
}

impl ShortcodeAtts {
    /// Keep the recognized attributes, fill in defaults, ignore the rest
    pub fn from_attrs(attrs: &ShortcodeAttrs) -> Self {
        ShortcodeAtts {
            id: attrs.get("id").unwrap_or_default().to_string(),
        }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_attrs(&parse_shortcode_attrs(text))
    }
}

/// Finds and expands one shortcode tag in content
#[derive(Debug, Clone)]
pub struct ShortcodeProcessor {
    tag: String,
    pattern: Regex,
}

impl ShortcodeProcessor {
    pub fn new(tag: &str) -> Self {
        // The tag must be followed by whitespace, `/` or `]`
        let pattern = Regex::new(&format!(
            r"\[(\[?){}(\s[^\]]*?)?\s*(/)?\](\]?)",
            regex::escape(tag)
        ))
        .expect("escaped shortcode tag is a valid pattern");
        ShortcodeProcessor {
            tag: tag.to_string(),
            pattern,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the content contains the shortcode (escaped occurrences included)
    pub fn has_shortcode(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }

    /// Attributes of every unescaped occurrence, in order
    pub fn find_all(&self, content: &str) -> Vec<ShortcodeAttrs> {
        self.pattern
            .captures_iter(content)
            .filter(|caps| !is_escaped(caps))
            .map(|caps| parse_shortcode_attrs(caps.get(2).map_or("", |m| m.as_str())))
            .collect()
    }

    /// Replace every occurrence with the handler's output
    pub fn expand<F>(&self, content: &str, mut handler: F) -> String
    where
        F: FnMut(&ShortcodeAttrs) -> String,
    {
        self.pattern
            .replace_all(content, |caps: &Captures| {
                let whole = &caps[0];
                if is_escaped(caps) {
                    return whole[1..whole.len() - 1].to_string();
                }
                let attrs = parse_shortcode_attrs(caps.get(2).map_or("", |m| m.as_str()));
                format!("{}{}{}", &caps[1], handler(&attrs), &caps[4])
            })
            .into_owned()
    }
}

impl Default for ShortcodeProcessor {
    fn default() -> Self {
        Self::new(SHORTCODE_TAG)
    }
}

fn is_escaped(caps: &Captures) -> bool {
    !caps[1].is_empty() && !caps[4].is_empty()
}

/// The shortcode that embeds table `id`
pub fn shortcode_for(tag: &str, id: &str) -> String {
    format!(r#"[{} id="{}"]"#, tag, id)
}

/// Copy-paste hint shown on the table edit screen
pub fn shortcode_hint_html(tag: &str, id: &str) -> String {
    Element::new("div")
        .class(classes::SHORTCODE_HINT)
        .text(shortcode_for(tag, id))
        .render()
}
