//! Escaping and sanitizing of HTML
//!
//! Two policies are used by the cell generators:
//!
//! - [`escape_html`] for plain text and attribute values: every HTML
//!   metacharacter (`& < > " '`) is replaced with an entity.
//! - [`sanitize_inline_html`] for markup produced by the asset resolver:
//!   common inline tags survive, executable content is removed.

use std::borrow::Cow;

use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Elements removed together with everything between their tags
    static ref BLOCKED_ELEMENTS: Vec<Regex> = ["script", "style", "iframe", "object", "embed", "noscript", "template"]
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>|<{tag}\b[^>]*>", tag = tag))
                .unwrap()
        })
        .collect();

    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();

    static ref TAG: Regex = Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*)>").unwrap();

    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    )
    .unwrap();

    static ref URL_SCHEME: Regex = Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.-]*):").unwrap();
}

/// Inline tags kept by the sanitizer
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "br", "div", "em", "figcaption", "figure", "i", "img", "p", "picture",
    "small", "source", "span", "strong", "sub", "sup",
];

/// Attributes kept on allowed tags
const ALLOWED_ATTRIBUTES: &[&str] = &[
    "alt", "class", "decoding", "height", "href", "id", "loading", "media", "rel", "sizes",
    "src", "srcset", "target", "title", "type", "width",
];

/// Attributes holding URLs
const URL_ATTRIBUTES: &[&str] = &["href", "src", "srcset"];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp"];

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Result of a sanitizing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub html: String,
    /// Whether anything was dropped from the input
    pub modified: bool,
}

/// Keep allowlisted inline markup and strip everything executable.
///
/// Tags are rebuilt from their allowlisted attributes. Any `<` or `>` outside
/// a recognized tag, such as an unterminated tag at the end of the input, is
/// escaped so it cannot open an element in the page.
pub fn sanitize_inline_html(input: &str) -> Sanitized {
    let mut html = COMMENT.replace_all(input, "").into_owned();
    for blocked in BLOCKED_ELEMENTS.iter() {
        html = blocked.replace_all(&html, "").into_owned();
    }

    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in TAG.captures_iter(&html) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut out, &html[last..whole.start()]);
        if let Some(tag) = rebuild_tag(&caps) {
            out.push_str(&tag);
        }
        last = whole.end();
    }
    push_text(&mut out, &html[last..]);

    let modified = out != input;
    Sanitized { html: out, modified }
}

/// Text between tags; stray angle brackets are escaped
fn push_text(out: &mut String, text: &str) {
    if text.contains(['<', '>']) {
        out.push_str(&html_escape::encode_text(&decode_html_entities(text)));
    } else {
        out.push_str(text);
    }
}

fn rebuild_tag(caps: &Captures) -> Option<String> {
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }
    if closing {
        return Some(format!("</{}>", name));
    }

    let raw_attrs = caps.get(3).map_or("", |m| m.as_str());
    let self_closing = raw_attrs.trim_end().ends_with('/');

    let mut out = format!("<{}", name);
    for attr in ATTRIBUTE.captures_iter(raw_attrs) {
        let attr_name = attr[1].to_ascii_lowercase();
        if !ALLOWED_ATTRIBUTES.contains(&attr_name.as_str()) {
            continue;
        }
        let raw_value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map_or("", |m| m.as_str());
        // Schemes are checked on the entity-decoded value
        let value = decode_html_entities(raw_value);
        if URL_ATTRIBUTES.contains(&attr_name.as_str()) && !is_safe_url(&value) {
            continue;
        }
        out.push(' ');
        out.push_str(&attr_name);
        out.push_str("=\"");
        out.push_str(&escape_html(&value));
        out.push('"');
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    Some(out)
}

/// Check whether a URL (or every candidate of a `srcset`) uses a safe scheme.
///
/// Expects entity-decoded text. Relative URLs have no scheme and are
/// accepted, unless an `&` precedes the first path character: that is an
/// entity the decoder did not resolve and may hide a scheme.
pub fn is_safe_url(url: &str) -> bool {
    url.split(',').all(|candidate| {
        let compact: String = candidate
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect();
        match URL_SCHEME.captures(&compact) {
            Some(caps) => {
                let scheme = caps[1].to_ascii_lowercase();
                SAFE_SCHEMES.contains(&scheme.as_str())
            }
            None => {
                let head = compact.split(['/', '?', '#']).next().unwrap_or_default();
                !head.contains('&')
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_all_metacharacters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_plain_text_borrowed() {
        assert!(matches!(escape_html("Widget A"), Cow::Borrowed("Widget A")));
        assert_eq!(escape_html("http://x.test/a?b=c"), "http://x.test/a?b=c");
    }

    #[test]
    fn test_sanitize_keeps_image_markup() {
        let img = r#"<img width="150" height="150" src="https://cdn.test/a-150x150.png" class="comparison_image" alt="Widget A Image" decoding="async" loading="lazy" />"#;
        let result = sanitize_inline_html(img);
        assert_eq!(result.html, img);
        assert!(!result.modified);
    }

    #[test]
    fn test_sanitize_strips_script_elements() {
        let result = sanitize_inline_html(r#"<img src="a.png"><script>alert(1)</script>"#);
        assert_eq!(result.html, r#"<img src="a.png">"#);
        assert!(result.modified);
    }

    #[test]
    fn test_sanitize_strips_event_handlers() {
        let result = sanitize_inline_html(r#"<img src="a.png" onerror="alert(1)">"#);
        assert_eq!(result.html, r#"<img src="a.png">"#);
    }

    #[test]
    fn test_sanitize_drops_javascript_urls() {
        let result = sanitize_inline_html(r#"<a href="java script:alert(1)">x</a>"#);
        assert_eq!(result.html, "<a>x</a>");

        let result = sanitize_inline_html(r#"<img src="data:text/html;base64,AAAA">"#);
        assert_eq!(result.html, "<img>");
    }

    #[test]
    fn test_sanitize_unwraps_unknown_tags() {
        let result = sanitize_inline_html("<blink><span>hi</span></blink>");
        assert_eq!(result.html, "<span>hi</span>");
    }

    #[test]
    fn test_sanitize_unclosed_script() {
        let result = sanitize_inline_html(r#"<span>a</span><script src="x.js">"#);
        assert_eq!(result.html, "<span>a</span>");
    }

    #[test]
    fn test_sanitize_drops_entity_encoded_schemes() {
        let result = sanitize_inline_html(r#"<a href="&#106;avascript:alert(1)">x</a>"#);
        assert_eq!(result.html, "<a>x</a>");
        assert!(result.modified);

        let result = sanitize_inline_html(r#"<a href="javascript&colon;alert(1)">x</a>"#);
        assert_eq!(result.html, "<a>x</a>");

        let result = sanitize_inline_html(r#"<img src="&#x6A;avascript&#58;alert(1)">"#);
        assert_eq!(result.html, "<img>");
    }

    #[test]
    fn test_sanitize_keeps_encoded_query_strings() {
        let link = r#"<a href="/go?a=1&amp;b=2" title="Tom &amp; Jerry">x</a>"#;
        let result = sanitize_inline_html(link);
        assert_eq!(result.html, link);
        assert!(!result.modified);
    }

    #[test]
    fn test_sanitize_escapes_unterminated_tag() {
        let result = sanitize_inline_html(r#"<img src=x onerror=alert(1) "#);
        assert_eq!(result.html, "&lt;img src=x onerror=alert(1) ");
        assert!(result.modified);

        let result = sanitize_inline_html(r#"<img src="a.png"><img src=x onerror=alert(1)"#);
        assert_eq!(result.html, r#"<img src="a.png">&lt;img src=x onerror=alert(1)"#);
    }

    #[test]
    fn test_sanitize_escapes_stray_brackets_in_text() {
        let result = sanitize_inline_html("<span>a < b &amp; c</span>");
        assert_eq!(result.html, "<span>a &lt; b &amp; c</span>");
    }

    #[test]
    fn test_safe_url_srcset() {
        assert!(is_safe_url("a-150.png 150w, https://cdn.test/a-300.png 300w"));
        assert!(!is_safe_url("a-150.png 150w, javascript:alert(1) 300w"));
        assert!(is_safe_url(""));
        assert!(!is_safe_url("javascript&colon;alert(1)"));
        assert!(is_safe_url("/img?a=1&b=2"));
    }
}
