//! Minimal scanner over the markup produced by `views`.
//!
//! It only understands opening tags, their attributes and the text that
//! directly follows them. That is enough to query elements by `data-testid`
//! and rewrite their `class` attribute in place.

use std::ops::Range;

use maud::html;

use crate::utils::unescape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Text between the opening tag and the next tag.
    pub text: String,
    /// Byte range of the opening tag in the source markup.
    pub span: Range<usize>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn test_id(&self) -> Option<&str> {
        self.attr("data-testid")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn set_class(&mut self, class: &str, on: bool) {
        let mut classes: Vec<String> = self
            .attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        classes.retain(|c| c != class);
        if on {
            classes.push(class.to_string());
        }
        let joined = classes.join(" ");
        match self.attributes.iter_mut().find(|(k, _)| k == "class") {
            Some((_, value)) => *value = joined,
            None => self.attributes.push(("class".to_string(), joined)),
        }
    }

    pub fn to_open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, html! { (value) }.into_string()));
        }
        out.push('>');
        out
    }
}

pub fn elements(html: &str) -> Vec<Element> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = html[cursor..].find('<') {
        let start = cursor + offset;
        match parse_open_tag(html, start) {
            Some((tag, attributes, end)) => {
                let text_end = html[end..].find('<').map(|o| end + o).unwrap_or(html.len());
                found.push(Element {
                    tag,
                    attributes,
                    text: unescape_html(html[end..text_end].trim()),
                    span: start..end,
                });
                cursor = end;
            }
            None => cursor = start + 1,
        }
    }
    found
}

/// Visible text with tags removed and whitespace collapsed.
pub fn text_content(html: &str) -> String {
    let mut raw = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                raw.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => raw.push(c),
            _ => {}
        }
    }
    unescape_html(&raw.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn parse_open_tag(html: &str, start: usize) -> Option<(String, Vec<(String, String)>, usize)> {
    let b = html.as_bytes();
    let mut i = start + 1;
    let name_start = i;
    while i < b.len() && (b[i].is_ascii_alphanumeric() || b[i] == b'-') {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let tag = html[name_start..i].to_ascii_lowercase();
    let mut attributes = Vec::new();

    loop {
        i = skip_whitespace(b, i);
        if i >= b.len() {
            return None;
        }
        match b[i] {
            b'>' => return Some((tag, attributes, i + 1)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let name = html[attr_start..i].to_ascii_lowercase();
        i = skip_whitespace(b, i);

        if i < b.len() && b[i] == b'=' {
            i = skip_whitespace(b, i + 1);
            if i >= b.len() {
                return None;
            }
            let value = if b[i] == b'"' || b[i] == b'\'' {
                let quote = b[i];
                let value_start = i + 1;
                i = value_start;
                while i < b.len() && b[i] != quote {
                    i += 1;
                }
                if i >= b.len() {
                    return None;
                }
                let value = &html[value_start..i];
                i += 1;
                value
            } else {
                let value_start = i;
                while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'>' {
                    i += 1;
                }
                &html[value_start..i]
            };
            attributes.push((name, unescape_html(value)));
        } else if !name.is_empty() {
            attributes.push((name, String::new()));
        }
    }
}

fn skip_whitespace(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && b[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}
