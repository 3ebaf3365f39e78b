//! A start-tag scanner for rewriting HTML strings.
//!
//! This is not an HTML tokenizer.  It finds start tags outside comments,
//! reads their attributes, and skips the contents of raw text elements such
//! as `<script>` and `<textarea>`, which is enough for HTML this crate writes
//! and for raw HTML that has been through [`tagfilter`](super::tagfilter).
//! End tags, doctypes and processing instructions are passed over as text.

use std::fmt::Write;

use phf::phf_set;
use smallvec::SmallVec;

use super::dangerous_url;

/// Elements whose contents are text up to the matching end tag.
static RAW_TEXT_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed",
    "noframes", "plaintext",
};

/// Attributes holding a URL that a browser may follow or load.
static URL_ATTRIBUTES: phf::Set<&'static str> = phf_set! {
    "href", "src", "action", "formaction", "poster", "background", "cite",
    "data", "xlink:href",
};

/// An attribute of a [`StartTag`].  The value is kept as written, still
/// entity-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'h> {
    pub name: &'h str,
    pub value: Option<String>,
}

/// A start tag found in HTML.
#[derive(Debug, Clone)]
pub struct StartTag<'h> {
    /// The tag exactly as it appears in the input.
    pub source: &'h str,
    pub name: &'h str,
    pub attributes: SmallVec<[Attribute<'h>; 8]>,
    pub self_closing: bool,
}

impl<'h> StartTag<'h> {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Sets `name` to `value`, adding the attribute if it is missing.
    pub fn set(&mut self, name: &'static str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = Some(value.to_string()),
            None => self.attributes.push(Attribute {
                name,
                value: Some(value.to_string()),
            }),
        }
    }

    /// Writes the tag back out.  Values are double-quoted.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        out.push('<');
        out.push_str(self.name);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(attr.name);
            if let Some(value) = &attr.value {
                // Writing to a String cannot fail.
                let _ = write!(out, "=\"{}\"", value.replace('"', "&quot;"));
            }
        }
        out.push_str(if self.self_closing { " />" } else { ">" });
        out
    }
}

/// Calls `f` on every start tag in `html`, outside comments and raw text
/// element contents, and replaces the tag with whatever `f` returns.
pub fn rewrite_tags<'h, F>(html: &'h str, f: F) -> String
where
    F: FnMut(StartTag<'h>) -> Option<String>,
{
    rewrite(html, f, false)
}

/// Makes raw HTML inert: event handler attributes (`on*`) are dropped and
/// URL attributes that [`dangerous_url`] rejects are blanked, after
/// decoding the character references a browser would.  A tag that never
/// closes has its `<` escaped.  Tags that need no change are left exactly
/// as written.
pub fn sanitize(html: &str) -> String {
    rewrite(
        html,
        |mut tag| {
            let before = tag.attributes.len();
            tag.attributes
                .retain(|a| !a.name.get(..2).map_or(false, |p| p.eq_ignore_ascii_case("on")));
            let mut changed = tag.attributes.len() != before;

            for attr in tag.attributes.iter_mut() {
                let Some(value) = &attr.value else { continue };
                if URL_ATTRIBUTES.contains(attr.name.to_ascii_lowercase().as_str())
                    && dangerous_attribute_url(value)
                {
                    attr.value = Some(String::new());
                    changed = true;
                }
            }

            if changed {
                log::debug!("sanitized <{}> in raw HTML", tag.name);
                Some(tag.to_html())
            } else {
                None
            }
        },
        true,
    )
}

fn rewrite<'h, F>(html: &'h str, mut f: F, escape_unclosed: bool) -> String
where
    F: FnMut(StartTag<'h>) -> Option<String>,
{
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut offset = 0;
    let mut i = 0;

    while let Some(p) = html[i..].find('<') {
        i += p;
        if html[i..].starts_with("<!--") {
            i = comment_end(html, i);
            continue;
        }
        if !bytes.get(i + 1).map_or(false, u8::is_ascii_alphabetic) {
            i += 1;
            continue;
        }
        match parse_start_tag(html, i) {
            Some(tag) => {
                let end = i + tag.source.len();
                let raw_text = RAW_TEXT_ELEMENTS.contains(tag.name.to_ascii_lowercase().as_str())
                    && !tag.self_closing;
                let name = tag.name;
                if let Some(replacement) = f(tag) {
                    out.push_str(&html[offset..i]);
                    out.push_str(&replacement);
                    offset = end;
                }
                i = if raw_text {
                    raw_text_end(html, end, name)
                } else {
                    end
                };
            }
            None if escape_unclosed => {
                out.push_str(&html[offset..i]);
                out.push_str("&lt;");
                i += 1;
                offset = i;
            }
            None => i += 1,
        }
    }

    out.push_str(&html[offset..]);
    out
}

/// The offset just past the comment opened at `start`.  `<!-->` and
/// `<!--->` are complete comments, and `--!>` closes one too.
fn comment_end(html: &str, start: usize) -> usize {
    let rest = &html[start + 2..];
    let close = rest.find("-->").map(|e| e + 3);
    let bang = rest.find("--!>").map(|e| e + 4);
    match (close, bang) {
        (Some(c), Some(b)) if b - 4 < c - 3 => start + 2 + b,
        (Some(c), _) => start + 2 + c,
        (None, Some(b)) => start + 2 + b,
        (None, None) => html.len(),
    }
}

/// The offset of the end tag closing the raw text element `name` whose
/// contents start at `from`, or the end of `html`.
fn raw_text_end(html: &str, from: usize, name: &str) -> usize {
    if name.eq_ignore_ascii_case("plaintext") {
        return html.len();
    }
    let needle = format!("</{}", name.to_ascii_lowercase());
    html[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map_or(html.len(), |p| from + p)
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Parses the start tag beginning at `start`, which must be a `<` followed
/// by a letter.  Returns `None` if the tag never closes.
fn parse_start_tag(html: &str, start: usize) -> Option<StartTag<'_>> {
    let bytes = html.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() && !is_space(bytes[i]) && !matches!(bytes[i], b'/' | b'>') {
        i += 1;
    }
    let name = &html[start + 1..i];
    let mut attributes = SmallVec::new();

    loop {
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                return Some(StartTag {
                    source: &html[start..i + 1],
                    name,
                    attributes,
                    self_closing: false,
                })
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(StartTag {
                    source: &html[start..i + 2],
                    name,
                    attributes,
                    self_closing: true,
                })
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        i += 1;
        while i < bytes.len() && !is_space(bytes[i]) && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let attr_name = &html[name_start..i];

        let mut j = i;
        while j < bytes.len() && is_space(bytes[j]) {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        j += 1;
        while j < bytes.len() && is_space(bytes[j]) {
            j += 1;
        }

        let value = match bytes.get(j)? {
            &quote @ (b'"' | b'\'') => {
                let close = html[j + 1..].find(quote as char)? + j + 1;
                i = close + 1;
                &html[j + 1..close]
            }
            _ => {
                let value_start = j;
                while j < bytes.len() && !is_space(bytes[j]) && bytes[j] != b'>' {
                    j += 1;
                }
                i = j;
                &html[value_start..j]
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            value: Some(value.to_string()),
        });
    }
}

/// Whether an attribute value, as written, is a URL a browser would treat as
/// dangerous.  A scheme that still holds an undecoded reference counts as
/// dangerous.
fn dangerous_attribute_url(value: &str) -> bool {
    let url: String = decode_references(value)
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    match url.find(':') {
        Some(colon) if url[..colon].contains('&') => true,
        _ => dangerous_url(&url),
    }
}

/// Decodes numeric character references and the named references for
/// characters that can hide a URL scheme.  Other named references are left
/// alone.
fn decode_references(value: &str) -> String {
    const NAMED: [(&str, char); 3] = [("colon", ':'), ("tab", '\t'), ("newline", '\n')];

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];

        if let Some(numeric) = rest.strip_prefix('#') {
            let (digits, radix, skip) = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
                Some(hex) => (hex, 16, 2),
                None => (numeric, 10, 1),
            };
            let len = digits
                .bytes()
                .take_while(|b| (*b as char).is_digit(radix))
                .count();
            let decoded = u32::from_str_radix(&digits[..len], radix)
                .ok()
                .and_then(char::from_u32);
            if let (true, Some(c)) = (len > 0, decoded) {
                out.push(c);
                rest = &rest[skip + len..];
                rest = rest.strip_prefix(';').unwrap_or(rest);
                continue;
            }
        } else if let Some((name, c)) = NAMED.iter().find(|(name, _)| {
            rest.get(..name.len())
                .map_or(false, |r| r.eq_ignore_ascii_case(name))
        }) {
            out.push(*c);
            rest = &rest[name.len()..];
            rest = rest.strip_prefix(';').unwrap_or(rest);
            continue;
        }
        out.push('&');
    }
    out.push_str(rest);
    out
}
