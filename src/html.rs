//! The HTML formatter.
//!
//! Writes a document tree as HTML, and provides the escaping and filtering
//! helpers the rest of the pipeline shares.

mod anchorizer;
mod tags;

use std::fmt::{self, Write};

use phf::phf_set;

use crate::nodes::Node;

pub use anchorizer::{slug, Anchorizer};
pub use tags::{rewrite_tags, sanitize, Attribute, StartTag};

/// Elements written as `<name ... />` and never given children.
static VOID_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "source", "track", "wbr",
};

/// Tags disallowed by the GFM tagfilter extension.
static TAGFILTER_BLACKLIST: phf::Set<&'static str> = phf_set! {
    "title", "textarea", "style", "xmp", "iframe", "noembed", "noframes",
    "script", "plaintext",
};

/// Formats a document tree as HTML.
pub fn format_document(root: &Node, output: &mut dyn Write) -> fmt::Result {
    format_node(root, output)
}

fn format_node(node: &Node, output: &mut dyn Write) -> fmt::Result {
    match node {
        Node::Root { children } => {
            for c in children {
                format_node(c, output)?;
            }
        }
        Node::Element {
            name,
            attributes,
            children,
        } => {
            write_opening_tag(output, name, attributes)?;
            if VOID_ELEMENTS.contains(name.as_str()) {
                return Ok(());
            }
            for c in children {
                format_node(c, output)?;
            }
            write!(output, "</{}>", name)?;
        }
        Node::Text(text) => escape(output, text)?,
        Node::Comment(text) => write!(output, "<!--{}-->", text)?,
        Node::Raw(html) => output.write_str(html)?,
    }
    Ok(())
}

/// Writes an opening tag with the given attributes.  Void elements are
/// closed with ` />`.
pub fn write_opening_tag(
    output: &mut dyn Write,
    tag: &str,
    attributes: &[(String, String)],
) -> fmt::Result {
    write!(output, "<{}", tag)?;
    for (attr, val) in attributes {
        write!(output, " {}=\"", attr)?;
        if attr == "href" || attr == "src" {
            escape_href(output, val)?;
        } else {
            escape(output, val)?;
        }
        output.write_str("\"")?;
    }
    if VOID_ELEMENTS.contains(tag) {
        output.write_str(" />")
    } else {
        output.write_str(">")
    }
}

/// Writes `buffer` with `"`, `&`, `<` and `>` replaced by entities.
pub fn escape(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    let bytes = buffer.as_bytes();
    let mut offset = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let esc: &str = match byte {
            b'"' => "&quot;",
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => continue,
        };
        output.write_str(&buffer[offset..i])?;
        output.write_str(esc)?;
        offset = i + 1;
    }
    output.write_str(&buffer[offset..])
}

/// Returns `buffer` escaped as by [`escape`].
pub fn escape_to_string(buffer: &str) -> String {
    let mut out = String::with_capacity(buffer.len());
    // Writing to a String cannot fail.
    let _ = escape(&mut out, buffer);
    out
}

/// Writes a URL, percent-encoding bytes that are not safe in an attribute.
/// Existing percent-escapes are kept.
pub fn escape_href(output: &mut dyn Write, buffer: &str) -> fmt::Result {
    const HREF_SAFE: [bool; 256] = {
        let mut a = [false; 256];
        let safe = b"-_.+!*(),%#@?=;:/,+$~abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let mut i = 0;
        while i < safe.len() {
            a[safe[i] as usize] = true;
            i += 1;
        }
        a
    };

    let bytes = buffer.as_bytes();
    let size = bytes.len();
    let mut i = 0;

    while i < size {
        let org = i;
        while i < size && HREF_SAFE[bytes[i] as usize] {
            i += 1;
        }

        if i > org {
            output.write_str(&buffer[org..i])?;
        }

        if i >= size {
            break;
        }

        match bytes[i] {
            b'&' => output.write_str("&amp;")?,
            b'\'' => output.write_str("&#x27;")?,
            b => write!(output, "%{:02X}", b)?,
        }

        i += 1;
    }

    Ok(())
}

/// Applies the GFM tagfilter: the `<` of any opening or closing tag on the
/// blacklist is replaced with `&lt;`.
pub fn tagfilter(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut offset = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if byte == b'<' && is_filtered_tag(&bytes[i + 1..]) {
            out.push_str(&html[offset..i]);
            out.push_str("&lt;");
            offset = i + 1;
        }
    }
    out.push_str(&html[offset..]);
    out
}

fn is_filtered_tag(rest: &[u8]) -> bool {
    let rest = rest.strip_prefix(b"/").unwrap_or(rest);
    let len = rest
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    if len == 0 {
        return false;
    }

    let name = String::from_utf8_lossy(&rest[..len]).to_ascii_lowercase();
    if !TAGFILTER_BLACKLIST.contains(name.as_str()) {
        return false;
    }

    match rest.get(len) {
        None => true,
        Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'\x0c') => true,
        Some(b'/') => rest.get(len + 1) == Some(&b'>'),
        Some(_) => false,
    }
}

/// Whether following `url` could run script or read local files.  Inline
/// raster images are allowed through `data:`.
pub fn dangerous_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    if url.starts_with("data:") {
        return !["png", "gif", "jpeg", "webp"]
            .iter()
            .any(|kind| url[5..].starts_with(&format!("image/{}", kind)));
    }
    ["javascript:", "vbscript:", "file:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}
