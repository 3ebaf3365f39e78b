//! Image containers.

use crate::html::{rewrite_tags, StartTag};

/// Wraps every `<img>` in a clickable container of `width` CSS pixels that
/// reserves the image's aspect ratio before it loads.
pub fn wrap_images(html: &str, width: u32) -> String {
    rewrite_tags(html, |tag| {
        if !tag.is("img") {
            return None;
        }
        let src = tag.get("src").unwrap_or("");
        let (w, h) = aspect_ratio(&tag);
        Some(format!(
            "<span class=\"image-container\" role=\"button\" tabindex=\"0\" data-src=\"{}\" \
             style=\"display:block;position:relative;width:{}px;max-width:100%;margin:0 auto;\
             aspect-ratio:{} / {};\">{}</span>",
            src, width, w, h, tag.source
        ))
    })
}

/// Guesses an image's aspect ratio, reduced to lowest terms.  In order of
/// preference: the `width` and `height` attributes, `w`/`h` or
/// `width`/`height` query parameters of `src`, a `<w>x<h>` token in the file
/// name, and finally `1 / 1`.
pub fn aspect_ratio(tag: &StartTag<'_>) -> (u32, u32) {
    let src = tag.get("src").unwrap_or("").replace("&amp;", "&");
    let (w, h) = from_attributes(tag)
        .or_else(|| from_query(&src))
        .or_else(|| from_file_name(&src))
        .unwrap_or((1, 1));
    let d = gcd(w, h);
    (w / d, h / d)
}

fn dimension(s: &str) -> Option<u32> {
    let s = s.trim();
    let s = s.strip_suffix("px").unwrap_or(s);
    s.parse().ok().filter(|&n| n > 0)
}

fn from_attributes(tag: &StartTag<'_>) -> Option<(u32, u32)> {
    Some((dimension(tag.get("width")?)?, dimension(tag.get("height")?)?))
}

fn from_query(src: &str) -> Option<(u32, u32)> {
    let (_, query) = src.split_once('?')?;
    let query = query.split('#').next().unwrap_or("");

    let mut w = None;
    let mut h = None;
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "w" | "width" => w = w.or_else(|| dimension(value)),
            "h" | "height" => h = h.or_else(|| dimension(value)),
            _ => {}
        }
    }
    Some((w?, h?))
}

fn from_file_name(src: &str) -> Option<(u32, u32)> {
    let path = src.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or(path);
    let bytes = name.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let w_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let w_end = i;
        if !matches!(bytes.get(i), Some(b'x') | Some(b'X')) {
            continue;
        }
        let h_start = i + 1;
        let mut j = h_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > h_start {
            if let (Some(w), Some(h)) = (
                dimension(&name[w_start..w_end]),
                dimension(&name[h_start..j]),
            ) {
                return Some((w, h));
            }
        }
        i = h_start;
    }
    None
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a.max(1)
    } else {
        gcd(b, a % b)
    }
}
