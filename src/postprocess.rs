//! String-level passes over the finished HTML.
//!
//! These run after restoration, so they see rendered formulas and raw HTML
//! that the document tree only held as opaque markup.

mod images;

use phf::phf_map;

use crate::html::rewrite_tags;
use crate::parser::options::Options;

pub use images::{aspect_ratio, wrap_images};

/// Class names that HTML-emitting math engines in the KaTeX family use for
/// upright text, and the class the stylesheet knows them by.  The bundled
/// [`LatexAdapter`](crate::plugins::latex::LatexAdapter) writes MathML
/// without classes, so this only matters for a [`MathAdapter`] that
/// produces such HTML.
///
/// [`MathAdapter`]: crate::adapters::MathAdapter
static CLASS_REMAP: phf::Map<&'static str, &'static str> = phf_map! {
    "mathup" => "mathrm",
    "textup" => "mathrm",
    "textrm" => "mathrm",
};

/// Runs every post-processing pass.
pub fn process(html: &str, options: &Options) -> String {
    let html = wrap_images(html, options.render.image_width);
    let html = external_links(&html);
    remap_math_classes(&html)
}

/// Opens links in a new tab: every `<a>` whose `href` leads off the page and
/// that has no `target` gets `target="_blank"`, plus a `rel` when it has
/// none.
pub fn external_links(html: &str) -> String {
    rewrite_tags(html, |mut tag| {
        if !tag.is("a") || tag.has("target") {
            return None;
        }
        match tag.get("href") {
            Some(href) if !href.is_empty() && !href.starts_with('#') => {}
            _ => return None,
        }
        tag.set("target", "_blank");
        if !tag.has("rel") {
            tag.set("rel", "noopener noreferrer");
        }
        Some(tag.to_html())
    })
}

/// Renames upright-text math classes to `mathrm`.  This applies to every
/// tag in the document, including raw HTML, and is a no-op for MathML from
/// the bundled engine.
pub fn remap_math_classes(html: &str) -> String {
    rewrite_tags(html, |mut tag| {
        let class = tag.get("class")?;
        if !class.split_whitespace().any(|c| CLASS_REMAP.contains_key(c)) {
            return None;
        }

        let mut classes: Vec<&str> = vec![];
        for c in class.split_whitespace() {
            let c = CLASS_REMAP.get(c).copied().unwrap_or(c);
            if !classes.contains(&c) {
                classes.push(c);
            }
        }
        let class = classes.join(" ");
        tag.set("class", &class);
        Some(tag.to_html())
    })
}
