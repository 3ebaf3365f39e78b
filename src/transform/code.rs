//! Normalization of fenced and indented code blocks.

use crate::nodes::{get_attribute, set_attribute, Attributes, Node};

use super::walk_mut;

/// Rewrites every `pre > code` block to a uniform shape:
///
/// ```html
/// <pre class="code-block language-rust" data-language="rust"><code class="language-rust">...</code><div class="code-block-footer"></div></pre>
/// ```
///
/// Blocks without a language are labelled `text`.  Background colours set by
/// a syntax highlighter are removed so the page theme decides them.
pub fn code_blocks(root: &mut Node) {
    walk_mut(root, &mut normalize);
}

fn normalize(node: &mut Node) {
    let Node::Element {
        name,
        attributes: pre_attributes,
        children,
    } = node
    else {
        return;
    };
    if name.as_str() != "pre" {
        return;
    }
    let Some(Node::Element {
        attributes: code_attributes,
        ..
    }) = children.iter_mut().find(|c| c.is_element("code"))
    else {
        return;
    };

    let lang = language(code_attributes).unwrap_or("text").to_string();
    set_attribute(code_attributes, "class", format!("language-{}", lang));
    strip_background(code_attributes);

    set_attribute(
        pre_attributes,
        "class",
        format!("code-block language-{}", lang),
    );
    set_attribute(pre_attributes, "data-language", lang);
    strip_background(pre_attributes);

    children.push(Node::element_with(
        "div",
        vec![("class".to_string(), "code-block-footer".to_string())],
        vec![],
    ));
}

fn language(attributes: &Attributes) -> Option<&str> {
    get_attribute(attributes, "class")?
        .split_whitespace()
        .find_map(|class| class.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
}

/// Drops `background` and `background-color` declarations from `style`,
/// removing the attribute if nothing is left.
fn strip_background(attributes: &mut Attributes) {
    let Some(ix) = attributes.iter().position(|(k, _)| k == "style") else {
        return;
    };

    let kept: Vec<&str> = attributes[ix]
        .1
        .split(';')
        .map(str::trim)
        .filter(|decl| {
            let property = decl.split(':').next().unwrap_or("").trim();
            !decl.is_empty()
                && !property.eq_ignore_ascii_case("background")
                && !property.eq_ignore_ascii_case("background-color")
        })
        .collect();

    if kept.is_empty() {
        attributes.remove(ix);
    } else {
        attributes[ix].1 = format!("{};", kept.join(";"));
    }
}
