//! Heading ids and self-link anchors.

use crate::html::Anchorizer;
use crate::nodes::{set_attribute, Node};
use crate::parser::options::Options;
use crate::placeholder::Placeholders;

use super::walk_mut;

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Gives every heading with usable text an `id` of the configured prefix
/// followed by its slug, and prepends an empty anchor linking to the slug.
///
/// Placeholder tokens in the heading text stand for the formula source, so
/// `# About $$x^2$$` is slugged as if the formula were plain text.
pub fn headings(root: &mut Node, options: &Options, table: &Placeholders) {
    let mut anchorizer = Anchorizer::new();
    walk_mut(root, &mut |node| {
        anchor_heading(node, &mut anchorizer, options, table)
    });
}

fn anchor_heading(
    node: &mut Node,
    anchorizer: &mut Anchorizer,
    options: &Options,
    table: &Placeholders,
) {
    if !matches!(node, Node::Element { name, .. } if is_heading(name)) {
        return;
    }

    let text = table.expand_sources(&node.text_content());
    let id = anchorizer.anchorize(&text);
    if id.is_empty() {
        return;
    }
    log::debug!("heading {:?} anchored as {:?}", text, id);

    if let Node::Element {
        attributes,
        children,
        ..
    } = node
    {
        set_attribute(
            attributes,
            "id",
            format!("{}{}", options.render.heading_id_prefix, id),
        );
        let anchor = Node::element_with(
            "a",
            vec![
                ("aria-hidden".to_string(), "true".to_string()),
                ("tabindex".to_string(), "-1".to_string()),
                ("class".to_string(), "anchor".to_string()),
                ("href".to_string(), format!("#{}", id)),
            ],
            vec![],
        );
        children.insert(0, anchor);
    }
}
