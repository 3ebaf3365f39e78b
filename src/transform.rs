//! Passes over the document tree that run between parsing and restoration.

mod code;
mod headings;

pub use code::code_blocks;
pub use headings::headings;

use crate::nodes::Node;

/// Calls `f` on `node` and then on each of its descendants, in document
/// order.
pub(crate) fn walk_mut<F>(node: &mut Node, f: &mut F)
where
    F: FnMut(&mut Node),
{
    f(node);
    if let Some(children) = node.children_mut() {
        for c in children {
            walk_mut(c, f);
        }
    }
}
