//! Placeholder restoration.
//!
//! Tokens are swapped for their fragments on the tree, where a fragment can
//! become a [`Node::Raw`] and be written through unescaped.  Whatever the tree
//! walk cannot reach, such as a token that ended up in an `alt` attribute, is
//! replaced in the serialized HTML with the escaped fragment.

use crate::html::escape_to_string;
use crate::nodes::Node;
use crate::placeholder::Placeholders;
use crate::Error;

enum Piece<'t> {
    Text(&'t str),
    Token(usize),
}

/// Splits `text` into runs of text and tokens.  A token wrapped in a comment
/// (`<!--TOKEN-->`) swallows the comment delimiters.
fn split_tokens<'t>(text: &'t str, table: &Placeholders) -> Vec<Piece<'t>> {
    let mut pieces = vec![];
    let mut rest = text;
    while let Some(found) = table.find(rest) {
        let mut start = found.range.start;
        let mut end = found.range.end;
        if rest[..start].ends_with("<!--") && rest[end..].starts_with("-->") {
            start -= 4;
            end += 3;
        }
        if start > 0 {
            pieces.push(Piece::Text(&rest[..start]));
        }
        pieces.push(Piece::Token(found.index));
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

/// Replaces placeholder comments and tokens in the tree with their fragments.
pub fn restore_tree(root: &mut Node, table: &mut Placeholders) {
    if let Some(children) = root.children_mut() {
        restore_children(children, table);
    }
}

fn restore_children(children: &mut Vec<Node>, table: &mut Placeholders) {
    let mut restored = Vec::with_capacity(children.len());
    for mut node in children.drain(..) {
        match node {
            Node::Comment(ref comment) => match table.parse(comment.trim()) {
                Some(ix) => restored.push(Node::Raw(table.take(ix).to_string())),
                None => restored.push(node),
            },
            Node::Text(ref text) if table.find(text).is_some() => {
                for piece in split_tokens(text, table) {
                    match piece {
                        Piece::Text(t) => restored.push(Node::text(t)),
                        Piece::Token(ix) => restored.push(Node::Raw(table.take(ix).to_string())),
                    }
                }
            }
            Node::Raw(ref html) if table.find(html).is_some() => {
                let mut out = String::with_capacity(html.len());
                for piece in split_tokens(html, table) {
                    match piece {
                        Piece::Text(t) => out.push_str(t),
                        Piece::Token(ix) => out.push_str(table.take(ix)),
                    }
                }
                restored.push(Node::Raw(out));
            }
            Node::Root { .. } | Node::Element { .. } => {
                restore_tree(&mut node, table);
                restored.push(node);
            }
            Node::Text(..) | Node::Raw(..) => restored.push(node),
        }
    }
    *children = restored;
}

/// Replaces tokens left in serialized HTML with their escaped fragments.
pub fn restore_string(html: &str, table: &mut Placeholders) -> String {
    if table.find(html).is_none() {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    for piece in split_tokens(html, table) {
        match piece {
            Piece::Text(t) => out.push_str(t),
            Piece::Token(ix) => {
                log::debug!(
                    "restoring {} placeholder {} outside text",
                    table.entries()[ix].kind,
                    ix
                );
                out.push_str(&escape_to_string(table.take(ix)));
            }
        }
    }
    out
}

/// Checks that no token survived into `html`.
///
/// An entry whose token never reached the output was dropped by the markdown
/// parser along with its host text, as happens with an unused link reference
/// definition.  That is not an error; it is only logged.
pub fn check(html: &str, table: &Placeholders) -> Result<(), Error> {
    if let Some(found) = table.find(html) {
        return Err(Error::UnusedPlaceholder(found.index));
    }
    for ix in table.unconsumed() {
        log::warn!(
            "{} placeholder {} was dropped by the markdown parser",
            table.entries()[ix].kind,
            ix
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::Kind;
    use pretty_assertions::assert_eq;

    fn table() -> Placeholders {
        let mut table = Placeholders::new("");
        table.push(Kind::Literal, "a<b", "$$a<b$$".into());
        table.push(Kind::Block, "x", "<math>x</math>".into());
        table
    }

    #[test]
    fn comments_and_text() {
        let mut table = table();
        let mut root = Node::Root {
            children: vec![
                Node::element(
                    "p",
                    vec![Node::text("see MATHMARKL0X here")],
                ),
                Node::Comment("MATHMARKB1X".into()),
                Node::Comment("a note".into()),
            ],
        };
        restore_tree(&mut root, &mut table);
        assert_eq!(
            root,
            Node::Root {
                children: vec![
                    Node::element(
                        "p",
                        vec![
                            Node::text("see "),
                            Node::Raw("$$a<b$$".into()),
                            Node::text(" here"),
                        ],
                    ),
                    Node::Raw("<math>x</math>".into()),
                    Node::Comment("a note".into()),
                ],
            }
        );
        assert!(check("", &table).is_ok());
    }

    #[test]
    fn comment_markers_inside_text_are_swallowed() {
        let mut table = table();
        let mut root = Node::Root {
            children: vec![
                Node::Raw("<div>\n<!--MATHMARKB1X-->\n</div>".into()),
                Node::text("MATHMARKL0X"),
            ],
        };
        restore_tree(&mut root, &mut table);
        assert_eq!(
            root.children().unwrap()[0],
            Node::Raw("<div>\n<math>x</math>\n</div>".into())
        );
    }

    #[test]
    fn string_fallback_escapes() {
        let mut table = table();
        table.take(1);
        let html = restore_string("<img alt=\"MATHMARKL0X\" />", &mut table);
        assert_eq!(html, "<img alt=\"$$a&lt;b$$\" />");
        assert!(check(&html, &table).is_ok());
    }

    #[test]
    fn surviving_tokens_are_errors() {
        let mut table = table();
        table.take(0);
        assert!(matches!(
            check("MATHMARKL0X", &table),
            Err(Error::UnusedPlaceholder(0))
        ));
    }

    #[test]
    fn dropped_entries_are_not_errors() {
        let mut table = table();
        table.take(0);
        assert!(check("<p>Hello</p>\n", &table).is_ok());
        assert_eq!(table.unconsumed().collect::<Vec<_>>(), vec![1]);
    }
}
