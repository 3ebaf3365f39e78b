//! The document tree produced by the parser and consumed by the HTML
//! formatter.
//!
//! Unlike the markdown AST this is an HTML-shaped tree: every block and inline
//! has already been given its element name and attributes.  Children are owned
//! by their parent; there are no back-references.

/// An ordered list of `(name, value)` attribute pairs.
pub type Attributes = Vec<(String, String)>;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The root of every document.  Contains any other nodes.
    Root {
        /// Top-level nodes of the document.
        children: Vec<Node>,
    },

    /// An HTML element.
    Element {
        /// The tag name, lowercase.
        name: String,
        /// Attributes in output order.
        attributes: Attributes,
        /// Child nodes.
        children: Vec<Node>,
    },

    /// Text content.  Escaped on output.
    Text(String),

    /// An HTML comment.  The `String` excludes the `<!--` and `-->` delimiters.
    Comment(String),

    /// Trusted markup written through unchanged.  Only the crate itself
    /// creates these: rendered formulas, highlighted code, and raw HTML that
    /// passed the raw HTML policy.
    Raw(String),
}

impl Node {
    /// Creates an element with no attributes.
    pub fn element(name: &str, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.to_string(),
            attributes: vec![],
            children,
        }
    }

    /// Creates an element with the given attributes.
    pub fn element_with(name: &str, attributes: Attributes, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.to_string(),
            attributes,
            children,
        }
    }

    /// Creates a text node.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Node::Text(text.into())
    }

    /// The child list, for nodes that can have children.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root { children } | Node::Element { children, .. } => Some(children),
            Node::Text(..) | Node::Comment(..) | Node::Raw(..) => None,
        }
    }

    /// The mutable child list, for nodes that can have children.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root { children } | Node::Element { children, .. } => Some(children),
            Node::Text(..) | Node::Comment(..) | Node::Raw(..) => None,
        }
    }

    /// Whether this is an element with the given tag name.
    pub fn is_element(&self, tag: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name == tag)
    }

    /// Concatenates the text of every descendant text node.
    ///
    /// Comments and raw markup contribute nothing.
    pub fn text_content(&self) -> String {
        fn collect(node: &Node, out: &mut String) {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Root { children } | Node::Element { children, .. } => {
                    for c in children {
                        collect(c, out);
                    }
                }
                Node::Comment(..) | Node::Raw(..) => {}
            }
        }

        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}

/// Returns the value of the attribute `key`, if present.
pub fn get_attribute<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Sets attribute `key` to `value`, replacing an existing value in place or
/// appending a new pair.
pub fn set_attribute(attributes: &mut Attributes, key: &str, value: String) {
    match attributes.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value,
        None => attributes.push((key.to_string(), value)),
    }
}

/// Removes attribute `key`, returning its value if it was present.
pub fn remove_attribute(attributes: &mut Attributes, key: &str) -> Option<String> {
    let ix = attributes.iter().position(|(k, _)| k == key)?;
    Some(attributes.remove(ix).1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_skips_raw_and_comments() {
        let node = Node::element(
            "h2",
            vec![
                Node::text("Hello "),
                Node::Comment("note".into()),
                Node::element("em", vec![Node::text("there")]),
                Node::Raw("<math></math>".into()),
            ],
        );
        assert_eq!(node.text_content(), "Hello there");
    }

    #[test]
    fn attributes() {
        let mut attrs = Attributes::new();
        set_attribute(&mut attrs, "class", "a".into());
        set_attribute(&mut attrs, "id", "b".into());
        set_attribute(&mut attrs, "class", "c".into());
        assert_eq!(
            attrs,
            vec![
                ("class".to_string(), "c".to_string()),
                ("id".to_string(), "b".to_string())
            ]
        );
        assert_eq!(get_attribute(&attrs, "id"), Some("b"));
        assert_eq!(remove_attribute(&mut attrs, "class"), Some("c".to_string()));
        assert_eq!(get_attribute(&attrs, "class"), None);
    }
}
