//! Markdown parsing.
//!
//! The markdown itself is parsed by `comrak`; this module converts its AST into
//! the crate's document tree, giving each block and inline its element, and
//! applying the raw HTML policy.

pub mod options;

use std::panic::{self, AssertUnwindSafe};

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::Arena;

use crate::html::{dangerous_url, sanitize, tagfilter};
use crate::nodes::{Attributes, Node};
use crate::placeholder::Placeholders;
use crate::Error;
pub use options::{Options, Plugins};
use options::RawHtml;

/// Parse a markdown document to a document tree.
///
/// A panic inside the markdown parser is reported as [`Error::Parse`].
pub fn parse_document(text: &str, options: &Options, plugins: &Plugins) -> Result<Node, Error> {
    parse(text, options, plugins, None)
}

/// As [`parse_document`], for working text carrying placeholder tokens from
/// `table`.  Tokens inside raw HTML that the policy omits are kept as text.
pub(crate) fn parse(
    text: &str,
    options: &Options,
    plugins: &Plugins,
    table: Option<&Placeholders>,
) -> Result<Node, Error> {
    let mut comrak_options = comrak::Options::default();
    comrak_options.extension.strikethrough = options.extension.strikethrough;
    comrak_options.extension.table = options.extension.table;
    comrak_options.extension.autolink = options.extension.autolink;

    let converter = Converter {
        options,
        plugins,
        table,
    };
    panic::catch_unwind(AssertUnwindSafe(|| {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, text, &comrak_options);
        let mut children = vec![];
        converter.convert_children(root, Context::default(), &mut children);
        Node::Root { children }
    }))
    .map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "the markdown parser panicked".to_string());
        Error::Parse(message)
    })
}

#[derive(Debug, Default, Clone, Copy)]
struct Context {
    /// Paragraphs are not wrapped in `<p>` inside tight lists.
    tight: bool,
    /// Table cells are `<th>` in the header row.
    header_row: bool,
}

struct Converter<'o> {
    options: &'o Options,
    plugins: &'o Plugins<'o>,
    table: Option<&'o Placeholders>,
}

impl<'o> Converter<'o> {
    fn convert_children<'a>(&self, node: &'a AstNode<'a>, ctx: Context, out: &mut Vec<Node>) {
        for c in node.children() {
            self.convert(c, ctx, out);
        }
    }

    fn children_of<'a>(&self, node: &'a AstNode<'a>, ctx: Context) -> Vec<Node> {
        let mut children = vec![];
        self.convert_children(node, ctx, &mut children);
        children
    }

    fn block(&self, out: &mut Vec<Node>, element: Node) {
        out.push(element);
        out.push(Node::text("\n"));
    }

    fn convert<'a>(&self, node: &'a AstNode<'a>, ctx: Context, out: &mut Vec<Node>) {
        let ast = node.data.borrow();
        match ast.value {
            NodeValue::Document => self.convert_children(node, ctx, out),
            NodeValue::BlockQuote => {
                let mut children = vec![Node::text("\n")];
                self.convert_children(node, Context::default(), &mut children);
                self.block(out, Node::element("blockquote", children));
            }
            NodeValue::List(ref list) => {
                let mut attributes = Attributes::new();
                let name = if list.list_type == ListType::Ordered {
                    if list.start != 1 {
                        attributes.push(("start".to_string(), list.start.to_string()));
                    }
                    "ol"
                } else {
                    "ul"
                };
                let mut children = vec![Node::text("\n")];
                let ctx = Context {
                    tight: list.tight,
                    ..Context::default()
                };
                self.convert_children(node, ctx, &mut children);
                self.block(out, Node::element_with(name, attributes, children));
            }
            NodeValue::Item(..) => {
                let children = self.children_of(node, ctx);
                self.block(out, Node::element("li", children));
            }
            NodeValue::Heading(ref heading) => {
                let children = self.children_of(node, Context::default());
                self.block(out, Node::element(&format!("h{}", heading.level), children));
            }
            NodeValue::CodeBlock(ref block) => {
                let lang = block.info.split_whitespace().next();
                let mut pre_attributes = Attributes::new();
                let mut code_attributes = Attributes::new();
                if let Some(lang) = lang {
                    code_attributes.push(("class".to_string(), format!("language-{}", lang)));
                }
                let content = match self.plugins.render.codefence_syntax_highlighter {
                    Some(highlighter) => {
                        highlighter.pre_attributes(&mut pre_attributes);
                        highlighter.code_attributes(&mut code_attributes);
                        Node::Raw(highlighter.highlight(lang, &block.literal))
                    }
                    None => Node::text(block.literal.to_string()),
                };
                let code = Node::element_with("code", code_attributes, vec![content]);
                self.block(out, Node::element_with("pre", pre_attributes, vec![code]));
            }
            NodeValue::HtmlBlock(ref block) => {
                self.raw_html(&block.literal, out);
                if !matches!(out.last(), Some(Node::Raw(..))) {
                    out.push(Node::text("\n"));
                }
            }
            NodeValue::ThematicBreak => self.block(out, Node::element("hr", vec![])),
            NodeValue::Paragraph => {
                if ctx.tight {
                    self.convert_children(node, Context::default(), out);
                } else {
                    let children = self.children_of(node, Context::default());
                    self.block(out, Node::element("p", children));
                }
            }
            NodeValue::Table(..) => {
                let mut head = vec![Node::text("\n")];
                let mut body = vec![Node::text("\n")];
                for row in node.children() {
                    let header_row = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                    let ctx = Context {
                        header_row,
                        ..Context::default()
                    };
                    self.convert(row, ctx, if header_row { &mut head } else { &mut body });
                }
                let mut children = vec![Node::text("\n")];
                self.block(&mut children, Node::element("thead", head));
                if body.len() > 1 {
                    self.block(&mut children, Node::element("tbody", body));
                }
                self.block(out, Node::element("table", children));
            }
            NodeValue::TableRow(..) => {
                let mut children = vec![Node::text("\n")];
                self.convert_children(node, ctx, &mut children);
                self.block(out, Node::element("tr", children));
            }
            NodeValue::TableCell => {
                let name = if ctx.header_row { "th" } else { "td" };
                let children = self.children_of(node, Context::default());
                self.block(out, Node::element(name, children));
            }
            NodeValue::Text(ref text) => out.push(Node::text(text.to_string())),
            NodeValue::SoftBreak => out.push(Node::text("\n")),
            NodeValue::LineBreak => self.block(out, Node::element("br", vec![])),
            NodeValue::Code(ref code) => {
                out.push(Node::element(
                    "code",
                    vec![Node::text(code.literal.to_string())],
                ));
            }
            NodeValue::HtmlInline(ref html) => self.raw_html(html, out),
            NodeValue::Emph => out.push(Node::element("em", self.children_of(node, ctx))),
            NodeValue::Strong => out.push(Node::element("strong", self.children_of(node, ctx))),
            NodeValue::Strikethrough => {
                out.push(Node::element("del", self.children_of(node, ctx)))
            }
            NodeValue::Link(ref link) => {
                let mut attributes = vec![("href".to_string(), self.url(&link.url))];
                if !link.title.is_empty() {
                    attributes.push(("title".to_string(), link.title.to_string()));
                }
                let children = self.children_of(node, ctx);
                out.push(Node::element_with("a", attributes, children));
            }
            NodeValue::Image(ref link) => {
                let mut attributes = vec![
                    ("src".to_string(), self.url(&link.url)),
                    ("alt".to_string(), plain_text(node)),
                ];
                if !link.title.is_empty() {
                    attributes.push(("title".to_string(), link.title.to_string()));
                }
                out.push(Node::element_with("img", attributes, vec![]));
            }
            _ => self.convert_children(node, ctx, out),
        }
    }

    /// Applies the raw HTML policy to a raw HTML block or inline.  A lone
    /// comment always survives as a comment node.
    fn raw_html(&self, literal: &str, out: &mut Vec<Node>) {
        if let Some(comment) = lone_comment(literal) {
            out.push(Node::Comment(comment.to_string()));
            return;
        }
        match self.options.render.raw_html {
            RawHtml::Omit => {
                out.push(Node::Comment(" raw HTML omitted ".to_string()));
                if let Some(table) = self.table {
                    let mut rest = literal;
                    while let Some(found) = table.find(rest) {
                        out.push(Node::text(&rest[found.range.clone()]));
                        rest = &rest[found.range.end..];
                    }
                }
            }
            RawHtml::Filter => out.push(Node::Raw(sanitize(&tagfilter(literal)))),
            RawHtml::Allow => out.push(Node::Raw(literal.to_string())),
        }
    }

    fn url(&self, url: &str) -> String {
        if self.options.render.raw_html != RawHtml::Allow && dangerous_url(url) {
            String::new()
        } else {
            url.to_string()
        }
    }
}

/// If `literal` is exactly one HTML comment, surrounded by nothing but
/// whitespace, returns the comment's text.
fn lone_comment(literal: &str) -> Option<&str> {
    let inner = literal
        .trim()
        .strip_prefix("<!--")
        .and_then(|s| s.strip_suffix("-->"))?;
    if inner.contains("-->") {
        None
    } else {
        Some(inner)
    }
}

/// Flattens the text of an image description for its `alt` attribute.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for d in node.descendants().skip(1) {
        match d.data.borrow().value {
            NodeValue::Text(ref t) => text.push_str(&t.to_string()),
            NodeValue::Code(ref code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
