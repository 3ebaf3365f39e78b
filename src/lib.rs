//! A markdown-to-HTML renderer for user-authored text with embedded math.
//!
//! Formulas are taken out of the text before the markdown parser sees it and
//! put back afterwards, so neither syntax can corrupt the other.  Supported
//! math syntax:
//!
//! * `` `$$expr$$` ``: protected inline math, restored untouched (or rendered,
//!   see [`options::LiteralMath`]);
//! * `$$expr$$` and single-line `$expr$`: math left for a client-side
//!   renderer, with its `&`, `<` and `>` escaped;
//! * a fenced code block labelled `math`: rendered in display mode.
//!
//! ```
//! let html = mathmark::render("# Hello\n\n```math\n\\frac{a}{b}\n```\n");
//! assert!(html.contains("<h1 id=\"user-content-hello\">"));
//! assert!(html.contains("<div class=\"math-display\"><math"));
//! ```

pub mod adapters;
pub mod html;
pub mod math;
pub mod nodes;
mod parser;
pub mod placeholder;
pub mod plugins;
pub mod postprocess;
pub mod restore;
#[cfg(test)]
mod tests;
pub mod transform;

pub use html::{format_document, slug, Anchorizer};
pub use parser::options;
pub use parser::{parse_document, Options, Plugins};

use log::{debug, error};

use crate::adapters::MathAdapter;
use crate::html::escape_to_string;
use crate::math::Formulas;
use crate::placeholder::Placeholders;
use crate::plugins::latex::LatexAdapter;

/// Errors that abort a render.  A formula that fails to render is not one of
/// these; it is reported inline instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The markdown parser panicked.
    #[error("markdown parsing failed: {0}")]
    Parse(String),
    /// Writing HTML failed.
    #[error("formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
    /// A placeholder token was never replaced by its formula.
    #[error("placeholder {0} was not restored")]
    UnusedPlaceholder(usize),
}

const ROOT_OPEN: &str = "<div class=\"markdown-body mathmark\" \
    style=\"--color-canvas-default:transparent;--color-canvas-subtle:transparent;\
    --color-fg-default:inherit;--bgColor-default:transparent;--fgColor-default:inherit;\">";

/// Render markdown to HTML with the default options.
///
/// ```
/// assert_eq!(
///     mathmark::render("Hello, **world**!\n"),
///     "<div class=\"markdown-body mathmark\" style=\"--color-canvas-default:transparent;\
///      --color-canvas-subtle:transparent;--color-fg-default:inherit;\
///      --bgColor-default:transparent;--fgColor-default:inherit;\">\
///      <p>Hello, <strong>world</strong>!</p>\n</div>"
/// );
/// ```
pub fn render(md: &str) -> String {
    render_with_options(md, &Options::default())
}

/// Render markdown to HTML.
pub fn render_with_options(md: &str, options: &Options) -> String {
    render_with_plugins(md, options, &Plugins::default())
}

/// Render markdown to HTML using plugins.
///
/// Never fails: an error that aborts the render is logged and replaced by an
/// error block.
pub fn render_with_plugins(md: &str, options: &Options, plugins: &Plugins) -> String {
    match try_render(md, options, plugins) {
        Ok(html) => html,
        Err(err) => {
            error!("could not render document: {}", err);
            error_block(&err)
        }
    }
}

/// Render markdown to HTML using plugins, returning errors that abort the
/// render.
pub fn try_render(md: &str, options: &Options, plugins: &Plugins) -> Result<String, Error> {
    let latex = LatexAdapter::new();
    let engine: &dyn MathAdapter = match plugins.render.math_engine {
        Some(engine) => engine,
        None => &latex,
    };
    let formulas = Formulas::new(engine, options);
    let decoded = decoded_text(md, options)?;
    let mut table = Placeholders::avoiding(&[md, &decoded]);

    let text = math::protect(md, &mut table, &formulas);
    debug!("protected {} literal formulas", table.len());
    let text = math::escape(&text);
    let text = math::extract_blocks(&text, &mut table, &formulas);
    debug!("placeholder table holds {} entries", table.len());

    let mut root = parser::parse(&text, options, plugins, Some(&table))?;
    transform::headings(&mut root, options, &table);
    transform::code_blocks(&mut root);
    restore::restore_tree(&mut root, &mut table);

    let mut body = String::with_capacity(text.len() * 2);
    format_document(&root, &mut body)?;
    let body = restore::restore_string(&body, &mut table);
    restore::check(&body, &table)?;

    let html = format!("{}{}</div>", ROOT_OPEN, body);
    let html = postprocess::process(&html, options);
    debug!("rendered {} bytes of markdown to {} bytes", md.len(), html.len());
    Ok(html)
}

/// The document as the markdown parser sees it, with character references
/// decoded, so placeholder tokens can avoid text that only appears after
/// decoding.  Empty when `md` has no references to decode.
fn decoded_text(md: &str, options: &Options) -> Result<String, Error> {
    if !md.contains('&') {
        return Ok(String::new());
    }
    let root = parser::parse(md, options, &Plugins::default(), None)?;
    let mut decoded = String::with_capacity(md.len());
    format_document(&root, &mut decoded)?;
    Ok(decoded)
}

fn error_block(err: &Error) -> String {
    format!(
        "<div class=\"mathmark-error\" style=\"border:1px solid #cc0000;border-radius:4px;\
         padding:8px;color:#cc0000;\">An error occurred while rendering this content: {}</div>",
        escape_to_string(&err.to_string())
    )
}
