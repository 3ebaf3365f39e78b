//! The stages that run before markdown parsing: protecting literal math,
//! escaping the remaining math, and rendering fenced display math.
//!
//! Each stage rewrites the prose and code regions found by
//! [`scanner::regions`] independently, so code blocks are never touched by the
//! prose scanners and vice versa.

mod escape;
mod fence;
mod protect;
pub mod scanner;

use crate::adapters::{DisplayMode, MathAdapter};
use crate::html::{escape_to_string, sanitize, tagfilter};
use crate::parser::options::{LiteralMath, Options, RawHtml};
use crate::placeholder::Placeholders;
use scanner::Region;

/// Produces the fragments recorded in the placeholder table.
pub struct Formulas<'a> {
    engine: &'a dyn MathAdapter,
    options: &'a Options,
}

impl<'a> Formulas<'a> {
    pub fn new(engine: &'a dyn MathAdapter, options: &'a Options) -> Self {
        Formulas { engine, options }
    }

    /// The fragment for backtick-protected math.
    pub fn literal(&self, expr: &str) -> String {
        match self.options.math.literal {
            LiteralMath::Render => self.render(expr, DisplayMode::Inline),
            LiteralMath::Verbatim => {
                let verbatim = format!("$${}$$", expr);
                match self.options.render.raw_html {
                    RawHtml::Allow => verbatim,
                    RawHtml::Filter => sanitize(&tagfilter(&verbatim)),
                    RawHtml::Omit => escape_to_string(&verbatim),
                }
            }
        }
    }

    /// The fragment for fenced display math.
    pub fn block(&self, expr: &str) -> String {
        format!(
            "<div class=\"math-display\">{}</div>",
            self.render(expr, DisplayMode::Block)
        )
    }

    fn render(&self, expr: &str, mode: DisplayMode) -> String {
        match self.engine.render(expr, mode) {
            Ok(markup) => markup,
            Err(err) => {
                log::warn!("could not render formula {:?}: {}", expr, err);
                error_fragment(&err.message)
            }
        }
    }
}

/// The inline fragment standing in for a formula that failed to render.
pub fn error_fragment(message: &str) -> String {
    format!(
        "<span class=\"math-error\" style=\"color:#cc0000;\">{}</span>",
        escape_to_string(message)
    )
}

/// Formula Protector: replaces each `` `$$expr$$` `` outside code blocks with
/// a placeholder token.
pub fn protect(text: &str, table: &mut Placeholders, formulas: &Formulas) -> String {
    rewrite_prose(text, |prose| {
        protect::protect_prose(prose, table, formulas)
    })
}

/// Math Escaper: escapes `&`, `<` and `>` inside `$$...$$` and single-line
/// `$...$` outside code blocks.
pub fn escape(text: &str) -> String {
    rewrite_prose(text, escape::escape_prose)
}

/// Block-Formula Extractor: renders each closed fenced block labelled
/// `options.math.label` and replaces it with a placeholder comment.
pub fn extract_blocks(text: &str, table: &mut Placeholders, formulas: &Formulas) -> String {
    let label = formulas.options.math.label.as_str();
    let mut out = String::with_capacity(text.len());
    for region in scanner::regions(text) {
        match region {
            Region::Prose(prose) => out.push_str(prose),
            Region::Fence(fence) => match fence::extract_fence(&fence, label, table, formulas) {
                Some(line) => out.push_str(&line),
                None => out.push_str(fence.text),
            },
            Region::Indented(code) => out.push_str(code),
        }
    }
    out
}

fn rewrite_prose<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    for region in scanner::regions(text) {
        match region {
            Region::Prose(prose) => out.push_str(&f(prose)),
            Region::Fence(fence) => out.push_str(fence.text),
            Region::Indented(code) => out.push_str(code),
        }
    }
    out
}
