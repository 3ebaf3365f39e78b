//! Adapter for the Syntect syntax highlighter plugin.

use crate::adapters::SyntaxHighlighterAdapter;
use crate::html::escape_to_string;
use crate::nodes::{set_attribute, Attributes};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

#[derive(Debug)]
/// Syntect syntax highlighter plugin.
pub struct SyntectAdapter {
    theme: String,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntectAdapter {
    /// Construct a new `SyntectAdapter` object and set the syntax highlighting theme.
    pub fn new(theme: &str) -> Self {
        SyntectAdapter {
            theme: theme.to_string(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set.themes.get(&self.theme)
    }

    fn syntax(&self, lang: Option<&str>, code: &str) -> &SyntaxReference {
        lang.filter(|l| !l.is_empty())
            .and_then(|l| self.syntax_set.find_syntax_by_token(l))
            .or_else(|| self.syntax_set.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

impl SyntaxHighlighterAdapter for SyntectAdapter {
    fn highlight(&self, lang: Option<&str>, code: &str) -> String {
        let theme = match self.theme() {
            Some(theme) => theme,
            None => return escape_to_string(code),
        };

        let mut highlighter = HighlightLines::new(self.syntax(lang, code), theme);
        let mut out = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let highlighted = highlighter
                .highlight_line(line, &self.syntax_set)
                .and_then(|regions| styled_line_to_highlighted_html(&regions, IncludeBackground::No));
            match highlighted {
                Ok(html) => out.push_str(&html),
                Err(_) => out.push_str(&escape_to_string(line)),
            }
        }
        out
    }

    fn pre_attributes(&self, attributes: &mut Attributes) {
        let background = self.theme().and_then(|t| t.settings.background);
        if let Some(Color { r, g, b, .. }) = background {
            set_attribute(
                attributes,
                "style",
                format!("background-color:#{:02x}{:02x}{:02x};", r, g, b),
            );
        }
    }
}
