//! Adapter for the pulldown-latex MathML renderer.

use pulldown_latex::config::DisplayMode as LatexDisplayMode;
use pulldown_latex::{mathml::push_mathml, Parser, RenderConfig, Storage};

use crate::adapters::{DisplayMode, MathAdapter, MathError};

#[derive(Debug, Default, Copy, Clone)]
/// Renders LaTeX to MathML Core with `pulldown-latex`.
pub struct LatexAdapter;

impl LatexAdapter {
    /// Construct a new `LatexAdapter`.
    pub fn new() -> Self {
        LatexAdapter
    }
}

impl MathAdapter for LatexAdapter {
    fn render(&self, formula: &str, mode: DisplayMode) -> Result<String, MathError> {
        let storage = Storage::new();
        let parser = Parser::new(formula, &storage);
        let config = RenderConfig {
            display_mode: match mode {
                DisplayMode::Inline => LatexDisplayMode::Inline,
                DisplayMode::Block => LatexDisplayMode::Block,
            },
            ..Default::default()
        };

        // The renderer writes parse errors into the markup rather than
        // failing, so they are collected up front.
        let events: Vec<_> = parser.collect();
        let errors: Vec<String> = events
            .iter()
            .filter_map(|e| e.as_ref().err().map(|err| err.to_string()))
            .collect();
        if !errors.is_empty() {
            return Err(MathError::new(errors.join("; ")));
        }

        let mut mathml = String::new();
        push_mathml(&mut mathml, events.into_iter(), config)
            .map_err(|e| MathError::new(e.to_string()))?;
        Ok(mathml)
    }
}
