//! Adapter traits for plugins.
//!
//! Each plugin has to implement one of the traits available in this module.

use crate::nodes::Attributes;

/// Whether a formula is rendered inline or on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Flows with the surrounding text.
    Inline,
    /// Block-level: display style, centred on its own line.
    Block,
}

/// A formula the math engine could not render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MathError {
    /// The engine's description of the problem.
    pub message: String,
}

impl MathError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        MathError {
            message: message.into(),
        }
    }
}

/// Implement this adapter to plug in a math typesetting engine.
///
/// Rendering must be a pure function of its input: the same formula and mode
/// always give the same result.  Adapters are shared between concurrent
/// renders, hence `Sync`.
pub trait MathAdapter: Sync {
    /// Renders `formula` (without delimiters) to a markup fragment.
    fn render(&self, formula: &str, mode: DisplayMode) -> Result<String, MathError>;
}

/// Implement this adapter for creating a plugin for custom syntax highlighting of codefence blocks.
pub trait SyntaxHighlighterAdapter: Sync {
    /// Generates syntax highlighted HTML for the contents of a code block.
    ///
    /// lang: Name of the programming language (the info string of the codefence block after the initial "```" part).
    /// code: The source code to be syntax highlighted.
    fn highlight(&self, lang: Option<&str>, code: &str) -> String;

    /// Adjusts the attributes of the `<pre>` element.  Some syntax
    /// highlighters style the block itself, e.g. with a background colour.
    fn pre_attributes(&self, attributes: &mut Attributes) {
        let _ = attributes;
    }

    /// Adjusts the attributes of the `<code>` element.
    fn code_attributes(&self, attributes: &mut Attributes) {
        let _ = attributes;
    }
}
