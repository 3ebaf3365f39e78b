//! Configuration for the pipeline.  Extensions affect the markdown parser;
//! math and render options affect the stages around it.

#[cfg(feature = "bon")]
use bon::Builder;
use std::fmt::{self, Debug, Formatter};
use std::str::FromStr;

use crate::adapters::{MathAdapter, SyntaxHighlighterAdapter};

#[derive(Default, Debug, Clone)]
/// Umbrella options struct.
pub struct Options {
    /// Enable markdown extensions.
    pub extension: Extension,

    /// Configure how math is recognised and rendered.
    pub math: Math,

    /// Configure render-time options.
    pub render: Render,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options to select markdown extensions.
pub struct Extension {
    /// Enables the
    /// [strikethrough extension](https://github.github.com/gfm/#strikethrough-extension-)
    /// from the GFM spec.
    ///
    /// ```rust
    /// # use mathmark::{render_with_options, Options};
    /// let mut options = Options::default();
    /// options.extension.strikethrough = false;
    /// assert!(render_with_options("Hello ~world~ there.\n", &options)
    ///     .contains("<p>Hello ~world~ there.</p>"));
    /// ```
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub strikethrough: bool,

    /// Enables the [table extension](https://github.github.com/gfm/#tables-extension-)
    /// from the GFM spec.
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub table: bool,

    /// Enables the [autolink extension](https://github.github.com/gfm/#autolinks-extension-)
    /// from the GFM spec.
    #[cfg_attr(feature = "bon", builder(default = true))]
    pub autolink: bool,
}

impl Default for Extension {
    fn default() -> Self {
        Extension {
            strikethrough: true,
            table: true,
            autolink: true,
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options for math recognition.
pub struct Math {
    /// The info string that marks a fenced code block as display math.
    ///
    /// ````markdown
    /// ```math
    /// \int_0^1 x\,dx
    /// ```
    /// ````
    #[cfg_attr(feature = "bon", builder(default = "math".to_string(), into))]
    pub label: String,

    /// What backtick-protected math (`` `$$x$$` ``) turns into.
    #[cfg_attr(feature = "bon", builder(default))]
    pub literal: LiteralMath,
}

impl Default for Math {
    fn default() -> Self {
        Math {
            label: "math".to_string(),
            literal: LiteralMath::default(),
        }
    }
}

/// Output of backtick-protected math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiteralMath {
    /// Restored as `$$expr$$`, untouched by markdown, for a client-side
    /// renderer to pick up.
    #[default]
    Verbatim,
    /// Rendered by the math engine in inline mode.
    Render,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Options for formatter functions.
pub struct Render {
    /// How raw HTML in the input is treated.
    #[cfg_attr(feature = "bon", builder(default))]
    pub raw_html: RawHtml,

    /// Prefix for the `id` given to headings.  The self-link anchor refers to
    /// the bare slug.
    ///
    /// ```rust
    /// # use mathmark::render;
    /// assert!(render("# README\n").contains(
    ///     "<h1 id=\"user-content-readme\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#readme\"></a>README</h1>"
    /// ));
    /// ```
    #[cfg_attr(feature = "bon", builder(default = "user-content-".to_string(), into))]
    pub heading_id_prefix: String,

    /// Width in CSS pixels of the container images are wrapped in.
    #[cfg_attr(feature = "bon", builder(default = 480))]
    pub image_width: u32,
}

impl Default for Render {
    fn default() -> Self {
        Render {
            raw_html: RawHtml::default(),
            heading_id_prefix: "user-content-".to_string(),
            image_width: 480,
        }
    }
}

/// Treatment of raw HTML found in the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RawHtml {
    /// Replace raw HTML with `<!-- raw HTML omitted -->`, and escape verbatim
    /// literal math.
    Omit,
    /// Pass raw HTML through the GFM tagfilter, drop its event handler
    /// attributes, and blank out dangerous URLs.
    #[default]
    Filter,
    /// Trust raw HTML and URLs as written.
    Allow,
}

impl FromStr for RawHtml {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "omit" => Ok(RawHtml::Omit),
            "filter" => Ok(RawHtml::Filter),
            "allow" => Ok(RawHtml::Allow),
            _ => Err(format!("unknown raw HTML policy: {}", s)),
        }
    }
}

#[derive(Default, Clone, Debug)]
/// Umbrella plugins struct.
pub struct Plugins<'p> {
    /// Configure render-time plugins.
    pub render: RenderPlugins<'p>,
}

#[derive(Default, Clone)]
/// Plugins for alternative rendering.
pub struct RenderPlugins<'p> {
    /// Provide a math engine.  When none is given, the built-in
    /// [`LatexAdapter`](crate::plugins::latex::LatexAdapter) renders MathML.
    pub math_engine: Option<&'p dyn MathAdapter>,

    /// Provide a syntax highlighter adapter implementation for syntax
    /// highlighting of codefence blocks.
    pub codefence_syntax_highlighter: Option<&'p dyn SyntaxHighlighterAdapter>,
}

impl Debug for RenderPlugins<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPlugins")
            .field("math_engine", &self.math_engine.map(|_| "impl MathAdapter"))
            .field(
                "codefence_syntax_highlighter",
                &self
                    .codefence_syntax_highlighter
                    .map(|_| "impl SyntaxHighlighterAdapter"),
            )
            .finish()
    }
}
