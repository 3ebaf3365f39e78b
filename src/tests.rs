use crate::adapters::{DisplayMode, MathAdapter, MathError};
use crate::html::escape_to_string;
use crate::{render_with_plugins, try_render, Options, Plugins};

mod api;
mod commonmark;
mod headings;
mod placeholders;

const ROOT_OPEN: &str = "<div class=\"markdown-body mathmark\" \
    style=\"--color-canvas-default:transparent;--color-canvas-subtle:transparent;\
    --color-fg-default:inherit;--bgColor-default:transparent;--fgColor-default:inherit;\">";

/// A deterministic math engine: wraps the formula in `<m>` and fails on
/// `\bad`.
pub struct MockMath;

impl MathAdapter for MockMath {
    fn render(&self, formula: &str, mode: DisplayMode) -> Result<String, MathError> {
        if formula.contains("\\bad") {
            return Err(MathError::new("unknown command \\bad"));
        }
        let mode = match mode {
            DisplayMode::Inline => "inline",
            DisplayMode::Block => "block",
        };
        Ok(format!(
            "<m mode=\"{}\">{}</m>",
            mode,
            escape_to_string(formula)
        ))
    }
}

/// Renders `input` with the mock math engine and returns what is inside the
/// root container.
fn body(input: &str, options: &Options, plugins: &Plugins) -> String {
    let mut plugins = plugins.clone();
    if plugins.render.math_engine.is_none() {
        plugins.render.math_engine = Some(&MockMath);
    }
    let html = render_with_plugins(input, options, &plugins);
    match html
        .strip_prefix(ROOT_OPEN)
        .and_then(|h| h.strip_suffix("</div>"))
    {
        Some(body) => body.to_string(),
        None => panic!("output not wrapped in the root container:\n{}", html),
    }
}

#[track_caller]
fn compare(html: &str, expected: &str) {
    if html != expected {
        println!("Got:");
        println!("==============================");
        println!("{}", html);
        println!("==============================");
        println!();
        println!("Expected:");
        println!("==============================");
        println!("{}", expected);
        println!("==============================");
        println!();
    }
    pretty_assertions::assert_eq!(html, expected);
}

#[track_caller]
fn html(input: &str, expected: &str) {
    html_opts_i(input, expected, |_| ());
}

#[track_caller]
fn html_opts_i<F>(input: &str, expected: &str, opts: F)
where
    F: FnOnce(&mut Options),
{
    let mut options = Options::default();
    opts(&mut options);
    compare(&body(input, &options, &Plugins::default()), expected);
}

#[track_caller]
fn html_plugins(input: &str, expected: &str, plugins: &Plugins) {
    compare(&body(input, &Options::default(), plugins), expected);
}

macro_rules! html_opts {
    ([$($optclass:ident.$optname:ident = $val:expr),*], $lhs:expr, $rhs:expr $(,)?) => {
        crate::tests::html_opts_i($lhs, $rhs, |opts| {
            $(opts.$optclass.$optname = $val;)*
        })
    };
}
pub(crate) use html_opts;

/// Renders with the mock engine and asserts that nothing went wrong.
#[track_caller]
fn render_ok(input: &str) -> String {
    let mut plugins = Plugins::default();
    plugins.render.math_engine = Some(&MockMath);
    match try_render(input, &Options::default(), &plugins) {
        Ok(html) => html,
        Err(err) => panic!("render failed: {}", err),
    }
}
