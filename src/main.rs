//! The `mathmark` binary.

use std::env;
use std::error::Error;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use mathmark::options::{LiteralMath, RawHtml};
use mathmark::{Options, Plugins};

#[derive(Debug, Parser)]
#[command(about, author, version)]
#[command(after_help = "\
By default, mathmark will attempt to read command-line options from a config file specified by \
--config-file. This behaviour can be disabled by passing --config-file none. It is not an error \
if the default config file does not exist.")]
struct Cli {
    /// Markdown files to render; standard input if none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to config file containing command-line arguments, or 'none'
    #[arg(short, long, value_name = "PATH")]
    config_file: Option<String>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Info string of fenced code blocks holding display math
    #[arg(long, value_name = "LABEL", default_value = "math")]
    math_label: String,

    /// Render `$$...$$` protected by backticks instead of keeping it verbatim
    #[arg(long)]
    render_literal_math: bool,

    /// Treatment of raw HTML and dangerous URLs
    #[arg(long, value_name = "POLICY", value_enum, default_value_t = RawHtmlArg::Filter)]
    raw_html: RawHtmlArg,

    /// Prefix for heading ids
    #[arg(long, value_name = "PREFIX", default_value = "user-content-")]
    heading_id_prefix: String,

    /// Width of image containers, in CSS pixels
    #[arg(long, value_name = "PX", default_value_t = 480)]
    image_width: u32,

    /// Disable the strikethrough extension
    #[arg(long)]
    no_strikethrough: bool,

    /// Disable the table extension
    #[arg(long)]
    no_table: bool,

    /// Disable the autolink extension
    #[arg(long)]
    no_autolink: bool,

    /// Syntax highlighting for codefence blocks. Choose a theme or 'none' for disabling.
    #[cfg(feature = "syntect")]
    #[arg(long, value_name = "THEME", default_value = "base16-ocean.dark")]
    syntax_highlighting: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RawHtmlArg {
    /// Replace raw HTML with a comment
    Omit,
    /// Tag-filter raw HTML and strip event handlers
    Filter,
    /// Pass raw HTML through untouched
    Allow,
}

impl From<RawHtmlArg> for RawHtml {
    fn from(arg: RawHtmlArg) -> Self {
        match arg {
            RawHtmlArg::Omit => RawHtml::Omit,
            RawHtmlArg::Filter => RawHtml::Filter,
            RawHtmlArg::Allow => RawHtml::Allow,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut cli = Cli::parse();
    if let Some(config) = read_config(cli.config_file.as_deref())? {
        let mut args = env::args_os().collect::<Vec<_>>();
        let extra = shell_words::split(&config)?;
        args.splice(1..1, extra.into_iter().map(OsString::from));
        cli = Cli::parse_from(args);
    }

    let options = Options {
        extension: mathmark::options::Extension {
            strikethrough: !cli.no_strikethrough,
            table: !cli.no_table,
            autolink: !cli.no_autolink,
        },
        math: mathmark::options::Math {
            label: cli.math_label.clone(),
            literal: if cli.render_literal_math {
                LiteralMath::Render
            } else {
                LiteralMath::Verbatim
            },
        },
        render: mathmark::options::Render {
            raw_html: cli.raw_html.into(),
            heading_id_prefix: cli.heading_id_prefix.clone(),
            image_width: cli.image_width,
        },
    };

    #[cfg(feature = "syntect")]
    let adapter = mathmark::plugins::syntect::SyntectAdapter::new(&cli.syntax_highlighting);

    #[cfg_attr(not(feature = "syntect"), allow(unused_mut))]
    let mut plugins = Plugins::default();
    #[cfg(feature = "syntect")]
    if cli.syntax_highlighting != "none" {
        plugins.render.codefence_syntax_highlighter = Some(&adapter);
    }

    let mut input = String::with_capacity(2048);
    if cli.files.is_empty() {
        io::stdin().read_to_string(&mut input)?;
    } else {
        for path in &cli.files {
            match fs::read_to_string(path) {
                Ok(text) => input.push_str(&text),
                Err(err) => {
                    eprintln!("could not read {}: {}", path.display(), err);
                    process::exit(1);
                }
            }
        }
    }

    let html = mathmark::render_with_plugins(&input, &options, &plugins);

    match cli.output {
        Some(path) => fs::write(path, html)?,
        None => io::stdout().lock().write_all(html.as_bytes())?,
    }

    Ok(())
}

/// Reads the config file: the one named by `--config-file`, which must
/// exist, or the default one, which need not.
fn read_config(path: Option<&str>) -> Result<Option<String>, Box<dyn Error>> {
    match path {
        Some("none") => Ok(None),
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None => Ok(default_config_path().and_then(|path| fs::read_to_string(path).ok())),
    }
}

#[cfg(all(not(windows), not(target_arch = "wasm32")))]
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("mathmark")
        .ok()?
        .find_config_file("config")
}

#[cfg(any(windows, target_arch = "wasm32"))]
fn default_config_path() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn raw_html_policy() {
        let cli = Cli::try_parse_from(["mathmark"]).unwrap();
        assert_eq!(RawHtml::from(cli.raw_html), RawHtml::Filter);

        let cli = Cli::try_parse_from(["mathmark", "--raw-html", "omit"]).unwrap();
        assert_eq!(RawHtml::from(cli.raw_html), RawHtml::Omit);

        assert!(Cli::try_parse_from(["mathmark", "--raw-html", "unsafe"]).is_err());
    }
}
