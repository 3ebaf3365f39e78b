#![no_main]

use libfuzzer_sys::fuzz_target;

use mathmark::options::{LiteralMath, RawHtml};
use mathmark::{render_with_options, Options};

fuzz_target!(|s: &str| {
    for raw_html in [RawHtml::Omit, RawHtml::Filter, RawHtml::Allow] {
        for literal in [LiteralMath::Verbatim, LiteralMath::Render] {
            let mut options = Options::default();
            options.render.raw_html = raw_html;
            options.math.literal = literal;
            options.extension.table = raw_html != RawHtml::Omit;
            render_with_options(s, &options);
        }
    }
});
