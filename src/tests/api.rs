use super::*;
use crate::options::{LiteralMath, RawHtml};
use crate::Error;
use pretty_assertions::assert_eq;
use std::str::FromStr;

#[test]
fn output_is_wrapped() {
    let html = crate::render("hi\n");
    assert_eq!(html, format!("{}<p>hi</p>\n</div>", ROOT_OPEN));
    assert_eq!(crate::render(""), format!("{}</div>", ROOT_OPEN));
}

#[test]
fn error_block() {
    assert_eq!(
        crate::error_block(&Error::UnusedPlaceholder(3)),
        concat!(
            "<div class=\"mathmark-error\" style=\"border:1px solid #cc0000;border-radius:4px;",
            "padding:8px;color:#cc0000;\">An error occurred while rendering this content: ",
            "placeholder 3 was not restored</div>"
        )
    );
    assert_eq!(
        Error::Parse("<boom>".into()).to_string(),
        "markdown parsing failed: <boom>"
    );
    assert!(crate::error_block(&Error::Parse("<boom>".into())).contains("&lt;boom&gt;"));
}

#[test]
fn stages_are_public() {
    let options = Options::default();
    let formulas = crate::math::Formulas::new(&MockMath, &options);
    let mut table = crate::placeholder::Placeholders::new("");

    let text = crate::math::protect("`$$a$$` $b<c$\n", &mut table, &formulas);
    let text = crate::math::escape(&text);
    assert_eq!(text, "MATHMARKL0X $b&lt;c$\n");

    let root = crate::parse_document("# Hi\n", &options, &Plugins::default()).unwrap();
    let mut out = String::new();
    crate::format_document(&root, &mut out).unwrap();
    assert_eq!(out, "<h1>Hi</h1>\n");
}

#[test]
fn try_render_succeeds() {
    let html = render_ok("# T\n\n`$$x$$`\n\n```math\ny\n```\n");
    assert!(html.starts_with(ROOT_OPEN));
    assert!(!html.contains("mathmark-error"));
}

#[test]
fn raw_html_from_str() {
    assert_eq!(RawHtml::from_str("omit"), Ok(RawHtml::Omit));
    assert_eq!(RawHtml::from_str("filter"), Ok(RawHtml::Filter));
    assert_eq!(RawHtml::from_str("allow"), Ok(RawHtml::Allow));
    assert!(RawHtml::from_str("sure").is_err());
}

#[test]
fn defaults() {
    let options = Options::default();
    assert!(options.extension.strikethrough && options.extension.table && options.extension.autolink);
    assert_eq!(options.math.label, "math");
    assert_eq!(options.math.literal, LiteralMath::Verbatim);
    assert_eq!(options.render.raw_html, RawHtml::Filter);
    assert_eq!(options.render.heading_id_prefix, "user-content-");
    assert_eq!(options.render.image_width, 480);
}

#[cfg(feature = "bon")]
#[test]
fn builders() {
    use crate::options::{Extension, Math, Render};

    let extension = Extension::builder().table(false).build();
    assert!(extension.strikethrough && !extension.table && extension.autolink);

    let math = Math::builder().label("tex").build();
    assert_eq!(math.label, "tex");
    assert_eq!(math.literal, LiteralMath::Verbatim);

    let render = Render::builder().image_width(320).build();
    assert_eq!(render.heading_id_prefix, "user-content-");
    assert_eq!(render.raw_html, RawHtml::Filter);
    assert_eq!(render.image_width, 320);
}

#[test]
fn concurrent_renders() {
    let inputs = ["# A `$$x$$`\n", "```math\ny\n```\n", "$a<b$\n"];
    let expected: Vec<String> = inputs.iter().map(|i| render_ok(i)).collect();
    std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|i| s.spawn(move || render_ok(i)))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
