use super::*;
use crate::options::RawHtml;

#[test]
fn no_token_survives() {
    for input in [
        "`$$a$$` `$$b$$`\n\n```math\nc\n```\n",
        "# `$$h$$`\n\n> `$$q$$`\n>\n> ```math\n> d\n> ```\n",
        "| `$$t$$` |\n|---|\n| `$$u$$` |\n",
        "*`$$e$$`* **`$$s$$`** [`$$l$$`](/x)\n",
        "<span>`$$r$$`</span>\n",
        "    ```math\n    i\n    ```\n",
    ] {
        let html = render_ok(input);
        assert!(!html.contains("MATHMARK"), "{:?} gave {}", input, html);
    }
}

#[test]
fn prefix_avoids_input() {
    html("MATHMARKL0X `$$y$$`\n", "<p>MATHMARKL0X $$y$$</p>\n");
}

#[test]
fn tokens_in_attributes() {
    let html = render_ok("![`$$x<1$$`](a.png)\n");
    assert!(html.contains("<img src=\"a.png\" alt=\"$$x&lt;1$$\" />"));
}

#[test]
fn tokens_in_link_text() {
    html(
        "[`$$x$$`](/a)\n",
        "<p><a href=\"/a\" target=\"_blank\" rel=\"noopener noreferrer\">$$x$$</a></p>\n",
    );
}

#[test]
fn tokens_in_omitted_html() {
    html_opts!(
        [render.raw_html = RawHtml::Omit],
        "<div>`$$x$$`</div>\n",
        "<!-- raw HTML omitted -->$$x$$\n",
    );
}

#[test]
fn tokens_in_raw_html() {
    html_opts!(
        [render.raw_html = RawHtml::Allow],
        concat!("<div>\n", "\n", "```math\n", "q\n", "```\n", "\n", "</div>\n"),
        concat!(
            "<div>\n",
            "<div class=\"math-display\"><m mode=\"block\">q</m></div>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn decoded_references_cannot_forge_tokens() {
    html(
        "&#77;ATHMARKL0X and `$$x^2$$`\n",
        "<p>MATHMARKL0X and $$x^2$$</p>\n",
    );
    html(
        "[&#77;ATHMARKB0X](/&#77;ATHMARKL0X) `$$y$$`\n",
        concat!(
            "<p><a href=\"/MATHMARKL0X\" target=\"_blank\" rel=\"noopener noreferrer\">",
            "MATHMARKB0X</a> $$y$$</p>\n"
        ),
    );
}

#[test]
fn unused_reference_definitions_drop_their_math() {
    html("Hello\n\n[r]: /u \"`$$x$$`\"\n", "<p>Hello</p>\n");
    html(
        "[r]\n\n[r]: /u \"`$$x$$`\"\n",
        "<p><a href=\"/u\" title=\"$$x$$\" target=\"_blank\" rel=\"noopener noreferrer\">r</a></p>\n",
    );
}
