use super::*;

#[test]
fn basic() {
    html(
        concat!(
            "My **document**.\n",
            "\n",
            "It's mine.\n",
            "\n",
            "> Yes.\n",
            "\n",
            "## Hi!\n",
            "\n",
            "Okay.\n"
        ),
        concat!(
            "<p>My <strong>document</strong>.</p>\n",
            "<p>It's mine.</p>\n",
            "<blockquote>\n",
            "<p>Yes.</p>\n",
            "</blockquote>\n",
            "<h2 id=\"user-content-hi\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hi\"></a>Hi!</h2>\n",
            "<p>Okay.</p>\n"
        ),
    );
}

#[test]
fn lists() {
    html(
        concat!("2. Hello.\n", "3. Hi.\n"),
        concat!(
            "<ol start=\"2\">\n",
            "<li>Hello.</li>\n",
            "<li>Hi.</li>\n",
            "</ol>\n"
        ),
    );

    html(
        concat!("- Hello.\n", "- Hi.\n"),
        concat!("<ul>\n", "<li>Hello.</li>\n", "<li>Hi.</li>\n", "</ul>\n"),
    );
}

#[test]
fn loose_lists() {
    html(
        concat!("- a\n", "\n", "- b\n"),
        concat!(
            "<ul>\n",
            "<li><p>a</p>\n</li>\n",
            "<li><p>b</p>\n</li>\n",
            "</ul>\n"
        ),
    );
}

#[test]
fn thematic_breaks() {
    html(
        concat!("---\n", "\n", "- - -\n", "\n", "\n", "_        _   _\n"),
        concat!("<hr />\n", "<hr />\n", "<hr />\n"),
    );
}

#[test]
fn inlines() {
    html(
        "*em* and `code` and ~~gone~~.\n",
        "<p><em>em</em> and <code>code</code> and <del>gone</del>.</p>\n",
    );
    html("a  \nb\n", "<p>a<br />\nb</p>\n");
    html("&copy; &amp; <\n", "<p>© &amp; &lt;</p>\n");
}

#[test]
fn strikethrough_disabled() {
    html_opts!(
        [extension.strikethrough = false],
        "Hello ~~world~~ there.\n",
        "<p>Hello ~~world~~ there.</p>\n",
    );
}

#[test]
fn table() {
    html(
        concat!("| a | b |\n", "|---|---|\n", "| 1 | 2 |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "<th>b</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td>1</td>\n",
            "<td>2</td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn table_disabled() {
    html_opts!(
        [extension.table = false],
        concat!("| a |\n", "|---|\n"),
        concat!("<p>| a |\n", "|---|</p>\n"),
    );
}

#[test]
fn autolink() {
    html(
        "Visit https://example.com.\n",
        concat!(
            "<p>Visit <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">",
            "https://example.com</a>.</p>\n"
        ),
    );
    html_opts!(
        [extension.autolink = false],
        "Visit https://example.com.\n",
        "<p>Visit https://example.com.</p>\n",
    );
}

#[test]
fn links_and_images() {
    html(
        "[x](/a \"T\") ![alt *text*](/b.png)\n",
        concat!(
            "<p><a href=\"/a\" title=\"T\" target=\"_blank\" rel=\"noopener noreferrer\">x</a> ",
            "<span class=\"image-container\" role=\"button\" tabindex=\"0\" data-src=\"/b.png\" ",
            "style=\"display:block;position:relative;width:480px;max-width:100%;margin:0 auto;",
            "aspect-ratio:1 / 1;\"><img src=\"/b.png\" alt=\"alt text\" /></span></p>\n"
        ),
    );
}

#[test]
fn empty_document() {
    html("", "");
    html("\n\n", "");
}
