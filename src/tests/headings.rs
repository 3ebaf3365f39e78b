use super::*;
use pretty_assertions::assert_eq;

#[test]
fn heading_with_diacritics() {
    html(
        "# Olá Mundo\n",
        "<h1 id=\"user-content-ola-mundo\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#ola-mundo\"></a>Olá Mundo</h1>\n",
    );
}

#[test]
fn header_ids() {
    html(
        concat!(
            "# Hi.\n",
            "## Hi 1.\n",
            "### Hi.\n",
            "#### Hello.\n",
            "##### Hi.\n",
            "###### Hello.\n",
            "# Isn't it grand?"
        ),
        concat!(
            "<h1 id=\"user-content-hi\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hi\"></a>Hi.</h1>\n",
            "<h2 id=\"user-content-hi-1\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hi-1\"></a>Hi 1.</h2>\n",
            "<h3 id=\"user-content-hi-2\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hi-2\"></a>Hi.</h3>\n",
            "<h4 id=\"user-content-hello\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hello\"></a>Hello.</h4>\n",
            "<h5 id=\"user-content-hi-3\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hi-3\"></a>Hi.</h5>\n",
            "<h6 id=\"user-content-hello-1\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#hello-1\"></a>Hello.</h6>\n",
            "<h1 id=\"user-content-isnt-it-grand\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#isnt-it-grand\"></a>Isn't it grand?</h1>\n"
        ),
    );
}

#[test]
fn heading_id_prefix() {
    html_opts!(
        [render.heading_id_prefix = String::new()],
        concat!("Setext\n", "======\n"),
        "<h1 id=\"setext\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#setext\"></a>Setext</h1>\n",
    );
}

#[test]
fn headings_slug_formula_source() {
    html(
        "## Área `$$x^2$$`\n",
        "<h2 id=\"user-content-area-x2\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#area-x2\"></a>Área $$x^2$$</h2>\n",
    );
    html(
        "# $a<b$\n",
        "<h1 id=\"user-content-ab\"><a aria-hidden=\"true\" tabindex=\"-1\" class=\"anchor\" href=\"#ab\"></a>$a&lt;b$</h1>\n",
    );
}

#[test]
fn heading_without_slug_text() {
    html("# ???\n", "<h1>???</h1>\n");
}

#[test]
fn slugs_are_url_safe() {
    for heading in ["Equações do 2º Grau", "  --Hello__World--  ", "日本語", "C++ & Rust!"] {
        let slug = crate::slug(heading);
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "{:?} gave {:?}",
            heading,
            slug
        );
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert_eq!(slug, crate::slug(heading));
    }
}
