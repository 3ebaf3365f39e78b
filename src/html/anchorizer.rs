use rustc_hash::FxHashSet;
use std::borrow::Cow;
use unicode_categories::UnicodeCategories;

/// Converts heading text to a slug: lowercase ASCII letters, digits and
/// single hyphens, with diacritics transliterated away and punctuation
/// dropped.
///
/// ```
/// # use mathmark::slug;
/// assert_eq!("ola-mundo", slug("Olá Mundo"));
/// assert_eq!("ticks-arent-in", slug("Ticks aren't in"));
/// ```
pub fn slug(text: &str) -> String {
    fn is_permitted_char(&c: &char) -> bool {
        c.is_whitespace()
            || c == '-'
            || c.is_letter()
            || c.is_mark()
            || c.is_number()
            || c.is_punctuation_connector()
    }

    let kept: String = text.chars().filter(is_permitted_char).collect();
    slug::slugify(kept)
}

/// Converts heading text to canonical, unique, but still human-readable,
/// anchors.
///
/// To guarantee uniqueness, an anchorizer keeps track of the anchors it has
/// returned; use one per document.
///
/// ## Example
///
/// ```
/// # use mathmark::Anchorizer;
/// let mut anchorizer = Anchorizer::new();
/// // First "stuff" is unsuffixed.
/// assert_eq!("stuff", anchorizer.anchorize("Stuff"));
/// // Second "stuff" has "-1" appended to make it unique.
/// assert_eq!("stuff-1", anchorizer.anchorize("Stuff"));
/// ```
#[derive(Debug, Default)]
pub struct Anchorizer(FxHashSet<String>);

impl Anchorizer {
    /// Construct a new anchorizer.
    pub fn new() -> Self {
        Anchorizer(FxHashSet::default())
    }

    /// Returns the [`slug`] of `heading`, with a numeric suffix added if an
    /// earlier heading already took it.  Returns an empty string, and records
    /// nothing, when the heading has no usable text.
    pub fn anchorize(&mut self, heading: &str) -> String {
        let id = slug(heading);
        if id.is_empty() {
            return id;
        }

        let mut uniq = 0;
        let id = loop {
            let anchor = if uniq == 0 {
                Cow::from(&id)
            } else {
                Cow::from(format!("{}-{}", id, uniq))
            };

            if !self.0.contains(&*anchor) {
                break anchor.into_owned();
            }

            uniq += 1;
        };
        self.0.insert(id.clone());
        id
    }
}
