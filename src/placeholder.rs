//! The placeholder table.
//!
//! Formulas are pulled out of the working text before markdown parsing and
//! replaced by opaque tokens.  A token is `<prefix><kind><index>X`, built from
//! ASCII letters and digits only, so neither the markdown parser nor the HTML
//! formatter will ever split or rewrite one.  The prefix is chosen per
//! document so it never occurs in the input.

use std::fmt;
use std::ops::Range;

const BASE_PREFIX: &str = "MATHMARK";
const TERMINATOR: char = 'X';

/// The kind of a placeholder entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Backtick-protected inline math, kept out of markdown escaping.
    Literal,
    /// Fenced display math, rendered before parsing.
    Block,
}

impl Kind {
    fn marker(self) -> char {
        match self {
            Kind::Literal => 'L',
            Kind::Block => 'B',
        }
    }

    fn from_marker(c: u8) -> Option<Kind> {
        match c {
            b'L' => Some(Kind::Literal),
            b'B' => Some(Kind::Block),
            _ => None,
        }
    }
}

/// A single entry of the table.
#[derive(Debug, Clone)]
pub struct Entry {
    /// What kind of span this entry replaced.
    pub kind: Kind,
    /// The expression as written by the author, without delimiters.
    pub source: String,
    /// The markup that replaces the token in the output.
    pub fragment: String,
    consumed: bool,
}

impl Entry {
    /// Whether restoration has already used this entry.
    pub fn consumed(&self) -> bool {
        self.consumed
    }
}

/// An ordered table of placeholders for one document.
#[derive(Debug, Clone)]
pub struct Placeholders {
    prefix: String,
    entries: Vec<Entry>,
}

/// A token found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// Byte range of the token.
    pub range: Range<usize>,
    /// Index of the entry.
    pub index: usize,
}

impl Placeholders {
    /// Creates an empty table whose token prefix does not occur in `input`.
    pub fn new(input: &str) -> Self {
        Self::avoiding(&[input])
    }

    /// Creates an empty table whose token prefix occurs in none of
    /// `haystacks`.
    pub fn avoiding(haystacks: &[&str]) -> Self {
        let mut prefix = BASE_PREFIX.to_string();
        while haystacks.iter().any(|h| h.contains(&prefix)) {
            prefix.push('Z');
        }
        Placeholders {
            prefix,
            entries: vec![],
        }
    }

    /// Records a new entry and returns its token.
    pub fn push(&mut self, kind: Kind, source: &str, fragment: String) -> String {
        self.entries.push(Entry {
            kind,
            source: source.to_string(),
            fragment,
            consumed: false,
        });
        self.token(self.entries.len() - 1)
    }

    /// The token for entry `index`.
    pub fn token(&self, index: usize) -> String {
        let kind = self.entries[index].kind;
        format!("{}{}{}{}", self.prefix, kind.marker(), index, TERMINATOR)
    }

    /// The comment marker for entry `index`: `<!--TOKEN-->`.
    pub fn comment(&self, index: usize) -> String {
        format!("<!--{}-->", self.token(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// If `s` is exactly one token, returns its index.
    pub fn parse(&self, s: &str) -> Option<usize> {
        match self.find(s) {
            Some(found) if found.range == (0..s.len()) => Some(found.index),
            _ => None,
        }
    }

    /// Finds the first token in `s`.
    pub fn find(&self, s: &str) -> Option<Found> {
        let mut from = 0;
        while let Some(offset) = s[from..].find(&self.prefix) {
            let start = from + offset;
            if let Some(found) = self.parse_at(s, start) {
                return Some(found);
            }
            from = start + self.prefix.len();
        }
        None
    }

    fn parse_at(&self, s: &str, start: usize) -> Option<Found> {
        let bytes = s.as_bytes();
        let mut i = start + self.prefix.len();
        let kind = Kind::from_marker(*bytes.get(i)?)?;
        i += 1;
        let digits = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits || bytes.get(i) != Some(&(TERMINATOR as u8)) {
            return None;
        }
        let index: usize = s[digits..i].parse().ok()?;
        match self.entries.get(index) {
            Some(entry) if entry.kind == kind => Some(Found {
                range: start..i + 1,
                index,
            }),
            _ => None,
        }
    }

    /// Marks entry `index` as consumed and returns its fragment.
    pub fn take(&mut self, index: usize) -> &str {
        let entry = &mut self.entries[index];
        entry.consumed = true;
        &entry.fragment
    }

    /// Replaces every token in `text` with the source expression it stands
    /// for.
    pub fn expand_sources(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(found) = self.find(rest) {
            out.push_str(&rest[..found.range.start]);
            out.push_str(&self.entries[found.index].source);
            rest = &rest[found.range.end..];
        }
        out.push_str(rest);
        out
    }

    /// Indices of entries that restoration has not used yet.
    pub fn unconsumed(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.consumed)
            .map(|(ix, _)| ix)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Literal => f.write_str("literal"),
            Kind::Block => f.write_str("block"),
        }
    }
}
