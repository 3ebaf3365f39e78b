//! Extraction of backtick-protected math: `` `$$expr$$` ``.

use super::scanner::{code_span_end, next_interesting, run_length};
use super::Formulas;
use crate::placeholder::{Kind, Placeholders};

enum State {
    Plain,
    /// Just past `` `$$ ``; the opening backtick is at `open`.
    InLiteralMath { open: usize },
}

/// Replaces each protected formula in `text` with a token and records it in
/// `table`.  `text` must be prose, not a code block.
pub fn protect_prose(text: &str, table: &mut Placeholders, formulas: &Formulas) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut state = State::Plain;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            State::Plain => match bytes[i] {
                b'\\' => {
                    let len = if bytes.get(i + 1).map_or(false, u8::is_ascii_punctuation) {
                        2
                    } else {
                        1
                    };
                    out.push_str(&text[i..i + len]);
                    i += len;
                }
                b'`' => {
                    let n = run_length(bytes, i, b'`');
                    if n == 1 && text[i + 1..].starts_with("$$") {
                        state = State::InLiteralMath { open: i };
                        continue;
                    }
                    let end = code_span_end(text, i, n).unwrap_or(i + n);
                    out.push_str(&text[i..end]);
                    i = end;
                }
                _ => {
                    let next = next_interesting(text, i, b"\\`");
                    out.push_str(&text[i..next]);
                    i = next;
                }
            },
            State::InLiteralMath { open } => {
                let start = open + 3;
                let line_end = text[start..].find('\n').map_or(text.len(), |p| start + p);
                match text[start..line_end].find("$$`") {
                    Some(p) if p > 0 => {
                        let expr = &text[start..start + p];
                        let token = table.push(Kind::Literal, expr, formulas.literal(expr));
                        out.push_str(&token);
                        i = start + p + 3;
                    }
                    _ => {
                        // Not protected math after all; an ordinary code span.
                        let end = code_span_end(text, open, 1).unwrap_or(open + 1);
                        out.push_str(&text[open..end]);
                        i = end;
                    }
                }
                state = State::Plain;
            }
        }
    }

    out
}
