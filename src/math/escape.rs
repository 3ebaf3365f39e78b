//! HTML-escaping of unprotected `$$...$$` and `$...$` spans.

use super::scanner::{code_span_end, next_interesting, run_length};

enum State {
    Plain,
    /// Inside math whose opening delimiter ends at `start`.
    InEscapedMath { display: bool, start: usize },
}

/// Escapes `&`, `<` and `>` inside math spans of `text`, leaving the
/// delimiters alone.  Inline math must close on the line it opens; an
/// unclosed delimiter is kept as literal text.  Code spans are skipped.
pub fn escape_prose(text: &str) -> String {
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
                    let end = code_span_end(text, i, n).unwrap_or(i + n);
                    out.push_str(&text[i..end]);
                    i = end;
                }
                b'$' => {
                    let display = bytes.get(i + 1) == Some(&b'$');
                    let delimiter = if display { 2 } else { 1 };
                    state = State::InEscapedMath {
                        display,
                        start: i + delimiter,
                    };
                    i += delimiter;
                }
                _ => {
                    let next = next_interesting(text, i, b"\\`$");
                    out.push_str(&text[i..next]);
                    i = next;
                }
            },
            State::InEscapedMath { display, start } => {
                let delimiter = if display { "$$" } else { "$" };
                match find_close(text, start, display) {
                    Some(close) if close > start => {
                        out.push_str(delimiter);
                        escape_math(&mut out, &text[start..close]);
                        out.push_str(delimiter);
                        i = close + delimiter.len();
                    }
                    _ => {
                        out.push_str(delimiter);
                        i = start;
                    }
                }
                state = State::Plain;
            }
        }
    }

    // Input ending right after an opening delimiter.
    if let State::InEscapedMath { display, .. } = state {
        out.push_str(if display { "$$" } else { "$" });
    }

    out
}

/// Offset of the closing delimiter for math starting at `start`.
fn find_close(text: &str, start: usize, display: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !display => return None,
            b'$' if !display => return Some(i),
            b'$' if bytes.get(i + 1) == Some(&b'$') => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn escape_math(out: &mut String, math: &str) {
    for c in math.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
