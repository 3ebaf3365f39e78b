//! Line-level splitting of the working text into prose and code blocks,
//! plus the inline code span rules shared by the prose scanners.

/// A line-aligned piece of the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region<'a> {
    /// Anything outside a code block.
    Prose(&'a str),
    /// A fenced code block, opening and closing lines included.
    Fence(Fence<'a>),
    /// An indented code block, from its first to its last non-blank line.
    Indented(&'a str),
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence<'a> {
    /// The whole block as it appears in the input.
    pub text: &'a str,
    /// Leading whitespace of the opening line.
    pub indent: &'a str,
    /// The info string, trimmed.
    pub info: &'a str,
    /// The lines between the opening and closing fence.
    pub body: &'a str,
    /// False when the input ended before a closing fence.
    pub closed: bool,
}

impl<'a> Fence<'a> {
    /// The first word of the info string.
    pub fn language(&self) -> Option<&'a str> {
        self.info.split_whitespace().next()
    }
}

struct Opening<'a> {
    indent: &'a str,
    fence_char: u8,
    fence_length: usize,
    info: &'a str,
}

fn scan_open_fence(line: &str) -> Option<Opening<'_>> {
    let content = line.trim_start_matches(' ');
    let indent = &line[..line.len() - content.len()];
    let fence_char = *content.as_bytes().first()?;
    if fence_char != b'`' && fence_char != b'~' {
        return None;
    }
    let fence_length = content.bytes().take_while(|&b| b == fence_char).count();
    if fence_length < 3 {
        return None;
    }
    let info = content[fence_length..].trim();
    if fence_char == b'`' && info.contains('`') {
        return None;
    }
    Some(Opening {
        indent,
        fence_char,
        fence_length,
        info,
    })
}

fn is_close_fence(line: &str, opening: &Opening) -> bool {
    let content = line.trim_start_matches(' ');
    let run = content
        .bytes()
        .take_while(|&b| b == opening.fence_char)
        .count();
    run >= opening.fence_length && content[run..].trim().is_empty()
}

/// What the previous non-code line was, as far as indented code cares: an
/// indented code block cannot interrupt a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Paragraph,
    Other,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width of the line's leading whitespace in columns, with tab stops of 4.
fn indentation(line: &str) -> usize {
    let mut columns = 0;
    for b in line.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += 4 - columns % 4,
            _ => break,
        }
    }
    columns
}

fn is_atx_heading(line: &str) -> bool {
    let content = line.trim_start();
    let hashes = content.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes)
        && content[hashes..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
}

fn is_thematic_break(line: &str) -> bool {
    let content = line.trim();
    let Some(c) = content.bytes().next() else {
        return false;
    };
    matches!(c, b'-' | b'*' | b'_')
        && content.bytes().filter(|&b| b == c).count() >= 3
        && content.bytes().all(|b| b == c || b == b' ' || b == b'\t')
}

/// If `line` opens a list item, the column its content starts at.
fn list_item_indent(line: &str) -> Option<usize> {
    let indent = indentation(line);
    let content = line.trim_start_matches(|c| c == ' ' || c == '\t');
    let bytes = content.as_bytes();
    let marker = match bytes.first()? {
        b'-' | b'+' | b'*' => 1,
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || !matches!(bytes.get(digits), Some(b'.') | Some(b')')) {
                return None;
            }
            digits + 1
        }
        _ => return None,
    };
    let spaces = bytes[marker..].iter().take_while(|&&b| b == b' ').count();
    match bytes.get(marker + spaces) {
        None | Some(b'\n') | Some(b'\r') => Some(indent + marker + 1),
        _ if spaces == 0 => None,
        _ if spaces > 4 => Some(indent + marker + 1),
        _ => Some(indent + marker + spaces),
    }
}

fn push_prose<'a>(regions: &mut Vec<Region<'a>>, text: &'a str, from: usize, to: usize) {
    if from < to {
        regions.push(Region::Prose(&text[from..to]));
    }
}

/// Splits `text` into prose and code regions.  Concatenating the regions'
/// text gives back `text`.
///
/// Indented code follows the CommonMark rule of four columns past the
/// enclosing list item's content, and never interrupts a paragraph.
/// Containers other than lists are not tracked.
pub fn regions(text: &str) -> Vec<Region<'_>> {
    let mut lines = vec![];
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let mut regions = vec![];
    let mut prose_start = 0;
    let mut prev = LineKind::Blank;
    let mut list_indent: Option<usize> = None;
    let mut n = 0;

    while n < lines.len() {
        let (start, line) = lines[n];
        if is_blank(line) {
            prev = LineKind::Blank;
            n += 1;
            continue;
        }

        let indent = indentation(line);
        let item = list_item_indent(line);
        if let Some(content) = list_indent {
            if indent < content && prev == LineKind::Blank && item.is_none() {
                list_indent = None;
            }
        }
        let code_indent = list_indent.unwrap_or(0) + 4;

        if indent >= code_indent && prev != LineKind::Paragraph {
            let mut last = n;
            let mut m = n + 1;
            while m < lines.len() {
                let next = lines[m].1;
                if is_blank(next) {
                    m += 1;
                } else if indentation(next) >= code_indent {
                    last = m;
                    m += 1;
                } else {
                    break;
                }
            }
            let stop = lines[last].0 + lines[last].1.len();
            push_prose(&mut regions, text, prose_start, start);
            regions.push(Region::Indented(&text[start..stop]));
            prose_start = stop;
            prev = LineKind::Other;
            n = last + 1;
            continue;
        }

        if let Some(opening) = scan_open_fence(line) {
            let close = (n + 1..lines.len()).find(|&m| is_close_fence(lines[m].1, &opening));
            let (body_end, stop, next) = match close {
                Some(m) => (lines[m].0, lines[m].0 + lines[m].1.len(), m + 1),
                None => (text.len(), text.len(), lines.len()),
            };
            push_prose(&mut regions, text, prose_start, start);
            regions.push(Region::Fence(Fence {
                text: &text[start..stop],
                indent: opening.indent,
                info: opening.info,
                body: &text[start + line.len()..body_end],
                closed: close.is_some(),
            }));
            prose_start = stop;
            prev = LineKind::Other;
            n = next;
            continue;
        }

        prev = if is_thematic_break(line) || is_atx_heading(line) {
            LineKind::Other
        } else if item.is_some() {
            list_indent = item;
            LineKind::Paragraph
        } else {
            LineKind::Paragraph
        };
        n += 1;
    }

    push_prose(&mut regions, text, prose_start, text.len());
    regions
}

/// Length of the run of `byte` starting at `start`.
pub fn run_length(bytes: &[u8], start: usize, byte: u8) -> usize {
    bytes[start..].iter().take_while(|&&b| b == byte).count()
}

/// Given a backtick run of length `n` opening at `start`, returns the end
/// offset of the matching closing run, if the code span closes before a
/// blank line.
pub fn code_span_end(text: &str, start: usize, n: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = start + n;
    while i < bytes.len() {
        match bytes[i] {
            b'`' => {
                let run = run_length(bytes, i, b'`');
                if run == n {
                    return Some(i + run);
                }
                i += run;
            }
            b'\n' if starts_blank_line(&bytes[i + 1..]) => return None,
            _ => i += 1,
        }
    }
    None
}

fn starts_blank_line(rest: &[u8]) -> bool {
    rest.iter()
        .take_while(|&&b| b != b'\n')
        .all(|&b| b == b' ' || b == b'\t' || b == b'\r')
}

/// Offset of the next byte at or after `from` that is in `interesting`, or
/// the end of `text`.
pub fn next_interesting(text: &str, from: usize, interesting: &[u8]) -> usize {
    text.as_bytes()[from..]
        .iter()
        .position(|b| interesting.contains(b))
        .map_or(text.len(), |p| from + p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_fences_from_prose() {
        let text = "before\n```math\nx^2\n```\nafter\n";
        let regions = regions(text);
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0], Region::Prose("before\n"));
        match &regions[1] {
            Region::Fence(fence) => {
                assert_eq!(fence.text, "```math\nx^2\n```\n");
                assert_eq!(fence.language(), Some("math"));
                assert_eq!(fence.body, "x^2\n");
                assert!(fence.closed);
            }
            other => panic!("expected a fence, got {:?}", other),
        }
        assert_eq!(regions[2], Region::Prose("after\n"));
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let text = "~~~~ math\na\n~~~\nb";
        let regions = regions(text);
        assert_eq!(regions.len(), 1);
        match &regions[0] {
            Region::Fence(fence) => {
                assert!(!fence.closed);
                assert_eq!(fence.body, "a\n~~~\nb");
                assert_eq!(fence.info, "math");
            }
            other => panic!("expected a fence, got {:?}", other),
        }
    }

    #[test]
    fn backtick_info_with_backtick_is_not_a_fence() {
        let text = "``` `$$x$$` ```\n";
        assert_eq!(regions(text), vec![Region::Prose(text)]);
    }

    #[test]
    fn code_spans() {
        assert_eq!(code_span_end("`a` b", 0, 1), Some(3));
        assert_eq!(code_span_end("``a`b`` c", 0, 2), Some(7));
        assert_eq!(code_span_end("`a\n\nb`", 0, 1), None);
        assert_eq!(code_span_end("`a", 0, 1), None);
    }

    #[test]
    fn indented_code_is_a_region() {
        let text = "para\n\n    $a && b$\n\n    more\n\nafter $x$\n";
        assert_eq!(
            regions(text),
            vec![
                Region::Prose("para\n\n"),
                Region::Indented("    $a && b$\n\n    more\n"),
                Region::Prose("\nafter $x$\n"),
            ]
        );
    }

    #[test]
    fn indented_lines_continue_paragraphs() {
        let text = "para\n    $a && b$\n";
        assert_eq!(regions(text), vec![Region::Prose(text)]);
    }

    #[test]
    fn indented_fences_at_top_level_are_code() {
        let text = "    ```math\n    x\n    ```\n";
        assert_eq!(regions(text), vec![Region::Indented(text)]);
    }

    #[test]
    fn list_items_raise_the_code_indent() {
        let text = "- item\n\n    ```math\n    x\n    ```\n";
        match &regions(text)[1] {
            Region::Fence(fence) => assert_eq!(fence.body, "    x\n"),
            other => panic!("expected a fence, got {:?}", other),
        }

        let text = "- item\n\n      code\n";
        assert_eq!(regions(text)[1], Region::Indented("      code\n"));
    }

    #[test]
    fn code_after_heading_and_list_end() {
        let text = "# Title\n    code\n";
        assert_eq!(regions(text)[1], Region::Indented("    code\n"));

        let text = "- item\n\nback\n\n    code\n";
        assert_eq!(regions(text)[1], Region::Indented("    code\n"));
    }
}
