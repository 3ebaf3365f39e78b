//! Rendering of fenced display math.

use super::scanner::Fence;
use super::Formulas;
use crate::placeholder::{Kind, Placeholders};

/// If `fence` is a closed block tagged with `label`, renders it, records the
/// result in `table`, and returns the placeholder comment line replacing it.
pub fn extract_fence(
    fence: &Fence,
    label: &str,
    table: &mut Placeholders,
    formulas: &Formulas,
) -> Option<String> {
    if !fence.closed || fence.language() != Some(label) {
        return None;
    }

    let expr = fence.body.trim();
    let index = table.len();
    table.push(Kind::Block, expr, formulas.block(expr));

    let mut line = format!("{}{}", fence.indent, table.comment(index));
    if fence.text.ends_with('\n') {
        line.push('\n');
    }
    Some(line)
}
