//! Shared helpers for blocks rules.

use javalint_java_cst::CstNode;

use crate::CheckContext;

/// Check if two nodes start on the same line.
pub fn are_on_same_line(ctx: &CheckContext, a: &CstNode, b: &CstNode) -> bool {
    let source_code = ctx.source_code();
    let a_line = source_code.line_column(a.range().start()).line;
    let b_line = source_code.line_column(b.range().start()).line;
    a_line == b_line
}

/// Get column number (1-indexed) for a node.
pub fn get_column(ctx: &CheckContext, node: &CstNode) -> usize {
    ctx.source_code()
        .line_column(node.range().start())
        .column
        .get()
}
