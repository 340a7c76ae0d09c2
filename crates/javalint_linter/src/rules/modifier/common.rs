//! Shared helpers for modifier rules.

use javalint_java_cst::CstNode;

/// Check if a `modifiers` node contains a specific modifier keyword.
pub fn has_modifier(modifiers: &CstNode, modifier_kind: &str) -> bool {
    modifiers
        .children()
        .any(|child| child.kind() == modifier_kind)
}
