//! Generates XPath queries addressing the nodes at a violation position.
//!
//! For a violation at line:column, every element starting at that position
//! gets one query, in document order. A query walks from the root down to
//! the node; steps carry `[@text='...']` when the node itself has text,
//! `[./child[@text='...']]` when a direct child does, and the final step
//! gains a positional `[N]` when nothing else disambiguates it from
//! same-named siblings.

use std::borrow::Cow;

use javalint_java_cst::CstNode;
use javalint_source_file::LineIndex;
use javalint_text_size::TextSize;

use crate::element::{element_children, element_name, encode_text, text_attribute_value};

/// Tab width used when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Generator of suppression queries for one violation position.
pub struct XpathQueryGenerator<'a> {
    root: CstNode<'a>,
    line: usize,
    column: usize,
    source: &'a str,
    line_index: &'a LineIndex,
    tab_width: usize,
}

impl<'a> XpathQueryGenerator<'a> {
    /// `line` and `column` are 1-based; the column counts tab-expanded
    /// characters.
    pub fn new(
        root: CstNode<'a>,
        line: usize,
        column: usize,
        source: &'a str,
        line_index: &'a LineIndex,
        tab_width: usize,
    ) -> Self {
        Self {
            root,
            line,
            column,
            source,
            line_index,
            tab_width,
        }
    }

    /// All queries for the position, one per matching element, in document
    /// order.
    pub fn generate(&self) -> Vec<String> {
        let mut matching = Vec::new();
        self.collect_matching(&self.root, &mut matching);
        matching.iter().map(|node| self.query_for(node)).collect()
    }

    fn collect_matching(&self, node: &CstNode<'a>, out: &mut Vec<CstNode<'a>>) {
        if element_name(node).is_none() {
            return;
        }
        if self.matches_position(node) {
            out.push(*node);
        }
        for child in element_children(node) {
            self.collect_matching(&child, out);
        }
    }

    fn matches_position(&self, node: &CstNode) -> bool {
        let start = node.range().start();
        if self.line_index.line_index(start).get() != self.line {
            return false;
        }
        self.expanded_column(start) == self.column
    }

    /// 1-based column of `offset` after expanding tabs.
    fn expanded_column(&self, offset: TextSize) -> usize {
        let line = self.line_index.line_index(offset);
        let line_start = self.line_index.line_start(line, self.source);
        let prefix = &self.source[usize::from(line_start)..usize::from(offset)];

        let mut width = 0usize;
        for ch in prefix.chars() {
            if ch == '\t' {
                width = (width / self.tab_width + 1) * self.tab_width;
            } else {
                width += 1;
            }
        }
        width + 1
    }

    fn query_for(&self, node: &CstNode<'a>) -> String {
        let mut query = path_query(None, node);
        if !is_unique_by_path(node) {
            query.push('[');
            if let Some(child) = find_text_descendant(node) {
                query.push('.');
                query.push_str(&path_query(Some(node), &child));
            } else {
                query.push_str(&position_among_siblings(node).to_string());
            }
            query.push(']');
        }
        query
    }
}

/// Path from `stop` (exclusive; `None` walks past the tree root) down to
/// `target`, one `/name[...]` step per node.
fn path_query(stop: Option<&CstNode>, target: &CstNode) -> String {
    let mut result = String::new();
    let mut cur = Some(*target);
    while let Some(current) = cur {
        if let Some(stop) = stop
            && current.id() == stop.id()
        {
            break;
        }

        let mut step = String::from("/");
        step.push_str(&name_of(&current));
        if let Some(value) = text_attribute_value(&current) {
            step.push_str("[@text='");
            step.push_str(&encode_text(&value));
            step.push_str("']");
        } else if let Some(child) = first_text_child(&current)
            && child.id() != target.id()
        {
            step.push_str("[.");
            step.push_str(&path_query(Some(&current), &child));
            step.push(']');
        }

        result.insert_str(0, &step);
        cur = current.parent();
    }
    result
}

/// Whether the bare path already identifies `node`: no same-named sibling,
/// or the node's step carries text of its own or of a direct child.
fn is_unique_by_path(node: &CstNode) -> bool {
    !has_same_named_sibling(node)
        || text_attribute_value(node).is_some()
        || first_text_child(node).is_some()
}

fn name_of(node: &CstNode) -> Cow<'static, str> {
    element_name(node).unwrap_or(Cow::Borrowed("_"))
}

fn first_text_child<'a>(node: &CstNode<'a>) -> Option<CstNode<'a>> {
    element_children(node)
        .into_iter()
        .find(|child| text_attribute_value(child).is_some())
}

/// Depth-first search for a node with a text attribute, checking each
/// node's direct children before descending.
fn find_text_descendant<'a>(node: &CstNode<'a>) -> Option<CstNode<'a>> {
    if let Some(child) = first_text_child(node) {
        return Some(child);
    }
    for child in element_children(node) {
        if let Some(found) = find_text_descendant(&child) {
            return Some(found);
        }
    }
    None
}

fn has_same_named_sibling(node: &CstNode) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let name = name_of(node);
    element_children(&parent)
        .iter()
        .any(|sibling| sibling.id() != node.id() && name_of(sibling) == name)
}

/// 1-based position of `node` among same-named siblings.
fn position_among_siblings(node: &CstNode) -> usize {
    let Some(parent) = node.parent() else {
        return 1;
    };
    let name = name_of(node);
    let mut position = 0;
    for sibling in element_children(&parent) {
        if name_of(&sibling) == name {
            position += 1;
        }
        if sibling.id() == node.id() {
            break;
        }
    }
    position
}
