//! CST node wrappers for Java syntax trees.
//!
//! Provides uniform access to tree-sitter nodes, named and anonymous alike,
//! with byte-offset ranges.

use javalint_text_size::{TextRange, TextSize};
use tree_sitter::Node;

/// Convert a tree-sitter node range to a TextRange.
pub fn node_range(node: &Node) -> TextRange {
    let start = TextSize::new(node.start_byte() as u32);
    let end = TextSize::new(node.end_byte() as u32);
    TextRange::new(start, end)
}

/// Wrapper for traversing CST nodes.
#[derive(Debug, Clone, Copy)]
pub struct CstNode<'a> {
    node: Node<'a>,
    source: &'a str,
}

impl<'a> CstNode<'a> {
    pub fn new(node: Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn kind_id(&self) -> u16 {
        self.node.kind_id()
    }

    /// Whether this is a named grammar node, as opposed to an anonymous token.
    pub fn is_named(&self) -> bool {
        self.node.is_named()
    }

    /// Stable identity of the node within its tree.
    pub fn id(&self) -> usize {
        self.node.id()
    }

    pub fn range(&self) -> TextRange {
        node_range(&self.node)
    }

    pub fn text(&self) -> &'a str {
        self.node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn parent(&self) -> Option<CstNode<'a>> {
        self.node.parent().map(|n| CstNode::new(n, self.source))
    }

    pub fn child_count(&self) -> usize {
        self.node.child_count() as usize
    }

    // The iterator holds copies of the node and source, not a borrow of
    // self, so callers may iterate children of a temporary node.
    pub fn children(&self) -> impl Iterator<Item = CstNode<'a>> + use<'a> {
        let source = self.source;
        let count = self.node.child_count();
        let node = self.node;
        (0..count).map(move |i| {
            let child = node.child(i as u32).unwrap();
            CstNode::new(child, source)
        })
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<CstNode<'a>> {
        self.node
            .child_by_field_name(name)
            .map(|n| CstNode::new(n, self.source))
    }

    pub fn named_children(&self) -> impl Iterator<Item = CstNode<'a>> + use<'a> {
        self.children().filter(|c| c.node.is_named())
    }

    pub fn next_sibling(&self) -> Option<CstNode<'a>> {
        self.node
            .next_sibling()
            .map(|n| CstNode::new(n, self.source))
    }

    pub fn prev_sibling(&self) -> Option<CstNode<'a>> {
        self.node
            .prev_sibling()
            .map(|n| CstNode::new(n, self.source))
    }

    pub fn next_named_sibling(&self) -> Option<CstNode<'a>> {
        self.node
            .next_named_sibling()
            .map(|n| CstNode::new(n, self.source))
    }

    /// Get the raw tree-sitter node.
    pub fn inner(&self) -> Node<'a> {
        self.node
    }
}

impl PartialEq for CstNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node.id() == other.node.id()
    }
}

impl Eq for CstNode<'_> {}

/// Iterator for walking all nodes in a tree (pre-order traversal).
pub struct TreeWalker<'a> {
    cursor: tree_sitter::TreeCursor<'a>,
    source: &'a str,
    done: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: Node<'a>, source: &'a str) -> Self {
        Self {
            cursor: root.walk(),
            source,
            done: false,
        }
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = CstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = CstNode::new(self.cursor.node(), self.source);

        // Try to go to first child
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        // Try to go to next sibling
        if self.cursor.goto_next_sibling() {
            return Some(node);
        }

        // Go up until we can go to next sibling or reach root
        loop {
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
        }
    }
}
