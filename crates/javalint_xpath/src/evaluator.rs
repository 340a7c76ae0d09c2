//! Evaluates parsed queries against a syntax tree using the same element
//! projection the generator builds queries from.

use std::collections::HashSet;

use javalint_java_cst::CstNode;

use crate::element::{element_children, element_name, text_attribute_value};
use crate::parser::{Axis, LocationPath, NodeTest, Predicate, Step, XpathQuery};

/// Evaluation context: either the document node above the tree root, or an
/// element. `/program` selects the root via a child step from the document.
#[derive(Debug, Clone, Copy)]
enum Context<'a> {
    Document,
    Element(CstNode<'a>),
}

/// Select every element of `root`'s tree the query matches, in document
/// order, without duplicates.
pub fn evaluate<'a>(query: &XpathQuery, root: CstNode<'a>) -> Vec<CstNode<'a>> {
    let mut matched: HashSet<usize> = HashSet::new();
    for path in &query.paths {
        for context in eval_steps(vec![Context::Document], &path.steps, root) {
            if let Context::Element(node) = context {
                matched.insert(node.id());
            }
        }
    }

    let mut results = Vec::with_capacity(matched.len());
    collect_in_document_order(root, &matched, &mut results);
    results
}

fn collect_in_document_order<'a>(
    node: CstNode<'a>,
    matched: &HashSet<usize>,
    results: &mut Vec<CstNode<'a>>,
) {
    if matched.contains(&node.id()) {
        results.push(node);
    }
    for child in element_children(&node) {
        collect_in_document_order(child, matched, results);
    }
}

fn eval_steps<'a>(
    contexts: Vec<Context<'a>>,
    steps: &[Step],
    root: CstNode<'a>,
) -> Vec<Context<'a>> {
    let mut current = contexts;
    for step in steps {
        let mut next = Vec::new();
        let mut seen: HashSet<usize> = HashSet::new();
        for context in &current {
            let mut selected = apply_axis(*context, step, root);
            for predicate in &step.predicates {
                selected = selected
                    .into_iter()
                    .enumerate()
                    .filter(|(index, node)| {
                        predicate_matches(predicate, *node, index + 1, root)
                    })
                    .map(|(_, node)| node)
                    .collect();
            }
            for node in selected {
                match node {
                    Context::Document => next.push(node),
                    Context::Element(element) => {
                        if seen.insert(element.id()) {
                            next.push(node);
                        }
                    }
                }
            }
        }
        current = next;
    }
    current
}

fn apply_axis<'a>(context: Context<'a>, step: &Step, root: CstNode<'a>) -> Vec<Context<'a>> {
    match step.axis {
        Axis::Child => children_of(context, root)
            .into_iter()
            .filter(|node| test_matches(&step.test, node))
            .map(Context::Element)
            .collect(),
        Axis::Descendant => {
            let mut descendants = Vec::new();
            match context {
                // descendant-or-self from the document reaches the root too
                Context::Document => collect_descendants_and_self(root, &mut descendants),
                Context::Element(node) => {
                    for child in element_children(&node) {
                        collect_descendants_and_self(child, &mut descendants);
                    }
                }
            }
            descendants
                .into_iter()
                .filter(|node| test_matches(&step.test, node))
                .map(Context::Element)
                .collect()
        }
        Axis::SelfNode => vec![context],
        Axis::Parent => match context {
            Context::Document => Vec::new(),
            Context::Element(node) => vec![parent_of(&node)],
        },
    }
}

fn children_of<'a>(context: Context<'a>, root: CstNode<'a>) -> Vec<CstNode<'a>> {
    match context {
        Context::Document => {
            if element_name(&root).is_some() {
                vec![root]
            } else {
                Vec::new()
            }
        }
        Context::Element(node) => element_children(&node),
    }
}

fn collect_descendants_and_self<'a>(node: CstNode<'a>, out: &mut Vec<CstNode<'a>>) {
    out.push(node);
    for child in element_children(&node) {
        collect_descendants_and_self(child, out);
    }
}

fn parent_of<'a>(node: &CstNode<'a>) -> Context<'a> {
    let mut current = *node;
    loop {
        match current.parent() {
            None => return Context::Document,
            Some(parent) => {
                if element_name(&parent).is_some() {
                    return Context::Element(parent);
                }
                // climb past nodes the element projection hides
                current = parent;
            }
        }
    }
}

fn test_matches(test: &NodeTest, node: &CstNode<'_>) -> bool {
    match test {
        NodeTest::Node | NodeTest::Wildcard => true,
        NodeTest::Name(name) => element_name(node).is_some_and(|actual| actual == *name),
    }
}

fn predicate_matches(
    predicate: &Predicate,
    context: Context<'_>,
    position: usize,
    root: CstNode<'_>,
) -> bool {
    match predicate {
        Predicate::Position(expected) => position == *expected,
        Predicate::TextEquals(expected) => match context {
            Context::Document => false,
            Context::Element(node) => {
                text_attribute_value(&node).is_some_and(|text| text == *expected)
            }
        },
        Predicate::Path(path) => path_exists(path, context, root),
        Predicate::And(left, right) => {
            predicate_matches(left, context, position, root)
                && predicate_matches(right, context, position, root)
        }
        Predicate::Or(left, right) => {
            predicate_matches(left, context, position, root)
                || predicate_matches(right, context, position, root)
        }
    }
}

fn path_exists(path: &LocationPath, context: Context<'_>, root: CstNode<'_>) -> bool {
    let start = if path.absolute {
        vec![Context::Document]
    } else {
        vec![context]
    };
    !eval_steps(start, &path.steps, root).is_empty()
}
