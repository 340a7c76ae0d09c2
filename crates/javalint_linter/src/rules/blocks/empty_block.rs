//! EmptyBlock rule implementation.
//!
//! Checks for empty blocks.
//! Checkstyle equivalent: EmptyBlock

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;
use javalint_text_size::TextRange;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Block option for empty block checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockOption {
    /// Must have at least one statement.
    #[default]
    Statement,
    /// Must have any text (including comments).
    Text,
}

/// Configuration for EmptyBlock rule.
#[derive(Debug, Clone, Default)]
pub struct EmptyBlock {
    pub option: BlockOption,
}

impl FromConfig for EmptyBlock {
    const MODULE_NAME: &'static str = "EmptyBlock";

    fn from_config(properties: &Properties) -> Self {
        let option = properties
            .get("option")
            .map(|v| match v.trim().to_uppercase().as_str() {
                "TEXT" => BlockOption::Text,
                _ => BlockOption::Statement,
            })
            .unwrap_or(BlockOption::Statement);

        Self { option }
    }
}

/// Violation for empty block with no statement.
#[derive(Debug, Clone)]
pub struct EmptyBlockNoStatement;

impl Violation for EmptyBlockNoStatement {
    fn message(&self) -> String {
        "Must have at least one statement.".to_string()
    }
}

/// Violation for empty block with no text.
#[derive(Debug, Clone)]
pub struct EmptyBlockNoText {
    pub block_type: String,
}

impl Violation for EmptyBlockNoText {
    fn message(&self) -> String {
        format!("Empty {} block.", self.block_type)
    }
}

impl Rule for EmptyBlock {
    fn name(&self) -> &'static str {
        "EmptyBlock"
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(block_type) = Self::block_type_name(node)
            && let Some(block) = Self::find_block(node)
        {
            if self.option == BlockOption::Statement {
                if Self::is_empty_statement(&block) {
                    diagnostics.push(Diagnostic::new(EmptyBlockNoStatement, block.range()));
                }
            } else if !Self::has_text(ctx, &block) {
                diagnostics.push(Diagnostic::new(
                    EmptyBlockNoText {
                        block_type: block_type.to_string(),
                    },
                    block.range(),
                ));
            }
        }

        diagnostics
    }
}

impl EmptyBlock {
    /// Map node kind to the block type name used in violation messages.
    /// Returns None for kinds this rule does not cover.
    fn block_type_name(node: &CstNode) -> Option<&'static str> {
        match node.kind() {
            "while_statement" => Some("while"),
            "try_statement" => Some("try"),
            // The "finally" keyword itself; catch blocks belong to EmptyCatchBlock
            "finally" => Some("finally"),
            "do_statement" => Some("do"),
            "if_statement" => Some("if"),
            "for_statement" | "enhanced_for_statement" => Some("for"),
            "switch_expression" => Some("switch"),
            "synchronized_statement" => Some("synchronized"),
            "static_initializer" => Some("STATIC_INIT"),
            "block" => {
                // Instance initializer: a bare block directly inside a class body
                node.parent()
                    .filter(|parent| parent.kind() == "class_body")
                    .map(|_| "INSTANCE_INIT")
            }
            "switch_block_statement_group" => {
                let label = node.children().find(|c| {
                    c.kind() == "switch_label"
                        && (c.child_by_field_name("value").is_some()
                            || c.children().any(|c| c.kind() == "default"))
                })?;
                if label.children().any(|c| c.kind() == "default") {
                    Some("default")
                } else {
                    Some("case")
                }
            }
            "switch_rule" => {
                let label = node.child_by_field_name("label")?;
                if label.children().any(|c| c.kind() == "default") {
                    Some("default")
                } else {
                    Some("case")
                }
            }
            // Empty array initializers {} are allowed by default
            _ => None,
        }
    }

    /// Find the block associated with a node.
    fn find_block<'a>(node: &'a CstNode) -> Option<CstNode<'a>> {
        match node.kind() {
            "while_statement" | "do_statement" | "for_statement" | "enhanced_for_statement" => node
                .child_by_field_name("body")
                .filter(|body| body.kind() == "block"),
            // For if without braces there is nothing to check
            "if_statement" => node
                .child_by_field_name("consequence")
                .filter(|body| body.kind() == "block"),
            "try_statement" | "synchronized_statement" => node.child_by_field_name("body"),
            // The block is the next sibling of the "finally" keyword
            "finally" => node.next_named_sibling().filter(|s| s.kind() == "block"),
            "static_initializer" => node.children().find(|c| c.kind() == "block"),
            "block" => Some(*node),
            "switch_expression" => node.child_by_field_name("body"),
            "switch_block_statement_group" | "switch_rule" => {
                node.children().find(|c| c.kind() == "block")
            }
            _ => None,
        }
    }

    /// Check if a block has no statements (comments do not count).
    fn is_empty_statement(block: &CstNode) -> bool {
        match block.kind() {
            "block" => !block.children().any(|c| {
                !matches!(
                    c.kind(),
                    "{" | "}" | "line_comment" | "block_comment" | "ERROR"
                )
            }),
            "switch_block" => !block
                .children()
                .any(|c| matches!(c.kind(), "switch_block_statement_group" | "switch_rule")),
            _ => false,
        }
    }

    /// Check if a block has any text (including comments) between its braces.
    fn has_text(ctx: &CheckContext, block: &CstNode) -> bool {
        let content_range = Self::block_content_range(block);
        if content_range.is_empty() {
            return false;
        }

        let content = ctx.text_at(content_range);
        content.chars().any(|c: char| !c.is_whitespace())
    }

    /// Get the range of block content (between braces).
    fn block_content_range(block: &CstNode) -> TextRange {
        let open_brace = block.children().find(|c| c.kind() == "{");
        let close_brace = block.children().find(|c| c.kind() == "}");

        if let (Some(open), Some(close)) = (open_brace, close_brace) {
            TextRange::new(open.range().end(), close.range().start())
        } else {
            TextRange::default()
        }
    }
}
