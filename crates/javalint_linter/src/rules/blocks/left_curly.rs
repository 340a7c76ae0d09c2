//! LeftCurly rule implementation.
//!
//! Checks the placement of left curly braces ('{') for code blocks.
//! Checkstyle equivalent: LeftCurly

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

use super::common::{are_on_same_line, get_column};

/// Policy for placement of left curly braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeftCurlyOption {
    /// Left curly must be at end of line (on same line as statement).
    #[default]
    Eol,
    /// Left curly must be on a new line (alone).
    Nl,
    /// Left curly on new line if the statement spans multiple lines.
    Nlow,
}

/// Configuration for LeftCurly rule.
#[derive(Debug, Clone)]
pub struct LeftCurly {
    pub option: LeftCurlyOption,
    pub ignore_enums: bool,
}

const RELEVANT_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "annotation_type_declaration",
    "enum_declaration",
    "record_declaration",
    "method_declaration",
    "constructor_declaration",
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
    "try_statement",
    "try_with_resources_statement",
    "catch_clause",
    "finally_clause",
    "static_initializer",
    "lambda_expression",
    "switch_expression",
    "switch_block_statement_group",
    "enum_constant",
];

impl Default for LeftCurly {
    fn default() -> Self {
        Self {
            option: LeftCurlyOption::Eol,
            ignore_enums: true,
        }
    }
}

impl FromConfig for LeftCurly {
    const MODULE_NAME: &'static str = "LeftCurly";

    fn from_config(properties: &Properties) -> Self {
        let option = properties
            .get("option")
            .map(|v| match v.to_uppercase().as_str() {
                "NL" => LeftCurlyOption::Nl,
                "NLOW" => LeftCurlyOption::Nlow,
                _ => LeftCurlyOption::Eol,
            })
            .unwrap_or(LeftCurlyOption::Eol);

        let ignore_enums = properties
            .get("ignoreEnums")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            option,
            ignore_enums,
        }
    }
}

/// Violation for left curly should be on a new line.
#[derive(Debug, Clone)]
pub struct LeftCurlyShouldBeOnNewLine {
    pub column: usize,
}

impl Violation for LeftCurlyShouldBeOnNewLine {
    fn message(&self) -> String {
        format!("'{{' at column {} should be on a new line", self.column)
    }
}

/// Violation for left curly should be on the previous line.
#[derive(Debug, Clone)]
pub struct LeftCurlyShouldBeOnPreviousLine {
    pub column: usize,
}

impl Violation for LeftCurlyShouldBeOnPreviousLine {
    fn message(&self) -> String {
        format!(
            "'{{' at column {} should be on the previous line",
            self.column
        )
    }
}

/// Violation for left curly should have line break after.
#[derive(Debug, Clone)]
pub struct LeftCurlyShouldHaveLineBreakAfter {
    pub column: usize,
}

impl Violation for LeftCurlyShouldHaveLineBreakAfter {
    fn message(&self) -> String {
        format!(
            "'{{' at column {} should have line break after",
            self.column
        )
    }
}

impl Rule for LeftCurly {
    fn name(&self) -> &'static str {
        "LeftCurly"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        match node.kind() {
            "class_declaration"
            | "interface_declaration"
            | "annotation_type_declaration"
            | "enum_declaration"
            | "record_declaration" => {
                diagnostics.extend(self.check_type_declaration(ctx, node));
            }
            "method_declaration" | "constructor_declaration" => {
                diagnostics.extend(self.check_method_or_ctor(ctx, node));
            }
            "if_statement" => {
                diagnostics.extend(self.check_if_statement(ctx, node));
            }
            "while_statement" | "for_statement" | "enhanced_for_statement" | "do_statement" => {
                diagnostics.extend(self.check_loop_statement(ctx, node));
            }
            "try_statement" | "try_with_resources_statement" => {
                diagnostics.extend(self.check_try_statement(ctx, node));
            }
            "catch_clause" => {
                diagnostics.extend(self.check_catch_clause(ctx, node));
            }
            "finally_clause" => {
                diagnostics.extend(self.check_finally_clause(ctx, node));
            }
            "static_initializer" => {
                diagnostics.extend(self.check_static_init(ctx, node));
            }
            "lambda_expression" => {
                diagnostics.extend(self.check_lambda(ctx, node));
            }
            "switch_expression" => {
                diagnostics.extend(self.check_switch(ctx, node));
            }
            "switch_block_statement_group" => {
                diagnostics.extend(self.check_switch_case(ctx, node));
            }
            "enum_constant" => {
                diagnostics.extend(self.check_enum_constant(ctx, node));
            }
            _ => {}
        }

        diagnostics
    }
}

impl LeftCurly {
    /// Find the left curly brace in a node.
    fn find_left_curly<'a>(node: &'a CstNode<'a>) -> Option<CstNode<'a>> {
        node.children().find(|&child| child.kind() == "{")
    }

    /// Check if there's only whitespace before a node on its line.
    /// Returns true if the node is at the start of the line OR if there's
    /// only whitespace before it.
    fn has_whitespace_before(ctx: &CheckContext, node: &CstNode) -> bool {
        let line_index = ctx.line_index();
        let source_code = ctx.source_code();
        let node_line = source_code.line_column(node.range().start()).line;
        let line_start = line_index.line_start(node_line, ctx.source());

        let before = &ctx.source()[usize::from(line_start)..usize::from(node.range().start())];
        before.is_empty() || before.chars().all(|c| c.is_whitespace())
    }

    /// Check if there's a line break after the left curly.
    fn has_line_break_after(&self, ctx: &CheckContext, lcurly: &CstNode) -> bool {
        let source_code = ctx.source_code();
        let lcurly_line = source_code.line_column(lcurly.range().start()).line;

        let parent = lcurly.parent();

        let next_token = if let Some(parent) = parent {
            if parent.kind() == "block" || parent.kind() == "switch_block" {
                // For statement list blocks, the next sibling is either a
                // statement or the closing brace.
                Self::get_next_token(lcurly)
            } else if parent.kind() == "class_body"
                || parent.kind() == "enum_body"
                || parent.kind() == "interface_body"
                || parent.kind() == "annotation_type_body"
            {
                // Type bodies are only checked for enums, and only when
                // ignoreEnums is disabled.
                if !self.ignore_enums {
                    if let Some(grand_parent) = parent.parent() {
                        if grand_parent.kind() == "enum_declaration" {
                            Self::get_next_token(lcurly)
                        } else {
                            return true;
                        }
                    } else {
                        return true;
                    }
                } else {
                    return true;
                }
            } else {
                return true;
            }
        } else {
            return true;
        };

        if let Some(next) = next_token {
            // If next is }, that's OK (empty block)
            if next.kind() == "}" {
                return true;
            }

            let next_line = source_code.line_column(next.range().start()).line;
            lcurly_line != next_line
        } else {
            true
        }
    }

    /// Get the next sibling token, skipping comments.
    fn get_next_token<'a>(node: &CstNode<'a>) -> Option<CstNode<'a>> {
        if let Some(parent) = node.parent() {
            let mut found_current = false;
            for child in parent.children() {
                if found_current
                    && !child.kind().is_empty()
                    && !matches!(child.kind(), "line_comment" | "block_comment")
                {
                    return Some(child);
                }
                if child.range() == node.range() {
                    found_current = true;
                }
            }
        }
        None
    }

    /// Find the start token for a node (skipping annotations in modifiers).
    fn skip_modifier_annotations<'a>(node: &'a CstNode<'a>) -> CstNode<'a> {
        if let Some(modifiers) = node.children().find(|c| c.kind() == "modifiers") {
            let has_annotation = modifiers
                .children()
                .any(|c| matches!(c.kind(), "marker_annotation" | "annotation"));

            if has_annotation
                && let Some(next) = modifiers.next_named_sibling()
            {
                return next;
            }
        }

        *node
    }

    /// Check type declarations (class, interface, enum, annotation, record).
    fn check_type_declaration(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        // Note: ignoreEnums only affects line break checking in
        // has_line_break_after, not the placement of the enum's own brace.
        let body = node.child_by_field_name("body").or_else(|| {
            node.children().find(|c| {
                matches!(
                    c.kind(),
                    "class_body" | "interface_body" | "enum_body" | "annotation_type_body"
                )
            })
        });

        if let Some(body) = body
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            let start_token = Self::skip_modifier_annotations(node);
            diagnostics.extend(self.verify_brace(ctx, &lcurly, &start_token));
        }

        diagnostics
    }

    /// Check method or constructor declarations.
    fn check_method_or_ctor(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && (body.kind() == "block" || body.kind() == "constructor_body")
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            let start_token = Self::skip_modifier_annotations(node);
            diagnostics.extend(self.verify_brace(ctx, &lcurly, &start_token));
        }

        diagnostics
    }

    /// Check if statement.
    fn check_if_statement(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(consequence) = node.child_by_field_name("consequence")
            && consequence.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&consequence)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        if let Some(alternative) = node.child_by_field_name("alternative")
            && alternative.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&alternative)
        {
            let else_keyword = node.children().find(|c| c.kind() == "else");
            let start = else_keyword.unwrap_or(*node);
            diagnostics.extend(self.verify_brace(ctx, &lcurly, &start));
        }

        diagnostics
    }

    /// Check loop statements (while, for, do).
    fn check_loop_statement(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check try statement.
    fn check_try_statement(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check catch clause.
    fn check_catch_clause(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check finally clause.
    fn check_finally_clause(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        // finally_clause has no "body" field, the block is a plain child
        if let Some(body) = node.children().find(|c| c.kind() == "block")
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check static initializer.
    fn check_static_init(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.children().find(|c| c.kind() == "block")
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check lambda expression.
    fn check_lambda(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "block"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check switch statement or expression (both parse as switch_expression).
    fn check_switch(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "switch_block"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Check switch case/default labels.
    fn check_switch_case(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(block) = node.children().find(|c| c.kind() == "block")
            && let Some(lcurly) = Self::find_left_curly(&block)
        {
            // The start token is the case/default label
            let start = node.children().next().unwrap_or(*node);
            diagnostics.extend(self.verify_brace(ctx, &lcurly, &start));
        }

        diagnostics
    }

    /// Check enum constant with body.
    fn check_enum_constant(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == "class_body"
            && let Some(lcurly) = Self::find_left_curly(&body)
        {
            diagnostics.extend(self.verify_brace(ctx, &lcurly, node));
        }

        diagnostics
    }

    /// Verify brace placement according to the configured option.
    fn verify_brace(
        &self,
        ctx: &CheckContext,
        brace: &CstNode,
        start_token: &CstNode,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        // '{}' single line empty blocks are always allowed
        if Self::is_empty_block(ctx, brace) {
            return diagnostics;
        }

        match self.option {
            LeftCurlyOption::Nl => {
                if !Self::has_whitespace_before(ctx, brace) {
                    diagnostics.push(Diagnostic::new(
                        LeftCurlyShouldBeOnNewLine {
                            column: get_column(ctx, brace),
                        },
                        brace.range(),
                    ));
                }
            }
            LeftCurlyOption::Eol => {
                if Self::has_whitespace_before(ctx, brace) {
                    diagnostics.push(Diagnostic::new(
                        LeftCurlyShouldBeOnPreviousLine {
                            column: get_column(ctx, brace),
                        },
                        brace.range(),
                    ));
                }
                // Can report in addition to "previous line"
                if !self.has_line_break_after(ctx, brace) {
                    diagnostics.push(Diagnostic::new(
                        LeftCurlyShouldHaveLineBreakAfter {
                            column: get_column(ctx, brace),
                        },
                        brace.range(),
                    ));
                }
            }
            LeftCurlyOption::Nlow => {
                // Like EOL while the statement fits on one line, otherwise
                // the brace must stand alone on its own line.
                if !are_on_same_line(ctx, start_token, brace)
                    && !Self::has_whitespace_before(ctx, brace)
                {
                    diagnostics.push(Diagnostic::new(
                        LeftCurlyShouldBeOnNewLine {
                            column: get_column(ctx, brace),
                        },
                        brace.range(),
                    ));
                }
            }
        }

        diagnostics
    }

    /// Check if a brace is part of an empty block ('{' followed immediately by '}').
    fn is_empty_block(ctx: &CheckContext, brace: &CstNode) -> bool {
        let line_index = ctx.line_index();
        let source_code = ctx.source_code();
        let brace_line = source_code.line_column(brace.range().start()).line;
        let line_start = line_index.line_start(brace_line, ctx.source());
        let line_end = line_index.line_end(brace_line, ctx.source());

        let line = &ctx.source()[usize::from(line_start)..usize::from(line_end)];
        let col = get_column(ctx, brace) - 1; // 0-indexed

        if col + 1 < line.len() {
            line.chars().nth(col + 1) == Some('}')
        } else {
            false
        }
    }
}
