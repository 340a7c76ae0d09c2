//! NeedBraces rule implementation.
//!
//! Checks for braces around code blocks.
//! Checkstyle equivalent: NeedBraces

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Configuration for NeedBraces rule.
#[derive(Debug, Clone, Default)]
pub struct NeedBraces {
    pub allow_single_line_statement: bool,
    pub allow_empty_loop_body: bool,
}

const RELEVANT_KINDS: &[&str] = &[
    "if_statement",
    "while_statement",
    "do_statement",
    "for_statement",
    "enhanced_for_statement",
];

impl FromConfig for NeedBraces {
    const MODULE_NAME: &'static str = "NeedBraces";

    fn from_config(properties: &Properties) -> Self {
        let allow_single_line_statement = properties
            .get("allowSingleLineStatement")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let allow_empty_loop_body = properties
            .get("allowEmptyLoopBody")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            allow_single_line_statement,
            allow_empty_loop_body,
        }
    }
}

/// Violation for missing braces.
#[derive(Debug, Clone)]
pub struct NeedBracesViolation {
    pub construct: String,
}

impl Violation for NeedBracesViolation {
    fn message(&self) -> String {
        format!("'{}' construct must use '{{}}'s", self.construct)
    }
}

impl Rule for NeedBraces {
    fn name(&self) -> &'static str {
        "NeedBraces"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        match node.kind() {
            "if_statement" => {
                diagnostics.extend(self.check_if_statement(ctx, node));
            }
            "while_statement" => {
                diagnostics.extend(self.check_loop(ctx, node, "while"));
            }
            "do_statement" => {
                diagnostics.extend(self.check_do_statement(ctx, node));
            }
            "for_statement" | "enhanced_for_statement" => {
                diagnostics.extend(self.check_loop(ctx, node, "for"));
            }
            _ => {}
        }

        diagnostics
    }
}

impl NeedBraces {
    /// Check if statement for missing braces around then/else branches.
    fn check_if_statement(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(consequence) = node.child_by_field_name("consequence")
            && consequence.kind() != "block"
            && !self.is_skip_statement(ctx, node, "if")
        {
            diagnostics.push(Diagnostic::new(
                NeedBracesViolation {
                    construct: "if".to_string(),
                },
                node.range(),
            ));
        }

        // An else-if chain is allowed without braces
        if let Some(alternative) = node.child_by_field_name("alternative")
            && alternative.kind() != "block"
            && alternative.kind() != "if_statement"
            && let Some(else_kw) = node.children().find(|c| c.kind() == "else")
            && !self.is_skip_statement(ctx, node, "else")
        {
            diagnostics.push(Diagnostic::new(
                NeedBracesViolation {
                    construct: "else".to_string(),
                },
                else_kw.range(),
            ));
        }

        diagnostics
    }

    /// Check while/for loops for missing braces around the body.
    fn check_loop(&self, ctx: &CheckContext, node: &CstNode, construct: &str) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body") {
            if self.allow_empty_loop_body && body.kind() == ";" {
                return diagnostics;
            }

            if body.kind() != "block" && !self.is_skip_statement(ctx, node, construct) {
                diagnostics.push(Diagnostic::new(
                    NeedBracesViolation {
                        construct: construct.to_string(),
                    },
                    node.range(),
                ));
            }
        }

        diagnostics
    }

    /// Check do-while statement for missing braces around the body.
    fn check_do_statement(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(body) = node.child_by_field_name("body")
            && body.kind() != "block"
            && !self.is_skip_statement(ctx, node, "do")
        {
            diagnostics.push(Diagnostic::new(
                NeedBracesViolation {
                    construct: "do".to_string(),
                },
                node.range(),
            ));
        }

        diagnostics
    }

    /// Check if the statement can be skipped under allowSingleLineStatement.
    fn is_skip_statement(&self, ctx: &CheckContext, node: &CstNode, construct: &str) -> bool {
        self.allow_single_line_statement && self.is_single_line_statement(ctx, node, construct)
    }

    /// Check if the statement and its body fit on a single line.
    fn is_single_line_statement(&self, ctx: &CheckContext, node: &CstNode, construct: &str) -> bool {
        // Only statements directly inside a block qualify
        if node.parent().is_none_or(|parent| parent.kind() != "block") {
            return false;
        }

        let source_code = ctx.source_code();
        let start_line = source_code.line_column(node.range().start()).line;
        let line_of = |child: &CstNode| source_code.line_column(child.range().start()).line;

        match construct {
            "if" => node
                .child_by_field_name("consequence")
                .is_some_and(|consequence| start_line == line_of(&consequence)),
            "else" => {
                let alternative = node.child_by_field_name("alternative");
                let else_kw = node.children().find(|c| c.kind() == "else");
                match (alternative, else_kw) {
                    (Some(alternative), Some(else_kw)) => {
                        line_of(&else_kw) == line_of(&alternative)
                    }
                    _ => false,
                }
            }
            "while" => node
                .child_by_field_name("body")
                .is_some_and(|body| start_line == line_of(&body)),
            "do" => {
                // The whole do-while including the condition must be one line
                node.child_by_field_name("body").is_some()
                    && start_line == source_code.line_column(node.range().end()).line
            }
            "for" => node.child_by_field_name("body").is_some_and(|body| {
                // An empty statement body counts as single line
                body.kind() == ";" || start_line == line_of(&body)
            }),
            _ => false,
        }
    }
}
