//! EmptyStatement rule implementation.
//!
//! Detects empty statements (lone semicolons) that are usually a mistake.
//!
//! Checkstyle equivalent: EmptyStatement

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Violation: empty statement detected.
#[derive(Debug, Clone)]
pub struct EmptyStatementViolation;

impl Violation for EmptyStatementViolation {
    fn message(&self) -> String {
        "Empty statement.".to_string()
    }
}

/// Configuration for EmptyStatement rule.
#[derive(Debug, Clone, Default)]
pub struct EmptyStatement;

const RELEVANT_KINDS: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
    ";",
];

impl FromConfig for EmptyStatement {
    const MODULE_NAME: &'static str = "EmptyStatement";

    fn from_config(_properties: &Properties) -> Self {
        Self
    }
}

impl Rule for EmptyStatement {
    fn name(&self) -> &'static str {
        "EmptyStatement"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        match node.kind() {
            "if_statement" => Self::check_if_statement(node),
            "while_statement" | "for_statement" | "enhanced_for_statement" | "do_statement" => {
                Self::check_loop_body(node)
            }
            ";" => Self::check_standalone_semicolon(node),
            _ => vec![],
        }
    }
}

impl EmptyStatement {
    /// Check both branches of an if statement for empty bodies.
    fn check_if_statement(node: &CstNode) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if let Some(consequence) = node.child_by_field_name("consequence")
            && consequence.kind() == ";"
        {
            diagnostics.push(Self::create_diagnostic(&consequence));
        }

        if let Some(alternative) = node.child_by_field_name("alternative")
            && alternative.kind() == ";"
        {
            diagnostics.push(Self::create_diagnostic(&alternative));
        }

        diagnostics
    }

    /// Check a loop statement for an empty body.
    fn check_loop_body(node: &CstNode) -> Vec<Diagnostic> {
        if let Some(body) = node.child_by_field_name("body")
            && body.kind() == ";"
        {
            return vec![Self::create_diagnostic(&body)];
        }
        vec![]
    }

    /// Check for standalone semicolons at statement level.
    ///
    /// Semicolons that are part of for loop syntax, loop bodies (reported
    /// above) or type body separators are not flagged here.
    fn check_standalone_semicolon(node: &CstNode) -> Vec<Diagnostic> {
        let Some(parent) = node.parent() else {
            return vec![];
        };

        match parent.kind() {
            "block" | "constructor_body" | "program" | "switch_block_statement_group" => {
                vec![Self::create_diagnostic(node)]
            }
            _ => vec![],
        }
    }

    fn create_diagnostic(node: &CstNode) -> Diagnostic {
        Diagnostic::new(EmptyStatementViolation, node.range())
    }
}
