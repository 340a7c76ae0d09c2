//! FinalLocalVariable rule implementation.
//!
//! Checks that local variables that never have their values changed are
//! declared final.
//!
//! Checkstyle equivalent: FinalLocalVariable

use std::collections::{HashMap, HashSet};

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;
use javalint_text_size::TextRange;

use crate::rules::modifier::common::has_modifier;
use crate::{CheckContext, FromConfig, Properties, Rule};

/// Violation: a local variable is never reassigned but not declared final.
#[derive(Debug, Clone)]
pub struct VariableShouldBeFinal {
    var_name: String,
}

impl Violation for VariableShouldBeFinal {
    fn message(&self) -> String {
        format!("Variable '{}' should be declared final.", self.var_name)
    }
}

/// Configuration for FinalLocalVariable rule.
#[derive(Debug, Clone, Default)]
pub struct FinalLocalVariable {
    /// Also check the control variable of enhanced for loops.
    validate_enhanced_for_loop_variable: bool,
    /// Also check unnamed `_` variables.
    validate_unnamed_variables: bool,
}

const RELEVANT_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "static_initializer",
    "block",
];

impl FromConfig for FinalLocalVariable {
    const MODULE_NAME: &'static str = "FinalLocalVariable";

    fn from_config(properties: &Properties) -> Self {
        Self {
            validate_enhanced_for_loop_variable: properties
                .get("validateEnhancedForLoopVariable")
                .is_some_and(|v| *v == "true"),
            validate_unnamed_variables: properties
                .get("validateUnnamedVariables")
                .is_some_and(|v| *v == "true"),
        }
    }
}

impl Rule for FinalLocalVariable {
    fn name(&self) -> &'static str {
        "FinalLocalVariable"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        match node.kind() {
            "method_declaration" | "constructor_declaration" => {
                if let Some(body) = node.child_by_field_name("body") {
                    return self.check_block(&body);
                }
            }
            "static_initializer" => {
                // static_initializer has no "body" field, the block is a plain child
                if let Some(block) = node.children().find(|child| child.kind() == "block") {
                    return self.check_block(&block);
                }
            }
            "block" => {
                // Instance initializer blocks hang directly off the class body.
                // Method and loop bodies are reached through their declarations.
                if node
                    .parent()
                    .is_some_and(|parent| parent.kind() == "class_body")
                {
                    return self.check_block(node);
                }
            }
            _ => {}
        }

        vec![]
    }
}

impl FinalLocalVariable {
    fn check_block(&self, block: &CstNode) -> Vec<Diagnostic> {
        let mut visitor = FinalLocalVariableVisitor {
            rule: self,
            scopes: vec![],
            diagnostics: vec![],
        };
        visitor.push_scope();
        visitor.visit(block);
        visitor.pop_scope();
        visitor.diagnostics
    }
}

/// A local variable that could become final, tracked through its scope.
#[derive(Debug)]
struct VariableCandidate {
    ident_range: TextRange,
    name: String,
    has_initializer: bool,
    assigned: bool,
    already_assigned: bool,
}

/// Variables declared in one lexical scope.
#[derive(Debug, Default)]
struct ScopeData {
    variables: HashMap<String, VariableCandidate>,
}

impl ScopeData {
    fn add_variable(&mut self, name: String, ident_range: TextRange, has_initializer: bool) {
        self.variables.insert(
            name.clone(),
            VariableCandidate {
                ident_range,
                name,
                has_initializer,
                assigned: false,
                already_assigned: false,
            },
        );
    }

    fn mark_assigned(&mut self, name: &str) {
        if let Some(var) = self.variables.get_mut(name) {
            if var.assigned {
                var.already_assigned = true;
            } else {
                var.assigned = true;
            }
        }
    }

    /// Variables that were assigned at most once and not declared final.
    fn should_be_final(&self) -> impl Iterator<Item = &VariableCandidate> {
        self.variables.values().filter(|var| {
            if var.already_assigned {
                return false;
            }
            if var.has_initializer {
                !var.assigned
            } else {
                true
            }
        })
    }
}

/// Walks a method or initializer body tracking declarations and assignments.
struct FinalLocalVariableVisitor<'a> {
    rule: &'a FinalLocalVariable,
    scopes: Vec<ScopeData>,
    diagnostics: Vec<Diagnostic>,
}

impl FinalLocalVariableVisitor<'_> {
    fn push_scope(&mut self) {
        self.scopes.push(ScopeData::default());
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            let mut candidates: Vec<&VariableCandidate> = scope.should_be_final().collect();
            candidates.sort_by_key(|var| var.ident_range.start());
            for var in candidates {
                self.diagnostics.push(Diagnostic::new(
                    VariableShouldBeFinal {
                        var_name: var.name.clone(),
                    },
                    var.ident_range,
                ));
            }
        }
    }

    fn visit(&mut self, node: &CstNode) {
        match node.kind() {
            "local_variable_declaration" => {
                self.process_variable_declaration(node);
                self.visit_children(node);
            }
            "assignment_expression" => {
                self.process_assignment(node);
                self.visit_children(node);
            }
            "update_expression" => {
                self.process_update_expression(node);
                self.visit_children(node);
            }
            "enhanced_for_statement" => {
                self.process_enhanced_for(node);
                self.visit_children(node);
            }
            "if_statement" => self.process_if_statement(node),
            "switch_expression" => self.process_switch(node),
            // Nested type bodies get their own rule invocation.
            "class_body" | "interface_body" | "enum_body" | "annotation_type_body" => {}
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &CstNode) {
        for child in node.children() {
            self.visit(&child);
        }
    }

    fn process_variable_declaration(&mut self, node: &CstNode) {
        let is_final = node
            .children()
            .find(|child| child.kind() == "modifiers")
            .is_some_and(|modifiers| has_modifier(&modifiers, "final"));
        if is_final {
            return;
        }

        for declarator in node
            .children()
            .filter(|child| child.kind() == "variable_declarator")
        {
            let Some(name_node) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name_node.kind() != "identifier" {
                continue;
            }
            let name = name_node.text();
            if name == "_" && !self.rule.validate_unnamed_variables {
                continue;
            }
            let has_initializer = declarator.child_by_field_name("value").is_some();
            if let Some(scope) = self.scopes.last_mut() {
                scope.add_variable(name.to_string(), name_node.range(), has_initializer);
            }
        }
    }

    fn process_assignment(&mut self, node: &CstNode) {
        if let Some(left) = node.child_by_field_name("left")
            && left.kind() == "identifier"
        {
            self.mark_assigned(left.text());
        }
    }

    fn process_update_expression(&mut self, node: &CstNode) {
        if let Some(name) = updated_identifier(node) {
            self.mark_assigned(name);
        }
    }

    fn process_enhanced_for(&mut self, node: &CstNode) {
        if !self.rule.validate_enhanced_for_loop_variable {
            return;
        }
        let is_final = node
            .children()
            .find(|child| child.kind() == "modifiers")
            .is_some_and(|modifiers| has_modifier(&modifiers, "final"));
        if is_final {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        if name_node.kind() != "identifier" {
            return;
        }
        let name = name_node.text();
        if name == "_" && !self.rule.validate_unnamed_variables {
            return;
        }
        // The loop header assigns the variable on every iteration; any
        // further assignment in the body disqualifies it.
        if let Some(scope) = self.scopes.last_mut() {
            scope.add_variable(name.to_string(), name_node.range(), true);
        }
    }

    /// Mark a name as assigned in the innermost scope that declares it.
    fn mark_assigned(&mut self, var_name: &str) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.variables.contains_key(var_name) {
                scope.mark_assigned(var_name);
                break;
            }
        }
    }

    /// Snapshot of `(assigned, already_assigned)` per variable in the
    /// current scope.
    fn assignment_snapshot(&self) -> HashMap<String, (bool, bool)> {
        self.scopes
            .last()
            .map(|scope| {
                scope
                    .variables
                    .iter()
                    .map(|(name, var)| (name.clone(), (var.assigned, var.already_assigned)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names assigned since the snapshot was taken.
    fn assigned_since(&self, before: &HashMap<String, (bool, bool)>) -> HashSet<String> {
        self.scopes
            .last()
            .map(|scope| {
                scope
                    .variables
                    .iter()
                    .filter(|(name, var)| {
                        var.assigned
                            && before
                                .get(name.as_str())
                                .is_some_and(|&(assigned, already)| !assigned && !already)
                    })
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Visit an if statement, merging assignments from both branches.
    ///
    /// A variable with no initializer that is assigned exactly once on each
    /// branch still has a single value per execution path and stays a final
    /// candidate.
    fn process_if_statement(&mut self, node: &CstNode) {
        if self.scopes.is_empty() {
            self.visit_children(node);
            return;
        }

        let before = self.assignment_snapshot();
        let unassigned_before: HashSet<String> = before
            .iter()
            .filter(|&(_, &(assigned, already_assigned))| !assigned && !already_assigned)
            .map(|(name, _)| name.clone())
            .collect();

        if let Some(condition) = node.child_by_field_name("condition") {
            self.visit(&condition);
        }

        let mut consequence_assignments = HashSet::new();
        if let Some(consequence) = node.child_by_field_name("consequence") {
            self.visit(&consequence);
            consequence_assignments = self.assigned_since(&before);
        }

        let alternative = node.child_by_field_name("alternative");
        let mut alternative_assignments = HashSet::new();
        if let Some(alternative) = &alternative {
            self.visit(alternative);
            alternative_assignments = self.assigned_since(&before);
        }

        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if alternative.is_some() {
            for var_name in &unassigned_before {
                if consequence_assignments.contains(var_name)
                    && alternative_assignments.contains(var_name)
                    && let Some(var) = scope.variables.get_mut(var_name)
                    && !var.has_initializer
                {
                    // The branches are exclusive, so the double mark from
                    // visiting both is really one assignment per path.
                    var.already_assigned = false;
                    var.assigned = true;
                }
            }
        }

        // A variable that already had a value and is reassigned on any
        // branch can no longer be final.
        for var_name in consequence_assignments.union(&alternative_assignments) {
            if !unassigned_before.contains(var_name)
                && let Some(var) = scope.variables.get_mut(var_name)
                && var.has_initializer
            {
                var.already_assigned = true;
            }
        }
    }

    /// Visit a switch, treating one assignment per branch as a single
    /// initialization for variables with no initializer.
    fn process_switch(&mut self, node: &CstNode) {
        if self.scopes.is_empty() {
            self.visit_children(node);
            return;
        }

        let candidates: HashSet<String> = self
            .scopes
            .last()
            .map(|scope| {
                scope
                    .variables
                    .iter()
                    .filter(|(_, var)| {
                        !var.has_initializer && !var.assigned && !var.already_assigned
                    })
                    .map(|(name, _)| name.clone())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(condition) = node.child_by_field_name("condition") {
            self.visit(&condition);
        }

        let Some(switch_body) = node.child_by_field_name("body") else {
            return;
        };

        let branches: Vec<CstNode> = switch_body
            .children()
            .filter(|child| {
                matches!(child.kind(), "switch_block_statement_group" | "switch_rule")
            })
            .collect();

        for branch in &branches {
            self.visit(branch);
        }

        let assigned_names: Vec<String> = self
            .scopes
            .last()
            .map(|scope| scope.variables.keys().cloned().collect())
            .unwrap_or_default();

        let mut assigned_in_switch: HashSet<String> = HashSet::new();
        for var_name in &assigned_names {
            if branches
                .iter()
                .any(|branch| contains_assignment_to(branch, var_name))
            {
                assigned_in_switch.insert(var_name.clone());
            }
        }

        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        for var_name in &assigned_in_switch {
            let Some(var) = scope.variables.get_mut(var_name) else {
                continue;
            };
            if candidates.contains(var_name) {
                var.already_assigned = false;
                var.assigned = true;
            } else if var.has_initializer {
                var.already_assigned = true;
            }
        }
    }
}

/// Whether the subtree contains an assignment or update of `var_name`.
fn contains_assignment_to(node: &CstNode, var_name: &str) -> bool {
    match node.kind() {
        "assignment_expression" => {
            if node
                .child_by_field_name("left")
                .is_some_and(|left| left.kind() == "identifier" && left.text() == var_name)
            {
                return true;
            }
        }
        "update_expression" => {
            if updated_identifier(node) == Some(var_name) {
                return true;
            }
        }
        _ => {}
    }

    node.children()
        .any(|child| contains_assignment_to(&child, var_name))
}

/// The identifier changed by `++`/`--` when the operand is a bare name.
fn updated_identifier<'a>(node: &CstNode<'a>) -> Option<&'a str> {
    node.children()
        .find(|child| child.kind() == "identifier")
        .map(|ident| ident.text())
}
