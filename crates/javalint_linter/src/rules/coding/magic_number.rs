//! MagicNumber rule implementation.
//!
//! Checks that there are no "magic numbers": numeric literals that are not
//! defined as constants. By default -1, 0, 1 and 2 are not considered magic.
//!
//! A constant definition is any variable or field with a final modifier.
//! Interface and annotation fields are implicitly final. One constant may
//! define multiple literals within one expression:
//!
//! ```java
//! static final int SECONDS_PER_DAY = 24 * 60 * 60;  // ok
//! int secondsPerDay = 24 * 60 * 60;                 // 3 violations
//! ```
//!
//! Checkstyle equivalent: MagicNumber

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Violation: numeric literal not defined as a constant.
#[derive(Debug, Clone)]
pub struct MagicNumberViolation {
    pub literal: String,
}

impl Violation for MagicNumberViolation {
    fn message(&self) -> String {
        format!("'{}' is a magic number.", self.literal)
    }
}

/// Configuration for MagicNumber rule.
#[derive(Debug, Clone)]
pub struct MagicNumber {
    pub ignore_numbers: Vec<f64>,
    pub ignore_hash_code_method: bool,
    pub ignore_annotation: bool,
    pub ignore_field_declaration: bool,
    pub ignore_annotation_element_defaults: bool,
}

const RELEVANT_KINDS: &[&str] = &[
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
];

/// Node kinds allowed on the path from a literal up to its enclosing
/// constant definition. Anything else on the path makes the literal magic.
const CONSTANT_WAIVER_KINDS: &[&str] = &[
    "argument_list",
    "array_creation_expression",
    "array_initializer",
    "assignment_expression",
    "binary_expression",
    "cast_expression",
    "method_invocation",
    "object_creation_expression",
    "parenthesized_expression",
    "ternary_expression",
    "unary_expression",
];

impl Default for MagicNumber {
    fn default() -> Self {
        Self {
            ignore_numbers: vec![-1.0, 0.0, 1.0, 2.0],
            ignore_hash_code_method: false,
            ignore_annotation: false,
            ignore_field_declaration: false,
            ignore_annotation_element_defaults: true,
        }
    }
}

impl FromConfig for MagicNumber {
    const MODULE_NAME: &'static str = "MagicNumber";

    fn from_config(properties: &Properties) -> Self {
        let defaults = Self::default();

        let ignore_numbers = properties
            .get("ignoreNumbers")
            .map(|v| {
                v.split(',')
                    .filter_map(|n| n.trim().parse::<f64>().ok())
                    .collect()
            })
            .unwrap_or(defaults.ignore_numbers);

        let parse_flag = |name: &str, default: bool| {
            properties
                .get(name)
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(default)
        };

        Self {
            ignore_numbers,
            ignore_hash_code_method: parse_flag("ignoreHashCodeMethod", false),
            ignore_annotation: parse_flag("ignoreAnnotation", false),
            ignore_field_declaration: parse_flag("ignoreFieldDeclaration", false),
            ignore_annotation_element_defaults: parse_flag(
                "ignoreAnnotationElementDefaults",
                true,
            ),
        }
    }
}

impl Rule for MagicNumber {
    fn name(&self) -> &'static str {
        "MagicNumber"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        if !RELEVANT_KINDS.contains(&node.kind()) {
            return vec![];
        }

        if self.ignore_annotation && has_ancestor(node, &["annotation", "marker_annotation"]) {
            return vec![];
        }

        if self.ignore_annotation_element_defaults
            && has_ancestor(node, &["annotation_type_element_declaration"])
        {
            return vec![];
        }

        if self.is_in_ignore_list(node) {
            return vec![];
        }

        if self.ignore_hash_code_method && is_in_hash_code_method(node) {
            return vec![];
        }

        if self.ignore_field_declaration && is_field_declaration(node) {
            return vec![];
        }

        let constant_def = find_containing_constant_def(node);
        if is_magic_number(node, constant_def.as_ref()) {
            return vec![Self::create_diagnostic(node)];
        }

        vec![]
    }
}

impl MagicNumber {
    /// Check if the literal's value is in the configured ignore list.
    /// A directly negated literal is compared with its sign applied.
    fn is_in_ignore_list(&self, node: &CstNode) -> bool {
        let Some(mut value) = literal_value(node) else {
            return false;
        };

        if unary_operator(node) == Some("-") {
            value = -value;
        }

        self.ignore_numbers.contains(&value)
    }

    /// Report the literal, folding a direct unary sign into the message.
    fn create_diagnostic(node: &CstNode) -> Diagnostic {
        if let (Some(parent), Some(op)) = (node.parent(), unary_operator(node))
            && matches!(op, "-" | "+")
        {
            return Diagnostic::new(
                MagicNumberViolation {
                    literal: format!("{op}{}", node.text()),
                },
                parent.range(),
            );
        }

        Diagnostic::new(
            MagicNumberViolation {
                literal: node.text().to_string(),
            },
            node.range(),
        )
    }
}

/// The unary operator directly applied to this node, if any.
fn unary_operator<'a>(node: &CstNode<'a>) -> Option<&'a str> {
    let parent = node.parent()?;
    if parent.kind() != "unary_expression" {
        return None;
    }
    parent
        .child_by_field_name("operator")
        .map(|operator| operator.text())
}

/// Parse the numeric value of an integer or floating point literal.
/// Returns None for hex floats, which are never in the ignore list.
fn literal_value(node: &CstNode) -> Option<f64> {
    let text = node.text().replace('_', "");
    match node.kind() {
        "decimal_integer_literal" => text.trim_end_matches(['l', 'L']).parse::<f64>().ok(),
        "hex_integer_literal" => {
            let digits = text.trim_end_matches(['l', 'L']);
            i128::from_str_radix(digits.get(2..)?, 16).ok().map(|v| v as f64)
        }
        "octal_integer_literal" => {
            let digits = text.trim_end_matches(['l', 'L']);
            i128::from_str_radix(digits.get(1..)?, 8).ok().map(|v| v as f64)
        }
        "binary_integer_literal" => {
            let digits = text.trim_end_matches(['l', 'L']);
            i128::from_str_radix(digits.get(2..)?, 2).ok().map(|v| v as f64)
        }
        "decimal_floating_point_literal" => {
            text.trim_end_matches(['f', 'F', 'd', 'D']).parse::<f64>().ok()
        }
        _ => None,
    }
}

fn has_ancestor(node: &CstNode, kinds: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if kinds.contains(&ancestor.kind()) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

/// Check if the literal is inside a `public int hashCode()` method.
fn is_in_hash_code_method(node: &CstNode) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "method_declaration" {
            let is_hash_code = ancestor
                .child_by_field_name("name")
                .is_some_and(|name| name.text() == "hashCode");
            let has_no_params = ancestor
                .child_by_field_name("parameters")
                .is_none_or(|params| params.named_children().count() == 0);
            return is_hash_code && has_no_params;
        }
        current = ancestor.parent();
    }
    false
}

/// Check if the literal is part of a field initializer.
fn is_field_declaration(node: &CstNode) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "variable_declarator" => {
                return ancestor.parent().is_some_and(|declaration| {
                    matches!(
                        declaration.kind(),
                        "field_declaration" | "constant_declaration"
                    )
                });
            }
            "class_body" | "interface_body" | "enum_body" | "annotation_type_body" => {
                return false;
            }
            _ => {}
        }
        current = ancestor.parent();
    }
    false
}

/// Find the enclosing constant definition of a literal, if any.
///
/// Enum constants and interface/annotation fields are implicitly final,
/// other declarations count only with an explicit final modifier.
fn find_containing_constant_def<'a>(node: &CstNode<'a>) -> Option<CstNode<'a>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "enum_constant" => return Some(ancestor),
            "variable_declarator" => {
                let declaration = ancestor.parent()?;
                return match declaration.kind() {
                    "constant_declaration" => Some(ancestor),
                    "field_declaration" | "local_variable_declaration" => declaration
                        .children()
                        .find(|c| c.kind() == "modifiers")
                        .filter(|modifiers| modifiers.children().any(|c| c.kind() == "final"))
                        .map(|_| ancestor),
                    _ => None,
                };
            }
            _ => {}
        }
        current = ancestor.parent();
    }
    None
}

/// Walk the path from the literal up to its constant definition. Any node
/// outside the waiver set on the way makes the literal magic. Without a
/// constant definition the walk reaches the root and the literal is magic.
fn is_magic_number(node: &CstNode, constant_def: Option<&CstNode>) -> bool {
    let stop = constant_def.map(|def| def.id());
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if stop == Some(ancestor.id()) {
            return false;
        }
        if !CONSTANT_WAIVER_KINDS.contains(&ancestor.kind()) {
            return true;
        }
        current = ancestor.parent();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalint_java_cst::TreeWalker;
    use javalint_java_parser::JavaParser;

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_source_with_config(source, &MagicNumber::default())
    }

    fn check_source_with_config(source: &str, rule: &MagicNumber) -> Vec<Diagnostic> {
        let mut parser = JavaParser::new();
        let result = parser.parse(source).unwrap();
        let ctx = CheckContext::new(source);

        let mut diagnostics = vec![];
        for node in TreeWalker::new(result.tree.root_node(), source) {
            diagnostics.extend(rule.check(&ctx, &node));
        }
        diagnostics
    }

    #[test]
    fn test_magic_number_in_local_variable() {
        let source = r#"
class Test {
    void method() {
        int x = 42;
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind.body, "'42' is a magic number.");
    }

    #[test]
    fn test_final_local_variable_ok() {
        let source = r#"
class Test {
    void method() {
        final int x = 42;
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_constant_expression_ok() {
        let source = r#"
class Test {
    static final int SECONDS_PER_DAY = 24 * 60 * 60;
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_constant_method_call_ok() {
        let source = r#"
class Test {
    static final Border BORDER = BorderFactory.createEmptyBorder(3, 3, 3, 3);
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_default_ignore_numbers() {
        let source = r#"
class Test {
    void method() {
        int a = 0;
        int b = 1;
        int c = 2;
        int d = -1;
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_negative_magic_number() {
        let source = r#"
class Test {
    void method() {
        int x = -42;
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind.body, "'-42' is a magic number.");
    }

    #[test]
    fn test_interface_field_implicitly_final() {
        let source = r#"
interface Test {
    int LIMIT = 42;
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_enum_constant_arguments_ok() {
        let source = r#"
enum Planet {
    EARTH(5972);

    Planet(int mass) {
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_final_field_flagged() {
        let source = r#"
class Test {
    int limit = 42;
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_ignore_field_declaration() {
        let source = r#"
class Test {
    int limit = 42;
}
"#;
        let rule = MagicNumber {
            ignore_field_declaration: true,
            ..Default::default()
        };
        let diagnostics = check_source_with_config(source, &rule);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ignore_hash_code_method() {
        let source = r#"
class Test {
    public int hashCode() {
        return 31;
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);

        let rule = MagicNumber {
            ignore_hash_code_method: true,
            ..Default::default()
        };
        let diagnostics = check_source_with_config(source, &rule);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_ignore_annotation() {
        let source = r#"
class Test {
    @Timeout(300)
    void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);

        let rule = MagicNumber {
            ignore_annotation: true,
            ..Default::default()
        };
        let diagnostics = check_source_with_config(source, &rule);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_annotation_element_default_ignored() {
        let source = r#"
@interface Limits {
    int max() default 300;
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_custom_ignore_numbers() {
        let source = r#"
class Test {
    void method() {
        int x = 42;
        int y = 1;
    }
}
"#;
        let rule = MagicNumber {
            ignore_numbers: vec![42.0],
            ..Default::default()
        };
        let diagnostics = check_source_with_config(source, &rule);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind.body, "'1' is a magic number.");
    }

    #[test]
    fn test_hex_and_float_literals() {
        let source = r#"
class Test {
    void method() {
        long mask = 0xFF;
        double ratio = 1.5;
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].kind.body, "'0xFF' is a magic number.");
        assert_eq!(diagnostics[1].kind.body, "'1.5' is a magic number.");
    }

    #[test]
    fn test_from_config() {
        let mut properties = Properties::new();
        properties.insert("ignoreNumbers", "-1, 0, 100");
        properties.insert("ignoreHashCodeMethod", "true");
        let rule = MagicNumber::from_config(&properties);
        assert_eq!(rule.ignore_numbers, vec![-1.0, 0.0, 100.0]);
        assert!(rule.ignore_hash_code_method);
        assert!(!rule.ignore_annotation);
    }
}
