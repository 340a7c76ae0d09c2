//! ArrayTypeStyle rule implementation.
//!
//! Checks the style of array type definitions. Java style (`int[] nums`) is preferred
//! over C style (`int nums[]`). Method return types must always use Java style.
//!
//! Checkstyle equivalent: ArrayTypeStyle
//!
//! ## Examples
//!
//! ```java
//! // Java style (default, preferred)
//! int[] nums;
//! String[] args;
//!
//! // C style (violation by default)
//! int nums[];
//! String args[];
//!
//! // Method return type (always violation if C style)
//! byte getData()[] { ... }  // violation
//! byte[] getData() { ... }  // ok
//! ```

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Violation: array brackets at illegal position.
#[derive(Debug, Clone)]
pub struct ArrayTypeStyleViolation;

impl Violation for ArrayTypeStyleViolation {
    fn message(&self) -> String {
        "Array brackets at illegal position.".to_string()
    }
}

/// Configuration for ArrayTypeStyle rule.
#[derive(Debug, Clone)]
pub struct ArrayTypeStyle {
    /// If true (default), enforce Java style (int[] nums).
    /// If false, enforce C style (int nums[]).
    pub java_style: bool,
}

const RELEVANT_KINDS: &[&str] = &[
    "method_declaration",
    "variable_declarator",
    "formal_parameter",
];

impl Default for ArrayTypeStyle {
    fn default() -> Self {
        Self { java_style: true }
    }
}

impl FromConfig for ArrayTypeStyle {
    const MODULE_NAME: &'static str = "ArrayTypeStyle";

    fn from_config(properties: &Properties) -> Self {
        let java_style = properties
            .get("javaStyle")
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);

        Self { java_style }
    }
}

impl Rule for ArrayTypeStyle {
    fn name(&self) -> &'static str {
        "ArrayTypeStyle"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        match node.kind() {
            // Brackets after the parameter list are always a violation
            "method_declaration" => Self::check_method_return_type(node),
            "variable_declarator" => self.check_variable_declarator(node),
            "formal_parameter" => self.check_formal_parameter(node),
            _ => vec![],
        }
    }
}

impl ArrayTypeStyle {
    /// Check method return type. A dimensions node after the formal
    /// parameters means `byte getData()[]`, which is never allowed.
    fn check_method_return_type(node: &CstNode) -> Vec<Diagnostic> {
        let mut found_params = false;
        let mut diagnostics = vec![];

        for child in node.children() {
            if child.kind() == "formal_parameters" {
                found_params = true;
                continue;
            }

            if found_params && child.kind() == "dimensions" {
                diagnostics.push(Diagnostic::new(ArrayTypeStyleViolation, child.range()));
            }
        }

        diagnostics
    }

    /// Check variable declarators for the wrong array declaration style.
    ///
    /// C style puts the dimensions inside the variable_declarator after the
    /// name, Java style puts them in an array_type in the parent declaration.
    fn check_variable_declarator(&self, node: &CstNode) -> Vec<Diagnostic> {
        if let Some(dimensions) = node.children().find(|c| c.kind() == "dimensions") {
            if self.java_style {
                return vec![Diagnostic::new(ArrayTypeStyleViolation, dimensions.range())];
            }
            return vec![];
        }

        if !self.java_style
            && let Some(parent) = node.parent()
            && (parent.kind() == "local_variable_declaration"
                || parent.kind() == "field_declaration")
            && let Some(array_type) = parent.children().find(|c| c.kind() == "array_type")
            && let Some(dimensions) = array_type.children().find(|c| c.kind() == "dimensions")
        {
            return vec![Diagnostic::new(ArrayTypeStyleViolation, dimensions.range())];
        }

        vec![]
    }

    /// Check formal parameters for the wrong array declaration style.
    fn check_formal_parameter(&self, node: &CstNode) -> Vec<Diagnostic> {
        if let Some(dimensions) = node.children().find(|c| c.kind() == "dimensions") {
            if self.java_style {
                return vec![Diagnostic::new(ArrayTypeStyleViolation, dimensions.range())];
            }
            return vec![];
        }

        if !self.java_style
            && let Some(array_type) = node.children().find(|c| c.kind() == "array_type")
            && let Some(dimensions) = array_type.children().find(|c| c.kind() == "dimensions")
        {
            return vec![Diagnostic::new(ArrayTypeStyleViolation, dimensions.range())];
        }

        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalint_java_cst::TreeWalker;
    use javalint_java_parser::JavaParser;

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_source_with_config(source, ArrayTypeStyle::default())
    }

    fn check_source_with_config(source: &str, rule: ArrayTypeStyle) -> Vec<Diagnostic> {
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
    fn test_c_style_local_variable_violation() {
        let source = r#"
class Test {
    void foo() {
        int nums[];
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind.body, "Array brackets at illegal position.");
    }

    #[test]
    fn test_java_style_local_variable_ok() {
        let source = r#"
class Test {
    void foo() {
        int[] nums;
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_c_style_field_violation() {
        let source = r#"
class Test {
    String strings[];
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_java_style_field_ok() {
        let source = r#"
class Test {
    String[] strings;
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_c_style_parameter_violation() {
        let source = r#"
class Test {
    void foo(String args[]) {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_method_return_type_c_style_violation() {
        let source = r#"
class Test {
    byte getData()[] {
        return null;
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_method_return_type_java_style_ok() {
        let source = r#"
class Test {
    byte[] getData() {
        return null;
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_c_style_mode_flags_java_style() {
        let source = r#"
class Test {
    int[] nums;
}
"#;
        let rule = ArrayTypeStyle { java_style: false };
        let diagnostics = check_source_with_config(source, rule);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_c_style_mode_allows_c_style() {
        let source = r#"
class Test {
    void foo() {
        int nums[];
    }
}
"#;
        let rule = ArrayTypeStyle { java_style: false };
        let diagnostics = check_source_with_config(source, rule);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_multi_dimensional_array() {
        let source = r#"
class Test {
    int nums[][];
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }
}
