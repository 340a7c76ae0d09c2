//! MissingOverride rule implementation.
//!
//! Verifies that the java.lang.Override annotation is present when the
//! {@inheritDoc} Javadoc tag is.
//!
//! Checkstyle equivalent: MissingOverride

use std::sync::LazyLock;

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;
use regex::Regex;

use crate::{CheckContext, FromConfig, Properties, Rule};

static MATCH_INHERIT_DOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\s*@inheritDoc\s*\}").unwrap());

/// Violation: method documents {@inheritDoc} but lacks the annotation.
#[derive(Debug, Clone)]
pub struct MissingOverrideViolation;

impl Violation for MissingOverrideViolation {
    fn message(&self) -> String {
        "include @java.lang.Override annotation when {@inheritDoc} Javadoc tag exists".to_string()
    }
}

/// Violation: {@inheritDoc} used where nothing can be inherited.
#[derive(Debug, Clone)]
pub struct InheritDocNotValid;

impl Violation for InheritDocNotValid {
    fn message(&self) -> String {
        "{@inheritDoc} tag is not valid at this location.".to_string()
    }
}

/// Configuration for MissingOverride rule.
#[derive(Debug, Clone, Default)]
pub struct MissingOverride {
    /// Only check methods whose enclosing type names a supertype, matching
    /// what @Override could legally annotate before Java 6.
    java_five_compatibility: bool,
}

const RELEVANT_KINDS: &[&str] = &["method_declaration"];

impl FromConfig for MissingOverride {
    const MODULE_NAME: &'static str = "MissingOverride";

    fn from_config(properties: &Properties) -> Self {
        Self {
            java_five_compatibility: properties
                .get("javaFiveCompatibility")
                .is_some_and(|v| *v == "true"),
        }
    }
}

impl Rule for MissingOverride {
    fn name(&self) -> &'static str {
        "MissingOverride"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        if node.kind() != "method_declaration" {
            return vec![];
        }
        let Some(javadoc) = javadoc_before(node) else {
            return vec![];
        };
        if !MATCH_INHERIT_DOC.is_match(javadoc) {
            return vec![];
        }

        if !inherit_doc_valid_on(node) {
            return vec![Diagnostic::new(InheritDocNotValid, node.range())];
        }

        if self.java_five_compatibility && !names_supertype(node) {
            return vec![];
        }

        if has_override_annotation(node) {
            return vec![];
        }

        vec![Diagnostic::new(MissingOverrideViolation, node.range())]
    }
}

/// Text of the Javadoc block immediately preceding a method, if any.
fn javadoc_before<'a>(node: &CstNode<'a>) -> Option<&'a str> {
    let prev = node.prev_sibling()?;
    if prev.kind() == "block_comment" && prev.text().starts_with("/**") {
        Some(prev.text())
    } else {
        None
    }
}

/// {@inheritDoc} only means something on instance methods that can override.
fn inherit_doc_valid_on(node: &CstNode) -> bool {
    let Some(modifiers) = node.children().find(|c| c.kind() == "modifiers") else {
        return true;
    };
    !modifiers
        .children()
        .any(|child| matches!(child.kind(), "private" | "static"))
}

fn has_override_annotation(node: &CstNode) -> bool {
    let Some(modifiers) = node.children().find(|c| c.kind() == "modifiers") else {
        return false;
    };
    modifiers
        .children()
        .filter(|child| matches!(child.kind(), "marker_annotation" | "annotation"))
        .any(|annotation| {
            annotation
                .child_by_field_name("name")
                .is_some_and(|name| matches!(name.text(), "Override" | "java.lang.Override"))
        })
}

/// Whether the enclosing type declaration names a supertype, or is an
/// anonymous class body.
fn names_supertype(node: &CstNode) -> bool {
    let Some(def) = node.parent().and_then(|body| body.parent()) else {
        return false;
    };
    if def.kind() == "object_creation_expression" {
        return true;
    }
    def.children().any(|child| {
        matches!(
            child.kind(),
            "superclass" | "super_interfaces" | "extends_interfaces"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalint_java_cst::TreeWalker;
    use javalint_java_parser::JavaParser;

    fn check_source_with(rule: &MissingOverride, source: &str) -> Vec<Diagnostic> {
        let mut parser = JavaParser::new();
        let result = parser.parse(source).unwrap();
        let ctx = CheckContext::new(source);

        let mut diagnostics = vec![];
        for node in TreeWalker::new(result.tree.root_node(), source) {
            diagnostics.extend(rule.check(&ctx, &node));
        }
        diagnostics
    }

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_source_with(&MissingOverride::default(), source)
    }

    #[test]
    fn test_inherit_doc_without_override() {
        let source = r#"
class Test extends Base {
    /**
     * {@inheritDoc}
     */
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind.body,
            "include @java.lang.Override annotation when {@inheritDoc} Javadoc tag exists"
        );
    }

    #[test]
    fn test_with_override_ok() {
        let source = r#"
class Test extends Base {
    /**
     * {@inheritDoc}
     */
    @Override
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_with_qualified_override_ok() {
        let source = r#"
class Test extends Base {
    /**
     * {@inheritDoc}
     */
    @java.lang.Override
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_no_javadoc_ok() {
        let source = r#"
class Test extends Base {
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_javadoc_without_inherit_doc_ok() {
        let source = r#"
class Test extends Base {
    /**
     * Does things.
     */
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_inherit_doc_with_spaces_matched() {
        let source = r#"
class Test extends Base {
    /**
     * { @inheritDoc }
     */
    public void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_private_method_invalid_tag() {
        let source = r#"
class Test {
    /**
     * {@inheritDoc}
     */
    private void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind.body,
            "{@inheritDoc} tag is not valid at this location."
        );
    }

    #[test]
    fn test_static_method_invalid_tag() {
        let source = r#"
class Test {
    /**
     * {@inheritDoc}
     */
    public static void method() {
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind.body,
            "{@inheritDoc} tag is not valid at this location."
        );
    }

    #[test]
    fn test_anonymous_class_method() {
        let source = r#"
class Test {
    void outer() {
        Runnable r = new Runnable() {
            /**
             * {@inheritDoc}
             */
            public void run() {
            }
        };
    }
}
"#;
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_java_five_compatibility_skips_plain_class() {
        let source = r#"
class Test {
    /**
     * {@inheritDoc}
     */
    public void method() {
    }
}
"#;
        let rule = MissingOverride {
            java_five_compatibility: true,
        };
        let diagnostics = check_source_with(&rule, source);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_java_five_compatibility_checks_subclass() {
        let source = r#"
class Test extends Base {
    /**
     * {@inheritDoc}
     */
    public void method() {
    }
}
"#;
        let rule = MissingOverride {
            java_five_compatibility: true,
        };
        let diagnostics = check_source_with(&rule, source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let mut props = Properties::new();
        props.insert("javaFiveCompatibility", "true");
        let rule = MissingOverride::from_config(&props);
        assert!(rule.java_five_compatibility);

        let rule = MissingOverride::from_config(&Properties::new());
        assert!(!rule.java_five_compatibility);
    }
}
