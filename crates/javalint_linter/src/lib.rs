//! Java lint rules over tree-sitter syntax trees, with comment-based and
//! XPath-based violation suppression.

pub mod registry;
pub mod rules;
pub mod suppression;

pub use registry::{FromConfig, Properties, RuleRegistry};
pub use suppression::{PlainTextCommentFilterConfig, SuppressionContext};

use javalint_diagnostics::Diagnostic;
use javalint_java_cst::{CstNode, TreeWalker};
use javalint_source_file::{LineIndex, SourceCode};
use javalint_text_size::TextRange;
use javalint_xpath::{SuppressionXpathFilter, ViolationEvent};

/// Context provided to rules during checking.
pub struct CheckContext<'a> {
    source: &'a str,
    line_index: LineIndex,
}

impl<'a> CheckContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            line_index: LineIndex::from_source_text(source),
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the cached line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Get the source code helper for line/column info.
    pub fn source_code(&self) -> SourceCode<'a, '_> {
        SourceCode::new(self.source, &self.line_index)
    }

    /// Get text at a given range.
    pub fn text_at(&self, range: TextRange) -> &'a str {
        &self.source[range]
    }
}

/// Trait for lint rules.
pub trait Rule: Send + Sync {
    /// The rule's name (matching the checkstyle module name).
    fn name(&self) -> &'static str;

    /// Node kinds this rule cares about. Empty means run on all nodes.
    fn relevant_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Configuration problems the rule swallowed at construction time, for
    /// reporting. A rule with warnings still runs (possibly matching
    /// nothing).
    fn config_warnings(&self) -> Vec<String> {
        vec![]
    }

    /// Check a CST node for violations.
    fn check(&self, ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic>;
}

/// Result of linting a file.
#[derive(Debug, Default)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Run rules over every node of a parsed file.
///
/// Violations landing inside an active comment suppression, or matched by
/// the XPath suppression filter, are dropped.
pub fn run_rules(
    rules: &[Box<dyn Rule>],
    ctx: &CheckContext<'_>,
    root: CstNode<'_>,
    suppressions: &SuppressionContext,
    xpath_filter: Option<&SuppressionXpathFilter>,
    file_name: &str,
) -> LintResult {
    let mut result = LintResult::new();

    for node in TreeWalker::new(root.inner(), ctx.source()) {
        for rule in rules {
            let kinds = rule.relevant_kinds();
            if !kinds.is_empty() && !kinds.contains(&node.kind()) {
                continue;
            }
            for diagnostic in rule.check(ctx, &node) {
                if suppressions.is_suppressed(rule.name(), diagnostic.range.start()) {
                    continue;
                }
                if let Some(filter) = xpath_filter {
                    let event = ViolationEvent {
                        file_name,
                        check_name: rule.name(),
                        module_id: None,
                        message: &diagnostic.kind.body,
                        root,
                        position: diagnostic.range.start(),
                    };
                    if filter.is_suppressed(&event) {
                        continue;
                    }
                }
                result.diagnostics.push(diagnostic);
            }
        }
    }

    result
}
