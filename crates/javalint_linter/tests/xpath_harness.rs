//! Shared driver for the xpath suppression regression suite.
//!
//! Each regression test configures exactly one rule and points it at a
//! fixture that produces exactly one violation. The driver then verifies
//! the full suppression round trip in three passes:
//!
//! 1. run the rule and compare the reported violation against the expected
//!    `line:column: message` string,
//! 2. generate the xpath queries for the violation position and compare
//!    them against the expected ones,
//! 3. write the generated queries to a suppressions file, load it back as
//!    a filter, re-run the rule under that filter and assert silence.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use javalint_checkstyle::{SuppressionEntry, Suppressions, render_xpath_suppressions};
use javalint_java_cst::CstNode;
use javalint_java_parser::JavaParser;
use javalint_linter::{CheckContext, Rule, RuleRegistry, SuppressionContext, run_rules};
use javalint_source_file::LineIndex;
use javalint_xpath::{
    DEFAULT_TAB_WIDTH, SuppressionXpathFilter, XpathFilterElement, XpathQueryGenerator,
};
use regex::Regex;

static LINE_COLUMN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d+):").unwrap());

/// A rule module under test with its configured properties.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    name: String,
    properties: Vec<(String, String)>,
}

#[allow(dead_code)]
pub fn module_config(name: &str) -> ModuleConfig {
    ModuleConfig {
        name: name.to_string(),
        properties: vec![],
    }
}

impl ModuleConfig {
    #[allow(dead_code)]
    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.properties.push((name.to_string(), value.to_string()));
        self
    }
}

/// Run the three verification passes for one fixture.
///
/// `expected_violations` must hold exactly one entry, formatted
/// `line:column: message`; the suite is built around single-violation
/// fixtures and anything else is a broken test.
#[allow(dead_code)]
pub fn run_verifications(
    config: &ModuleConfig,
    file_name: &str,
    expected_violations: &[&str],
    expected_queries: &[&str],
) {
    assert!(
        expected_violations.len() == 1,
        "fixtures must produce exactly one violation, test declares {}",
        expected_violations.len()
    );

    let path = fixture_path(&config.name, file_name);
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut parser = JavaParser::new();
    let parsed = parser.parse(&source).expect("fixture should parse");
    let root = CstNode::new(parsed.tree.root_node(), &source);

    let rules = vec![build_rule(config)];
    let ctx = CheckContext::new(&source);

    let actual = collect_violations(&rules, &ctx, root, None, file_name);
    assert_eq!(actual, expected_violations, "violations for {file_name}");

    let (line, column) = parse_position(expected_violations[0]);
    let line_index = LineIndex::from_source_text(&source);
    let generator =
        XpathQueryGenerator::new(root, line, column, &source, &line_index, DEFAULT_TAB_WIDTH);
    let queries = generator.generate();
    assert_eq!(queries, expected_queries, "queries for {file_name}");

    let filter = write_and_load_filter(&config.name, queries);
    let remaining = collect_violations(&rules, &ctx, root, Some(&filter), file_name);
    assert!(
        remaining.is_empty(),
        "violations survived their own suppression: {remaining:?}"
    );
}

fn fixture_path(module: &str, file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/xpath")
        .join(module.to_lowercase())
        .join(file_name)
}

fn build_rule(config: &ModuleConfig) -> Box<dyn Rule> {
    let properties: HashMap<&str, &str> = config
        .properties
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    RuleRegistry::builtin()
        .create_rule(&config.name, &properties)
        .unwrap_or_else(|| panic!("unknown module {}", config.name))
}

fn collect_violations(
    rules: &[Box<dyn Rule>],
    ctx: &CheckContext<'_>,
    root: CstNode<'_>,
    filter: Option<&SuppressionXpathFilter>,
    file_name: &str,
) -> Vec<String> {
    let result = run_rules(
        rules,
        ctx,
        root,
        &SuppressionContext::new(),
        filter,
        file_name,
    );
    let source_code = ctx.source_code();
    result
        .diagnostics
        .iter()
        .map(|diagnostic| {
            let position = source_code.line_column(diagnostic.range.start());
            format!("{position}: {}", diagnostic.kind.body)
        })
        .collect()
}

fn parse_position(violation: &str) -> (usize, usize) {
    let captures = LINE_COLUMN_NUMBER
        .captures(violation)
        .unwrap_or_else(|| panic!("violation must start with line:column, got {violation:?}"));
    (captures[1].parse().unwrap(), captures[2].parse().unwrap())
}

/// Render the generated queries as a suppressions file in a temp dir, read
/// it back, and build the filter from the parsed elements.
fn write_and_load_filter(checks: &str, queries: Vec<String>) -> SuppressionXpathFilter {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("suppressions_xpath_config.xml");
    let content = render_xpath_suppressions(&[SuppressionEntry {
        files: None,
        checks: checks.to_string(),
        queries,
    }]);
    std::fs::write(&path, content).expect("write suppressions file");

    let suppressions = Suppressions::from_file(&path).expect("parse suppressions file");
    let elements = suppressions
        .elements
        .iter()
        .map(|element| {
            XpathFilterElement::new(
                element.files.as_deref(),
                element.checks.as_deref(),
                element.message.as_deref(),
                element.id.as_deref(),
                element.query.as_deref(),
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .expect("build filter elements");
    SuppressionXpathFilter::new(elements)
}
