//! Comment-driven suppression support.
//!
//! Two checkstyle-compatible mechanisms are implemented:
//! - `// CHECKSTYLE:OFF:RuleName` / `// CHECKSTYLE:ON:RuleName` comments
//!   (line or block form, with configurable patterns)
//! - `@SuppressWarnings("checkstyle:RuleName")` annotations
//!
//! Both resolve to source ranges in which a named rule (or `*` for every
//! rule) is disabled.

use javalint_java_cst::CstNode;
use javalint_text_size::TextSize;
use regex::Regex;
use std::collections::HashMap;

/// A suppression region where a specific rule is disabled.
#[derive(Debug, Clone)]
pub struct SuppressionRegion {
    /// The rule name being suppressed (or "*" for all rules).
    pub rule: String,
    /// Start offset in the source.
    pub start: TextSize,
    /// End offset in the source (None means until end of file).
    pub end: Option<TextSize>,
}

impl SuppressionRegion {
    fn contains(&self, pos: TextSize) -> bool {
        pos >= self.start && self.end.is_none_or(|end| pos < end)
    }
}

/// Configuration for a plain text comment filter.
#[derive(Debug, Clone)]
pub struct PlainTextCommentFilterConfig {
    /// Regex pattern for "off" comments.
    pub off_pattern: Regex,
    /// Regex pattern for "on" comments.
    pub on_pattern: Regex,
    /// Capture group index for the rule name (1-indexed, 0 means no capture).
    pub check_format_group: usize,
}

impl PlainTextCommentFilterConfig {
    /// Create a new filter config from checkstyle properties.
    ///
    /// - `off_comment_format`: Regex for off comments, e.g., `CHECKSTYLE\:OFF\:(\w+)`
    /// - `on_comment_format`: Regex for on comments, e.g., `CHECKSTYLE\:ON\:(\w+)`
    /// - `check_format`: The format for matching rule names, e.g., `$1` for first capture group
    pub fn new(
        off_comment_format: &str,
        on_comment_format: &str,
        check_format: Option<&str>,
    ) -> Option<Self> {
        let off_pattern = Regex::new(off_comment_format).ok()?;
        let on_pattern = Regex::new(on_comment_format).ok()?;

        // "$1" selects the first capture group, "$2" the second, and so on.
        let check_format_group = check_format
            .and_then(|fmt| fmt.strip_prefix('$').and_then(|s| s.parse::<usize>().ok()))
            .unwrap_or(0);

        Some(Self {
            off_pattern,
            on_pattern,
            check_format_group,
        })
    }

    /// Create the default checkstyle suppression filter.
    pub fn checkstyle_default() -> Self {
        Self::new(r"CHECKSTYLE:OFF:(\w+)", r"CHECKSTYLE:ON:(\w+)", Some("$1"))
            .expect("Default patterns should be valid")
    }

    fn rule_of(&self, captures: &regex::Captures) -> String {
        if self.check_format_group > 0 {
            captures
                .get(self.check_format_group)
                .map_or_else(|| "*".to_string(), |m| m.as_str().to_string())
        } else {
            "*".to_string()
        }
    }
}

/// Collect every comment in the source with its start offset.
///
/// An unterminated block comment swallows the rest of the file and is
/// ignored, matching how checkstyle's plain-text filter treats it.
fn comments(source: &str) -> Vec<(TextSize, &str)> {
    let bytes = source.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos + 1 < bytes.len() {
        match (bytes[pos], bytes[pos + 1]) {
            (b'/', b'/') => {
                let end = source[pos..].find('\n').map_or(source.len(), |i| pos + i);
                found.push((TextSize::new(pos as u32), &source[pos..end]));
                pos = end + 1;
            }
            (b'/', b'*') => {
                let Some(close) = source[pos + 2..].find("*/") else {
                    break;
                };
                let end = pos + 2 + close + 2;
                found.push((TextSize::new(pos as u32), &source[pos..end]));
                pos = end;
            }
            _ => pos += 1,
        }
    }

    found
}

/// Manages suppressions for a source file.
#[derive(Debug, Default)]
pub struct SuppressionContext {
    /// Suppression regions indexed by rule name.
    /// Key "*" matches all rules.
    regions: HashMap<String, Vec<SuppressionRegion>>,
}

impl SuppressionContext {
    /// Create a new empty suppression context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse suppressions from source code using the given filter configs.
    pub fn from_source(source: &str, filters: &[PlainTextCommentFilterConfig]) -> Self {
        let mut ctx = Self::new();

        for filter in filters {
            ctx.parse_with_filter(source, filter);
        }

        ctx
    }

    /// Parse suppressions using a specific filter configuration.
    fn parse_with_filter(&mut self, source: &str, filter: &PlainTextCommentFilterConfig) {
        // Track open suppressions: rule -> start offset
        let mut open: HashMap<String, TextSize> = HashMap::new();

        for (pos, comment) in comments(source) {
            if let Some(captures) = filter.off_pattern.captures(comment) {
                open.insert(filter.rule_of(&captures), pos);
            }
            if let Some(captures) = filter.on_pattern.captures(comment) {
                let rule = filter.rule_of(&captures);
                if let Some(start) = open.remove(&rule) {
                    self.add_region(SuppressionRegion {
                        rule,
                        start,
                        end: Some(pos),
                    });
                }
            }
        }

        // Suppressions never turned back on run to end of file
        let end = TextSize::new(source.len() as u32);
        for (rule, start) in open {
            self.add_region(SuppressionRegion {
                rule,
                start,
                end: Some(end),
            });
        }
    }

    /// Add a suppression region.
    fn add_region(&mut self, region: SuppressionRegion) {
        self.regions
            .entry(region.rule.clone())
            .or_default()
            .push(region);
    }

    /// Check if a diagnostic at the given position for the given rule is suppressed.
    pub fn is_suppressed(&self, rule_name: &str, pos: TextSize) -> bool {
        [rule_name, "*"].iter().any(|key| {
            self.regions
                .get(*key)
                .is_some_and(|regions| regions.iter().any(|r| r.contains(pos)))
        })
    }

    /// Check if there are any suppressions.
    pub fn has_suppressions(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Parse `@SuppressWarnings` annotations from a CST tree.
    /// Looks for annotations like:
    /// - `@SuppressWarnings("checkstyle:RuleName")`
    /// - `@SuppressWarnings({"checkstyle:Rule1", "checkstyle:Rule2"})`
    pub fn parse_suppress_warnings(&mut self, source: &str, root: &CstNode) {
        self.visit_for_annotations(source, root);
    }

    /// Recursively visit nodes to find `@SuppressWarnings` annotations.
    fn visit_for_annotations(&mut self, source: &str, node: &CstNode) {
        if matches!(
            node.kind(),
            "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "method_declaration"
                | "constructor_declaration"
                | "field_declaration"
                | "annotation_type_declaration"
                | "record_declaration"
                | "local_variable_declaration"
        ) {
            // Annotations live inside a "modifiers" child in tree-sitter-java,
            // except on local variables where they precede the type directly.
            if let Some(modifiers) = node.children().find(|c| c.kind() == "modifiers") {
                for child in modifiers.children() {
                    if child.kind() == "annotation" || child.kind() == "marker_annotation" {
                        self.process_annotation(source, &child, node);
                    }
                }
            }
            for child in node.children() {
                if child.kind() == "annotation" || child.kind() == "marker_annotation" {
                    self.process_annotation(source, &child, node);
                }
            }
        }

        for child in node.named_children() {
            self.visit_for_annotations(source, &child);
        }
    }

    /// Process a single annotation to check if it's `@SuppressWarnings`.
    fn process_annotation(&mut self, source: &str, annotation: &CstNode, target: &CstNode) {
        let name = annotation
            .child_by_field_name("name")
            .or_else(|| annotation.children().find(|c| c.kind() == "identifier"))
            .map(|n| &source[n.range()])
            .unwrap_or("");

        if name != "SuppressWarnings" {
            return;
        }

        if let Some(args) = annotation.child_by_field_name("arguments") {
            let mut rules = Vec::new();
            extract_rules_recursive(source, &args, &mut rules);
            for rule in rules {
                self.add_region(SuppressionRegion {
                    rule,
                    start: target.range().start(),
                    end: Some(target.range().end()),
                });
            }
        }
    }
}

/// Recursively extract `checkstyle:`-prefixed string values from annotation
/// arguments, handling both single values and array initializers.
fn extract_rules_recursive(source: &str, node: &CstNode, rules: &mut Vec<String>) {
    match node.kind() {
        "string_literal" => {
            let content = source[node.range()].trim_matches('"');
            if let Some(rule) = content.strip_prefix("checkstyle:") {
                rules.push(rule.to_string());
            }
        }
        "element_value_pair" => {
            if let Some(value) = node.child_by_field_name("value") {
                extract_rules_recursive(source, &value, rules);
            }
        }
        _ => {
            for child in node.named_children() {
                extract_rules_recursive(source, &child, rules);
            }
        }
    }
}
