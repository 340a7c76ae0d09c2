//! Suppression filtering: a violation is dropped when a filter element's
//! selectors all match it and its query selects a node at the violation's
//! position.

use javalint_java_cst::CstNode;
use javalint_text_size::TextSize;
use regex::Regex;

use crate::XpathError;
use crate::evaluator::evaluate;
use crate::parser::{XpathQuery, parse_query};

/// A reported violation together with the tree it was reported against.
#[derive(Debug, Clone, Copy)]
pub struct ViolationEvent<'a> {
    pub file_name: &'a str,
    pub check_name: &'a str,
    pub module_id: Option<&'a str>,
    pub message: &'a str,
    pub root: CstNode<'a>,
    pub position: TextSize,
}

/// One `suppress-xpath` entry. Absent selectors match everything; an absent
/// query suppresses every violation the selectors match.
#[derive(Debug)]
pub struct XpathFilterElement {
    files: Option<Regex>,
    checks: Option<Regex>,
    message: Option<Regex>,
    id: Option<String>,
    query: Option<XpathQuery>,
}

impl XpathFilterElement {
    pub fn new(
        files: Option<&str>,
        checks: Option<&str>,
        message: Option<&str>,
        id: Option<&str>,
        query: Option<&str>,
    ) -> Result<Self, XpathError> {
        Ok(Self {
            files: files.map(Regex::new).transpose()?,
            checks: checks.map(Regex::new).transpose()?,
            message: message.map(Regex::new).transpose()?,
            id: id.map(str::to_string),
            query: query.map(parse_query).transpose()?,
        })
    }

    /// True when every present selector matches the event. The regexes are
    /// unanchored, so a plain check name matches itself.
    pub fn is_matching(&self, event: &ViolationEvent<'_>) -> bool {
        self.selectors_match(event) && self.query_matches(event)
    }

    fn selectors_match(&self, event: &ViolationEvent<'_>) -> bool {
        self.files
            .as_ref()
            .is_none_or(|files| files.is_match(event.file_name))
            && self
                .id
                .as_ref()
                .is_none_or(|id| event.module_id == Some(id.as_str()))
            && self
                .checks
                .as_ref()
                .is_none_or(|checks| checks.is_match(event.check_name))
            && self
                .message
                .as_ref()
                .is_none_or(|message| message.is_match(event.message))
    }

    fn query_matches(&self, event: &ViolationEvent<'_>) -> bool {
        match &self.query {
            None => true,
            Some(query) => evaluate(query, event.root)
                .iter()
                .any(|node| node.range().start() == event.position),
        }
    }
}

/// Applies every loaded `suppress-xpath` element to a violation.
#[derive(Debug, Default)]
pub struct SuppressionXpathFilter {
    elements: Vec<XpathFilterElement>,
}

impl SuppressionXpathFilter {
    pub fn new(elements: Vec<XpathFilterElement>) -> Self {
        Self { elements }
    }

    pub fn is_suppressed(&self, event: &ViolationEvent<'_>) -> bool {
        self.elements
            .iter()
            .any(|element| element.is_matching(event))
    }
}

#[cfg(test)]
mod tests {
    use javalint_java_parser::JavaParser;

    use super::*;

    const SOURCE: &str = "\
class Simple {
    void countTokens() {
        int pi = 3;
    }
    void other() {
        int pi = 3;
    }
}
";

    fn parse(source: &str) -> javalint_java_parser::ParseResult {
        JavaParser::new().parse(source).unwrap()
    }

    fn event_at<'a>(root: CstNode<'a>, offset: u32, check_name: &'a str) -> ViolationEvent<'a> {
        ViolationEvent {
            file_name: "Simple.java",
            check_name,
            module_id: None,
            message: "violation",
            root,
            position: TextSize::new(offset),
        }
    }

    #[test]
    fn query_at_violation_position_suppresses() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        // `pi` of countTokens starts at offset 52
        let element = XpathFilterElement::new(
            None,
            Some("FinalLocalVariable"),
            None,
            None,
            Some("//variable_declarator/identifier[@text='pi']"),
        )
        .unwrap();

        assert!(element.is_matching(&event_at(root, 52, "FinalLocalVariable")));
    }

    #[test]
    fn query_elsewhere_does_not_suppress() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        let element = XpathFilterElement::new(
            None,
            None,
            None,
            None,
            Some("//method_declaration/identifier[@text='other']"),
        )
        .unwrap();

        assert!(!element.is_matching(&event_at(root, 52, "FinalLocalVariable")));
    }

    #[test]
    fn check_selector_must_match() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        let element =
            XpathFilterElement::new(None, Some("UpperEll"), None, None, None).unwrap();

        assert!(!element.is_matching(&event_at(root, 52, "FinalLocalVariable")));
        assert!(element.is_matching(&event_at(root, 52, "UpperEll")));
    }

    #[test]
    fn missing_query_suppresses_any_position() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        let element =
            XpathFilterElement::new(None, Some("FinalLocalVariable"), None, None, None).unwrap();

        assert!(element.is_matching(&event_at(root, 0, "FinalLocalVariable")));
        assert!(element.is_matching(&event_at(root, 52, "FinalLocalVariable")));
    }

    #[test]
    fn message_and_id_selectors() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);

        let by_message =
            XpathFilterElement::new(None, None, Some("^violation$"), None, None).unwrap();
        assert!(by_message.is_matching(&event_at(root, 52, "FinalLocalVariable")));

        let by_id = XpathFilterElement::new(None, None, None, Some("local"), None).unwrap();
        assert!(!by_id.is_matching(&event_at(root, 52, "FinalLocalVariable")));

        let mut event = event_at(root, 52, "FinalLocalVariable");
        event.module_id = Some("local");
        assert!(by_id.is_matching(&event));
    }

    #[test]
    fn union_query_with_parent_steps_selects_one_method() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        let query = "//variable_declarator[./identifier[@text='pi'] and \
                     ../../../identifier[@text='countTokens']] | \n\
                     //variable_declarator[./identifier[@text='pi'] and \
                     ../../../identifier[@text='countTokens']]/identifier";
        let element = XpathFilterElement::new(None, None, None, None, Some(query)).unwrap();

        // both declarators start at their identifier; only countTokens' matches
        assert!(element.is_matching(&event_at(root, 52, "FinalLocalVariable")));
        assert!(!element.is_matching(&event_at(root, 97, "FinalLocalVariable")));
    }

    #[test]
    fn filter_suppresses_when_any_element_matches() {
        let parsed = parse(SOURCE);
        let root = CstNode::new(parsed.tree.root_node(), &parsed.source);
        let filter = SuppressionXpathFilter::new(vec![
            XpathFilterElement::new(None, Some("UpperEll"), None, None, None).unwrap(),
            XpathFilterElement::new(
                None,
                None,
                None,
                None,
                Some("//method_declaration/identifier[@text='countTokens']"),
            )
            .unwrap(),
        ]);

        // countTokens identifier starts at offset 24
        assert!(filter.is_suppressed(&event_at(root, 24, "FinalLocalVariable")));
        assert!(!filter.is_suppressed(&event_at(root, 52, "FinalLocalVariable")));
        assert!(SuppressionXpathFilter::default().elements.is_empty());
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(XpathFilterElement::new(Some("(["), None, None, None, None).is_err());
        assert!(XpathFilterElement::new(None, None, None, None, Some("//a[")).is_err());
    }
}
