//! MatchXpath rule implementation.
//!
//! A meta-rule that evaluates a configured XPath query against each file and
//! reports every matched node.
//!
//! Checkstyle equivalent: MatchXpath

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;
use javalint_xpath::{XpathQuery, evaluate, parse_query};

use crate::{CheckContext, FromConfig, Properties, Rule};

const DEFAULT_MESSAGE: &str = "The match was found.";

/// Violation: the configured query matched a node.
#[derive(Debug, Clone)]
pub struct MatchXpathViolation {
    pub message: String,
}

impl Violation for MatchXpathViolation {
    fn message(&self) -> String {
        self.message.clone()
    }
}

/// Configuration for MatchXpath rule.
#[derive(Debug, Clone)]
pub struct MatchXpath {
    /// Query to evaluate against each file. An unset or unparsable query
    /// matches nothing; the parse error is kept for `config_warnings`.
    query: Option<XpathQuery>,
    query_error: Option<String>,
    message: String,
}

const RELEVANT_KINDS: &[&str] = &["program"];

impl Default for MatchXpath {
    fn default() -> Self {
        Self {
            query: None,
            query_error: None,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl FromConfig for MatchXpath {
    const MODULE_NAME: &'static str = "MatchXpath";

    fn from_config(properties: &Properties) -> Self {
        let (query, query_error) = match properties.get("query") {
            Some(q) => match parse_query(q) {
                Ok(query) => (Some(query), None),
                Err(err) => (None, Some(format!("invalid query {q:?}: {err}"))),
            },
            None => (None, None),
        };
        Self {
            query,
            query_error,
            message: properties
                .get("message")
                .map_or_else(|| DEFAULT_MESSAGE.to_string(), |m| (*m).to_string()),
        }
    }
}

impl Rule for MatchXpath {
    fn name(&self) -> &'static str {
        "MatchXpath"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn config_warnings(&self) -> Vec<String> {
        self.query_error.iter().cloned().collect()
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        // Only run at root node
        if node.parent().is_some() {
            return vec![];
        }
        let Some(query) = &self.query else {
            return vec![];
        };

        evaluate(query, *node)
            .into_iter()
            .map(|matched| {
                Diagnostic::new(
                    MatchXpathViolation {
                        message: self.message.clone(),
                    },
                    matched.range(),
                )
            })
            .collect()
    }
}
