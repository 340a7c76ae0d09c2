//! XPath addressing of Java CST nodes.
//!
//! Violations are suppressible by XPath query: the generator turns a
//! violation position into queries addressing every node that starts there,
//! and the filter re-locates those nodes when deciding whether to drop a
//! violation. Queries address a projection of the tree-sitter CST where
//! named nodes keep their kind, anonymous tokens get fixed names (`LPAREN`,
//! `SEMI`, uppercased keywords), and identifier/literal nodes carry a
//! `@text` attribute.

mod element;
mod evaluator;
mod filter;
mod generator;
mod parser;

pub use crate::element::{
    element_children, element_name, encode_text, supports_text_attribute, text_attribute_value,
};
pub use crate::evaluator::evaluate;
pub use crate::filter::{SuppressionXpathFilter, ViolationEvent, XpathFilterElement};
pub use crate::generator::{DEFAULT_TAB_WIDTH, XpathQueryGenerator};
pub use crate::parser::{
    Axis, LocationPath, NodeTest, Predicate, Step, XpathQuery, parse_query,
};

use thiserror::Error;

/// Error raised for malformed XPath queries or filter patterns.
#[derive(Debug, Error)]
pub enum XpathError {
    #[error("invalid xpath query {query:?}: {message} at offset {offset}")]
    Query {
        query: String,
        message: String,
        offset: usize,
    },
    #[error("invalid pattern in suppression element: {0}")]
    Pattern(#[from] regex::Error),
}
