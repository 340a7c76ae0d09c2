//! UpperEll rule implementation.
//!
//! Checks that long literals use uppercase 'L' rather than lowercase 'l'.
//! The lowercase 'l' looks too similar to '1', which can cause confusion.
//!
//! Checkstyle equivalent: UpperEll
//!
//! ## Examples
//!
//! ```java
//! long bad = 123l;   // violation
//! long good = 123L;  // ok
//! ```

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;

use crate::{CheckContext, FromConfig, Properties, Rule};

/// Violation: long literal uses lowercase 'l' suffix.
#[derive(Debug, Clone)]
pub struct UpperEllViolation;

impl Violation for UpperEllViolation {
    fn message(&self) -> String {
        "Should use uppercase 'L'.".to_string()
    }
}

/// Configuration for UpperEll rule.
///
/// This rule has no configuration options.
#[derive(Debug, Clone, Default)]
pub struct UpperEll;

const RELEVANT_KINDS: &[&str] = &[
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
];

impl FromConfig for UpperEll {
    const MODULE_NAME: &'static str = "UpperEll";

    fn from_config(_properties: &Properties) -> Self {
        Self
    }
}

impl Rule for UpperEll {
    fn name(&self) -> &'static str {
        "UpperEll"
    }

    fn relevant_kinds(&self) -> &'static [&'static str] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: &CstNode) -> Vec<Diagnostic> {
        if RELEVANT_KINDS.contains(&node.kind()) && node.text().ends_with('l') {
            return vec![Diagnostic::new(UpperEllViolation, node.range())];
        }

        vec![]
    }
}
