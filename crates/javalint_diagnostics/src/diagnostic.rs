//! Diagnostic types for reporting violations.

use javalint_text_size::{Ranged, TextRange};

/// A trait for violations that can be reported as diagnostics.
pub trait Violation: std::fmt::Debug + Clone + Send + Sync {
    /// Returns the message describing the violation.
    fn message(&self) -> String;
}

/// The kind of diagnostic (rule code and message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticKind {
    /// The rule code, derived from the violation type name.
    pub code: String,
    /// The message body.
    pub body: String,
}

/// A diagnostic representing a violation found in source code.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The kind of diagnostic.
    pub kind: DiagnosticKind,
    /// The range in the source where the violation occurs.
    pub range: TextRange,
}

impl Diagnostic {
    /// Create a new diagnostic from a violation.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new<V: Violation>(violation: V, range: TextRange) -> Self {
        Self {
            kind: DiagnosticKind {
                code: std::any::type_name::<V>()
                    .split("::")
                    .last()
                    .unwrap_or("Unknown")
                    .to_string(),
                body: violation.message(),
            },
            range,
        }
    }
}

impl Ranged for Diagnostic {
    fn range(&self) -> TextRange {
        self.range
    }
}
