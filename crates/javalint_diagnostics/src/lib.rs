//! Diagnostic types for reporting rule violations.

mod diagnostic;

pub use crate::diagnostic::{Diagnostic, DiagnosticKind, Violation};
