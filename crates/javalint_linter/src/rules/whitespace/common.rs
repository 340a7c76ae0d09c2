//! Shared helpers for whitespace rules.

use javalint_diagnostics::{Diagnostic, Violation};
use javalint_java_cst::CstNode;
use javalint_text_size::{TextRange, TextSize};

/// Check if character before position is whitespace.
pub fn has_whitespace_before(source: &str, pos: TextSize) -> bool {
    if pos == TextSize::new(0) {
        return true; // Start of file counts as whitespace
    }
    let idx = usize::from(pos);
    source[..idx]
        .chars()
        .last()
        .is_some_and(|c| c.is_whitespace())
}

/// Check if character after position is whitespace.
pub fn has_whitespace_after(source: &str, pos: TextSize) -> bool {
    let idx = usize::from(pos);
    source[idx..]
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace())
}

/// Get the character before a position.
pub fn char_before(source: &str, pos: TextSize) -> Option<char> {
    if pos == TextSize::new(0) {
        return None;
    }
    let idx = usize::from(pos);
    source[..idx].chars().last()
}

/// Get the character after a position.
pub fn char_after(source: &str, pos: TextSize) -> Option<char> {
    let idx = usize::from(pos);
    source[idx..].chars().next()
}

/// Find the range of whitespace before a position.
/// Returns None if no whitespace before.
pub fn whitespace_range_before(source: &str, pos: TextSize) -> Option<TextRange> {
    let idx = usize::from(pos);
    let before = &source[..idx];

    let ws_len = before
        .chars()
        .rev()
        .take_while(|c| c.is_whitespace())
        .count();
    if ws_len == 0 {
        return None;
    }

    // Count bytes, not chars
    let ws_bytes: usize = before
        .chars()
        .rev()
        .take(ws_len)
        .map(|c| c.len_utf8())
        .sum();
    let start = TextSize::new((idx - ws_bytes) as u32);
    Some(TextRange::new(start, pos))
}

// ============================================================================
// Violation types shared across whitespace rules
// ============================================================================

/// Violation: token is not followed by whitespace.
#[derive(Debug, Clone)]
pub struct NotFollowed {
    pub token: String,
}

impl Violation for NotFollowed {
    fn message(&self) -> String {
        format!("'{}' is not followed by whitespace", self.token)
    }
}

/// Violation: token is not preceded by whitespace.
#[derive(Debug, Clone)]
pub struct NotPreceded {
    pub token: String,
}

impl Violation for NotPreceded {
    fn message(&self) -> String {
        format!("'{}' is not preceded by whitespace", self.token)
    }
}

/// Violation: token is followed by whitespace (when it shouldn't be).
#[derive(Debug, Clone)]
pub struct Followed {
    pub token: String,
}

impl Violation for Followed {
    fn message(&self) -> String {
        format!("'{}' is followed by whitespace", self.token)
    }
}

/// Violation: token is preceded by whitespace (when it shouldn't be).
#[derive(Debug, Clone)]
pub struct Preceded {
    pub token: String,
}

impl Violation for Preceded {
    fn message(&self) -> String {
        format!("'{}' is preceded by whitespace", self.token)
    }
}

// ============================================================================
// Diagnostic builders
// ============================================================================

/// Create diagnostic for missing whitespace after token.
pub fn diag_not_followed(token: &CstNode) -> Diagnostic {
    Diagnostic::new(
        NotFollowed {
            token: token.text().to_string(),
        },
        token.range(),
    )
}

/// Create diagnostic for missing whitespace before token.
pub fn diag_not_preceded(token: &CstNode) -> Diagnostic {
    Diagnostic::new(
        NotPreceded {
            token: token.text().to_string(),
        },
        token.range(),
    )
}

/// Create diagnostic for unexpected whitespace after token.
pub fn diag_followed(token: &CstNode) -> Diagnostic {
    Diagnostic::new(
        Followed {
            token: token.text().to_string(),
        },
        token.range(),
    )
}

/// Create diagnostic for unexpected whitespace before token.
pub fn diag_preceded(token: &CstNode) -> Diagnostic {
    Diagnostic::new(
        Preceded {
            token: token.text().to_string(),
        },
        token.range(),
    )
}
