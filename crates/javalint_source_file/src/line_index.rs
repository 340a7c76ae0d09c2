use std::fmt;
use std::num::NonZeroUsize;

use javalint_text_size::{TextLen, TextSize};

/// Index of line start offsets, built once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    /// Builds the index by scanning `text` for newlines.
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 40 + 1);
        line_starts.push(TextSize::default());

        for pos in memchr::memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(TextSize::new(pos as u32 + 1));
        }

        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextSize] {
        &self.line_starts
    }

    /// The 1-based line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        match self.line_starts.binary_search(&offset) {
            Ok(row) => OneIndexed::from_zero_indexed(row),
            Err(next_row) => OneIndexed::from_zero_indexed(next_row - 1),
        }
    }

    /// Start offset of a 1-based line. Lines past the end clamp to the text length.
    pub fn line_start(&self, line: OneIndexed, text: &str) -> TextSize {
        self.line_starts
            .get(line.to_zero_indexed())
            .copied()
            .unwrap_or_else(|| text.text_len())
    }

    /// End offset of a 1-based line, including its terminator.
    pub fn line_end(&self, line: OneIndexed, text: &str) -> TextSize {
        self.line_starts
            .get(line.to_zero_indexed() + 1)
            .copied()
            .unwrap_or_else(|| text.text_len())
    }

    /// The 1-based line and character column of `offset`.
    pub fn line_column(&self, offset: TextSize, text: &str) -> LineColumn {
        let line = self.line_index(offset);
        let line_start = self.line_start(line, text);
        let column = text[usize::from(line_start)..usize::from(offset)]
            .chars()
            .count();

        LineColumn {
            line,
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColumn {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A 1-based index, as presented to users.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    pub fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }

    pub const fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }

    pub fn saturating_add(self, rhs: usize) -> Self {
        Self(self.0.saturating_add(rhs))
    }

    pub fn saturating_sub(self, rhs: usize) -> Self {
        match NonZeroUsize::new(self.0.get().saturating_sub(rhs)) {
            Some(value) => Self(value),
            None => Self::MIN,
        }
    }
}

impl fmt::Debug for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
