//! Line/column bookkeeping for source files.

mod line_index;

pub use crate::line_index::{LineColumn, LineIndex, OneIndexed};

use javalint_text_size::{TextRange, TextSize};

/// A source text paired with its line index, for offset-to-location lookups.
#[derive(Debug)]
pub struct SourceCode<'src, 'index> {
    text: &'src str,
    index: &'index LineIndex,
}

impl<'src, 'index> SourceCode<'src, 'index> {
    pub fn new(text: &'src str, index: &'index LineIndex) -> Self {
        Self { text, index }
    }

    /// The 1-based line and character column of `offset`.
    pub fn line_column(&self, offset: TextSize) -> LineColumn {
        self.index.line_column(offset, self.text)
    }

    /// The 1-based line containing `offset`.
    pub fn line_index(&self, offset: TextSize) -> OneIndexed {
        self.index.line_index(offset)
    }

    /// Start offset of a 1-based line.
    pub fn line_start(&self, line: OneIndexed) -> TextSize {
        self.index.line_start(line, self.text)
    }

    /// End offset of a 1-based line, including its terminator.
    pub fn line_end(&self, line: OneIndexed) -> TextSize {
        self.index.line_end(line, self.text)
    }

    /// The text of a 1-based line, including its terminator.
    pub fn line_text(&self, line: OneIndexed) -> &'src str {
        let range = TextRange::new(self.line_start(line), self.line_end(line));
        &self.text[range]
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    pub fn text(&self) -> &'src str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_lookup() {
        let source = "class A {\n    int x;\n}\n";
        let index = LineIndex::from_source_text(source);
        let code = SourceCode::new(source, &index);

        let loc = code.line_column(TextSize::new(0));
        assert_eq!(loc.line.get(), 1);
        assert_eq!(loc.column.get(), 1);

        // offset of 'int' on line 2
        let loc = code.line_column(TextSize::new(14));
        assert_eq!(loc.line.get(), 2);
        assert_eq!(loc.column.get(), 5);
    }

    #[test]
    fn line_text_includes_terminator() {
        let source = "a\nbb\n";
        let index = LineIndex::from_source_text(source);
        let code = SourceCode::new(source, &index);
        assert_eq!(code.line_text(OneIndexed::from_zero_indexed(0)), "a\n");
        assert_eq!(code.line_text(OneIndexed::from_zero_indexed(1)), "bb\n");
    }

    #[test]
    fn multibyte_column_counts_chars() {
        let source = "String s = \"caf\u{00e9}x\";\n";
        let index = LineIndex::from_source_text(source);
        let code = SourceCode::new(source, &index);
        // offset of 'x': 11 (quote) + 1 + 3 ascii + 2 bytes for e-acute
        let loc = code.line_column(TextSize::new(17));
        assert_eq!(loc.line.get(), 1);
        assert_eq!(loc.column.get(), 17);
    }
}
