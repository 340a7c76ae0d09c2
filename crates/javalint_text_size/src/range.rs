use std::fmt;
use std::ops::{Add, Index, IndexMut, Range, Sub};

use crate::TextSize;

/// A half-open byte range in text: `start..end`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[inline]
    pub fn new(start: TextSize, end: TextSize) -> Self {
        assert!(start <= end);
        Self { start, end }
    }

    /// Creates a range of the given length starting at `offset`.
    #[inline]
    pub fn at(offset: TextSize, len: TextSize) -> Self {
        Self::new(offset, offset + len)
    }

    /// Creates an empty range positioned at `offset`.
    #[inline]
    pub fn empty(offset: TextSize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Creates a range from zero up to `end`.
    #[inline]
    pub fn up_to(end: TextSize) -> Self {
        Self {
            start: TextSize::default(),
            end,
        }
    }

    #[inline]
    pub const fn start(self) -> TextSize {
        self.start
    }

    #[inline]
    pub const fn end(self) -> TextSize {
        self.end
    }

    #[inline]
    pub fn len(self) -> TextSize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(self, offset: TextSize) -> bool {
        self.start <= offset && offset < self.end
    }

    #[inline]
    pub fn contains_inclusive(self, offset: TextSize) -> bool {
        self.start <= offset && offset <= self.end
    }

    #[inline]
    pub fn contains_range(self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The range covered by both ranges, if they touch.
    #[inline]
    pub fn intersect(self, other: TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then(|| TextRange::new(start, end))
    }

    /// The smallest range covering both ranges.
    #[inline]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn add_start(self, offset: TextSize) -> TextRange {
        TextRange::new(self.start + offset, self.end)
    }

    #[inline]
    pub fn sub_end(self, offset: TextSize) -> TextRange {
        TextRange::new(self.start, self.end - offset)
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(range: TextRange) -> Self {
        range.start().into()..range.end().into()
    }
}

impl Add<TextSize> for TextRange {
    type Output = TextRange;

    #[inline]
    fn add(self, offset: TextSize) -> TextRange {
        TextRange::new(self.start + offset, self.end + offset)
    }
}

impl Sub<TextSize> for TextRange {
    type Output = TextRange;

    #[inline]
    fn sub(self, offset: TextSize) -> TextRange {
        TextRange::new(self.start - offset, self.end - offset)
    }
}

impl Index<TextRange> for str {
    type Output = str;

    #[inline]
    fn index(&self, range: TextRange) -> &str {
        &self[Range::<usize>::from(range)]
    }
}

impl Index<TextRange> for String {
    type Output = str;

    #[inline]
    fn index(&self, range: TextRange) -> &str {
        &self[Range::<usize>::from(range)]
    }
}

impl IndexMut<TextRange> for str {
    #[inline]
    fn index_mut(&mut self, range: TextRange) -> &mut str {
        &mut self[Range::<usize>::from(range)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        let range = TextRange::new(TextSize::new(2), TextSize::new(5));
        assert!(range.contains(TextSize::new(2)));
        assert!(range.contains(TextSize::new(4)));
        assert!(!range.contains(TextSize::new(5)));
        assert!(range.contains_inclusive(TextSize::new(5)));
    }

    #[test]
    fn str_indexing() {
        let text = "hello world";
        let range = TextRange::new(TextSize::new(6), TextSize::new(11));
        assert_eq!(&text[range], "world");
    }

    #[test]
    fn intersect_and_cover() {
        let a = TextRange::new(TextSize::new(0), TextSize::new(4));
        let b = TextRange::new(TextSize::new(2), TextSize::new(6));
        assert_eq!(
            a.intersect(b),
            Some(TextRange::new(TextSize::new(2), TextSize::new(4)))
        );
        assert_eq!(a.cover(b), TextRange::new(TextSize::new(0), TextSize::new(6)));
    }
}
