use crate::{TextRange, TextSize};

/// Types that know the byte length of their text.
pub trait TextLen: Copy {
    fn text_len(self) -> TextSize;
}

impl TextLen for &str {
    #[inline]
    fn text_len(self) -> TextSize {
        TextSize::new(u32::try_from(self.len()).unwrap_or_else(|_| {
            panic!("text longer than 4 GiB");
        }))
    }
}

impl TextLen for &String {
    #[inline]
    fn text_len(self) -> TextSize {
        self.as_str().text_len()
    }
}

impl TextLen for char {
    #[inline]
    fn text_len(self) -> TextSize {
        TextSize::new(self.len_utf8() as u32)
    }
}

/// Types occupying a range of source text.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}

impl<T> Ranged for &T
where
    T: Ranged,
{
    fn range(&self) -> TextRange {
        T::range(self)
    }
}
