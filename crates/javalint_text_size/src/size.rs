use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::TextLen;

/// An offset into text, or the length of a span of text, in UTF-8 bytes.
///
/// Offsets are 32-bit; files larger than 4 GiB are rejected at load time.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextSize {
    raw: u32,
}

impl TextSize {
    /// Creates a new `TextSize` from a raw byte offset.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self { raw }
    }

    /// The byte length of some text-like object.
    #[inline]
    pub fn of<T: TextLen>(text: T) -> Self {
        text.text_len()
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.raw
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.raw as usize
    }

    #[inline]
    pub fn checked_add(self, rhs: TextSize) -> Option<TextSize> {
        self.raw.checked_add(rhs.raw).map(Self::new)
    }

    #[inline]
    pub fn checked_sub(self, rhs: TextSize) -> Option<TextSize> {
        self.raw.checked_sub(rhs.raw).map(Self::new)
    }
}

impl fmt::Debug for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<u32> for TextSize {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl From<TextSize> for u32 {
    #[inline]
    fn from(size: TextSize) -> Self {
        size.raw
    }
}

impl From<TextSize> for usize {
    #[inline]
    fn from(size: TextSize) -> Self {
        size.raw as usize
    }
}

impl TryFrom<usize> for TextSize {
    type Error = std::num::TryFromIntError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self::new)
    }
}

impl Add for TextSize {
    type Output = TextSize;

    #[inline]
    fn add(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw + rhs.raw)
    }
}

impl Sub for TextSize {
    type Output = TextSize;

    #[inline]
    fn sub(self, rhs: TextSize) -> TextSize {
        TextSize::new(self.raw - rhs.raw)
    }
}

impl AddAssign for TextSize {
    #[inline]
    fn add_assign(&mut self, rhs: TextSize) {
        self.raw += rhs.raw;
    }
}

impl SubAssign for TextSize {
    #[inline]
    fn sub_assign(&mut self, rhs: TextSize) {
        self.raw -= rhs.raw;
    }
}

impl Sum for TextSize {
    fn sum<I: Iterator<Item = TextSize>>(iter: I) -> TextSize {
        iter.fold(TextSize::default(), Add::add)
    }
}
