//! Newtypes for text offsets and ranges, measured in UTF-8 bytes.

mod range;
mod size;
mod traits;

pub use crate::range::TextRange;
pub use crate::size::TextSize;
pub use crate::traits::{Ranged, TextLen};
