//! Lint rules organized by category.

pub mod annotation;
pub mod blocks;
pub mod coding;
pub mod misc;
pub mod modifier;
pub mod style;
pub mod whitespace;

// Re-export all rules
pub use annotation::MissingOverride;
pub use blocks::{EmptyBlock, LeftCurly, NeedBraces};
pub use coding::{EmptyStatement, MagicNumber, MissingSwitchDefault};
pub use misc::MatchXpath;
pub use modifier::FinalLocalVariable;
pub use style::{ArrayTypeStyle, UpperEll};
pub use whitespace::*;
