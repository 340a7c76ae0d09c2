//! Style rules (UpperEll, ArrayTypeStyle, etc.)

mod array_type_style;
mod upper_ell;

pub use array_type_style::ArrayTypeStyle;
pub use upper_ell::UpperEll;
