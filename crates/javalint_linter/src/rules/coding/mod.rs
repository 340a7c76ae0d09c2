//! Coding rules (EmptyStatement, MissingSwitchDefault, etc.)

mod empty_statement;
mod magic_number;
mod missing_switch_default;

pub use empty_statement::EmptyStatement;
pub use magic_number::MagicNumber;
pub use missing_switch_default::MissingSwitchDefault;
