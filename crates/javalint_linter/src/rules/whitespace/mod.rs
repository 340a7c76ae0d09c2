//! Whitespace-related rules.

pub mod common;
pub mod method_param_pad;
pub mod paren_pad;

pub use method_param_pad::MethodParamPad;
pub use paren_pad::ParenPad;
