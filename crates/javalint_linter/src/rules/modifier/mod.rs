//! Modifier rules for checking modifier usage.

pub mod common;
pub mod final_local_variable;

pub use final_local_variable::FinalLocalVariable;
