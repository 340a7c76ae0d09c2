//! Annotation rules for checking annotation usage.

mod missing_override;

pub use missing_override::MissingOverride;
