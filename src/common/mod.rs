//! Common types
//!
//! Small types used throughout the crate.

mod flags;
mod span;
mod variable;

pub use flags::AccessFlags;
pub use span::Span;
pub use variable::VarVersion;
