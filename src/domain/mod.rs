//! Domain layer types and invariants.

pub mod articles;
pub mod document;
pub mod error;
pub mod navigation;
pub mod theme;
