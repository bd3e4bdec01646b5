//! Format-agnostic access to tag fields

mod accessor;

pub use accessor::Accessor;
