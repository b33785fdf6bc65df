//! Domain layer types and invariants.

pub mod carousel;
pub mod contact;
pub mod content;
pub mod data;
pub mod error;
pub mod i18n;
pub mod query;
