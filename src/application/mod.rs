//! Application services layer.

pub mod carousel;
pub mod chrome;
pub mod contact;
pub mod error;
pub mod listing;
pub mod pages;
pub mod stream;
