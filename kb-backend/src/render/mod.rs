//! Presentation layer: markdown rendering, list filtering/grouping and HTML pages.

pub mod listing;
pub mod markdown;
pub mod pages;
