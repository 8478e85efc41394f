//! Markdown rendering of class pages and the class index.

pub mod bbcode;
pub mod index;
pub mod markup;
pub mod page;
