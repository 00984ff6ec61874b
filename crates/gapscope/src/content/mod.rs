//! Content bank and severity-bucketed content selection.

mod bank;
pub mod builtin;
mod selector;

pub use bank::{ActionTag, ContentBank, ContentEntry};
pub use selector::{
    CategoryScores, Selection, SelectionConfig, select, select_for_scores, worst_category,
};
