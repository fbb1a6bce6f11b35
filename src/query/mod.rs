//! Catalogue query engine
//!
//! Stateless transformation from a toy slice plus a [`ToyFilter`] into one
//! [`ToyPage`]. The store runs it under its read lock; nothing here mutates.

mod engine;
mod filter;

pub use engine::{max_page, run_query};
pub use filter::{PAGE_SIZE, SortBy, SortDir, SortField, ToyFilter, ToyPage};
