// ============================================================================
// Toy Store Library
// ============================================================================

pub mod config;
pub mod core;
pub mod query;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use config::AppConfig;
pub use crate::core::{StoreError, StoreResult, Toy, ToyDraft};
pub use query::{PAGE_SIZE, SortBy, SortDir, SortField, ToyFilter, ToyPage, run_query};
pub use storage::{JsonSnapshot, ToyRepository, ToyStore};
pub use web::{AppState, build_router};
