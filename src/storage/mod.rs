pub mod persistence;
pub mod store;

pub use persistence::JsonSnapshot;
pub use store::{ToyRepository, ToyStore};
