pub mod error;
pub mod id;
pub mod toy;

pub use error::{StoreError, StoreResult};
pub use id::{ID_LENGTH, make_id};
pub use toy::{Toy, ToyDraft};
