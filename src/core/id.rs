//! Short record identifiers.
//!
//! Ids are drawn uniformly from `[A-Za-z0-9]`; at five symbols the id space
//! holds 62^5 (roughly 916 million) values. The generator alone does not
//! guarantee uniqueness: `ToyStore` redraws any id that collides with a
//! stored record.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Default id length for newly created toys.
pub const ID_LENGTH: usize = 5;

/// Generates a random alphanumeric id of `len` characters.
pub fn make_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
