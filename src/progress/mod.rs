//! User progress state, its persistence codec, and the single-writer store.

pub mod codec;
pub mod state;
pub mod store;

pub use state::{ProgressSnapshot, UnlockRecord};
pub use store::{ProgressEvent, ProgressStore};
