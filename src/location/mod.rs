//! Device position acquisition with bounded wait and single-fire completion.

mod port;
mod single_fire;
mod source;

pub use port::LocationPort;
pub use single_fire::FixSlot;
pub use source::{LocationAuthorization, PositionFix, PositionSource};
