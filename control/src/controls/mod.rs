//! Pots and buttons of the panel.

mod button;
mod snapshot;

pub use button::{Button, Edge};
pub use snapshot::Snapshot;
