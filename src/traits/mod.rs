//! Collaborator seams.
//!
//! The engine consumes three collaborators through these traits:
//! an [`AssetLedger`] that moves opaque asset values, a [`Clock`] that
//! supplies logical time, and an [`EventSink`] that receives notifications.

mod clock;
mod event_sink;
mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event_sink::EventSink;
pub use ledger::AssetLedger;
