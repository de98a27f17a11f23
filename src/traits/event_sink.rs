//! Fire-and-forget event emission.

use crate::events::PoolEvent;

/// Receives a [`PoolEvent`] for every committed state transition.
///
/// Emission happens after the transition is committed and cannot fail;
/// a sink that drops events does not affect pool correctness.
///
/// # Implementors
///
/// - [`TracingSink`](crate::events::TracingSink): logs through `tracing`.
/// - [`RecordingSink`](crate::events::RecordingSink): keeps events in memory.
/// - [`NoopSink`](crate::events::NoopSink): discards everything.
pub trait EventSink {
    /// Handles one event.
    fn emit(&mut self, event: PoolEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: PoolEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: PoolEvent) {
        (**self).emit(event);
    }
}
