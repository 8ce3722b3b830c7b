//! `ccs-queue` — events and the two queue disciplines of the simulator.
//!
//! # Why event time is late-bound
//!
//! A handling-completion event references a line whose contact's projected
//! end moves whenever the owning agent's concurrency changes (remaining
//! handling time is rescaled in place).  Capturing the time at enqueue would
//! therefore go stale.  Instead an [`Event`] carries an [`EventTime`] tag:
//! either a fixed instant or `LineEnd`, which the kernel resolves against
//! current contact state on *every* ordering decision.
//!
//! # Two queue types, not one flagged type
//!
//! [`FifoQueue`] (arrival and waiting streams) and [`TimedQueue`] (handling
//! and agent-IO streams) are separate types sharing no mode flag, so
//! "conditional pop on a time-ordered queue" is simply not expressible.
//! The time-ordered queue is a plain scan-for-minimum vector — queue sizes
//! here are the number of concurrently busy lines, small enough that a
//! re-heapifying structure would buy nothing.

pub mod event;
pub mod queue;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use event::{Event, EventKind, EventPayload, EventTime};
pub use queue::{FifoQueue, TimedQueue};
