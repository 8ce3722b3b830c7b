//! FIFO and time-ordered event queues.
//!
//! Both queues store events; neither can resolve a late-bound time on its
//! own.  Operations that need an instant take a resolver closure
//! (`&Event → SimTime`), supplied by the kernel, which reads current
//! contact state.  Popping an empty queue returns `None`.

use std::collections::VecDeque;

use ccs_core::SimTime;

use crate::Event;

// ── FifoQueue ─────────────────────────────────────────────────────────────────

/// Strict insertion-order queue, used for the arrival and waiting streams.
#[derive(Debug, Default, Clone)]
pub struct FifoQueue {
    events: VecDeque<Event>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return the head.
    pub fn pop_next(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// The head, without removal.
    pub fn peek_next(&self) -> Option<&Event> {
        self.events.front()
    }

    /// Remove and return the first event satisfying `predicate`; `None` when
    /// nothing matches.  Order among the remaining events is preserved.
    pub fn pop_matching(&mut self, predicate: impl Fn(&Event) -> bool) -> Option<Event> {
        let idx = self.events.iter().position(|e| predicate(e))?;
        self.events.remove(idx)
    }

    /// Stable reorder by resolved time (earlier first).
    pub fn sort_by_time(&mut self, resolve: impl Fn(&Event) -> SimTime) {
        self.events
            .make_contiguous()
            .sort_by(|a, b| resolve(a).cmp(&resolve(b)));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ── TimedQueue ────────────────────────────────────────────────────────────────

/// Min-by-time queue, used for the handling and agent-IO streams.
///
/// Because handling times are late-bound, ordering is decided by scanning
/// with the caller's resolver at each query rather than by a heap built on
/// enqueue-time keys.  The first minimum wins, so events scheduled for the
/// same instant dispatch in insertion order.
#[derive(Debug, Default, Clone)]
pub struct TimedQueue {
    events: Vec<Event>,
}

impl TimedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Index of the earliest event under `resolve`; `None` when empty.
    pub fn min_index(&self, resolve: impl Fn(&Event) -> SimTime) -> Option<usize> {
        let mut best: Option<(usize, SimTime)> = None;
        for (i, event) in self.events.iter().enumerate() {
            let t = resolve(event);
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The earliest event's resolved time; `None` when empty.
    pub fn head_time(&self, resolve: impl Fn(&Event) -> SimTime) -> Option<SimTime> {
        self.min_index(&resolve).map(|i| resolve(&self.events[i]))
    }

    /// Remove the event at `index` (as returned by [`TimedQueue::min_index`]).
    pub fn remove(&mut self, index: usize) -> Event {
        self.events.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
