//! The event tuple: referenced item, kind, scheduled time.

use ccs_core::{AgentId, ContactId, LineRef, SimTime};

/// What happens when the event is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A contact enters the system.
    Arrival,
    /// A contact is parked in the waiting queue.
    Waiting,
    /// A line finishes handling its contact.
    Handling,
    /// An agent enters service.
    AgentIn,
    /// An agent leaves service.
    AgentOut,
}

/// The item an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload {
    Contact(ContactId),
    Line(LineRef),
    /// Agent-IO events may leave the agent unspecified; the kernel then
    /// picks one (random disabled for in, earliest-in for out).
    Agent(Option<AgentId>),
}

/// When the event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// A fixed instant, captured at enqueue.
    At(SimTime),
    /// The referenced line's projected handling end, rounded to two
    /// decimals — recomputed from contact state on every read.
    LineEnd,
}

/// One scheduled occurrence.  Plain data; the kernel owns all resolution
/// logic (including turning `LineEnd` into an instant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind:    EventKind,
    pub payload: EventPayload,
    pub time:    EventTime,
}

impl Event {
    pub fn arrival(contact: ContactId, at: SimTime) -> Self {
        Self {
            kind:    EventKind::Arrival,
            payload: EventPayload::Contact(contact),
            time:    EventTime::At(at),
        }
    }

    /// A waiting entry.  Its time slot carries the contact's arrival; the
    /// waiting queue is consumed by predicate, never by time.
    pub fn waiting(contact: ContactId, arrived_at: SimTime) -> Self {
        Self {
            kind:    EventKind::Waiting,
            payload: EventPayload::Contact(contact),
            time:    EventTime::At(arrived_at),
        }
    }

    pub fn handling(line: LineRef) -> Self {
        Self {
            kind:    EventKind::Handling,
            payload: EventPayload::Line(line),
            time:    EventTime::LineEnd,
        }
    }

    pub fn agent_in(agent: Option<AgentId>, at: SimTime) -> Self {
        Self {
            kind:    EventKind::AgentIn,
            payload: EventPayload::Agent(agent),
            time:    EventTime::At(at),
        }
    }

    pub fn agent_out(agent: Option<AgentId>, at: SimTime) -> Self {
        Self {
            kind:    EventKind::AgentOut,
            payload: EventPayload::Agent(agent),
            time:    EventTime::At(at),
        }
    }

    /// The contact this event references, if it references one.
    pub fn contact(&self) -> Option<ContactId> {
        match self.payload {
            EventPayload::Contact(id) => Some(id),
            _ => None,
        }
    }
}
