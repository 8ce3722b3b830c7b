//! Unit tests for events and both queue disciplines.

use ccs_core::{AgentId, ContactId, LineRef, SimTime};

use crate::{Event, EventKind, EventPayload, EventTime, FifoQueue, TimedQueue};

fn fixed_time(event: &Event) -> SimTime {
    match event.time {
        EventTime::At(t) => t,
        EventTime::LineEnd => panic!("test resolver only handles fixed times"),
    }
}

#[cfg(test)]
mod event {
    use super::*;

    #[test]
    fn constructors_tag_kinds() {
        let e = Event::arrival(ContactId(1), SimTime(3.0));
        assert_eq!(e.kind, EventKind::Arrival);
        assert_eq!(e.contact(), Some(ContactId(1)));
        assert_eq!(e.time, EventTime::At(SimTime(3.0)));

        let h = Event::handling(LineRef::new(AgentId(0), 2));
        assert_eq!(h.kind, EventKind::Handling);
        assert_eq!(h.time, EventTime::LineEnd);
        assert_eq!(h.contact(), None);

        let io = Event::agent_in(None, SimTime(0.0));
        assert_eq!(io.payload, EventPayload::Agent(None));
    }
}

#[cfg(test)]
mod fifo {
    use super::*;

    fn arrival(id: u32, t: f64) -> Event {
        Event::arrival(ContactId(id), SimTime(t))
    }

    #[test]
    fn pops_in_insertion_order() {
        let mut q = FifoQueue::new();
        q.push(arrival(1, 5.0));
        q.push(arrival(2, 3.0));
        assert_eq!(q.peek_next().unwrap().contact(), Some(ContactId(1)));
        assert_eq!(q.pop_next().unwrap().contact(), Some(ContactId(1)));
        assert_eq!(q.pop_next().unwrap().contact(), Some(ContactId(2)));
        assert_eq!(q.pop_next(), None);
    }

    #[test]
    fn pop_matching_takes_first_match_only() {
        let mut q = FifoQueue::new();
        q.push(arrival(1, 0.0));
        q.push(arrival(2, 1.0));
        q.push(arrival(3, 2.0));
        let popped = q
            .pop_matching(|e| e.contact().is_some_and(|c| c.0 >= 2))
            .unwrap();
        assert_eq!(popped.contact(), Some(ContactId(2)));
        // Remaining order preserved.
        assert_eq!(q.pop_next().unwrap().contact(), Some(ContactId(1)));
        assert_eq!(q.pop_next().unwrap().contact(), Some(ContactId(3)));
    }

    #[test]
    fn pop_matching_none_when_no_match() {
        let mut q = FifoQueue::new();
        q.push(arrival(1, 0.0));
        assert_eq!(q.pop_matching(|_| false), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn sort_by_time_is_stable() {
        let mut q = FifoQueue::new();
        q.push(arrival(1, 5.0));
        q.push(arrival(2, 1.0));
        q.push(arrival(3, 1.0));
        q.sort_by_time(fixed_time);
        let order: Vec<u32> = std::iter::from_fn(|| q.pop_next())
            .filter_map(|e| e.contact())
            .map(|c| c.0)
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}

#[cfg(test)]
mod timed {
    use super::*;

    #[test]
    fn min_index_finds_earliest() {
        let mut q = TimedQueue::new();
        q.push(Event::agent_in(None, SimTime(5.0)));
        q.push(Event::agent_in(None, SimTime(2.0)));
        q.push(Event::agent_in(None, SimTime(8.0)));
        assert_eq!(q.min_index(fixed_time), Some(1));
        assert_eq!(q.head_time(fixed_time), Some(SimTime(2.0)));
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = TimedQueue::new();
        q.push(Event::agent_out(Some(AgentId(0)), SimTime(1.0)));
        q.push(Event::agent_in(Some(AgentId(1)), SimTime(1.0)));
        let first = q.remove(q.min_index(fixed_time).unwrap());
        assert_eq!(first.kind, EventKind::AgentOut);
        let second = q.remove(q.min_index(fixed_time).unwrap());
        assert_eq!(second.kind, EventKind::AgentIn);
        assert!(q.is_empty());
    }

    #[test]
    fn empty_queue_has_no_head() {
        let q = TimedQueue::new();
        assert_eq!(q.min_index(fixed_time), None);
        assert_eq!(q.head_time(fixed_time), None);
    }

    #[test]
    fn late_bound_reordering_is_seen_by_the_resolver() {
        // Two handling events; the resolver consults external state that
        // changes between queries — the queue must re-read, not cache.
        let mut q = TimedQueue::new();
        q.push(Event::handling(LineRef::new(AgentId(0), 0)));
        q.push(Event::handling(LineRef::new(AgentId(0), 1)));

        let ends = [SimTime(10.0), SimTime(4.0)];
        let resolve = |e: &Event| match e.payload {
            EventPayload::Line(l) => ends[l.slot as usize],
            _ => SimTime::INFINITY,
        };
        assert_eq!(q.min_index(resolve), Some(1));

        // Slot 1's contact got stretched past slot 0's.
        let ends = [SimTime(10.0), SimTime(12.0)];
        let resolve = |e: &Event| match e.payload {
            EventPayload::Line(l) => ends[l.slot as usize],
            _ => SimTime::INFINITY,
        };
        assert_eq!(q.min_index(resolve), Some(0));
    }
}
