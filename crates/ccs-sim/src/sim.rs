//! The `Simulation` struct and its event loop.

use ccs_agent::{AgentPool, LineBlueprint};
use ccs_contact::{Contact, ContactTypeConfig, ServeTerms};
use ccs_core::{AgentId, ContactId, SimRng, SimTime};
use ccs_queue::{Event, EventKind, EventPayload, EventTime, FifoQueue, TimedQueue};
use log::warn;
use rustc_hash::FxHashMap;

use crate::log::{Log, LogAction};
use crate::{SimError, SimResult};

// ── Result records ────────────────────────────────────────────────────────────

/// One completed handling: who, by whom, when.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandledRecord {
    pub contact:   ContactId,
    pub agent:     AgentId,
    pub solved_at: SimTime,
}

/// One contact lost while waiting (abandoned or auto-solved).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissedRecord {
    pub contact:   ContactId,
    pub missed_at: SimTime,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The simulator: contact-type registry, agent pool, the four event queues,
/// the contact arena, and the result lists.
///
/// Build incrementally (`add_contact_type`, `add_agents`, the generators in
/// [`crate::generate`]), then call [`Simulation::simulate`].  Everything is
/// deterministic under the seed passed to [`Simulation::new`].
pub struct Simulation {
    seed: u64,
    pub(crate) rng: SimRng,

    pub(crate) contact_types: FxHashMap<String, ContactTypeConfig>,
    pub agent_pool: AgentPool,

    /// Agent in/out schedule.  Time-ordered; usually produced by
    /// [`Simulation::generate_basic_io`] or
    /// [`Simulation::generate_io_from_coverage`].
    pub agent_io_queue: TimedQueue,

    pub(crate) arrival_queue:  FifoQueue,
    pub(crate) handling_queue: TimedQueue,
    pub(crate) waiting_queue:  FifoQueue,

    /// Arena owning every contact ever admitted; `ContactId` indexes here.
    pub(crate) contacts: Vec<Contact>,

    pub handled: Vec<HandledRecord>,
    pub missed:  Vec<MissedRecord>,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SimRng::new(seed),
            contact_types: FxHashMap::default(),
            agent_pool: AgentPool::new(),
            agent_io_queue: TimedQueue::new(),
            arrival_queue: FifoQueue::new(),
            handling_queue: TimedQueue::new(),
            waiting_queue: FifoQueue::new(),
            contacts: Vec::new(),
            handled: Vec::new(),
            missed: Vec::new(),
        }
    }

    /// Build a simulator pre-loaded with a contact-type mapping.  The
    /// configurations are assumed validated ([`ContactTypeConfig`]
    /// constructors enforce that).
    pub fn with_contact_types(
        seed:  u64,
        types: impl IntoIterator<Item = (String, ContactTypeConfig)>,
    ) -> Self {
        let mut sim = Self::new(seed);
        sim.contact_types.extend(types);
        sim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ── Contact-type registry ─────────────────────────────────────────────

    /// Register (or overwrite) a contact type.
    pub fn add_contact_type(
        &mut self,
        name:             impl Into<String>,
        base:             f64,
        increment:        f64,
        average_patience: Option<f64>,
        auto_solve_time:  Option<f64>,
    ) -> SimResult<()> {
        let mut config = ContactTypeConfig::new(base, increment)?;
        if let Some(patience) = average_patience {
            config = config.with_patience(patience)?;
        }
        if let Some(auto_solve) = auto_solve_time {
            config = config.with_auto_solve(auto_solve)?;
        }
        self.contact_types.insert(name.into(), config);
        Ok(())
    }

    /// Deregister a contact type, returning its configuration if present.
    pub fn remove_contact_type(&mut self, name: &str) -> Option<ContactTypeConfig> {
        self.contact_types.remove(name)
    }

    pub fn list_contact_types(&self) -> Vec<&str> {
        self.contact_types.keys().map(String::as_str).collect()
    }

    pub fn contact_type(&self, name: &str) -> Option<&ContactTypeConfig> {
        self.contact_types.get(name)
    }

    // ── Workforce ─────────────────────────────────────────────────────────

    /// Hire `num_agents` agents from one blueprint.  The performance
    /// callback runs once per agent.
    pub fn add_agents(
        &mut self,
        blueprint:       &[LineBlueprint],
        num_agents:      u32,
        mut performance: impl FnMut() -> f64,
    ) -> SimResult<Vec<AgentId>> {
        let mut hired = Vec::with_capacity(num_agents as usize);
        for _ in 0..num_agents {
            hired.push(self.agent_pool.add_from_blueprint(blueprint, performance())?);
        }
        Ok(hired)
    }

    // ── Contacts ──────────────────────────────────────────────────────────

    /// Admit one contact into the arrival stream.  Patience and auto-solve
    /// come from the registered type configuration.
    ///
    /// The arrival stream is consumed head-first, so direct callers must
    /// admit in non-decreasing arrival order;
    /// [`Simulation::add_arrivals`] sorts the stream after bulk admission.
    pub fn push_arrival(&mut self, arrival: SimTime, contact_type: &str) -> SimResult<ContactId> {
        let config = *self
            .contact_types
            .get(contact_type)
            .ok_or_else(|| SimError::UnknownContactType(contact_type.to_owned()))?;
        let id = ContactId(self.contacts.len() as u32);
        let contact = Contact::new(id, arrival, contact_type, &config, &mut self.rng);
        self.contacts.push(contact);
        self.arrival_queue.push(Event::arrival(id, arrival));
        Ok(id)
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(id.index())
    }

    pub fn contact_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.contacts.get_mut(id.index())
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    // ── Results ───────────────────────────────────────────────────────────

    pub fn get_handled(&self) -> Vec<&Contact> {
        self.handled
            .iter()
            .filter_map(|r| self.contacts.get(r.contact.index()))
            .collect()
    }

    pub fn get_missed(&self) -> Vec<&Contact> {
        self.missed
            .iter()
            .filter_map(|r| self.contacts.get(r.contact.index()))
            .collect()
    }

    /// Handled then missed, in completion order within each list.
    pub fn get_solved(&self) -> Vec<&Contact> {
        let mut solved = self.get_handled();
        solved.extend(self.get_missed());
        solved
    }

    // ── Resets ────────────────────────────────────────────────────────────

    /// Drop all queued work, contacts, and results.  The workforce, the
    /// type registry, and the RNG state survive.
    pub fn reset_simulation(&mut self) {
        self.agent_io_queue = TimedQueue::new();
        self.arrival_queue = FifoQueue::new();
        self.handling_queue = TimedQueue::new();
        self.waiting_queue = FifoQueue::new();
        self.contacts.clear();
        self.handled.clear();
        self.missed.clear();
    }

    /// Fire the whole workforce.
    pub fn reset_agents(&mut self) {
        self.agent_pool.reset();
    }

    // ── Event-time resolution ─────────────────────────────────────────────

    /// Resolve an event's instant against current state.  `LineEnd` reads
    /// the referenced line's contact and rounds its projected end to two
    /// decimals; a handling event always references an occupied line
    /// (completion pops the event before the line clears), so the infinite
    /// fallback is unreachable in a consistent run.
    pub(crate) fn event_time(&self, event: &Event) -> SimTime {
        match event.time {
            EventTime::At(t) => t,
            EventTime::LineEnd => match event.payload {
                EventPayload::Line(line_ref) => self
                    .agent_pool
                    .line(line_ref)
                    .and_then(|line| line.contact())
                    .and_then(|cid| self.contacts.get(cid.index()))
                    .and_then(|contact| contact.end_at())
                    .map(SimTime::round2)
                    .unwrap_or(SimTime::INFINITY),
                _ => SimTime::INFINITY,
            },
        }
    }

    // ── Main loop ─────────────────────────────────────────────────────────

    /// Run the kernel to completion and return the action trace.
    ///
    /// Fails up front if any queued contact references an unregistered
    /// contact type; mid-loop irregularities are warned about and skipped.
    pub fn simulate(&mut self) -> SimResult<Log> {
        for event in self.arrival_queue.iter().chain(self.waiting_queue.iter()) {
            if let Some(id) = event.contact() {
                let contact_type = &self.contacts[id.index()].contact_type;
                if !self.contact_types.contains_key(contact_type) {
                    return Err(SimError::UnknownContactType(contact_type.clone()));
                }
            }
        }

        let mut log = Log::new();
        log.sim_action(SimTime::ZERO, LogAction::SimulationStarted);

        loop {
            let heads = [
                self.agent_io_queue.head_time(|e| self.event_time(e)),
                self.arrival_queue.peek_next().map(|e| self.event_time(e)),
                self.handling_queue.head_time(|e| self.event_time(e)),
            ]
            .map(|t| t.unwrap_or(SimTime::INFINITY));

            // Earliest head wins; strict comparison keeps the
            // agent-IO → arrivals → handling order at equal times.
            let mut next = 0;
            for i in 1..heads.len() {
                if heads[i] < heads[next] {
                    next = i;
                }
            }
            if !heads[next].is_finite() {
                break;
            }

            match next {
                0 => self.process_agent_io(&mut log),
                1 => self.process_arrival(&mut log),
                _ => self.process_handling(&mut log),
            }
        }

        log.sim_action(SimTime::ZERO, LogAction::SimulationEnded);
        Ok(log)
    }

    // ── Arrival handler ───────────────────────────────────────────────────

    fn process_arrival(&mut self, log: &mut Log) {
        let Some(event) = self.arrival_queue.pop_next() else {
            return;
        };
        let Some(contact_id) = event.contact() else {
            return;
        };
        let present = self.event_time(&event);
        let contact_type = self.contacts[contact_id.index()].contact_type.clone();
        let Some(config) = self.contact_types.get(&contact_type).copied() else {
            warn!("{contact_id}: arrival references unregistered type {contact_type:?}");
            return;
        };

        let best = self.agent_pool.find_best_avail_agent(&contact_type);
        log.contact_action(present, LogAction::Arrival, contact_id);

        match best {
            Some(agent_id) => {
                self.assign_to_agent(agent_id, contact_id, &contact_type, config, present, None, log);
            }
            None => {
                let arrival = self.contacts[contact_id.index()].arrival;
                self.waiting_queue.push(Event::waiting(contact_id, arrival));
                log.contact_action(present, LogAction::ContactWaiting, contact_id);
            }
        }
    }

    // ── Handling-completion handler ───────────────────────────────────────

    fn process_handling(&mut self, log: &mut Log) {
        let Some(index) = self.handling_queue.min_index(|e| self.event_time(e)) else {
            return;
        };
        let event = self.handling_queue.remove(index);
        // Resolve before the clear below: afterwards the line is empty.
        let present = self.event_time(&event);
        let EventPayload::Line(line_ref) = event.payload else {
            return;
        };
        let agent_id = line_ref.agent;

        let Some(agent) = self.agent_pool.get_mut(agent_id) else {
            warn!("handling completion for unknown {agent_id}");
            return;
        };
        let contact_id = match agent.clear_line(line_ref.slot) {
            Ok(cid) => cid,
            Err(e) => {
                warn!("handling completion on {line_ref}: {e}");
                return;
            }
        };

        self.handled.push(HandledRecord {
            contact: contact_id,
            agent: agent_id,
            solved_at: present,
        });
        log.contact_action(present, LogAction::ContactHandled, contact_id);
        log.agent_action(present, LogAction::AgentLineFreed, agent_id);

        let contact_type = self.contacts[contact_id.index()].contact_type.clone();
        let Some(config) = self.contact_types.get(&contact_type).copied() else {
            warn!("{contact_id}: completed contact references unregistered type {contact_type:?}");
            return;
        };

        // Contract the survivors: the post-decrement occupancy goes to both
        // sides of the factor — aht(conc) over aht(conc + 1).
        let conc = self
            .agent_pool
            .get(agent_id)
            .map(|a| a.occupied_lines)
            .unwrap_or(0);
        let factor = config.aht_at(conc) / config.aht_at(conc + 1);
        self.rescale_occupied(agent_id, present, factor, conc, log);

        self.check_waiting(agent_id, present, log);
    }

    // ── Agent-IO handler ──────────────────────────────────────────────────

    fn process_agent_io(&mut self, log: &mut Log) {
        let Some(index) = self.agent_io_queue.min_index(|e| self.event_time(e)) else {
            return;
        };
        let event = self.agent_io_queue.remove(index);
        let present = self.event_time(&event);
        let EventPayload::Agent(explicit) = event.payload else {
            return;
        };

        // Unaddressed events pick an agent: random among the disabled for
        // in, earliest-in-first-out for out.
        let picked = match event.kind {
            EventKind::AgentIn => {
                explicit.or_else(|| self.agent_pool.sample_disabled(&mut self.rng))
            }
            EventKind::AgentOut => explicit.or_else(|| self.agent_pool.find_earliest_in()),
            _ => return,
        };
        let Some(agent_id) = picked else {
            warn!("agent-IO event at {present} found no eligible agent; skipped");
            return;
        };

        match event.kind {
            EventKind::AgentOut => {
                if let Some(agent) = self.agent_pool.get_mut(agent_id) {
                    if let Err(e) = agent.disable_lines() {
                        warn!("{agent_id}: {e}");
                    }
                }
                log.agent_action(present, LogAction::AgentOut, agent_id);
            }
            EventKind::AgentIn => {
                if let Some(agent) = self.agent_pool.get_mut(agent_id) {
                    if let Err(e) = agent.enable_lines(present) {
                        warn!("{agent_id}: {e}");
                    }
                }
                log.agent_action(present, LogAction::AgentIn, agent_id);
                self.check_waiting(agent_id, present, log);
            }
            _ => {}
        }
    }

    // ── Assignment (shared by arrivals and the drain scan) ────────────────

    /// Materialise handling for `contact_id` on `agent_id`, rescale the
    /// agent's other in-flight contacts, occupy a line (a specific slot when
    /// the drain scan chose one), and schedule the completion event.
    fn assign_to_agent(
        &mut self,
        agent_id:     AgentId,
        contact_id:   ContactId,
        contact_type: &str,
        config:       ContactTypeConfig,
        present:      SimTime,
        specific:     Option<u16>,
        log:          &mut Log,
    ) {
        let Some(agent) = self.agent_pool.get(agent_id) else {
            return;
        };
        let occupied_before = agent.occupied_lines;
        let performance = agent.performance_factor;
        let conc = occupied_before + 1;

        let aht = performance * config.aht_at(conc);
        self.contacts[contact_id.index()].materialise_handling(
            Some(present),
            Some(ServeTerms { aht, concurrency: conc }),
            &mut self.rng,
        );
        log.contact_action(present, LogAction::MaterialisedHandling, contact_id);
        log.agent_action(present, LogAction::AgentLineOccupied, agent_id);

        // Stretch the in-flight contacts to the new concurrency.  The
        // denominator evaluates occupancy `occupied_before`, which for an
        // idle agent is concurrency 0 (base − increment); the occupied-slot
        // list is empty exactly then, so the factor is never applied.
        let factor = config.aht_at(conc) / config.aht_at(occupied_before);
        self.rescale_occupied(agent_id, present, factor, conc, log);

        let occupied = match self.agent_pool.get_mut(agent_id) {
            Some(agent) => agent.occupy_line(contact_id, contact_type, specific),
            None => return,
        };
        match occupied {
            Ok(line_ref) => self.handling_queue.push(Event::handling(line_ref)),
            Err(e) => warn!("{agent_id}: could not occupy a line for {contact_id}: {e}"),
        }
    }

    /// Apply `factor` to the remaining time of every contact currently on
    /// one of `agent_id`'s lines, recording concurrency `conc`.
    fn rescale_occupied(
        &mut self,
        agent_id: AgentId,
        present:  SimTime,
        factor:   f64,
        conc:     u32,
        log:      &mut Log,
    ) {
        let slots = match self.agent_pool.get(agent_id) {
            Some(agent) => agent.occupied_slots(),
            None => return,
        };
        for slot in slots {
            let Some(contact_id) = self
                .agent_pool
                .get(agent_id)
                .and_then(|a| a.line(slot))
                .and_then(|l| l.contact())
            else {
                continue;
            };
            if let Err(e) =
                self.contacts[contact_id.index()].update_handling(present, factor, conc)
            {
                warn!("skipping rescale: {e}");
            }
            log.contact_action(present, LogAction::UpdatedHandling, contact_id);
        }
    }

    // ── Drain scan ────────────────────────────────────────────────────────

    /// Move waiting contacts onto `agent_id` after it gained capacity.
    ///
    /// Lines are visited shuffled-then-priority-sorted; the shuffle runs
    /// before the stable sort so equal-priority lines pick waiting contacts
    /// in seed-deterministic, non-positional order.  Each visited line takes
    /// at most one contact, but consumes any number of already-missed ones
    /// on the way.
    fn check_waiting(&mut self, agent_id: AgentId, present: SimTime, log: &mut Log) {
        let mut order: Vec<u16> = match self.agent_pool.get(agent_id) {
            Some(agent) => (0..agent.lines.len() as u16).collect(),
            None => return,
        };
        self.rng.shuffle(&mut order);
        {
            let pool = &self.agent_pool;
            order.sort_by_key(|&slot| {
                pool.get(agent_id)
                    .and_then(|a| a.line(slot))
                    .map(|l| l.priority)
                    .unwrap_or(i32::MAX)
            });
        }
        log.agent_action(present, LogAction::CheckWaitingQueue, agent_id);

        for slot in order {
            // Re-read per line: earlier iterations may have taken capacity.
            let Some(agent) = self.agent_pool.get(agent_id) else {
                return;
            };
            let Some(line) = agent.line(slot) else {
                continue;
            };
            let takeable = !agent.disabled
                && !line.is_occupied()
                && line.open
                && line.max_occ.is_none_or(|cap| cap > agent.occupied_lines);
            if !takeable {
                continue;
            }
            let line_types = line.contact_types.clone();

            loop {
                let contacts = &self.contacts;
                let Some(waiting) = self.waiting_queue.pop_matching(|e| {
                    e.contact().is_some_and(|cid| {
                        contacts
                            .get(cid.index())
                            .is_some_and(|c| line_types.iter().any(|t| *t == c.contact_type))
                    })
                }) else {
                    break;
                };
                let Some(contact_id) = waiting.contact() else {
                    continue;
                };

                if self.contacts[contact_id.index()].check_missed(present) {
                    self.contacts[contact_id.index()].materialise_handling(
                        Some(present),
                        None,
                        &mut self.rng,
                    );
                    let contact = &self.contacts[contact_id.index()];
                    let missed_at = contact.arrival + contact.waiting_time;
                    log.contact_action(missed_at, LogAction::ContactMissed, contact_id);
                    self.missed.push(MissedRecord {
                        contact: contact_id,
                        missed_at,
                    });
                    // Same line, next waiting contact.
                } else {
                    let contact_type = self.contacts[contact_id.index()].contact_type.clone();
                    let Some(config) = self.contact_types.get(&contact_type).copied() else {
                        warn!("{contact_id}: waiting contact references unregistered type");
                        break;
                    };
                    self.assign_to_agent(
                        agent_id,
                        contact_id,
                        &contact_type,
                        config,
                        present,
                        Some(slot),
                        log,
                    );
                    break;
                }
            }
        }
    }
}
