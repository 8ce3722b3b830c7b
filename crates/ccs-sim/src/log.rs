//! The append-only action trace.
//!
//! The log is the simulation's externally consumable record: one row per
//! kernel action, in the order the kernel performed them.  It is separate
//! from the domain objects so the kernel stays testable in isolation — a
//! test can drive the loop and assert on the trace alone.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use ccs_core::{AgentId, ContactId, SimTime};

// ── Vocabulary ────────────────────────────────────────────────────────────────

/// Every action the kernel records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    SimulationStarted,
    SimulationEnded,
    Arrival,
    MaterialisedHandling,
    AgentLineOccupied,
    UpdatedHandling,
    ContactWaiting,
    ContactHandled,
    AgentLineFreed,
    CheckWaitingQueue,
    ContactMissed,
    AgentIn,
    AgentOut,
}

impl LogAction {
    /// Wire-format name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogAction::SimulationStarted    => "simulation_started",
            LogAction::SimulationEnded      => "simulation_ended",
            LogAction::Arrival              => "arrival",
            LogAction::MaterialisedHandling => "materialised_handling",
            LogAction::AgentLineOccupied    => "agent_line_occupied",
            LogAction::UpdatedHandling      => "updated_handling",
            LogAction::ContactWaiting       => "contact_waiting",
            LogAction::ContactHandled       => "contact_handled",
            LogAction::AgentLineFreed       => "agent_line_freed",
            LogAction::CheckWaitingQueue    => "check_waiting_queue",
            LogAction::ContactMissed        => "contact_missed",
            LogAction::AgentIn              => "agent_in",
            LogAction::AgentOut             => "agent_out",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of item a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogItemType {
    Simulation,
    Contact,
    Agent,
}

impl LogItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            LogItemType::Simulation => "simulation",
            LogItemType::Contact    => "contact",
            LogItemType::Agent      => "agent",
        }
    }
}

impl fmt::Display for LogItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One trace row.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub time:      SimTime,
    pub action:    LogAction,
    pub item_type: LogItemType,
    pub item_id:   String,
}

/// Append-only trace of kernel actions.
///
/// The creation timestamp (wall clock, not simulated time) tags the run in
/// `simulation_started` / `simulation_ended` records and exported files.
pub struct Log {
    created_unix_secs: u64,
    records:           Vec<LogRecord>,
}

impl Log {
    pub fn new() -> Self {
        let created_unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            created_unix_secs,
            records: Vec::new(),
        }
    }

    /// Run tag used as the `item_id` of simulation-level records.
    pub fn sim_tag(&self) -> String {
        format!("sim-{}", self.created_unix_secs)
    }

    pub fn record(
        &mut self,
        time:      SimTime,
        action:    LogAction,
        item_type: LogItemType,
        item_id:   String,
    ) {
        self.records.push(LogRecord {
            time,
            action,
            item_type,
            item_id,
        });
    }

    pub fn contact_action(&mut self, time: SimTime, action: LogAction, contact: ContactId) {
        self.record(time, action, LogItemType::Contact, contact.to_string());
    }

    pub fn agent_action(&mut self, time: SimTime, action: LogAction, agent: AgentId) {
        self.record(time, action, LogItemType::Agent, agent.to_string());
    }

    pub fn sim_action(&mut self, time: SimTime, action: LogAction) {
        let tag = self.sim_tag();
        self.record(time, action, LogItemType::Simulation, tag);
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new()
    }
}
