//! The agent arena and its dispatch lookups.

use ccs_core::{AgentId, LineRef, SimRng};

use crate::{Agent, AgentError, Line, LineBlueprint};

/// Owns every agent in the simulation.
///
/// `AgentId`s are indices into this arena, assigned at hire time and stable
/// for the pool's lifetime.  Everything outside the pool (events, the
/// kernel, result records) carries ids, never references.
#[derive(Default)]
pub struct AgentPool {
    agents: Vec<Agent>,
}

impl AgentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hire one agent from a blueprint; returns its id.
    pub fn add_from_blueprint(
        &mut self,
        blueprint:          &[LineBlueprint],
        performance_factor: f64,
    ) -> Result<AgentId, AgentError> {
        let id = AgentId(self.agents.len() as u32);
        let agent = Agent::from_blueprint(id, blueprint, performance_factor)?;
        self.agents.push(agent);
        Ok(id)
    }

    /// Remove every agent.
    pub fn reset(&mut self) {
        self.agents.clear();
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Resolve a line reference to the line itself.
    #[inline]
    pub fn line(&self, line_ref: LineRef) -> Option<&Line> {
        self.get(line_ref.agent)?.line(line_ref.slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents currently in service.
    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| !a.disabled).count()
    }

    // ── Dispatch lookups ──────────────────────────────────────────────────

    /// The least-loaded agent with a takeable line for `contact_type`.
    /// Ties break by hire order.  `None` when nobody can take the contact.
    pub fn find_best_avail_agent(&self, contact_type: &str) -> Option<AgentId> {
        let mut best: Option<&Agent> = None;
        for agent in self.agents.iter().filter(|a| a.available_for(contact_type) > 0) {
            match best {
                Some(b) if agent.occupied_lines >= b.occupied_lines => {}
                _ => best = Some(agent),
            }
        }
        best.map(|a| a.id)
    }

    /// Uniform random pick among out-of-service agents.
    pub fn sample_disabled(&self, rng: &mut SimRng) -> Option<AgentId> {
        let disabled: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.disabled)
            .map(|a| a.id)
            .collect();
        rng.choose(&disabled).copied()
    }

    /// Uniform random pick among in-service agents.
    pub fn sample_enabled(&self, rng: &mut SimRng) -> Option<AgentId> {
        let enabled: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| !a.disabled)
            .map(|a| a.id)
            .collect();
        rng.choose(&enabled).copied()
    }

    /// The in-service agent with the smallest `last_in` (earliest in, first
    /// out).  Ties break by hire order.
    pub fn find_earliest_in(&self) -> Option<AgentId> {
        let mut earliest: Option<&Agent> = None;
        for agent in self.agents.iter().filter(|a| !a.disabled) {
            match earliest {
                Some(e) if agent.last_in >= e.last_in => {}
                _ => earliest = Some(agent),
            }
        }
        earliest.map(|a| a.id)
    }
}
