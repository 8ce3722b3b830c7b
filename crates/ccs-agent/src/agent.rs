//! Agents and line blueprints.

use ccs_core::{AgentId, ContactId, LineRef, SimTime};
use rustc_hash::FxHashMap;

use crate::{AgentError, Line};

// ── LineBlueprint ─────────────────────────────────────────────────────────────

/// Template for a group of identical lines on one agent.
///
/// An agent's full line set is a list of these entries; `num_lines` copies of
/// each are materialised at hire time.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBlueprint {
    pub num_lines:     u32,
    pub contact_types: Vec<String>,
    pub priority:      i32,
    pub max_occ:       Option<u32>,
}

impl LineBlueprint {
    pub fn new(num_lines: u32, contact_types: Vec<String>, priority: i32) -> Self {
        Self {
            num_lines,
            contact_types,
            priority,
            max_occ: None,
        }
    }

    /// Cap each of these lines at the given agent occupancy.  Must be ≥ 1.
    pub fn with_max_occ(mut self, max_occ: u32) -> Self {
        self.max_occ = Some(max_occ);
        self
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One member of the workforce: a fixed line set, a performance factor, and
/// in/out-of-service state.
///
/// Agents start out of service (`disabled = true`, all lines closed) and are
/// brought in by agent-in events.  Disabling closes every line to new work
/// but leaves in-flight contacts running.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id:    AgentId,
    pub alias: Option<String>,

    /// Scales the effective AHT of everything this agent handles.
    pub performance_factor: f64,

    /// Count of occupied lines; always equals the number of lines whose
    /// `is_occupied()` holds.
    pub occupied_lines: u32,

    pub lines: Vec<Line>,

    /// Agent-level occupancy ceiling.  Defaults to the line count.
    pub max_occ: u32,

    pub disabled: bool,

    /// Instant of the most recent enable; drives earliest-in-first-out
    /// selection for agent-out events.
    pub last_in: SimTime,
}

impl Agent {
    /// Materialise an agent from a blueprint.
    ///
    /// Fails on empty entries, zero line caps (a cap of 0 could never be
    /// satisfied), more lines than a `LineRef` slot can address, or a
    /// non-positive performance factor.
    pub fn from_blueprint(
        id:                 AgentId,
        blueprint:          &[LineBlueprint],
        performance_factor: f64,
    ) -> Result<Self, AgentError> {
        if !(performance_factor > 0.0 && performance_factor.is_finite()) {
            return Err(AgentError::InvalidPerformance(performance_factor));
        }

        let mut lines = Vec::new();
        for entry in blueprint {
            if entry.num_lines == 0 {
                return Err(AgentError::EmptyBlueprintEntry);
            }
            if entry.max_occ == Some(0) {
                return Err(AgentError::ZeroLineCap);
            }
            for _ in 0..entry.num_lines {
                lines.push(Line::new(
                    entry.contact_types.clone(),
                    entry.priority,
                    entry.max_occ,
                ));
            }
        }
        if lines.len() > u16::MAX as usize {
            return Err(AgentError::TooManyLines(lines.len()));
        }

        let max_occ = lines.len() as u32;
        Ok(Self {
            id,
            alias: None,
            performance_factor,
            occupied_lines: 0,
            lines,
            max_occ,
            disabled: true,
            last_in: SimTime::ZERO,
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Bind a contact to a line and bump the occupancy count.
    ///
    /// With `specific` the given slot is occupied directly (the drain scan
    /// has already chosen it).  Otherwise the line is selected among this
    /// agent's free, type-matching lines: lowest priority wins, insertion
    /// order breaks ties.
    pub fn occupy_line(
        &mut self,
        contact:      ContactId,
        contact_type: &str,
        specific:     Option<u16>,
    ) -> Result<LineRef, AgentError> {
        let slot = match specific {
            Some(s) => {
                if s as usize >= self.lines.len() {
                    return Err(AgentError::InvalidSlot(s));
                }
                s
            }
            None => self
                .lines
                .iter()
                .enumerate()
                .filter(|(_, l)| !l.is_occupied() && l.accepts(contact_type))
                .min_by_key(|(_, l)| l.priority)
                .map(|(i, _)| i as u16)
                .ok_or_else(|| AgentError::NoEligibleLine(contact_type.to_owned()))?,
        };

        self.lines[slot as usize].occupy(contact, contact_type)?;
        self.occupied_lines += 1;
        Ok(LineRef::new(self.id, slot))
    }

    /// Release the contact on `slot` and drop the occupancy count.
    pub fn clear_line(&mut self, slot: u16) -> Result<ContactId, AgentError> {
        let line = self
            .lines
            .get_mut(slot as usize)
            .ok_or(AgentError::InvalidSlot(slot))?;
        let contact = line.solve()?;
        self.occupied_lines -= 1;
        Ok(contact)
    }

    // ── In/out of service ─────────────────────────────────────────────────

    /// Bring the agent into service: open every line, stamp `last_in`.
    pub fn enable_lines(&mut self, time: SimTime) -> Result<(), AgentError> {
        if !self.disabled {
            return Err(AgentError::AlreadyEnabled);
        }
        for line in &mut self.lines {
            line.enable();
        }
        self.disabled = false;
        self.last_in = time;
        Ok(())
    }

    /// Take the agent out of service: close every line to new work.
    /// In-flight contacts keep running to completion.
    pub fn disable_lines(&mut self) -> Result<(), AgentError> {
        if self.disabled {
            return Err(AgentError::AlreadyDisabled);
        }
        for line in &mut self.lines {
            line.disable();
        }
        self.disabled = true;
        Ok(())
    }

    // ── Availability ──────────────────────────────────────────────────────

    /// Can this line take new work right now, given the agent's current
    /// occupancy?  (Line-level check only; callers also gate on the
    /// agent-level `disabled` / `max_occ` state.)
    #[inline]
    fn line_takeable(&self, line: &Line) -> bool {
        line.open
            && !line.is_occupied()
            && self.occupied_lines < line.max_occ.unwrap_or(u32::MAX)
    }

    /// Contact type → number of takeable lines.  Empty when the agent is
    /// disabled or at its occupancy ceiling.
    pub fn availability(&self) -> FxHashMap<String, u32> {
        let mut avail = FxHashMap::default();
        if self.disabled || self.occupied_lines == self.max_occ {
            return avail;
        }
        for line in self.lines.iter().filter(|l| self.line_takeable(l)) {
            for ct in &line.contact_types {
                *avail.entry(ct.clone()).or_insert(0) += 1;
            }
        }
        avail
    }

    /// Number of takeable lines for one contact type.
    pub fn available_for(&self, contact_type: &str) -> u32 {
        if self.disabled || self.occupied_lines == self.max_occ {
            return 0;
        }
        self.lines
            .iter()
            .filter(|l| self.line_takeable(l) && l.accepts(contact_type))
            .count() as u32
    }

    /// Slots of all currently occupied lines, in line order.
    pub fn occupied_slots(&self) -> Vec<u16> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_occupied())
            .map(|(i, _)| i as u16)
            .collect()
    }

    #[inline]
    pub fn line(&self, slot: u16) -> Option<&Line> {
        self.lines.get(slot as usize)
    }
}
