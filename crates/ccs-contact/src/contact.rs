//! The contact state machine.
//!
//! A contact is one unit of work moving through exactly one transition:
//!
//! ```text
//! created ──materialise_handling──▶ handled | abandoned | auto-solved
//! ```
//!
//! The transition is irreversible.  A handled contact's *remaining* time can
//! still be rescaled afterwards ([`Contact::update_handling`]) whenever its
//! agent's concurrency changes; the time already served never moves.

use ccs_core::{ContactId, SimRng, SimTime};

use crate::{ContactError, ContactTypeConfig};

// ── Supporting types ──────────────────────────────────────────────────────────

/// Which distribution materialisation draws the handling time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HtDistro {
    /// Gamma with shape 2 and scale `aht / 2` (mean `aht`).
    #[default]
    Gamma2,
    /// Exponential with mean `aht`.
    Exponential,
}

/// Lifecycle state.  `Created` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactStatus {
    Created,
    Handled,
    Abandoned,
    AutoSolved,
}

impl ContactStatus {
    /// Wire-format name used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Created    => "created",
            ContactStatus::Handled    => "handled",
            ContactStatus::Abandoned  => "abandoned",
            ContactStatus::AutoSolved => "auto-solved",
        }
    }
}

/// One entry in a contact's concurrency history: the agent's concurrency
/// from `time` onward, as seen by this contact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcurrencyRecord {
    pub concurrency: u32,
    pub time:        SimTime,
}

/// The serving terms for a materialisation that may end in `Handled`: the
/// effective AHT (performance-scaled, concurrency-adjusted) and the
/// concurrency the contact starts under.
///
/// The missed-drain path passes `None` instead — it has already established
/// via [`Contact::check_missed`] that a threshold is exceeded, so no
/// handling time will be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServeTerms {
    pub aht:         f64,
    pub concurrency: u32,
}

// ── Contact ───────────────────────────────────────────────────────────────────

/// One unit of work: arrival instant, sampled patience, handling state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub id:           ContactId,
    pub arrival:      SimTime,
    pub contact_type: String,
    pub ht_distro:    HtDistro,
    pub status:       ContactStatus,

    /// Maximum tolerated wait; drawn once at construction from
    /// `Exp(average_patience)` rounded to a whole unit, or `+∞` when the
    /// type has no patience configured.
    pub patience: f64,

    /// Waiting threshold for self-resolution; `+∞` when not configured.
    pub auto_solve_time: f64,

    /// Fixed once the contact leaves `Created`.
    pub waiting_time: f64,

    /// Drawn at materialisation; `None` until then and for missed contacts.
    pub handling_time: Option<f64>,

    pub concurrency_at_arrival: Option<u32>,
    pub concurrency_history:    Vec<ConcurrencyRecord>,
}

impl Contact {
    /// Build a contact of the given type, sampling patience from the type's
    /// configuration.
    pub fn new(
        id:           ContactId,
        arrival:      SimTime,
        contact_type: impl Into<String>,
        config:       &ContactTypeConfig,
        rng:          &mut SimRng,
    ) -> Self {
        let patience = config
            .average_patience
            .map(|mean| rng.sample_exp(mean).round())
            .unwrap_or(f64::INFINITY);
        Self {
            id,
            arrival,
            contact_type: contact_type.into(),
            ht_distro: HtDistro::default(),
            status: ContactStatus::Created,
            patience,
            auto_solve_time: config.auto_solve_time.unwrap_or(f64::INFINITY),
            waiting_time: 0.0,
            handling_time: None,
            concurrency_at_arrival: None,
            concurrency_history: Vec::new(),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Classify the contact into its terminal state.
    ///
    /// With `serve` terms, an on-time contact becomes `Handled` and draws a
    /// handling time of `clamp(draw, 0.1, 15·aht)` from the configured
    /// distribution.  Without `serve` terms, callers invoke this only after
    /// [`Contact::check_missed`] held, so one of the threshold branches
    /// always fires.
    pub fn materialise_handling(
        &mut self,
        start: Option<SimTime>,
        serve: Option<ServeTerms>,
        rng:   &mut SimRng,
    ) -> ContactStatus {
        let waiting = start.map(|s| s - self.arrival).unwrap_or(0.0);

        if waiting > self.patience {
            self.status = ContactStatus::Abandoned;
            self.waiting_time = self.patience;
        } else if waiting > self.auto_solve_time {
            self.status = ContactStatus::AutoSolved;
            self.waiting_time = self.auto_solve_time;
        } else if let Some(terms) = serve {
            self.status = ContactStatus::Handled;
            let draw = match self.ht_distro {
                HtDistro::Gamma2      => rng.sample_gamma(2.0, terms.aht / 2.0),
                HtDistro::Exponential => rng.sample_exp(terms.aht),
            };
            self.handling_time = Some(draw.min(terms.aht * 15.0).max(0.1));
            self.concurrency_at_arrival = Some(terms.concurrency);
            self.concurrency_history.push(ConcurrencyRecord {
                concurrency: terms.concurrency,
                time:        start.unwrap_or(SimTime::ZERO),
            });
            self.waiting_time = waiting;
        }
        self.status
    }

    /// Rescale the remaining handling time by `factor` at instant `present`
    /// and record the concurrency change.
    ///
    /// Only the projected tail moves: time served before `present` is kept
    /// as-is.  Fails with `EndsInPast` (whole-rounded comparison) when the
    /// projected end has already been reached; the caller skips that update.
    pub fn update_handling(
        &mut self,
        present:         SimTime,
        factor:          f64,
        new_concurrency: u32,
    ) -> Result<(), ContactError> {
        let handling_time = self
            .handling_time
            .ok_or(ContactError::NotHandled { id: self.id })?;
        let handling_end = self.arrival + (self.waiting_time + handling_time);

        if present.round_whole() > handling_end.round_whole() {
            return Err(ContactError::EndsInPast {
                id:      self.id,
                present,
                end:     handling_end,
            });
        }

        let remaining = handling_end - present;
        let new_remaining = remaining * factor;
        self.concurrency_history.push(ConcurrencyRecord {
            concurrency: new_concurrency,
            time:        present,
        });
        self.handling_time = Some(handling_time + (new_remaining - remaining));
        Ok(())
    }

    /// Has this contact already waited past either threshold at `present`?
    pub fn check_missed(&self, present: SimTime) -> bool {
        let waiting = present - self.arrival;
        waiting > self.patience || waiting > self.auto_solve_time
    }

    // ── Derived accessors ─────────────────────────────────────────────────

    /// When handling started (or would have started): arrival plus waiting.
    #[inline]
    pub fn start_at(&self) -> SimTime {
        self.arrival + self.waiting_time
    }

    /// Projected completion instant; `None` until a handling time exists.
    #[inline]
    pub fn end_at(&self) -> Option<SimTime> {
        self.handling_time
            .map(|ht| self.arrival + (self.waiting_time + ht))
    }

    /// Waiting plus handling; `None` until a handling time exists.
    #[inline]
    pub fn total_duration(&self) -> Option<f64> {
        self.handling_time.map(|ht| self.waiting_time + ht)
    }

    /// The most recent concurrency record, if any.
    #[inline]
    pub fn current_concurrency(&self) -> Option<&ConcurrencyRecord> {
        self.concurrency_history.last()
    }
}
