//! `ccs-sim` — the event-loop kernel of the `rust_ccsim` contact-center
//! simulator.
//!
//! # Dispatch loop
//!
//! ```text
//! loop:
//!   ① Read the head time of each scheduling queue
//!        agent-IO   (time-ordered, fixed instants)
//!        arrivals   (FIFO, sorted at insertion)
//!        handling   (time-ordered, late-bound line ends)
//!      — an empty queue reads as +∞.
//!   ② All +∞ → the simulation is over.
//!   ③ Dispatch the earliest head; ties resolve in the order
//!      agent-IO → arrivals → handling.
//! ```
//!
//! The waiting queue is not a scheduling source: arrivals that find no agent
//! park there, and the drain scan ([`Simulation::check_waiting`] internally)
//! pulls contacts back out whenever an agent gains capacity (a handling
//! completion or an agent-in event).
//!
//! # Concurrency rescale
//!
//! Effective AHT depends on how many contacts an agent handles at once, so
//! every occupancy change re-stretches the *remaining* handling time of that
//! agent's in-flight contacts.  Served time never moves; only the projected
//! tail does.  Handling-completion events carry no fixed instant — their
//! time is re-read from the contact on every ordering decision.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ccs_agent::LineBlueprint;
//! use ccs_sim::Simulation;
//!
//! let mut sim = Simulation::new(42);
//! sim.add_contact_type("basic", 10.0, 4.0, Some(120.0), None)?;
//! sim.add_agents(&[LineBlueprint::new(2, vec!["basic".into()], 1)], 5, || 1.0)?;
//! sim.generate_basic_io(&[(5, 0), (0, 5)], 60.0, 0.0, true);
//! sim.add_arrivals(&[12, 15], "basic", 60.0, 4)?;
//! let log = sim.simulate()?;
//! println!("handled {} missed {}", sim.handled.len(), sim.missed.len());
//! ```

pub mod error;
pub mod generate;
pub mod log;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use generate::CoverageTest;
pub use log::{Log, LogAction, LogItemType, LogRecord};
pub use sim::{HandledRecord, MissedRecord, Simulation};
