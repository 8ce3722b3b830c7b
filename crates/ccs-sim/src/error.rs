//! Error types for ccs-sim.
//!
//! Everything here is fatal to simulation *setup*: bad type configuration,
//! bad blueprints, or a queued contact referencing a type nobody registered.
//! Mid-loop failures (occupancy races, stale rescales, empty agent picks)
//! are warned about and skipped — the loop itself never aborts.

use ccs_agent::AgentError;
use ccs_contact::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown contact type {0:?}")]
    UnknownContactType(String),

    #[error("contact type configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("agent setup rejected: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
