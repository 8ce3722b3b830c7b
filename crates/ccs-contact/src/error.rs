//! Error types for ccs-contact.

use ccs_core::{ContactId, SimTime};
use thiserror::Error;

/// Rejections raised when registering a contact type.
///
/// These are fatal to simulation *setup*: a configuration that fails
/// validation never enters the registry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("base handling time must be positive and finite, got {0}")]
    NonPositiveBase(f64),

    #[error("concurrency increment must be non-negative and finite, got {0}")]
    NegativeIncrement(f64),

    #[error("average patience must be positive and finite, got {0}")]
    NonPositivePatience(f64),

    #[error("auto-solve time must be positive and finite, got {0}")]
    NonPositiveAutoSolve(f64),
}

/// Non-fatal contact-level failures.  The kernel logs these and skips the
/// offending operation; the simulation loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ContactError {
    #[error("{id}: no materialised handling to update")]
    NotHandled { id: ContactId },

    #[error("{id}: handling ends in the past (end {end}, present {present})")]
    EndsInPast {
        id:      ContactId,
        present: SimTime,
        end:     SimTime,
    },
}
