//! Error type for ccs-agent.
//!
//! Occupancy and enable/disable failures are non-fatal to the simulation
//! loop — the kernel logs them and skips the operation.  Blueprint and
//! performance validation failures are fatal to setup.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    // ── Non-fatal (logged and skipped by the kernel) ──────────────────────
    #[error("line already occupied")]
    AlreadyOccupied,

    #[error("line does not accept contact type {0:?}")]
    InvalidContactType(String),

    #[error("no contact on line to solve")]
    NotOccupied,

    #[error("agent already disabled")]
    AlreadyDisabled,

    #[error("agent already enabled")]
    AlreadyEnabled,

    #[error("no free line accepting contact type {0:?}")]
    NoEligibleLine(String),

    #[error("no line at slot {0}")]
    InvalidSlot(u16),

    // ── Fatal to setup ────────────────────────────────────────────────────
    #[error("blueprint entry must provide at least one line")]
    EmptyBlueprintEntry,

    #[error("line max_occ must be at least 1")]
    ZeroLineCap,

    #[error("blueprint materialises {0} lines, more than one agent can hold")]
    TooManyLines(usize),

    #[error("performance factor must be positive and finite, got {0}")]
    InvalidPerformance(f64),
}
