//! `ccs-core` — foundational types for the `rust_ccsim` contact-center
//! simulator.
//!
//! This crate is a dependency of every other `ccs-*` crate.  It intentionally
//! has no `ccs-*` dependencies and minimal external ones (only `rand` and
//! `rand_distr`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                      |
//! |----------|-----------------------------------------------|
//! | [`ids`]  | `AgentId`, `ContactId`, `LineRef`             |
//! | [`time`] | `SimTime` (continuous, totally ordered)       |
//! | [`rng`]  | `SimRng` (seeded, threaded through all sites) |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AgentId, ContactId, LineRef};
pub use rng::SimRng;
pub use time::SimTime;
