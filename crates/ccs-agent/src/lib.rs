//! `ccs-agent` — agents, their service lines, and the agent pool.
//!
//! An [`Agent`] owns a fixed set of [`Line`]s materialised from a
//! [`LineBlueprint`].  Each line is a single service slot restricted to a set
//! of contact types and ranked by priority.  The [`AgentPool`] is the arena
//! that owns all agents; everything outside it addresses agents by
//! `AgentId` and lines by `LineRef` (arena indices, no back-pointers).
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`line`]  | `Line` — one type-restricted service slot        |
//! | [`agent`] | `LineBlueprint`, `Agent`, occupancy/availability |
//! | [`pool`]  | `AgentPool` — arena plus dispatch lookups        |
//! | [`error`] | `AgentError`                                     |

pub mod agent;
pub mod error;
pub mod line;
pub mod pool;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{Agent, LineBlueprint};
pub use error::AgentError;
pub use line::Line;
pub use pool::AgentPool;
