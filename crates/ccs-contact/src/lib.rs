//! `ccs-contact` — the contact state machine and per-type handling
//! configuration for the `rust_ccsim` simulator.
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`config`]  | `ContactTypeConfig` (base/increment AHT, patience, auto-solve) |
//! | [`contact`] | `Contact` lifecycle: created → handled \| abandoned \| auto-solved |
//! | [`error`]   | `ConfigError`, `ContactError`                           |

pub mod config;
pub mod contact;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ContactTypeConfig;
pub use contact::{ConcurrencyRecord, Contact, ContactStatus, HtDistro, ServeTerms};
pub use error::{ConfigError, ContactError};
