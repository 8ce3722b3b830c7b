//! `ccs-output` — export writers for simulation results.
//!
//! One backend is provided: CSV, producing two files:
//!
//! | File                   | Contents                                |
//! |------------------------|-----------------------------------------|
//! | `action_log.csv`       | one row per kernel action, trace order  |
//! | `contact_outcomes.csv` | one row per contact, arena order        |
//!
//! All writers implement [`OutputWriter`]; keeping the trait separate from
//! the backend lets tests drive exports against an in-memory implementation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ccs_output::{CsvWriter, OutputWriter};
//!
//! let log = sim.simulate()?;
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_log(&log)?;
//! writer.write_contacts(sim.contacts())?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::ContactOutcomeRow;
pub use writer::OutputWriter;
