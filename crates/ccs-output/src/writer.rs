//! The `OutputWriter` trait implemented by all backend writers.

use ccs_contact::Contact;
use ccs_sim::Log;

use crate::OutputResult;

/// Trait implemented by export backends.
pub trait OutputWriter {
    /// Write the full action trace.
    fn write_log(&mut self, log: &Log) -> OutputResult<()>;

    /// Write one outcome row per contact.
    fn write_contacts(&mut self, contacts: &[Contact]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
