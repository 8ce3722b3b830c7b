//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `action_log.csv`
//! - `contact_outcomes.csv`

use std::fs::File;
use std::path::Path;

use ccs_contact::Contact;
use ccs_sim::Log;
use csv::Writer;

use crate::row::ContactOutcomeRow;
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    log_file:      Writer<File>,
    outcomes_file: Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut log_file = Writer::from_path(dir.join("action_log.csv"))?;
        log_file.write_record(["time", "action", "item_type", "item_id"])?;

        let mut outcomes_file = Writer::from_path(dir.join("contact_outcomes.csv"))?;
        outcomes_file.write_record([
            "contact_id",
            "contact_type",
            "status",
            "arrival",
            "waiting_time",
            "handling_time",
            "patience",
            "concurrency_at_arrival",
        ])?;

        Ok(Self {
            log_file,
            outcomes_file,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_log(&mut self, log: &Log) -> OutputResult<()> {
        for record in log.records() {
            self.log_file.write_record(&[
                record.time.0.to_string(),
                record.action.to_string(),
                record.item_type.to_string(),
                record.item_id.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_contacts(&mut self, contacts: &[Contact]) -> OutputResult<()> {
        for contact in contacts {
            let row = ContactOutcomeRow::from(contact);
            self.outcomes_file.write_record(&[
                row.contact_id,
                row.contact_type,
                row.status,
                row.arrival.to_string(),
                row.waiting_time.to_string(),
                row.handling_time.map(|v| v.to_string()).unwrap_or_default(),
                row.patience.map(|v| v.to_string()).unwrap_or_default(),
                row.concurrency_at_arrival
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.log_file.flush()?;
        self.outcomes_file.flush()?;
        Ok(())
    }
}
