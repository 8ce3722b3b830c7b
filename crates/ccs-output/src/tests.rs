//! Tests for the CSV backend, running a small simulation and reading the
//! files back.

use std::fs;

use ccs_agent::LineBlueprint;
use ccs_core::SimTime;
use ccs_sim::Simulation;
use tempfile::tempdir;

use crate::{CsvWriter, OutputWriter};

fn small_run() -> (Simulation, ccs_sim::Log) {
    let mut sim = Simulation::new(17);
    sim.add_contact_type("basic", 5.0, 1.0, None, None).unwrap();
    sim.add_agents(&[LineBlueprint::new(2, vec!["basic".into()], 1)], 1, || 1.0)
        .unwrap();
    sim.generate_basic_io(&[(1, 0)], 60.0, 0.0, true);
    sim.push_arrival(SimTime(1.0), "basic").unwrap();
    sim.push_arrival(SimTime(2.0), "basic").unwrap();
    let log = sim.simulate().unwrap();
    (sim, log)
}

#[test]
fn writes_both_files_with_headers() {
    let (sim, log) = small_run();
    let dir = tempdir().unwrap();

    let mut writer = CsvWriter::new(dir.path()).unwrap();
    writer.write_log(&log).unwrap();
    writer.write_contacts(sim.contacts()).unwrap();
    writer.finish().unwrap();

    let log_csv = fs::read_to_string(dir.path().join("action_log.csv")).unwrap();
    let mut log_lines = log_csv.lines();
    assert_eq!(log_lines.next(), Some("time,action,item_type,item_id"));
    // Header plus one row per log record.
    assert_eq!(log_csv.lines().count(), log.len() + 1);
    assert!(log_csv.contains("simulation_started"));
    assert!(log_csv.contains("contact_handled"));

    let outcomes_csv = fs::read_to_string(dir.path().join("contact_outcomes.csv")).unwrap();
    let mut outcome_lines = outcomes_csv.lines();
    assert_eq!(
        outcome_lines.next(),
        Some("contact_id,contact_type,status,arrival,waiting_time,handling_time,patience,concurrency_at_arrival")
    );
    assert_eq!(outcomes_csv.lines().count(), sim.contacts().len() + 1);
    assert!(outcomes_csv.contains("contact-0,basic,handled"));
}

#[test]
fn infinite_patience_serialises_empty() {
    let (sim, _log) = small_run();
    let dir = tempdir().unwrap();

    let mut writer = CsvWriter::new(dir.path()).unwrap();
    writer.write_contacts(sim.contacts()).unwrap();
    writer.finish().unwrap();

    let outcomes_csv = fs::read_to_string(dir.path().join("contact_outcomes.csv")).unwrap();
    // No patience configured: the patience column is empty, never "inf".
    assert!(!outcomes_csv.contains("inf"));
}

#[test]
fn finish_is_idempotent() {
    let dir = tempdir().unwrap();
    let mut writer = CsvWriter::new(dir.path()).unwrap();
    writer.finish().unwrap();
    writer.finish().unwrap();
}
