//! This module renders a finished exploration as a human-readable trace
//! report, and provides the [`trace`] facade that wires the table, explorer,
//! and path reconstructor together.

use crate::explorer::{Configuration, Exploration, Explorer};
use crate::path::reconstruct;
use crate::table::TransitionTable;
use crate::types::{MachineSpec, NtmError, Verdict};
use serde::Serialize;
use std::fmt;

/// Renders a configuration as the tape contents with a `[state]` marker
/// inserted immediately before the cell under the head (at the end when the
/// head sits just past the written tape).
pub fn format_configuration(config: &Configuration) -> String {
    let split = config.head.min(config.tape.len());
    let (left, right) = config.tape.split_at(split);
    let left: String = left.iter().collect();
    let right: String = right.iter().collect();

    format!("{left}[{}]{right}", config.state)
}

/// The complete, display-ready result of one traced run: verdict, tree size,
/// and the step-by-step configurations of the reported branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    /// The machine's declared name.
    pub machine_name: String,
    /// The input string the machine ran on.
    pub input: String,
    /// The exploration verdict.
    pub verdict: Verdict,
    /// Total number of configurations created during exploration.
    pub total_configurations: usize,
    /// Number of steps of the reported branch (levels traversed).
    pub steps: usize,
    /// The reported branch, rendered initial to terminal.
    pub path: Vec<String>,
}

impl TraceReport {
    /// Builds a report from a finished exploration and its reconstructed path.
    pub fn new(
        machine_name: &str,
        input: &str,
        exploration: &Exploration,
        path: &[&Configuration],
    ) -> Self {
        Self {
            machine_name: machine_name.to_string(),
            input: input.to_string(),
            verdict: exploration.verdict,
            total_configurations: exploration.tree.len(),
            steps: path.len().saturating_sub(1),
            path: path.iter().map(|c| format_configuration(c)).collect(),
        }
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== Turing Machine Simulation Output ====")?;
        writeln!(f, "Machine Name: {}", self.machine_name)?;
        writeln!(f, "Input String: {}", self.input)?;
        writeln!(f, "Total Configurations: {}", self.total_configurations)?;
        match self.verdict {
            Verdict::Accepted => writeln!(f, "String accepted in {} steps", self.steps)?,
            Verdict::Rejected => writeln!(f, "String rejected in {} steps", self.steps)?,
            Verdict::BoundExceeded => writeln!(
                f,
                "Execution stopped after {} steps (depth limit reached)",
                self.steps
            )?,
        }
        writeln!(f, "---- Computation Steps ----")?;
        for step in &self.path {
            writeln!(f, "  {step}")?;
        }
        Ok(())
    }
}

/// Runs one full traced simulation: builds the transition table, explores the
/// branches for `input` up to `max_depth` levels, reconstructs the reported
/// branch, and renders the report.
pub fn trace(spec: &MachineSpec, input: &str, max_depth: usize) -> Result<TraceReport, NtmError> {
    let table = TransitionTable::build(spec)?;
    let exploration = Explorer::new(&table).with_max_depth(max_depth).explore(input)?;
    let path = reconstruct(&exploration.tree, &spec.accept_state);

    Ok(TraceReport::new(&spec.name, input, &exploration, &path))
}
