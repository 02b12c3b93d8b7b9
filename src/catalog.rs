//! This module embeds a small catalog of sample machine definitions and
//! provides lookup helpers over them.

use crate::types::{MachineSpec, NtmError};

use std::sync::RwLock;

// Default embedded machines
const MACHINE_TEXTS: [&str; 3] = [
    include_str!("../machines/even-ones.ntm"),
    include_str!("../machines/contains-101.ntm"),
    include_str!("../machines/starts-with-one.ntm"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<MachineSpec>> = RwLock::new(Vec::new());
}

/// Summary information about one catalog machine.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineInfo {
    /// Position of the machine in the catalog.
    pub index: usize,
    /// The machine's declared name.
    pub name: String,
    /// The state the machine starts in.
    pub start_state: String,
    /// Number of declared states.
    pub state_count: usize,
    /// Number of transition rules.
    pub rule_count: usize,
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Parses the embedded machine definitions into the shared catalog.
    pub fn load() -> Result<(), NtmError> {
        let mut machines = Vec::new();

        for text in MACHINE_TEXTS {
            machines.push(crate::parser::parse(text)?);
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(NtmError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn count() -> usize {
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<MachineSpec, NtmError> {
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                NtmError::ValidationError(format!("Machine index {} out of range", index))
            })
    }

    /// Get a machine by its declared name
    pub fn get_by_name(name: &str) -> Result<MachineSpec, NtmError> {
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NtmError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|spec| spec.name == name)
            .cloned()
            .ok_or_else(|| NtmError::ValidationError(format!("Machine '{}' not found", name)))
    }

    /// List all machine names
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|spec| spec.name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get summary information about a machine by its index
    pub fn info(index: usize) -> Result<MachineInfo, NtmError> {
        let spec = Self::get_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: spec.name.clone(),
            start_state: spec.start_state.clone(),
            state_count: spec.states.len(),
            rule_count: spec.rules.len(),
        })
    }
}
