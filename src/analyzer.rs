//! This module provides functions for analyzing machine definitions to detect
//! common errors and inconsistencies before a table is built and a run begins.
//! This includes checks for the declared state set, the special states, the
//! alphabets, and reachability of declared states.

use crate::types::{MachineSpec, NtmError, BLANK_SYMBOL};
use std::collections::{HashMap, HashSet};

/// Represents various errors that can be found during the analysis of a
/// machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates that a declared list (states or an alphabet) is empty.
    EmptyDeclaration(&'static str),
    /// Indicates that the same state identifier was declared twice.
    DuplicateState(String),
    /// Indicates that the start state is not in the declared state set.
    InvalidStartState(String),
    /// Indicates that the accept state is not in the declared state set.
    InvalidAcceptState(String),
    /// Indicates that the reject state is not in the declared state set.
    InvalidRejectState(String),
    /// Indicates that the accept and reject states are the same identifier.
    AcceptRejectOverlap(String),
    /// Indicates that the blank symbol is missing from the tape alphabet, or
    /// wrongly present in the input alphabet.
    BlankSymbolMisuse(String),
    /// Indicates input symbols that are not part of the tape alphabet.
    InputSymbolsNotOnTape(Vec<char>),
    /// Indicates declared states that cannot be reached from the start state.
    UnreachableStates(Vec<String>),
}

impl From<AnalysisError> for NtmError {
    /// Converts an `AnalysisError` into an `NtmError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptyDeclaration(what) => {
                NtmError::ValidationError(format!("No {} declared", what))
            }
            AnalysisError::DuplicateState(state) => {
                NtmError::ValidationError(format!("Duplicate state declaration: {}", state))
            }
            AnalysisError::InvalidStartState(state) => {
                NtmError::ValidationError(format!("Start state is not declared: {}", state))
            }
            AnalysisError::InvalidAcceptState(state) => {
                NtmError::ValidationError(format!("Accept state is not declared: {}", state))
            }
            AnalysisError::InvalidRejectState(state) => {
                NtmError::ValidationError(format!("Reject state is not declared: {}", state))
            }
            AnalysisError::AcceptRejectOverlap(state) => NtmError::ValidationError(format!(
                "Accept and reject states must differ, both are: {}",
                state
            )),
            AnalysisError::BlankSymbolMisuse(msg) => NtmError::ValidationError(msg),
            AnalysisError::InputSymbolsNotOnTape(symbols) => NtmError::ValidationError(format!(
                "Input alphabet symbols missing from tape alphabet: {:?}",
                symbols
            )),
            AnalysisError::UnreachableStates(states) => NtmError::ValidationError(format!(
                "Unreachable states detected: {:?}",
                states
            )),
        }
    }
}

/// Analyzes a given [`MachineSpec`] for structural and logical errors.
///
/// This function runs a series of checks over the declared sets and the
/// transition rules. The first failing check is reported.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(NtmError::ValidationError)` if any validation rule is violated.
pub fn analyze(spec: &MachineSpec) -> Result<(), NtmError> {
    let first_error = [
        check_declarations,
        check_special_states,
        check_alphabets,
        check_unreachable_states,
    ]
    .iter()
    .find_map(|f| f(spec).err());

    match first_error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Checks that the declared lists are non-empty and that no state is declared
/// twice.
fn check_declarations(spec: &MachineSpec) -> Result<(), AnalysisError> {
    if spec.states.is_empty() {
        return Err(AnalysisError::EmptyDeclaration("states"));
    }
    if spec.input_alphabet.is_empty() {
        return Err(AnalysisError::EmptyDeclaration("input alphabet symbols"));
    }
    if spec.tape_alphabet.is_empty() {
        return Err(AnalysisError::EmptyDeclaration("tape alphabet symbols"));
    }

    let mut seen = HashSet::new();
    for state in &spec.states {
        if !seen.insert(state.as_str()) {
            return Err(AnalysisError::DuplicateState(state.clone()));
        }
    }

    Ok(())
}

/// Checks that the start, accept, and reject states are all declared, and that
/// accept and reject are distinct.
fn check_special_states(spec: &MachineSpec) -> Result<(), AnalysisError> {
    let states: HashSet<&str> = spec.states.iter().map(String::as_str).collect();

    if !states.contains(spec.start_state.as_str()) {
        return Err(AnalysisError::InvalidStartState(spec.start_state.clone()));
    }
    if !states.contains(spec.accept_state.as_str()) {
        return Err(AnalysisError::InvalidAcceptState(spec.accept_state.clone()));
    }
    if !states.contains(spec.reject_state.as_str()) {
        return Err(AnalysisError::InvalidRejectState(spec.reject_state.clone()));
    }
    if spec.accept_state == spec.reject_state {
        return Err(AnalysisError::AcceptRejectOverlap(spec.accept_state.clone()));
    }

    Ok(())
}

/// Checks the relationship between the two alphabets and the blank symbol:
/// the tape alphabet must contain the blank, the input alphabet must not, and
/// every input symbol must also be a tape symbol.
fn check_alphabets(spec: &MachineSpec) -> Result<(), AnalysisError> {
    let tape: HashSet<char> = spec.tape_alphabet.iter().copied().collect();

    if !tape.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::BlankSymbolMisuse(format!(
            "Tape alphabet must include the blank symbol '{}'",
            BLANK_SYMBOL
        )));
    }
    if spec.input_alphabet.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::BlankSymbolMisuse(format!(
            "Input alphabet must not include the blank symbol '{}'",
            BLANK_SYMBOL
        )));
    }

    let mut missing: Vec<char> = spec
        .input_alphabet
        .iter()
        .filter(|c| !tape.contains(c))
        .copied()
        .collect();

    if !missing.is_empty() {
        missing.sort_unstable();
        missing.dedup();
        return Err(AnalysisError::InputSymbolsNotOnTape(missing));
    }

    Ok(())
}

/// Checks for unreachable states by traversing the transition rules from the
/// start state.
///
/// The accept and reject states are exempt: the reject state is implicitly
/// reachable through synthesized rejections, and machines may reach the accept
/// state without naming it in every branch.
fn check_unreachable_states(spec: &MachineSpec) -> Result<(), AnalysisError> {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for rule in &spec.rules {
        outgoing
            .entry(rule.from_state.as_str())
            .or_default()
            .push(rule.to_state.as_str());
    }

    let mut visited = HashSet::new();
    let mut queue = vec![spec.start_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }
        if let Some(next_states) = outgoing.get(state) {
            for next in next_states {
                if !visited.contains(next) {
                    queue.push(next);
                }
            }
        }
    }

    let mut unreachable: Vec<String> = spec
        .states
        .iter()
        .filter(|s| {
            !visited.contains(s.as_str())
                && **s != spec.accept_state
                && **s != spec.reject_state
        })
        .cloned()
        .collect();

    if !unreachable.is_empty() {
        unreachable.sort(); // Sort for deterministic output
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}
