//! This module defines the [`TransitionTable`], the immutable lookup structure
//! the branch explorer consults at every step. It is built once from a
//! validated [`MachineSpec`] and maps `(state, symbol)` pairs to the ordered
//! list of candidate transitions declared for that pair.

use crate::types::{Direction, MachineSpec, NtmError, BLANK_SYMBOL};
use std::collections::{HashMap, HashSet};

/// A single resolved transition: target state, symbol to write, and head
/// movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The state the machine moves to.
    pub to_state: String,
    /// The symbol written at the head position.
    pub write: char,
    /// The direction the head moves afterwards.
    pub direction: Direction,
}

/// An immutable mapping from `(state, symbol)` to the candidate transitions
/// for that pair, in declaration order.
///
/// Several candidates under one key encode nondeterminism; an absent key means
/// there is no legal move from that configuration. The table also carries the
/// scalar machine identifiers the explorer and reconstructor need.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    rules: HashMap<String, HashMap<char, Vec<Transition>>>,
    start_state: String,
    accept_state: String,
    reject_state: String,
    input_alphabet: HashSet<char>,
}

impl TransitionTable {
    /// Builds a `TransitionTable` from a machine definition.
    ///
    /// Every rule is validated against the declared state set and tape
    /// alphabet; the first offending rule aborts construction. Within each
    /// `(state, symbol)` bucket the declaration order of the rules is
    /// preserved, because that order decides the child-creation order during
    /// exploration.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if every rule references declared states and symbols.
    /// * `Err(NtmError::UndeclaredState)` for a rule naming an unknown state.
    /// * `Err(NtmError::UndeclaredSymbol)` for a rule using an unknown symbol.
    pub fn build(spec: &MachineSpec) -> Result<Self, NtmError> {
        let states: HashSet<&str> = spec.states.iter().map(String::as_str).collect();
        let tape_alphabet: HashSet<char> = spec.tape_alphabet.iter().copied().collect();

        let mut rules: HashMap<String, HashMap<char, Vec<Transition>>> = HashMap::new();

        for rule in &spec.rules {
            if !states.contains(rule.from_state.as_str()) {
                return Err(NtmError::UndeclaredState(rule.from_state.clone()));
            }
            if !states.contains(rule.to_state.as_str()) {
                return Err(NtmError::UndeclaredState(rule.to_state.clone()));
            }
            if !tape_alphabet.contains(&rule.read) {
                return Err(NtmError::UndeclaredSymbol(rule.read));
            }
            if !tape_alphabet.contains(&rule.write) {
                return Err(NtmError::UndeclaredSymbol(rule.write));
            }

            rules
                .entry(rule.from_state.clone())
                .or_default()
                .entry(rule.read)
                .or_default()
                .push(Transition {
                    to_state: rule.to_state.clone(),
                    write: rule.write,
                    direction: rule.direction,
                });
        }

        Ok(Self {
            rules,
            start_state: spec.start_state.clone(),
            accept_state: spec.accept_state.clone(),
            reject_state: spec.reject_state.clone(),
            input_alphabet: spec.input_alphabet.iter().copied().collect(),
        })
    }

    /// Returns the candidate transitions for `(state, symbol)` in declaration
    /// order. An empty slice means no legal move exists for the pair.
    pub fn lookup(&self, state: &str, symbol: char) -> &[Transition] {
        self.rules
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Checks that every symbol of `input` is part of the declared input
    /// alphabet.
    pub fn validate_input(&self, input: &str) -> Result<(), NtmError> {
        match input.chars().find(|c| !self.input_alphabet.contains(c)) {
            Some(symbol) => Err(NtmError::InvalidInputSymbol(symbol)),
            None => Ok(()),
        }
    }

    /// The state the machine starts in.
    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    /// The designated accepting state.
    pub fn accept_state(&self) -> &str {
        &self.accept_state
    }

    /// The designated rejecting state.
    pub fn reject_state(&self) -> &str {
        &self.reject_state
    }

    /// The blank symbol used when reading or moving past the tape edge.
    pub fn blank(&self) -> char {
        BLANK_SYMBOL
    }
}
