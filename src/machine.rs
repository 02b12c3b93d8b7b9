//! This module defines the [`MultiTapeMachine`], a deterministic k-tape
//! stepping engine. Unlike the branch explorer it follows a single execution
//! path: at each step the first matching rule fires, tapes are mutated in
//! place, and the machine halts when no rule matches.

use crate::types::{NtmError, BLANK_SYMBOL, MAX_MACHINE_STEPS};
use serde::{Deserialize, Serialize};

/// Wildcard symbol in multi-tape rules: matches any symbol on read and leaves
/// the cell unchanged on write.
pub const WILDCARD_SYMBOL: char = '*';

/// Head movements for the multi-tape machine. Unlike the nondeterministic
/// engine, heads here may also stay in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

/// A transition rule covering all tapes at once: the machine must be in
/// `state` and each tape's head symbol must match the corresponding `read`
/// entry (or the wildcard) for the rule to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiTapeRule {
    /// The state this rule applies in.
    pub state: String,
    /// Per-tape symbols to match; `*` matches anything.
    pub read: Vec<char>,
    /// The state the machine moves to.
    pub to_state: String,
    /// Per-tape symbols to write; `*` leaves the cell unchanged.
    pub write: Vec<char>,
    /// Per-tape head movements.
    pub shifts: Vec<Shift>,
}

/// A deterministic multi-tape machine program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTapeProgram {
    /// The name of the program.
    pub name: String,
    /// Number of tapes the machine operates on.
    pub num_tapes: usize,
    /// The state the machine starts in.
    pub initial_state: String,
    /// The transition rules, tried in declaration order.
    pub rules: Vec<MultiTapeRule>,
}

/// The outcome of a single multi-tape machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A rule fired and execution continues.
    Continue,
    /// No rule matched the current state and symbols.
    Halted,
}

/// A running deterministic multi-tape machine.
#[derive(Debug)]
pub struct MultiTapeMachine {
    state: String,
    tapes: Vec<Vec<char>>,
    heads: Vec<usize>,
    program: MultiTapeProgram,
    step_count: usize,
}

impl MultiTapeMachine {
    /// Creates a machine from a program, with every tape holding a single
    /// blank cell and every head at cell 0.
    ///
    /// # Returns
    ///
    /// * `Ok(MultiTapeMachine)` if every rule covers exactly `num_tapes` tapes.
    /// * `Err(NtmError::ValidationError)` otherwise.
    pub fn new(program: MultiTapeProgram) -> Result<Self, NtmError> {
        for rule in &program.rules {
            if rule.read.len() != program.num_tapes
                || rule.write.len() != program.num_tapes
                || rule.shifts.len() != program.num_tapes
            {
                return Err(NtmError::ValidationError(format!(
                    "Rule in state '{}' does not cover all {} tapes",
                    rule.state, program.num_tapes
                )));
            }
        }

        Ok(Self {
            state: program.initial_state.clone(),
            tapes: vec![vec![BLANK_SYMBOL]; program.num_tapes],
            heads: vec![0; program.num_tapes],
            program,
            step_count: 0,
        })
    }

    /// Replaces the content of one tape and resets its head to cell 0.
    pub fn set_tape(&mut self, tape_index: usize, content: &str) -> Result<(), NtmError> {
        if tape_index >= self.tapes.len() {
            return Err(NtmError::ValidationError(format!(
                "Tape index {} is out of bounds (machine has {} tapes)",
                tape_index,
                self.tapes.len()
            )));
        }

        self.tapes[tape_index] = if content.is_empty() {
            vec![BLANK_SYMBOL]
        } else {
            content.chars().collect()
        };
        self.heads[tape_index] = 0;

        Ok(())
    }

    /// Executes a single step: finds the first rule matching the current
    /// state and head symbols, writes, shifts the heads, and changes state.
    pub fn step(&mut self) -> StepOutcome {
        let symbols = self.symbols();

        let rule = match self
            .program
            .rules
            .iter()
            .find(|r| r.state == self.state && Self::matches(&r.read, &symbols))
            .cloned()
        {
            Some(rule) => rule,
            None => return StepOutcome::Halted,
        };

        for i in 0..self.tapes.len() {
            if rule.write[i] != WILDCARD_SYMBOL {
                self.tapes[i][self.heads[i]] = rule.write[i];
            }

            match rule.shifts[i] {
                Shift::Left => {
                    // The left edge is a wall: a left move at cell 0 stays.
                    self.heads[i] = self.heads[i].saturating_sub(1);
                }
                Shift::Right => {
                    self.heads[i] += 1;
                    if self.heads[i] >= self.tapes[i].len() {
                        self.tapes[i].push(BLANK_SYMBOL);
                    }
                }
                Shift::Stay => {}
            }
        }

        self.state = rule.to_state;
        self.step_count += 1;

        StepOutcome::Continue
    }

    /// Runs the machine until it halts or [`MAX_MACHINE_STEPS`] is reached.
    pub fn run(&mut self) -> StepOutcome {
        for _ in 0..MAX_MACHINE_STEPS {
            if self.step() == StepOutcome::Halted {
                return StepOutcome::Halted;
            }
        }

        StepOutcome::Halted
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns a slice of the machine's tapes.
    pub fn tapes(&self) -> &[Vec<char>] {
        &self.tapes
    }

    /// Returns a slice of the machine's head positions.
    pub fn heads(&self) -> &[usize] {
        &self.heads
    }

    /// Returns the symbol currently under each tape's head.
    pub fn symbols(&self) -> Vec<char> {
        self.heads
            .iter()
            .zip(&self.tapes)
            .map(|(&head, tape)| tape.get(head).copied().unwrap_or(BLANK_SYMBOL))
            .collect()
    }

    /// Renders each tape with the head cell wrapped in brackets, e.g.
    /// `1[0]1` for a head on the middle cell.
    pub fn render_tapes(&self) -> Vec<String> {
        self.tapes
            .iter()
            .zip(&self.heads)
            .map(|(tape, &head)| {
                tape.iter()
                    .enumerate()
                    .map(|(i, &symbol)| {
                        if i == head {
                            format!("[{symbol}]")
                        } else {
                            symbol.to_string()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn matches(read: &[char], symbols: &[char]) -> bool {
        read.iter()
            .zip(symbols)
            .all(|(&want, &have)| want == WILDCARD_SYMBOL || want == have)
    }
}
