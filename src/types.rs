//! This module defines the core data structures and types used throughout the
//! nondeterministic Turing machine tracer, including machine definitions,
//! transition records, verdicts, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The blank symbol used to fill tape cells beyond the written region.
///
/// Machine definitions must declare this symbol as part of their tape alphabet.
pub const BLANK_SYMBOL: char = '_';
/// The default maximum number of tree levels the branch explorer will build.
pub const DEFAULT_MAX_DEPTH: usize = 15;
/// The maximum number of steps the deterministic multi-tape machine executes
/// before giving up.
pub const MAX_MACHINE_STEPS: usize = 10000;
/// The maximum allowed size for a machine definition in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB

/// A complete nondeterministic Turing machine definition, as produced by the
/// parser from the record-oriented `.ntm` format.
///
/// The declared state and alphabet lists keep their declaration order, and so
/// does `rules`: the branch explorer creates children in rule declaration
/// order, which decides which accepting branch is discovered first when
/// several tie on length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineSpec {
    /// The name of the machine.
    pub name: String,
    /// The declared state set, in declaration order.
    pub states: Vec<String>,
    /// The input alphabet (excluding the blank symbol).
    pub input_alphabet: Vec<char>,
    /// The tape alphabet (including the blank symbol).
    pub tape_alphabet: Vec<char>,
    /// The state the machine starts in.
    pub start_state: String,
    /// The single designated accepting state.
    pub accept_state: String,
    /// The single designated rejecting state.
    pub reject_state: String,
    /// The transition rules, in declaration order.
    pub rules: Vec<RuleRecord>,
}

/// A single raw transition record: `(from_state, read, to_state, write, direction)`.
///
/// Several records may share the same `(from_state, read)` pair; that is the
/// source of nondeterminism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// The state this rule applies in.
    pub from_state: String,
    /// The symbol that must be under the head for this rule to apply.
    pub read: char,
    /// The state the machine moves to.
    pub to_state: String,
    /// The symbol written at the head position.
    pub write: char,
    /// The direction the head moves afterwards.
    pub direction: Direction,
}

/// Head movement directions for the nondeterministic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// The outcome of a bounded branch exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Some branch reached the accepting state.
    Accepted,
    /// Every branch died (reached the rejecting state or had no legal move)
    /// before the depth bound.
    Rejected,
    /// The depth bound was reached with live branches remaining. The run is
    /// inconclusive; callers that only care about acceptance treat it as a
    /// rejection.
    BoundExceeded,
}

impl Verdict {
    /// Whether this verdict certifies acceptance.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::Rejected => write!(f, "rejected"),
            Verdict::BoundExceeded => write!(f, "not accepted (depth limit reached)"),
        }
    }
}

/// Represents various errors that can occur while loading, validating, or
/// running a machine definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NtmError {
    /// Indicates a syntax error in a machine definition.
    #[error("Machine parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a structural or logical problem with a machine definition.
    #[error("Machine validation error: {0}")]
    ValidationError(String),
    /// Indicates that a transition rule references a state outside the
    /// declared state set.
    #[error("Transition rule references undeclared state: {0}")]
    UndeclaredState(String),
    /// Indicates that a transition rule uses a symbol outside the declared
    /// tape alphabet.
    #[error("Transition rule uses symbol '{0}' not in the tape alphabet")]
    UndeclaredSymbol(char),
    /// Indicates that the input string contains a symbol outside the declared
    /// input alphabet.
    #[error("Input symbol '{0}' is not in the input alphabet")]
    InvalidInputSymbol(char),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_rule_record_creation() {
        let rule = RuleRecord {
            from_state: "q1".to_string(),
            read: '1',
            to_state: "q2".to_string(),
            write: '0',
            direction: Direction::Right,
        };

        assert_eq!(rule.read, '1');
        assert_eq!(rule.write, '0');
        assert_eq!(rule.to_state, "q2");
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Accepted.to_string(), "accepted");
        assert_eq!(Verdict::Rejected.to_string(), "rejected");
        assert!(Verdict::BoundExceeded.to_string().contains("depth limit"));
        assert!(Verdict::Accepted.is_accepted());
        assert!(!Verdict::BoundExceeded.is_accepted());
    }

    #[test]
    fn test_error_display() {
        let error = NtmError::UndeclaredState("q9".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("undeclared state"));
        assert!(error_msg.contains("q9"));
    }

    #[test]
    fn test_machine_spec_serde_round_trip() {
        let spec = MachineSpec {
            name: "RoundTrip".to_string(),
            states: vec!["q1".to_string(), "qacc".to_string(), "qrej".to_string()],
            input_alphabet: vec!['0', '1'],
            tape_alphabet: vec!['0', '1', BLANK_SYMBOL],
            start_state: "q1".to_string(),
            accept_state: "qacc".to_string(),
            reject_state: "qrej".to_string(),
            rules: vec![RuleRecord {
                from_state: "q1".to_string(),
                read: '1',
                to_state: "qacc".to_string(),
                write: '1',
                direction: Direction::Right,
            }],
        };

        let json = serde_json::to_string(&spec).unwrap();
        let decoded: MachineSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, decoded);
    }
}
