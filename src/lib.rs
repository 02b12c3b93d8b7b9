//! This crate provides the core logic for a nondeterministic Turing machine
//! tracer. It includes modules for parsing machine definitions, exploring
//! every computation branch under a depth bound, reconstructing the reported
//! branch, and rendering the trace, along with a simpler deterministic
//! multi-tape machine.

pub mod analyzer;
pub mod catalog;
pub mod explorer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod path;
pub mod table;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the machine catalog types from the catalog module.
pub use catalog::{MachineCatalog, MachineInfo, MACHINES};
/// Re-exports the branch exploration types from the explorer module.
pub use explorer::{ComputationTree, Configuration, Exploration, Explorer, NodeId};
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the deterministic multi-tape machine types from the machine module.
pub use machine::{MultiTapeMachine, MultiTapeProgram, MultiTapeRule, Shift, StepOutcome};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `reconstruct` function from the path module.
pub use path::reconstruct;
/// Re-exports the transition table types from the table module.
pub use table::{Transition, TransitionTable};
/// Re-exports the trace formatting types from the trace module.
pub use trace::{format_configuration, trace, TraceReport};
/// Re-exports machine definition and verdict types from the types module.
pub use types::{
    Direction, MachineSpec, NtmError, RuleRecord, Verdict, BLANK_SYMBOL, DEFAULT_MAX_DEPTH,
    MAX_DEFINITION_SIZE,
};
