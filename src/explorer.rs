//! This module implements the branch explorer, the core of the tracer: a
//! level-synchronous breadth-first expansion of machine configurations under a
//! depth bound.
//!
//! Each level of the [`ComputationTree`] holds every configuration reachable
//! in exactly that many steps; every nondeterministic choice becomes its own
//! child configuration with an independent tape snapshot. Because levels are
//! fully materialized before the next one begins, the first level containing
//! an accepting configuration certifies a shortest accepting computation.

use crate::table::{TransitionTable, Transition};
use crate::types::{Direction, NtmError, Verdict, DEFAULT_MAX_DEPTH};
use std::ops::Range;

/// Index of a configuration in the tree arena.
pub type NodeId = usize;

/// A complete snapshot of the machine at one step: state, tape contents, and
/// head position, plus a link to the configuration it was derived from.
///
/// The tape is owned exclusively by its configuration; expansion copies the
/// parent tape and modifies one cell, it never mutates an ancestor. The tape
/// always covers the head (`tape.len() >= head + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// The machine state this configuration is in.
    pub state: String,
    /// The tape snapshot.
    pub tape: Vec<char>,
    /// The cell the head is on.
    pub head: usize,
    /// Arena index of the parent configuration; `None` only for the root.
    pub parent: Option<NodeId>,
}

/// The tree of every configuration reached within the depth bound, organized
/// by step number.
///
/// Configurations live in a flat arena; each level is a contiguous index
/// range, appended once and never modified afterwards. Level 0 holds exactly
/// the root configuration.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ComputationTree {
    nodes: Vec<Configuration>,
    levels: Vec<Range<NodeId>>,
}

impl ComputationTree {
    /// Total number of configurations created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no configurations at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, i.e. the deepest step count plus one.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The configuration stored at `id`.
    pub fn node(&self, id: NodeId) -> &Configuration {
        &self.nodes[id]
    }

    /// The configurations of level `index`, in creation order.
    pub fn level(&self, index: usize) -> &[Configuration] {
        &self.nodes[self.levels[index].clone()]
    }

    /// The arena index range of level `index`.
    pub fn level_ids(&self, index: usize) -> Range<NodeId> {
        self.levels[index].clone()
    }

    /// Appends a fully built level to the arena.
    fn push_level(&mut self, configs: Vec<Configuration>) {
        let start = self.nodes.len();
        self.nodes.extend(configs);
        self.levels.push(start..self.nodes.len());
    }
}

/// The result of a bounded exploration: the finished tree and the verdict
/// reached when expansion stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    /// The computation tree, complete up to the level at which expansion stopped.
    pub tree: ComputationTree,
    /// Why expansion stopped.
    pub verdict: Verdict,
}

/// Performs the bounded breadth-first expansion of configurations for one
/// transition table.
pub struct Explorer<'a> {
    table: &'a TransitionTable,
    max_depth: usize,
}

impl<'a> Explorer<'a> {
    /// Creates an explorer over `table` with the default depth bound
    /// [`DEFAULT_MAX_DEPTH`].
    pub fn new(table: &'a TransitionTable) -> Self {
        Self {
            table,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of levels to expand beyond the root.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Explores every computation branch for `input`, level by level, until an
    /// accepting configuration appears, every branch dies, or the depth bound
    /// is reached.
    ///
    /// Exploration itself cannot fail: a pair with no matching rule becomes an
    /// explicit child in the reject state, and both exhaustion and the depth
    /// bound are ordinary verdicts. The only error is an input string using a
    /// symbol outside the declared input alphabet.
    pub fn explore(&self, input: &str) -> Result<Exploration, NtmError> {
        self.table.validate_input(input)?;

        let blank = self.table.blank();
        let mut tape: Vec<char> = input.chars().collect();
        if tape.is_empty() {
            tape.push(blank);
        }

        let mut tree = ComputationTree::default();
        tree.push_level(vec![Configuration {
            state: self.table.start_state().to_string(),
            tape,
            head: 0,
            parent: None,
        }]);

        // A machine whose start state is the accept state accepts in 0 steps.
        if self.table.start_state() == self.table.accept_state() {
            return Ok(Exploration {
                tree,
                verdict: Verdict::Accepted,
            });
        }

        for depth in 0..self.max_depth {
            let mut next_level = Vec::new();
            let mut accepted = false;

            for id in tree.level_ids(depth) {
                let config = tree.node(id);
                if config.state == self.table.accept_state()
                    || config.state == self.table.reject_state()
                {
                    // Terminal states are never expanded.
                    continue;
                }

                let symbol = config.tape.get(config.head).copied().unwrap_or(blank);
                let candidates = self.table.lookup(&config.state, symbol);

                if candidates.is_empty() {
                    // No legal move: record the rejection as an explicit node
                    // instead of silently dropping the branch.
                    next_level.push(self.reject_child(config, id));
                } else {
                    for candidate in candidates {
                        if candidate.to_state == self.table.accept_state() {
                            accepted = true;
                        }
                        next_level.push(self.apply(config, id, candidate));
                    }
                }
            }

            if next_level.is_empty() {
                // No branch survives: the whole computation is rejected.
                return Ok(Exploration {
                    tree,
                    verdict: Verdict::Rejected,
                });
            }

            tree.push_level(next_level);

            if accepted {
                // Stop at the first level containing an accepting
                // configuration; this certifies a shortest accepting branch.
                return Ok(Exploration {
                    tree,
                    verdict: Verdict::Accepted,
                });
            }
        }

        Ok(Exploration {
            tree,
            verdict: Verdict::BoundExceeded,
        })
    }

    /// Builds the child configuration produced by applying `rule` to `parent`.
    fn apply(&self, parent: &Configuration, id: NodeId, rule: &Transition) -> Configuration {
        let blank = self.table.blank();
        let mut tape = parent.tape.clone();
        if parent.head >= tape.len() {
            tape.resize(parent.head + 1, blank);
        }
        tape[parent.head] = rule.write;

        let head = match rule.direction {
            // The left edge is a wall in this bounded model: a left move at
            // cell 0 leaves the head in place.
            Direction::Left => parent.head.saturating_sub(1),
            Direction::Right => {
                let head = parent.head + 1;
                if head >= tape.len() {
                    tape.push(blank);
                }
                head
            }
        };

        Configuration {
            state: rule.to_state.clone(),
            tape,
            head,
            parent: Some(id),
        }
    }

    /// Builds the synthesized reject-state child for a configuration with no
    /// legal move: same tape, same head position.
    fn reject_child(&self, parent: &Configuration, id: NodeId) -> Configuration {
        let mut tape = parent.tape.clone();
        if parent.head >= tape.len() {
            tape.resize(parent.head + 1, self.table.blank());
        }

        Configuration {
            state: self.table.reject_state().to_string(),
            tape,
            head: parent.head,
            parent: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, MachineSpec, RuleRecord, BLANK_SYMBOL};

    fn rule(from: &str, read: char, to: &str, write: char, direction: Direction) -> RuleRecord {
        RuleRecord {
            from_state: from.to_string(),
            read,
            to_state: to.to_string(),
            write,
            direction,
        }
    }

    /// Recognizes binary strings with an even number of 1s, with a
    /// nondeterministic shortcut rule from q2 straight into the accept state.
    fn even_ones_spec() -> MachineSpec {
        MachineSpec {
            name: "EvenOnes".to_string(),
            states: vec![
                "q1".to_string(),
                "q2".to_string(),
                "qacc".to_string(),
                "qrej".to_string(),
            ],
            input_alphabet: vec!['0', '1'],
            tape_alphabet: vec!['0', '1', BLANK_SYMBOL],
            start_state: "q1".to_string(),
            accept_state: "qacc".to_string(),
            reject_state: "qrej".to_string(),
            rules: vec![
                rule("q1", '0', "q1", '0', Direction::Right),
                rule("q1", '1', "q2", '1', Direction::Right),
                rule("q1", '_', "qacc", '_', Direction::Right),
                rule("q2", '0', "q2", '0', Direction::Right),
                rule("q2", '1', "q1", '1', Direction::Right),
                rule("q2", '1', "qacc", '1', Direction::Right),
            ],
        }
    }

    fn explore(spec: &MachineSpec, input: &str) -> Exploration {
        let table = TransitionTable::build(spec).unwrap();
        Explorer::new(&table).explore(input).unwrap()
    }

    #[test]
    fn test_accepts_even_ones() {
        let exploration = explore(&even_ones_spec(), "11");

        assert_eq!(exploration.verdict, Verdict::Accepted);
        // Root level plus two expansion levels; acceptance appears at level 2.
        assert_eq!(exploration.tree.depth(), 3);
        assert!(exploration
            .tree
            .level(2)
            .iter()
            .any(|c| c.state == "qacc"));
        // Levels 0 and 1 contain no accepting configuration (minimality).
        for level in 0..2 {
            assert!(exploration
                .tree
                .level(level)
                .iter()
                .all(|c| c.state != "qacc"));
        }
    }

    #[test]
    fn test_rejects_single_one() {
        let exploration = explore(&even_ones_spec(), "1");

        assert_eq!(exploration.verdict, Verdict::Rejected);
        // q1 -> q2, then q2 reads blank with no rule: an explicit reject node.
        let deepest = exploration.tree.level(exploration.tree.depth() - 1);
        assert!(deepest.iter().all(|c| c.state == "qrej"));
    }

    #[test]
    fn test_accepts_empty_input() {
        // Zero 1s is even: q1 reads the blank and accepts in one step.
        let exploration = explore(&even_ones_spec(), "");

        assert_eq!(exploration.verdict, Verdict::Accepted);
        assert_eq!(exploration.tree.depth(), 2);
        assert_eq!(exploration.tree.node(0).tape, vec![BLANK_SYMBOL]);
    }

    #[test]
    fn test_rejects_invalid_input_symbol() {
        let table = TransitionTable::build(&even_ones_spec()).unwrap();
        let result = Explorer::new(&table).explore("1a1");

        assert_eq!(result.unwrap_err(), NtmError::InvalidInputSymbol('a'));
    }

    #[test]
    fn test_no_rule_becomes_explicit_reject_node() {
        let mut spec = even_ones_spec();
        spec.rules = vec![rule("q1", '1', "q2", '1', Direction::Right)];
        let exploration = explore(&spec, "1");

        assert_eq!(exploration.verdict, Verdict::Rejected);
        assert_eq!(exploration.tree.depth(), 3);

        // The synthesized node keeps the tape and head of its parent.
        let parent = &exploration.tree.level(1)[0];
        let reject = &exploration.tree.level(2)[0];
        assert_eq!(reject.state, "qrej");
        assert_eq!(reject.tape, parent.tape);
        assert_eq!(reject.head, parent.head);
    }

    #[test]
    fn test_bound_exceeded_on_looping_machine() {
        let mut spec = even_ones_spec();
        spec.rules = vec![
            rule("q1", '0', "q1", '0', Direction::Right),
            rule("q1", '_', "q1", '_', Direction::Right),
        ];
        let table = TransitionTable::build(&spec).unwrap();
        let exploration = Explorer::new(&table)
            .with_max_depth(5)
            .explore("0")
            .unwrap();

        assert_eq!(exploration.verdict, Verdict::BoundExceeded);
        // Termination within max_depth + 1 levels.
        assert_eq!(exploration.tree.depth(), 6);
    }

    #[test]
    fn test_shortest_accepting_branch_wins() {
        // Two candidates for (q1, '1'): a 1-step accept and a branch that
        // would accept later. The run must stop at level 1.
        let mut spec = even_ones_spec();
        spec.rules = vec![
            rule("q1", '1', "qacc", '1', Direction::Right),
            rule("q1", '1', "q2", '1', Direction::Right),
            rule("q2", '1', "qacc", '1', Direction::Right),
        ];
        let exploration = explore(&spec, "11");

        assert_eq!(exploration.verdict, Verdict::Accepted);
        assert_eq!(exploration.tree.depth(), 2);
        assert_eq!(exploration.tree.level(1)[0].state, "qacc");
    }

    #[test]
    fn test_branching_creates_children_in_rule_order() {
        let exploration = explore(&even_ones_spec(), "11");

        // Level 2 expands the q2 configuration; its two '1' rules fire in
        // declaration order: q1 first, then qacc.
        let states: Vec<&str> = exploration
            .tree
            .level(2)
            .iter()
            .map(|c| c.state.as_str())
            .collect();
        assert_eq!(states, vec!["q1", "qacc"]);
    }

    #[test]
    fn test_right_move_extends_tape_with_blank() {
        let exploration = explore(&even_ones_spec(), "1");

        // After consuming the single input symbol the head sits on a fresh
        // blank cell.
        let child = &exploration.tree.level(1)[0];
        assert_eq!(child.tape, vec!['1', BLANK_SYMBOL]);
        assert_eq!(child.head, 1);
    }

    #[test]
    fn test_left_move_at_cell_zero_stays() {
        let mut spec = even_ones_spec();
        spec.rules = vec![rule("q1", '1', "q2", '0', Direction::Left)];
        let exploration = explore(&spec, "1");

        let child = &exploration.tree.level(1)[0];
        assert_eq!(child.state, "q2");
        assert_eq!(child.head, 0);
        assert_eq!(child.tape, vec!['0']);
    }

    #[test]
    fn test_tape_always_covers_head() {
        let exploration = explore(&even_ones_spec(), "0101");

        for id in 0..exploration.tree.len() {
            let config = exploration.tree.node(id);
            assert!(config.tape.len() >= config.head + 1);
        }
    }

    #[test]
    fn test_sibling_tapes_are_independent_snapshots() {
        let exploration = explore(&even_ones_spec(), "11");

        // The two level-2 siblings share a parent but own distinct tapes.
        let level = exploration.tree.level(2);
        assert_eq!(level.len(), 2);
        assert_eq!(level[0].parent, level[1].parent);
        assert_ne!(level[0].tape.as_ptr(), level[1].tape.as_ptr());
    }

    #[test]
    fn test_identical_runs_produce_identical_trees() {
        let first = explore(&even_ones_spec(), "0110");
        let second = explore(&even_ones_spec(), "0110");

        assert_eq!(first, second);
    }

    #[test]
    fn test_start_state_equal_to_accept_state() {
        let mut spec = even_ones_spec();
        spec.start_state = "qacc".to_string();
        spec.rules.clear();
        let exploration = explore(&spec, "1");

        assert_eq!(exploration.verdict, Verdict::Accepted);
        assert_eq!(exploration.tree.depth(), 1);
    }

    #[test]
    fn test_every_non_root_has_a_parent() {
        let exploration = explore(&even_ones_spec(), "101");

        let root_ids = exploration.tree.level_ids(0);
        assert_eq!(root_ids.len(), 1);
        for id in 0..exploration.tree.len() {
            let config = exploration.tree.node(id);
            if root_ids.contains(&id) {
                assert_eq!(config.parent, None);
            } else {
                assert!(config.parent.is_some());
            }
        }
    }
}
