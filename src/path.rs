//! This module reconstructs the reported computation from a finished
//! [`ComputationTree`]: it picks the terminal configuration, follows parent
//! links back to the root, and returns the steps in execution order.

use crate::explorer::{ComputationTree, Configuration, NodeId};

/// Reconstructs the root-to-terminal configuration sequence of the reported
/// branch.
///
/// The terminal node is the first accept-state configuration found scanning
/// levels deepest-first and, within a level, in creation order. When the
/// exploration accepted, the accepting level is the deepest one, so this
/// matches the explorer's tie-break. If no configuration is accepting, the
/// last configuration of the deepest level stands in as the representative
/// rejecting terminal.
///
/// # Panics
///
/// Panics if the tree is empty; the explorer always produces at least the
/// root level.
pub fn reconstruct<'t>(tree: &'t ComputationTree, accept_state: &str) -> Vec<&'t Configuration> {
    let mut path = Vec::new();
    let mut current = Some(find_terminal(tree, accept_state));

    while let Some(id) = current {
        let node = tree.node(id);
        path.push(node);
        current = node.parent;
    }

    path.reverse();
    path
}

/// Picks the terminal configuration the reported path ends in.
fn find_terminal(tree: &ComputationTree, accept_state: &str) -> NodeId {
    for level in (0..tree.depth()).rev() {
        for id in tree.level_ids(level) {
            if tree.node(id).state == accept_state {
                return id;
            }
        }
    }

    tree.level_ids(tree.depth() - 1).end - 1
}
