//! Node merging: bounds graph growth by enforcing that every
//! `(source, field, edge kind)` triple has at most one target.
//!
//! When a triple acquires two targets, the pair is collapsed into a single
//! representative, chosen by kind priority (`Parameter < Global < Inside <
//! Load`) with lexicographically smaller identity as the tie-break. Each
//! collapse strictly reduces the node count, so the loop terminates.

use std::cmp::Ordering;

use crate::graph::node::Node;
use crate::graph::points_to::{EdgeKind, PointsToGraph};

/// Repeatedly collapse multi-target triples until none remain.
pub fn enforce_uniqueness(graph: &mut PointsToGraph) {
    while let Some((keep, remove)) = find_merge_pair(graph) {
        graph.replace_node(&remove, &keep);
    }
}

/// Find one violating triple and return `(keep, remove)` for it, scanning
/// in sorted order so the merge sequence is deterministic.
fn find_merge_pair(graph: &PointsToGraph) -> Option<(Node, Node)> {
    for kind in [EdgeKind::Inside, EdgeKind::Outside] {
        let mut triples = graph.edge_triples(kind);
        triples.sort_by(|a, b| {
            (a.0.id(), &a.1, a.2.id()).cmp(&(b.0.id(), &b.1, b.2.id()))
        });

        let mut run: Option<(&Node, &crate::ir::FieldRef, &Node)> = None;
        for (source, field, target) in triples.iter() {
            if let Some((prev_source, prev_field, prev_target)) = run {
                if prev_source == source && prev_field == field && prev_target != target {
                    return Some(pick_pair(prev_target, target));
                }
            }
            run = Some((source, field, target));
        }
    }
    None
}

/// Order the two merge candidates into `(keep, remove)`.
fn pick_pair(a: &Node, b: &Node) -> (Node, Node) {
    match a
        .kind()
        .cmp(&b.kind())
        .then_with(|| a.id().cmp(&b.id()))
    {
        Ordering::Less | Ordering::Equal => (a.clone(), b.clone()),
        Ordering::Greater => (b.clone(), a.clone()),
    }
}
