//! Purity decision over the exit graph.
//!
//! Two closures drive the verdict: the prestate support (parameters plus
//! everything reachable from them along outside edges) and the globally
//! accessible closure (escaped nodes and the static namespace, closed
//! under all edges). A method is pure when no prestate node is mutated or
//! globally reachable, no static field was written, and no unknown callee
//! was invoked.

use std::collections::VecDeque;

use im::HashSet;

use crate::analysis::summary::{MethodSummary, Verdict};
use crate::graph::node::sorted_by_id;
use crate::graph::{EdgeKind, MutatedField, Node, PointsToGraph};

/// Decide purity for one method from its fixpoint exit graph.
///
/// The graph invariants are validated first; a violated graph yields
/// `Verdict::GraphViolation` rather than a purity claim.
pub fn check(
    signature: impl Into<String>,
    exit_graph: PointsToGraph,
    is_constructor: bool,
) -> MethodSummary {
    let signature = signature.into();

    let violations = exit_graph.validate();
    if !violations.is_empty() {
        let reason = violations.join("; ");
        return MethodSummary::new(signature, exit_graph, Verdict::GraphViolation { reason });
    }

    let set_a = prestate_nodes(&exit_graph);
    let set_b = global_escape_closure(&exit_graph);
    let mutations = sorted_mutations(&exit_graph);

    // any static-field write is immediately impure
    for (node, field) in &mutations {
        if *node == Node::global() {
            let field_name = field
                .as_ref()
                .map(|f| f.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            return MethodSummary::new(
                signature,
                exit_graph,
                Verdict::Impure {
                    reason: format!("writes to static field {field_name}"),
                },
            );
        }
    }

    // the sticky flag survives even when no static mutation was recorded:
    // an unknown callee may have written anything
    if exit_graph.has_global_side_effect() {
        return MethodSummary::new(
            signature,
            exit_graph,
            Verdict::Impure {
                reason: "invokes an unknown callee with possible side effects".to_string(),
            },
        );
    }

    for n in sorted_by_id(&set_a) {
        if set_b.contains(&n) {
            return MethodSummary::new(
                signature,
                exit_graph,
                Verdict::Impure {
                    reason: format!("prestate node {} escapes to global scope", n.id()),
                },
            );
        }

        for (node, field) in &mutations {
            if *node != n {
                continue;
            }
            // constructor exception: writes to the receiver's own fields
            // are initialization, not mutation of prior state
            if is_constructor && n.param_index() == Some(0) {
                continue;
            }
            let field_name = field
                .as_ref()
                .map(|f| f.name.as_str())
                .unwrap_or("array element");
            return MethodSummary::new(
                signature,
                exit_graph,
                Verdict::Impure {
                    reason: format!("mutates prestate node {} via field {field_name}", n.id()),
                },
            );
        }
    }

    MethodSummary::new(signature, exit_graph, Verdict::Pure)
}

/// Set A: parameter nodes plus everything reachable from them along
/// outside edges — the objects that existed before the call.
pub fn prestate_nodes(graph: &PointsToGraph) -> HashSet<Node> {
    let mut prestate = HashSet::new();
    let mut worklist = VecDeque::new();

    for n in graph.all_nodes() {
        if matches!(n, Node::Parameter { .. }) {
            prestate.insert(n.clone());
            worklist.push_back(n);
        }
    }

    while let Some(current) = worklist.pop_front() {
        for (_, et) in graph.edges_from(&current) {
            if et.kind == EdgeKind::Outside && prestate.insert(et.target.clone()).is_none() {
                worklist.push_back(et.target);
            }
        }
    }

    prestate
}

/// Set B: the escape set and the static namespace, closed under all
/// edges — everything potentially visible to the rest of the program.
pub fn global_escape_closure(graph: &PointsToGraph) -> HashSet<Node> {
    let mut closure = HashSet::new();
    let mut worklist = VecDeque::new();

    for n in graph.escaped() {
        if closure.insert(n.clone()).is_none() {
            worklist.push_back(n.clone());
        }
    }
    if closure.insert(Node::global()).is_none() {
        worklist.push_back(Node::global());
    }

    while let Some(current) = worklist.pop_front() {
        for (_, et) in graph.edges_from(&current) {
            if closure.insert(et.target.clone()).is_none() {
                worklist.push_back(et.target);
            }
        }
    }

    closure
}

fn sorted_mutations(graph: &PointsToGraph) -> Vec<MutatedField> {
    let mut mutations: Vec<MutatedField> = graph.mutated_fields().iter().cloned().collect();
    mutations.sort_by(|(na, fa), (nb, fb)| {
        (na.id(), fa.as_ref().map(|f| f.name.clone()))
            .cmp(&(nb.id(), fb.as_ref().map(|f| f.name.clone())))
    });
    mutations
}
