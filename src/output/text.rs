//! Text rendering of points-to graphs, presented as `G = ⟨I, O, L, E⟩`.

use std::fmt::Write;

use crate::analysis::{checker, MethodSummary};
use crate::graph::node::sorted_by_id;
use crate::graph::{EdgeKind, Node, PointsToGraph};

/// Render the full graph (nodes, edge sets, locals, escape set, mutation
/// set, prestate set) as plain text. All sections are sorted, so identical
/// graphs render identically.
pub fn render_graph(graph: &PointsToGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "G = ⟨I, O, L, E⟩");
    let _ = writeln!(out);

    let _ = writeln!(out, "Nodes:");
    let nodes = sorted_by_id(&graph.all_nodes());
    if nodes.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for n in &nodes {
        let description = match n {
            Node::Global => " (static fields)".to_string(),
            Node::Parameter { index, .. } => format!(" param {index}"),
            _ if n.label().is_empty() => String::new(),
            _ => format!(" {}", n.label()),
        };
        let _ = writeln!(out, "  {} [{}]{}", n.id(), n.kind().as_str(), description);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "I (Inside Edges):");
    render_edges(&mut out, graph, EdgeKind::Inside);
    let _ = writeln!(out);

    let _ = writeln!(out, "O (Outside Edges):");
    render_edges(&mut out, graph, EdgeKind::Outside);
    let _ = writeln!(out);

    let _ = writeln!(out, "L (Local Variables):");
    let mut vars: Vec<_> = graph
        .var_map()
        .iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(v, targets)| (v.name.clone(), sorted_by_id(targets)))
        .collect();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    if vars.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (name, targets) in vars {
        let ids: Vec<String> = targets.iter().map(Node::id).collect();
        let _ = writeln!(out, "  {} -> {{{}}}", name, ids.join(", "));
    }
    let _ = writeln!(out);

    let mut escaped: Vec<String> = graph.escaped().iter().map(Node::id).collect();
    escaped.sort();
    let _ = writeln!(out, "E (Globally Escaped): {{{}}}", escaped.join(", "));

    let _ = writeln!(out, "W (Mutated Fields): {{{}}}", mutated_fields_str(graph));

    let mut prestate: Vec<String> = checker::prestate_nodes(graph).iter().map(Node::id).collect();
    prestate.sort();
    let _ = writeln!(out, "Prestate Nodes: {{{}}}", prestate.join(", "));

    out
}

/// Print a graph summary for one method to stdout.
pub fn print_summary(summary: &MethodSummary) {
    println!("--- Points-To Graph for {} ---", summary.signature);
    print!("{}", render_graph(&summary.exit_graph));
    println!();
}

fn render_edges(out: &mut String, graph: &PointsToGraph, kind: EdgeKind) {
    let mut triples = graph.edge_triples(kind);
    triples.sort_by(|a, b| (a.0.id(), &a.1, a.2.id()).cmp(&(b.0.id(), &b.1, b.2.id())));
    if triples.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (source, field, target) in triples {
        let _ = writeln!(out, "  {} --{}--> {}", source.id(), field, target.id());
    }
}

pub(crate) fn mutated_fields_str(graph: &PointsToGraph) -> String {
    let mut entries: Vec<String> = graph
        .mutated_fields()
        .iter()
        .map(|(node, field)| {
            let field_name = field.as_ref().map(|f| f.name.as_str()).unwrap_or("[]");
            format!("⟨{}, {}⟩", node.id(), field_name)
        })
        .collect();
    entries.sort();
    entries.join(", ")
}
