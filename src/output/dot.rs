//! DOT (Graphviz) rendering of exit graphs.
//!
//! Node scheme: Inside nodes are green boxes (mutations allowed),
//! Parameter nodes blue ellipses, Load nodes salmon diamonds, the static
//! namespace an orange octagon. Inside edges are solid, outside edges
//! dashed; mutated prestate nodes get a red outline.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{checker, MethodSummary};
use crate::errors::AnalysisError;
use crate::graph::node::sorted_by_id;
use crate::graph::{EdgeKind, Node, PointsToGraph};

/// Directory DOT files are written to, relative to the working directory.
pub const DOT_DIR: &str = "dot-graph";

/// Render one graph as a DOT digraph.
pub fn dot_string(graph: &PointsToGraph, label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape(label));
    let _ = writeln!(out, "  rankdir=LR;");
    let _ = writeln!(out, "  node [fontname=\"Helvetica\", fontsize=10];");
    let _ = writeln!(out, "  edge [fontname=\"Helvetica\", fontsize=9];");
    let _ = writeln!(out);

    let prestate = checker::prestate_nodes(graph);

    for n in sorted_by_id(&graph.all_nodes()) {
        let _ = writeln!(out, "  \"{}\" [{}];", escape(&n.id()), node_attrs(&n));
    }
    let _ = writeln!(out);

    // locals as plaintext satellites
    let mut vars: Vec<_> = graph
        .var_map()
        .iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(v, targets)| (v.name.clone(), sorted_by_id(targets)))
        .collect();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, targets) in vars {
        let _ = writeln!(
            out,
            "  \"var_{}\" [label=\"{}\", shape=plaintext, fontcolor=gray40];",
            escape(&name),
            escape(&name)
        );
        for target in targets {
            let _ = writeln!(
                out,
                "  \"var_{}\" -> \"{}\" [style=dotted, color=gray60];",
                escape(&name),
                escape(&target.id())
            );
        }
    }
    let _ = writeln!(out);

    for kind in [EdgeKind::Inside, EdgeKind::Outside] {
        let style = match kind {
            EdgeKind::Inside => "style=solid, color=black",
            EdgeKind::Outside => "style=dashed, color=gray30",
        };
        let mut triples = graph.edge_triples(kind);
        triples.sort_by(|a, b| (a.0.id(), &a.1, a.2.id()).cmp(&(b.0.id(), &b.1, b.2.id())));
        for (source, field, target) in triples {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\", {}];",
                escape(&source.id()),
                escape(&target.id()),
                escape(&field.name),
                style
            );
        }
    }

    // flag mutated prestate nodes
    let mut mutated: Vec<Node> = graph
        .mutated_fields()
        .iter()
        .map(|(node, _)| node.clone())
        .filter(|node| prestate.contains(node))
        .collect();
    mutated.sort_by_key(|n| n.id());
    mutated.dedup();
    for node in mutated {
        let _ = writeln!(
            out,
            "  \"{}\" [penwidth=3.0, color=red];",
            escape(&node.id())
        );
    }

    let _ = writeln!(out, "}}");
    out
}

/// Write the DOT file for a method summary under [`DOT_DIR`], returning
/// the path written.
pub fn write_dot_file(summary: &MethodSummary) -> Result<PathBuf, AnalysisError> {
    write_dot_file_in(summary, Path::new(DOT_DIR))
}

pub fn write_dot_file_in(summary: &MethodSummary, dir: &Path) -> Result<PathBuf, AnalysisError> {
    fs::create_dir_all(dir).map_err(|e| AnalysisError::io_with_path(e.to_string(), dir))?;
    let path = dir.join(format!("{}.dot", sanitize_file_name(&summary.signature)));
    let dot = dot_string(&summary.exit_graph, &summary.signature);
    fs::write(&path, dot).map_err(|e| AnalysisError::io_with_path(e.to_string(), &path))?;
    Ok(path)
}

fn node_attrs(n: &Node) -> String {
    match n {
        Node::Inside { .. } => {
            let label = format!("{}\\n{}", n.id(), n.label());
            format!("label=\"{}\", shape=box, style=filled, fillcolor=palegreen", escape(&label))
        }
        Node::Parameter { index, .. } => {
            let label = format!("{}\\nparam {}", n.id(), index);
            format!(
                "label=\"{}\", shape=ellipse, style=filled, fillcolor=lightblue",
                escape(&label)
            )
        }
        Node::Load { .. } => {
            let label = format!("{}\\n{}", n.id(), n.label());
            format!(
                "label=\"{}\", shape=diamond, style=filled, fillcolor=lightsalmon",
                escape(&label)
            )
        }
        Node::Global => {
            "label=\"GBL\\n(static)\", shape=octagon, style=filled, fillcolor=orange".to_string()
        }
    }
}

/// Generate a safe filename base from a method signature.
pub fn sanitize_file_name(signature: &str) -> String {
    let mut name = String::with_capacity(signature.len());
    let mut last_was_sep = false;
    for c in signature.chars() {
        if matches!(c, '<' | '>' | ':' | ' ' | '(' | ')' | ',') {
            if !last_was_sep && !name.is_empty() {
                name.push('_');
            }
            last_was_sep = true;
        } else {
            name.push(c);
            last_was_sep = false;
        }
    }
    let name = name.trim_matches('_');
    name.chars().take(80).collect()
}

fn escape(s: &str) -> String {
    // backslashes already placed by callers (\\n line breaks) pass through
    s.replace('"', "\\\"")
}
