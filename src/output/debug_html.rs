//! Per-method HTML debug traces.
//!
//! One self-contained HTML file per analyzed method under `debug/`: the IR
//! listing, graph snapshots at key milestones of the fixpoint, the exit
//! graph, the derived sets, and the verdict.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{checker, MethodSummary};
use crate::errors::AnalysisError;
use crate::graph::{Node, PointsToGraph};
use crate::output::dot::sanitize_file_name;
use crate::output::text;

/// Directory debug traces are written to, relative to the working
/// directory.
pub const DEBUG_DIR: &str = "debug";

/// Accumulates one method's trace before it is rendered to disk.
pub struct DebugTrace {
    signature: String,
    ir_listing: Vec<String>,
    milestones: Vec<(usize, String, PointsToGraph)>,
}

impl DebugTrace {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            ir_listing: Vec::new(),
            milestones: Vec::new(),
        }
    }

    pub fn set_ir_listing(&mut self, stmts: impl IntoIterator<Item = String>) {
        self.ir_listing = stmts.into_iter().collect();
    }

    pub fn set_milestones(&mut self, milestones: Vec<(usize, String, PointsToGraph)>) {
        self.milestones = milestones;
    }

    /// Render and write the trace under [`DEBUG_DIR`].
    pub fn write(&self, summary: &MethodSummary) -> Result<PathBuf, AnalysisError> {
        self.write_in(summary, Path::new(DEBUG_DIR))
    }

    pub fn write_in(&self, summary: &MethodSummary, dir: &Path) -> Result<PathBuf, AnalysisError> {
        fs::create_dir_all(dir).map_err(|e| AnalysisError::io_with_path(e.to_string(), dir))?;
        let path = dir.join(format!("{}.html", sanitize_file_name(&self.signature)));
        fs::write(&path, self.render(summary))
            .map_err(|e| AnalysisError::io_with_path(e.to_string(), &path))?;
        Ok(path)
    }

    fn render(&self, summary: &MethodSummary) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html><head><meta charset=\"utf-8\">");
        let _ = writeln!(html, "<title>{}</title>", escape(&self.signature));
        let _ = writeln!(
            html,
            "<style>body{{font-family:monospace;margin:2em}}pre{{background:#f6f6f6;\
             padding:1em;border-radius:4px}}h2{{border-bottom:1px solid #ccc}}\
             .pure{{color:#2a7a2a}}.impure{{color:#b03030}}</style>"
        );
        let _ = writeln!(html, "</head><body>");
        let _ = writeln!(html, "<h1>{}</h1>", escape(&self.signature));

        let _ = writeln!(html, "<h2>IR</h2><pre>");
        for (i, stmt) in self.ir_listing.iter().enumerate() {
            let _ = writeln!(html, "{i:>3}: {}", escape(stmt));
        }
        let _ = writeln!(html, "</pre>");

        let _ = writeln!(html, "<h2>Trace</h2>");
        for (id, stmt, graph) in &self.milestones {
            let _ = writeln!(html, "<h3>after {id}: {}</h3>", escape(stmt));
            let _ = writeln!(html, "<pre>{}</pre>", escape(&text::render_graph(graph)));
        }

        let _ = writeln!(html, "<h2>Exit Graph</h2>");
        let _ = writeln!(
            html,
            "<pre>{}</pre>",
            escape(&text::render_graph(&summary.exit_graph))
        );

        let _ = writeln!(html, "<h2>Derived Sets</h2><pre>");
        let _ = writeln!(
            html,
            "A (prestate): {{{}}}",
            node_ids(&checker::prestate_nodes(&summary.exit_graph))
        );
        let _ = writeln!(
            html,
            "B (globally accessible): {{{}}}",
            node_ids(&checker::global_escape_closure(&summary.exit_graph))
        );
        let _ = writeln!(
            html,
            "W (mutated fields): {{{}}}",
            text::mutated_fields_str(&summary.exit_graph)
        );
        let _ = writeln!(
            html,
            "global side effect: {}",
            summary.exit_graph.has_global_side_effect()
        );
        let _ = writeln!(html, "</pre>");

        let class = if summary.verdict.is_pure() {
            "pure"
        } else {
            "impure"
        };
        let _ = write!(
            html,
            "<h2>Verdict</h2><p class=\"{class}\"><b>{}</b>",
            summary.verdict.label()
        );
        if let Some(reason) = summary.verdict.reason() {
            let _ = write!(html, " — {}", escape(reason));
        }
        let _ = writeln!(html, "</p>");
        let _ = writeln!(html, "</body></html>");
        html
    }
}

fn node_ids(nodes: &im::HashSet<Node>) -> String {
    let mut ids: Vec<String> = nodes.iter().map(Node::id).collect();
    ids.sort();
    ids.join(", ")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
