//! Analysis driver: iterates every concrete method of every loaded class,
//! runs the dataflow fixpoint, and reads a verdict from each exit graph.
//!
//! Methods are independent — no shared state is written during analysis —
//! so they fan out across the rayon thread pool; summaries are collected
//! and sorted afterwards for deterministic output.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::{checker, FlowAnalysis, MethodSummary, SafeMethodRegistry};
use crate::config::AnalysisConfig;
use crate::ir::{Cfg, MethodDef, Program};
use crate::output::{dot, text, DebugTrace};

pub struct AnalysisRunner {
    config: AnalysisConfig,
    registry: SafeMethodRegistry,
}

impl AnalysisRunner {
    pub fn new(config: AnalysisConfig, registry: SafeMethodRegistry) -> Self {
        Self { config, registry }
    }

    /// Analyze every concrete method in the program (honoring the method
    /// filter) and return summaries sorted by signature.
    pub fn run(&self, program: &Program) -> Vec<MethodSummary> {
        let methods: Vec<&MethodDef> = program
            .classes
            .iter()
            .flat_map(|class| class.methods.iter())
            .filter(|method| match &self.config.method_filter {
                Some(name) => method.name == *name,
                None => true,
            })
            .collect();

        let mut summaries: Vec<MethodSummary> = methods
            .par_iter()
            .filter_map(|method| self.analyze_method(method))
            .collect();
        summaries.sort_by(|a, b| a.signature.cmp(&b.signature));

        if self.config.show_graph {
            for summary in &summaries {
                text::print_summary(summary);
                match dot::write_dot_file(summary) {
                    Ok(path) => println!("DOT output written to: {}", path.display()),
                    Err(e) => warn!("could not write DOT file for {}: {}", summary.signature, e),
                }
            }
        }

        summaries
    }

    /// Analyze a single method. A body that fails CFG construction is
    /// skipped with a warning rather than aborting the run.
    pub fn analyze_method(&self, method: &MethodDef) -> Option<MethodSummary> {
        let signature = method.signature();
        let cfg = match Cfg::build(method.stmts.clone()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("skipping {signature}: {e}");
                return None;
            }
        };

        debug!("analyzing {signature}");
        let analysis = FlowAnalysis::run(&cfg, method, &self.config, &self.registry);
        let exit_graph = analysis.exit_graph();
        let summary = checker::check(signature.clone(), exit_graph, method.is_constructor());

        if self.config.debug {
            let mut trace = DebugTrace::new(&signature);
            trace.set_ir_listing(cfg.stmts().iter().map(|s| s.to_string()));
            trace.set_milestones(analysis.milestones());
            if let Err(e) = trace.write(&summary) {
                warn!("could not write debug trace for {signature}: {e}");
            }
        }

        Some(summary)
    }
}
