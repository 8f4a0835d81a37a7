//! Forward dataflow fixpoint over one method body.
//!
//! Classic monotone worklist iteration: the flow into a statement is the
//! least upper bound of its predecessors' out-graphs, the transfer runs on
//! a copy, and a statement's successors re-enter the worklist whenever its
//! out-graph changes. Structural graph equality detects the fixpoint; the
//! unique LUB makes the result independent of worklist order.

use std::collections::VecDeque;

use tracing::warn;

use crate::analysis::safe_methods::SafeMethodRegistry;
use crate::analysis::transfer::TransferFunctions;
use crate::config::AnalysisConfig;
use crate::graph::{merger, PointsToGraph};
use crate::ir::{Cfg, MethodDef};

/// Visits per statement before the runaway safeguard trips. Generously
/// above anything a monotone transfer can need; only an implementation
/// bug can reach it.
const MAX_VISITS_PER_STMT: usize = 256;

/// Completed fixpoint for one method: an out-graph per statement.
pub struct FlowAnalysis<'a> {
    cfg: &'a Cfg,
    config: &'a AnalysisConfig,
    flow_after: Vec<PointsToGraph>,
}

impl<'a> FlowAnalysis<'a> {
    /// Run the worklist to fixpoint.
    pub fn run(
        cfg: &'a Cfg,
        method: &MethodDef,
        config: &'a AnalysisConfig,
        registry: &SafeMethodRegistry,
    ) -> Self {
        let len = cfg.len();
        let mut transfer =
            TransferFunctions::new(config, registry, method.is_static, method.param_labels());
        let mut flow_after = vec![PointsToGraph::new(); len];

        let mut worklist: VecDeque<usize> = (0..len).collect();
        let mut queued = vec![true; len];
        let budget = len.saturating_mul(MAX_VISITS_PER_STMT).max(MAX_VISITS_PER_STMT);
        let mut visits = 0usize;

        while let Some(id) = worklist.pop_front() {
            queued[id] = false;

            visits += 1;
            if visits > budget {
                warn!(
                    "fixpoint for {} exceeded {} statement visits; stopping early",
                    method.signature(),
                    budget
                );
                break;
            }

            let mut out = Self::flow_into(cfg, config, &flow_after, id);
            transfer.apply(id, cfg.stmt(id), &mut out);

            if out != flow_after[id] {
                flow_after[id] = out;
                for &succ in cfg.succs(id) {
                    if !queued[succ] {
                        queued[succ] = true;
                        worklist.push_back(succ);
                    }
                }
            }
        }

        Self {
            cfg,
            config,
            flow_after,
        }
    }

    /// LUB of the predecessors' out-graphs; empty at entry.
    fn flow_into(
        cfg: &Cfg,
        config: &AnalysisConfig,
        flow_after: &[PointsToGraph],
        id: usize,
    ) -> PointsToGraph {
        let preds = cfg.preds(id);
        let mut graph = match preds.split_first() {
            None => PointsToGraph::new(),
            Some((&first, rest)) => {
                let mut g = flow_after[first].clone();
                for &p in rest {
                    g.merge_with(&flow_after[p]);
                }
                g
            }
        };
        if preds.len() > 1 && config.merge {
            merger::enforce_uniqueness(&mut graph);
        }
        graph
    }

    /// Out-graph of one statement at the fixpoint.
    pub fn flow_after(&self, id: usize) -> &PointsToGraph {
        &self.flow_after[id]
    }

    /// The graph handed to the purity checker: the LUB over all tail
    /// statements, normalized once more when merging is enabled.
    pub fn exit_graph(&self) -> PointsToGraph {
        let mut exit = PointsToGraph::new();
        let mut first = true;
        for &tail in self.cfg.tails() {
            if first {
                exit = self.flow_after[tail].clone();
                first = false;
            } else {
                exit.merge_with(&self.flow_after[tail]);
            }
        }
        if self.config.merge {
            merger::enforce_uniqueness(&mut exit);
        }
        exit
    }

    /// Fixpoint snapshots at trace-worthy statements, in body order.
    pub fn milestones(&self) -> Vec<(usize, String, PointsToGraph)> {
        self.cfg
            .stmts()
            .iter()
            .enumerate()
            .filter(|(_, stmt)| stmt.is_key_milestone())
            .map(|(id, stmt)| (id, stmt.to_string(), self.flow_after[id].clone()))
            .collect()
    }
}
