use crate::errors::AnalysisError;
use crate::ir::stmt::Stmt;

/// Control-flow graph over the statements of one method body.
///
/// Statements are addressed by their index in the body. Entry is statement
/// 0; tails are the statements with no successors (returns, plus a final
/// statement that falls off the end).
#[derive(Debug, Clone)]
pub struct Cfg {
    stmts: Vec<Stmt>,
    succs: Vec<Vec<usize>>,
    preds: Vec<Vec<usize>>,
    tails: Vec<usize>,
}

impl Cfg {
    /// Build the graph, validating that every branch target is in range.
    pub fn build(stmts: Vec<Stmt>) -> Result<Cfg, AnalysisError> {
        let len = stmts.len();
        for (i, stmt) in stmts.iter().enumerate() {
            if let Some(target) = stmt.branch_target() {
                if target >= len {
                    return Err(AnalysisError::ir(format!(
                        "statement {i} branches to {target}, but the body has {len} statements"
                    )));
                }
            }
        }

        let mut succs = Vec::with_capacity(len);
        let mut preds = vec![Vec::new(); len];
        for (i, stmt) in stmts.iter().enumerate() {
            let s = stmt.successors(i, len);
            for &t in &s {
                preds[t].push(i);
            }
            succs.push(s);
        }

        let tails = succs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(i, _)| i)
            .collect();

        Ok(Cfg {
            stmts,
            succs,
            preds,
            tails,
        })
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn stmt(&self, id: usize) -> &Stmt {
        &self.stmts[id]
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn succs(&self, id: usize) -> &[usize] {
        &self.succs[id]
    }

    pub fn preds(&self, id: usize) -> &[usize] {
        &self.preds[id]
    }

    pub fn tails(&self) -> &[usize] {
        &self.tails
    }
}
