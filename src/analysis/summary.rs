use serde::Serialize;

use crate::graph::PointsToGraph;

/// Purity verdict for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pure,
    Impure { reason: String },
    /// The exit graph violated a structural invariant; no purity claim
    /// is made.
    GraphViolation { reason: String },
}

impl Verdict {
    pub fn is_pure(&self) -> bool {
        matches!(self, Verdict::Pure)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pure => "PURE",
            Verdict::Impure { .. } => "IMPURE",
            Verdict::GraphViolation { .. } => "GRAPH VIOLATION",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Pure => None,
            Verdict::Impure { reason } | Verdict::GraphViolation { reason } => Some(reason),
        }
    }
}

/// Analysis result for a single method: the exit graph and the verdict
/// read from it.
///
/// Exit graphs are shaped as callee summaries (parameter nodes are
/// formal-argument placeholders), which is the hook a future
/// inter-procedural extension would compose at call sites.
#[derive(Debug, Clone)]
pub struct MethodSummary {
    pub signature: String,
    pub exit_graph: PointsToGraph,
    pub verdict: Verdict,
}

impl MethodSummary {
    pub fn new(signature: String, exit_graph: PointsToGraph, verdict: Verdict) -> Self {
        Self {
            signature,
            exit_graph,
            verdict,
        }
    }

    pub fn to_record(&self) -> VerdictRecord {
        VerdictRecord {
            method: self.signature.clone(),
            result: self.verdict.label().to_string(),
            reason: self.verdict.reason().map(String::from),
        }
    }
}

/// Flat, serializable verdict row for machine-readable output.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictRecord {
    pub method: String,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_labels() {
        assert_eq!(Verdict::Pure.label(), "PURE");
        assert_eq!(
            Verdict::Impure {
                reason: "x".into()
            }
            .label(),
            "IMPURE"
        );
        assert!(Verdict::Pure.reason().is_none());
    }

    #[test]
    fn record_serializes_without_null_reason() {
        let summary = MethodSummary::new("A.m()".into(), PointsToGraph::new(), Verdict::Pure);
        let json = serde_json::to_string(&summary.to_record()).unwrap();
        assert!(!json.contains("reason"));
    }
}
