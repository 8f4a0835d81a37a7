//! Final verdict table.

use colored::Colorize;

use crate::analysis::{MethodSummary, Verdict};

/// Print the aligned verdict table to stdout.
pub fn print(summaries: &[MethodSummary]) {
    if summaries.is_empty() {
        println!("No methods analyzed.");
        return;
    }

    println!();
    println!("=== Purity Analysis Results ===");

    let width = summaries
        .iter()
        .map(|s| s.signature.len())
        .max()
        .unwrap_or(0)
        + 2;

    for summary in summaries {
        let verdict = match &summary.verdict {
            Verdict::Pure => format!("{}", "PURE".green()),
            Verdict::Impure { reason } => format!("IMPURE  ({reason})"),
            Verdict::GraphViolation { reason } => {
                format!("{}  ({reason})", "GRAPH VIOLATION".red())
            }
        };
        println!("{:width$}: {}", summary.signature, verdict);
    }
    println!();
}
