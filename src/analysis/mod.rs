//! The analysis engine: transfer functions, the forward dataflow
//! fixpoint, the safe-method oracle, and the purity decision procedure.

pub mod checker;
pub mod flow;
pub mod safe_methods;
pub mod summary;
pub mod transfer;

pub use checker::{check, global_escape_closure, prestate_nodes};
pub use flow::FlowAnalysis;
pub use safe_methods::SafeMethodRegistry;
pub use summary::{MethodSummary, Verdict, VerdictRecord};
pub use transfer::TransferFunctions;
