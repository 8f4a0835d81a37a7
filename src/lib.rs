//! # puritymap
//!
//! A per-method purity analyzer for object-oriented bytecode programs.
//! Given a program in normalized three-address IR, it decides for each
//! method whether the method mutates any heap object that existed before
//! the call began.
//!
//! The engine is an intra-procedural abstract interpretation over a
//! points-to / escape graph in the style of Sălcianu & Rinard (2005),
//! with the node-merging refinement of Madhavan et al. (2011) to bound
//! graph growth:
//!
//! 1. Parameter, allocation, and load sites become abstract heap nodes.
//! 2. A forward dataflow fixpoint accumulates heap edges, the mutated
//!    field set, and the escape set along every path.
//! 3. The exit graph is checked: a method is pure when no prestate node
//!    (a parameter or anything reachable from one through the prior heap)
//!    is mutated or globally visible, and no static field was written.
//!
//! Unknown callees are handled conservatively; the safe-method registry
//! whitelists callees known to have no effect on prestate objects.
//!
//! ## Example
//!
//! ```rust
//! use puritymap::analysis::{checker, FlowAnalysis, SafeMethodRegistry};
//! use puritymap::config::AnalysisConfig;
//! use puritymap::ir::{Cfg, IrType, MethodDef, Operand, Stmt};
//!
//! // static int add(int a, int b) { return a + b; }
//! let method = MethodDef {
//!     class: "PureMethods".into(),
//!     name: "add".into(),
//!     params: vec![IrType::Int, IrType::Int],
//!     ret: IrType::Int,
//!     is_static: true,
//!     stmts: vec![Stmt::Return { value: Some(Operand::Constant) }],
//! };
//!
//! let cfg = Cfg::build(method.stmts.clone()).unwrap();
//! let config = AnalysisConfig::default();
//! let registry = SafeMethodRegistry::default();
//! let analysis = FlowAnalysis::run(&cfg, &method, &config, &registry);
//! let summary = checker::check(method.signature(), analysis.exit_graph(), false);
//! assert!(summary.verdict.is_pure());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod ir;
pub mod observability;
pub mod output;
pub mod runner;

pub use analysis::{MethodSummary, SafeMethodRegistry, Verdict};
pub use config::AnalysisConfig;
pub use graph::PointsToGraph;
pub use runner::AnalysisRunner;
