/// Flags controlling analysis behavior, passed to all components.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Print points-to graphs and write DOT files.
    pub show_graph: bool,
    /// Apply node merging after loads, at joins, and at exit.
    pub merge: bool,
    /// Analyze only methods with this name.
    pub method_filter: Option<String>,
    /// Write per-method HTML debug traces.
    pub debug: bool,
}

impl AnalysisConfig {
    pub fn new(show_graph: bool, merge: bool, method_filter: Option<String>, debug: bool) -> Self {
        Self {
            // debug traces embed the graphs, so --debug implies --show-graph
            show_graph: show_graph || debug,
            merge,
            method_filter,
            debug,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            show_graph: false,
            merge: true,
            method_filter: None,
            debug: false,
        }
    }
}
