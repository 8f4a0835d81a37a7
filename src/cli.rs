use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::AnalysisConfig;

#[derive(Parser, Debug)]
#[command(name = "puritymap")]
#[command(about = "Method purity analyzer for bytecode programs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Program artifacts to analyze (JSON IR files)
    #[arg(required = true)]
    pub programs: Vec<PathBuf>,

    /// Print points-to graphs and write DOT files to dot-graph/
    #[arg(long)]
    pub show_graph: bool,

    /// Disable node merging (larger graphs, identical verdicts)
    #[arg(long)]
    pub no_merge: bool,

    /// Analyze only methods with the given name
    #[arg(long, value_name = "NAME")]
    pub method: Option<String>,

    /// Write per-method HTML debug traces to debug/ (implies --show-graph)
    #[arg(long)]
    pub debug: bool,

    /// Output format for verdicts
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file for JSON verdicts (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new(
            self.show_graph,
            !self.no_merge,
            self.method.clone(),
            self.debug,
        )
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
