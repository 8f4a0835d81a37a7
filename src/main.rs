//! CLI entry point: parse arguments, load program artifacts, run the
//! analysis, and render verdicts.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};

use puritymap::cli::{self, OutputFormat};
use puritymap::ir::loader;
use puritymap::observability::init_tracing;
use puritymap::output::{results, JsonWriter};
use puritymap::{AnalysisRunner, SafeMethodRegistry};

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::parse_args();
    let config = cli.analysis_config();

    let program = loader::load_programs(&cli.programs).context("loading program artifacts")?;
    if program.method_count() == 0 {
        println!("No methods found in the given artifacts.");
        return Ok(());
    }

    let runner = AnalysisRunner::new(config, SafeMethodRegistry::default());
    let summaries = runner.run(&program);

    match cli.format {
        OutputFormat::Terminal => results::print(&summaries),
        OutputFormat::Json => match &cli.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                JsonWriter::new(file).write_verdicts(&summaries)?;
            }
            None => JsonWriter::new(io::stdout()).write_verdicts(&summaries)?,
        },
    }

    Ok(())
}
