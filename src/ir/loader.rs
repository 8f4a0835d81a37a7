//! Loads program artifacts (JSON class/method/IR descriptions) from disk.
//!
//! This is the stand-in for a bytecode front end: whatever compiles and
//! normalizes the input program is expected to emit this format.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::AnalysisError;
use crate::ir::Program;

/// Parse a program from a JSON string.
pub fn parse_program(json: &str) -> Result<Program, AnalysisError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a program from a single artifact file.
pub fn load_program(path: &Path) -> Result<Program, AnalysisError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AnalysisError::io_with_path(e.to_string(), path))?;
    let program: Program = serde_json::from_str(&content)
        .map_err(|e| AnalysisError::load_with_path(e.to_string(), path))?;
    debug!(
        "loaded {} classes ({} methods) from {}",
        program.classes.len(),
        program.method_count(),
        path.display()
    );
    Ok(program)
}

/// Load and merge several artifact files into one program.
pub fn load_programs<P: AsRef<Path>>(paths: &[P]) -> Result<Program, AnalysisError> {
    let mut program = Program::default();
    for path in paths {
        program.absorb(load_program(path.as_ref())?);
    }
    Ok(program)
}
