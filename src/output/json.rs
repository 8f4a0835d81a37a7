//! Machine-readable verdict output.

use std::io::Write;

use crate::analysis::{MethodSummary, VerdictRecord};

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_verdicts(&mut self, summaries: &[MethodSummary]) -> anyhow::Result<()> {
        let records: Vec<VerdictRecord> = summaries.iter().map(MethodSummary::to_record).collect();
        let json = serde_json::to_string_pretty(&records)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
