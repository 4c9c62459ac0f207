use crate::core::OutputRecord;
use crate::error::Result;
use crate::sink::RecordSink;

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<OutputRecord>,
    finish_calls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn is_finished(&self) -> bool {
        self.finish_calls > 0
    }

    /// How many times `finish` has been called.
    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }
}

impl RecordSink for MemorySink {
    fn add_record(&mut self, record: OutputRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}
