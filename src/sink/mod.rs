//! Output sinks for coerced records.
//!
//! A sink receives records in result order and is finalized exactly once by
//! the executor, whether the run succeeded or not.

use crate::core::OutputRecord;
use crate::error::Result;

pub mod csv;
pub mod json_lines;
pub mod memory;

pub use self::csv::CsvSink;
pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

pub trait RecordSink {
    /// Accepts one record, values in schema order.
    fn add_record(&mut self, record: OutputRecord) -> Result<()>;

    /// Flushes buffered output. Called once, after the last record.
    fn finish(&mut self) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn add_record(&mut self, record: OutputRecord) -> Result<()> {
        (**self).add_record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
