//! CSV output with a header row of column names.
//!
//! Fields containing a comma, quote, CR or LF are quoted and embedded quotes
//! doubled. Null values are written as empty fields.

use crate::core::{OutputRecord, TargetSchema, Value};
use crate::error::Result;
use crate::sink::RecordSink;
use std::borrow::Cow;
use std::io::{BufWriter, Write};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

pub struct CsvSink<W: Write> {
    writer: BufWriter<W>,
    header: Vec<String>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, schema: &TargetSchema) -> Self {
        Self {
            writer: BufWriter::new(writer),
            header: schema.names().map(str::to_string).collect(),
            header_written: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            let line = self.header.iter().map(|name| escape(name)).collect::<Vec<_>>().join(",");
            writeln!(self.writer, "{}", line)?;
            self.header_written = true;
        }
        Ok(())
    }
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Timestamp(millis) => value
            .as_datetime()
            .map_or_else(|| millis.to_string(), |dt| dt.format(TIMESTAMP_FORMAT).to_string()),
        Value::String(s) => escape(s).into_owned(),
        Value::Null => String::new(),
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn add_record(&mut self, record: OutputRecord) -> Result<()> {
        self.write_header()?;
        let line = record.values().iter().map(format_value).collect::<Vec<_>>().join(",");
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnType;

    fn schema() -> TargetSchema {
        TargetSchema::new([
            ("name", ColumnType::String),
            ("age", ColumnType::Integer),
            ("born", ColumnType::Timestamp),
        ])
        .unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let mut sink = CsvSink::new(Vec::new(), &schema());
        sink.add_record(OutputRecord::new(vec![
            Value::String("Alice".into()),
            Value::Integer(30),
            Value::Timestamp(1_673_778_600_000),
        ]))
        .unwrap();
        sink.add_record(OutputRecord::new(vec![
            Value::String("Smith, \"Bob\"".into()),
            Value::Null,
            Value::Null,
        ]))
        .unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert_eq!(
            output,
            "name,age,born\nAlice,30,2023-01-15 10:30:00.000 UTC\n\"Smith, \"\"Bob\"\"\",,\n"
        );
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let mut sink = CsvSink::new(Vec::new(), &schema());
        sink.finish().unwrap();
        assert_eq!(String::from_utf8(sink.get_ref().clone()).unwrap(), "name,age,born\n");
    }
}
