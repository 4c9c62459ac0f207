//! Newline-delimited JSON output, one object per record.

use crate::core::{OutputRecord, TargetSchema, Value};
use crate::error::Result;
use crate::sink::RecordSink;
use serde_json::{Map, Value as JsonValue};
use std::io::{BufWriter, Write};

pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>,
    columns: Vec<String>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, schema: &TargetSchema) -> Self {
        Self {
            writer: BufWriter::new(writer),
            columns: schema.names().map(str::to_string).collect(),
        }
    }

    /// The wrapped writer. Only complete after `finish`.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }
}

fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Integer(v) => JsonValue::from(*v),
        // NaN and infinities have no JSON form and become null.
        Value::Float(v) => JsonValue::from(*v),
        Value::Timestamp(millis) => JsonValue::String(Value::timestamp_rfc3339(*millis)),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Null => JsonValue::Null,
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn add_record(&mut self, record: OutputRecord) -> Result<()> {
        let object: Map<String, JsonValue> = self
            .columns
            .iter()
            .zip(record.values())
            .map(|(column, value)| (column.clone(), to_json(value)))
            .collect();
        serde_json::to_writer(&mut self.writer, &object)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
