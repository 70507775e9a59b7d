//! Output sinks for streaming operation results.

use crate::error::ConnectorResult;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Receives the records produced by an operation, one call per record.
pub trait ResponseSink {
    fn send<T: Serialize>(&mut self, output: &T) -> ConnectorResult<()>;
}

impl ResponseSink for Vec<Value> {
    fn send<T: Serialize>(&mut self, output: &T) -> ConnectorResult<()> {
        self.push(serde_json::to_value(output)?);
        Ok(())
    }
}

/// Writes each record as one JSON document per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResponseSink for JsonLinesSink<W> {
    fn send<T: Serialize>(&mut self, output: &T) -> ConnectorResult<()> {
        serde_json::to_writer(&mut self.writer, output)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
