//! Event line emitter
//!
//! Writes event records to any [`std::io::Write`] sink (serial port, stdout,
//! a file) as single lines. Each line is formatted completely before it is
//! handed to the sink in one `write_all`, so lines from one emitter never
//! interleave partially.
//!
//! Emission is fire-and-forget: a failed write is the sink's problem. The
//! emitter counts dropped lines but never retries.
//!
//! # Example
//!
//! ```
//! use trialkit::event::emitter::EventEmitter;
//!
//! let mut emitter = EventEmitter::new(Vec::new());
//! emitter.emit(7, 1000, -3);
//! emitter.emit(8, 1250, 0);
//!
//! assert_eq!(emitter.into_inner(), b"7,1000,-3\n8,1250,0\n");
//! ```

use super::EventRecord;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Write one event line to `stream`, ignoring delivery failures
///
/// Produces exactly `<code>,<ts>,<payload>\n`.
pub fn send_data<W: Write + ?Sized>(stream: &mut W, code: u32, ts: u64, payload: i64) {
    let line = format!("{}\n", EventRecord::new(code, ts, payload));
    if let Err(e) = stream.write_all(line.as_bytes()) {
        tracing::debug!(code, ts, error = %e, "event line dropped");
    }
}

/// Line emitter owning its sink
///
/// Reuses one line buffer across calls, so steady-state emission does not
/// allocate.
#[derive(Debug)]
pub struct EventEmitter<W: Write> {
    sink: W,
    line: String,
    emitted: u64,
    dropped: u64,
}

impl<W: Write> EventEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            line: String::with_capacity(48),
            emitted: 0,
            dropped: 0,
        }
    }

    /// Emit one event, ignoring delivery failures
    pub fn emit(&mut self, code: u32, timestamp: u64, payload: i64) {
        self.emit_record(&EventRecord::new(code, timestamp, payload));
    }

    /// Emit a prepared record, ignoring delivery failures
    pub fn emit_record(&mut self, record: &EventRecord) {
        if let Err(e) = self.try_emit(record) {
            self.dropped += 1;
            tracing::debug!(code = record.code, error = %e, "event line dropped");
        }
    }

    /// Emit a record and report the sink's result
    pub fn try_emit(&mut self, record: &EventRecord) -> io::Result<()> {
        self.line.clear();
        // Writing into a String cannot fail.
        let _ = writeln!(self.line, "{}", record);
        self.sink.write_all(self.line.as_bytes())?;
        self.emitted += 1;
        tracing::trace!(code = record.code, ts = record.timestamp, "event emitted");
        Ok(())
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Lines successfully handed to the sink
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Lines the sink refused
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that rejects every write
    struct Disconnected;

    impl Write for Disconnected {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_send_data_exact_line() {
        let mut out = Vec::new();
        send_data(&mut out, 7, 1000, -3);
        assert_eq!(out, b"7,1000,-3\n");
    }

    #[test]
    fn test_send_data_zero_payload() {
        let mut out = Vec::new();
        send_data(&mut out, 3, 52, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "3,52,0\n");
    }

    #[test]
    fn test_send_data_ignores_sink_errors() {
        send_data(&mut Disconnected, 1, 2, 3);
    }

    #[test]
    fn test_send_data_dyn_sink() {
        let mut out = Vec::new();
        {
            let sink: &mut dyn Write = &mut out;
            send_data(sink, 1, 2, -1);
        }
        assert_eq!(out, b"1,2,-1\n");
    }

    #[test]
    fn test_emitter_sequence() {
        let mut emitter = EventEmitter::new(Vec::new());
        emitter.emit(1, 0, 1);
        emitter.emit_record(&EventRecord::new(4, 4_294_967_295, -2_147_483_648));
        assert_eq!(emitter.emitted(), 2);
        assert_eq!(emitter.dropped(), 0);
        assert_eq!(
            String::from_utf8(emitter.into_inner()).unwrap(),
            "1,0,1\n4,4294967295,-2147483648\n"
        );
    }

    #[test]
    fn test_emitter_counts_drops() {
        let mut emitter = EventEmitter::new(Disconnected);
        emitter.emit(1, 2, 3);
        emitter.emit(1, 3, 3);
        assert_eq!(emitter.emitted(), 0);
        assert_eq!(emitter.dropped(), 2);
        assert!(emitter.try_emit(&EventRecord::new(1, 4, 3)).is_err());
    }

    #[test]
    fn test_emitter_lines_parse_back() {
        let mut emitter = EventEmitter::new(Vec::new());
        let records = [EventRecord::new(5, 10, 0), EventRecord::new(6, 11, -9)];
        for record in &records {
            emitter.emit_record(record);
        }
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        let parsed: Vec<EventRecord> = text.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(parsed, records);
    }
}
