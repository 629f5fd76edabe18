//! Serial stream reader
//!
//! The logger side of the event line protocol. Devices interleave event lines
//! with free-form chatter (boot banners, parameter echoes), so every non-empty
//! line comes back either as a parsed [`EventRecord`] or as raw text.
//!
//! # Example
//!
//! ```
//! use trialkit::event::reader::{EventReader, SerialLine};
//! use trialkit::event::EventRecord;
//!
//! let input = "Ready\n1,100,0\n0,250,0\n1,300,0\n";
//! let lines: Vec<SerialLine> = EventReader::new(input.as_bytes())
//!     .with_end_code(0)
//!     .collect::<std::io::Result<_>>()
//!     .unwrap();
//!
//! assert_eq!(lines.len(), 3);
//! assert_eq!(lines[2], SerialLine::Event(EventRecord::new(0, 250, 0)));
//! ```

use super::EventRecord;
use std::io::{self, BufRead};

/// One line received from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialLine {
    Event(EventRecord),
    Text(String),
}

/// Iterator over lines of a serial stream
#[derive(Debug)]
pub struct EventReader<R> {
    source: R,
    buf: String,
    end_code: Option<u32>,
    finished: bool,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: String::new(),
            end_code: None,
            finished: false,
        }
    }

    /// Stop after yielding the event carrying `code`
    pub fn with_end_code(mut self, code: u32) -> Self {
        self.end_code = Some(code);
        self
    }

    /// Iterate over parsed events only, skipping text lines
    pub fn events(self) -> impl Iterator<Item = io::Result<EventRecord>> {
        self.filter_map(|line| match line {
            Ok(SerialLine::Event(record)) => Some(Ok(record)),
            Ok(SerialLine::Text(_)) => None,
            Err(e) => Some(Err(e)),
        })
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = io::Result<SerialLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buf.clear();
            match self.source.read_line(&mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            let line = self.buf.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            return Some(Ok(match line.parse::<EventRecord>() {
                Ok(record) => {
                    if self.end_code == Some(record.code) {
                        tracing::debug!(ts = record.timestamp, "end code received");
                        self.finished = true;
                    }
                    SerialLine::Event(record)
                }
                Err(e) => {
                    tracing::trace!(error = %e, "passing through text line");
                    SerialLine::Text(line.to_string())
                }
            }));
        }
    }
}
