//! Timestamped event records
//!
//! The device reports every occurrence (lick, stimulus onset, trial start, ...)
//! as one line of comma-delimited decimal text:
//!
//! ```text
//! <code>,<timestamp>,<payload>\n
//! ```
//!
//! `code` and `timestamp` are unsigned, `payload` is signed. There is no
//! escaping, handshake or acknowledgement; the newline is the only framing.
//!
//! - [`emitter`] writes records to a byte sink (device side)
//! - [`reader`] splits a serial stream back into records (logger side)
//!
//! # Example
//!
//! ```
//! use trialkit::event::EventRecord;
//!
//! let record = EventRecord::new(7, 1000, -3);
//! assert_eq!(record.to_string(), "7,1000,-3");
//! assert_eq!("7,1000,-3".parse::<EventRecord>().unwrap(), record);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod emitter;
pub mod reader;

/// Field separator on the wire
pub const DELIM: char = ',';

/// One logged occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRecord {
    /// Application-defined event kind
    pub code: u32,
    /// Device clock at the time of the event
    pub timestamp: u64,
    /// Optional numeric detail (trial type, response, ...)
    pub payload: i64,
}

impl EventRecord {
    pub fn new(code: u32, timestamp: u64, payload: i64) -> Self {
        Self {
            code,
            timestamp,
            payload,
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.code, DELIM, self.timestamp, DELIM, self.payload
        )
    }
}

/// Line that is not a valid event record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl FromStr for EventRecord {
    type Err = EventParseError;

    /// Parse `code,timestamp,payload`, tolerating a trailing `\r\n`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(DELIM).collect();
        if fields.len() != 3 {
            return Err(EventParseError::FieldCount(fields.len()));
        }

        Ok(Self {
            code: parse_field(fields[0], "code")?,
            timestamp: parse_field(fields[1], "timestamp")?,
            payload: parse_field(fields[2], "payload")?,
        })
    }
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, EventParseError> {
    value.trim().parse().map_err(|_| EventParseError::InvalidField {
        field,
        value: value.to_string(),
    })
}
