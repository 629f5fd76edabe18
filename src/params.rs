//! Session parameter upload message
//!
//! Before a session starts, the host sends the device its parameters as
//! integers joined by `+` (for example `0+5000+10+10`). The order is fixed by
//! the device sketch; this module only handles the text encoding.
//!
//! Hosts usually lead the message with a command character so the device can
//! tell an upload from other serial input, for example `D0+5000+10+10`.

use thiserror::Error;

/// Separator between parameter values
pub const PARAM_DELIM: &str = "+";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("empty parameter message")]
    Empty,
    #[error("parameter {index} is not an integer: {value:?}")]
    InvalidValue { index: usize, value: String },
    #[error("parameter message does not start with command {expected:?}")]
    MissingCode { expected: char },
}

/// Encode parameter values for upload
pub fn encode_parameters(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(PARAM_DELIM)
}

/// Encode parameter values behind a leading command character
pub fn encode_parameters_with_code(code: char, values: &[i64]) -> String {
    let mut message = String::from(code);
    message.push_str(&encode_parameters(values));
    message
}

/// Decode an upload message back into values
pub fn decode_parameters(message: &str) -> Result<Vec<i64>, ParamsError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ParamsError::Empty);
    }

    message
        .split(PARAM_DELIM)
        .enumerate()
        .map(|(index, field)| {
            field.trim().parse().map_err(|_| ParamsError::InvalidValue {
                index,
                value: field.to_string(),
            })
        })
        .collect()
}

/// Decode a message that must lead with command character `code`
pub fn decode_parameters_with_code(code: char, message: &str) -> Result<Vec<i64>, ParamsError> {
    message
        .trim_start()
        .strip_prefix(code)
        .ok_or(ParamsError::MissingCode { expected: code })
        .and_then(decode_parameters)
}
