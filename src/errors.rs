//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid search request (e.g. no lemmas supplied).
#[derive(Debug)]
pub struct InvalidRequest(pub String);

/// Transport or HTTP failure while talking to the concordance service.
#[derive(Debug)]
pub struct NetworkError(pub String);

/// The service's response could not be decoded as the expected JSON shape.
#[derive(Debug)]
pub struct DecodeError(pub String);

/// The output destination could not be opened or written.
#[derive(Debug)]
pub struct OutputError(pub String);

impl fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid request: {}", self.0)
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "network error: {}", self.0)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "decode error: {}", self.0)
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "output error: {}", self.0)
    }
}

impl error::Error for InvalidRequest {}

impl error::Error for NetworkError {}

impl error::Error for DecodeError {}

impl error::Error for OutputError {}

/// A helper for constructing [InvalidRequest].
pub fn invalid_request_ref(s: &str) -> Box<dyn error::Error> {
    InvalidRequest(s.to_owned()).into()
}

/// A helper for constructing [NetworkError].
pub fn network_error(s: String) -> Box<dyn error::Error> {
    NetworkError(s).into()
}

/// A helper for constructing [DecodeError].
pub fn decode_error(s: String) -> Box<dyn error::Error> {
    DecodeError(s).into()
}

/// A helper for constructing [OutputError].
pub fn output_error(s: String) -> Box<dyn error::Error> {
    OutputError(s).into()
}
