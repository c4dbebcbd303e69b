use crate::domain::value_objects::{HeaderSet, Payload, Url};
use hyper::StatusCode;
use hyper::body::Bytes;
use std::fmt;

/// Represents the single POST request of a run
#[derive(Debug, Clone)]
pub struct Request {
    pub url: Url,
    pub headers: HeaderSet,
    pub payload: Payload,
}

/// Represents an HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub reason: String,
    pub headers: Vec<(String, String)>, // Key-value pairs for headers
    pub body: Bytes,
}

impl Response {
    /// First header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A non-2xx response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFailure {
    pub status: u16,
    pub reason: String,
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.status, self.reason)
    }
}

/// A binary body the server asked us to save
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub body: Bytes,
}

/// What a response turns into once its headers have been inspected
#[derive(Debug, Clone)]
pub enum Outcome {
    Failure(HttpFailure),
    Attachment(Attachment),
    Text(String),
}
