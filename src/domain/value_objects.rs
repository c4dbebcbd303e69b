use crate::domain::errors::RunnerError;
use anyhow::{Result, anyhow};
use hyper::http::Uri;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const OCTET_STREAM_MEDIA_TYPE: &str = "application/octet-stream";

/// Represents a validated URL
#[derive(Debug, Clone)]
pub struct Url(pub Uri);

impl Url {
    /// Creates a new Url with validation
    ///
    /// # Arguments
    /// * `url` - The URL string to parse
    ///
    /// # Returns
    /// * `Ok(Url)` - Validated URL
    /// * `Err(RunnerError::InvalidUrl)` - If the URL is invalid
    pub fn new(url: &str) -> Result<Self, RunnerError> {
        let uri = url
            .parse::<Uri>()
            .map_err(|e| RunnerError::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(Url(uri))
    }

    /// Returns the URL as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

/// The JSON document sent as the request body
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(pub Value);

impl Payload {
    /// Parses `text` as JSON, naming `source_name` in the error
    pub fn parse(text: &str, source_name: &str) -> Result<Self, RunnerError> {
        serde_json::from_str::<Value>(text)
            .map(Payload)
            .map_err(|source| RunnerError::MalformedJson {
                source_name: source_name.to_string(),
                source,
            })
    }

    /// Encodes the payload for the wire according to the request content-type.
    ///
    /// JSON content types get the serialized document. Anything else sends a
    /// string payload as its raw text and falls back to JSON for the rest.
    pub fn to_body(&self, content_type: Option<&str>) -> Result<Vec<u8>> {
        let is_json = content_type.is_none_or(|ct| media_type(ct) == JSON_MEDIA_TYPE);
        match (&self.0, is_json) {
            (Value::String(text), false) => Ok(text.clone().into_bytes()),
            (value, _) => serde_json::to_vec(value)
                .map_err(|e| anyhow!("Failed to serialize payload: {}", e)),
        }
    }
}

/// Header values accepted in a headers document
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeaderValueRepr {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl HeaderValueRepr {
    fn into_text(self) -> String {
        match self {
            HeaderValueRepr::Text(text) => text,
            HeaderValueRepr::Number(number) => number.to_string(),
            HeaderValueRepr::Flag(flag) => flag.to_string(),
        }
    }
}

/// Request headers keyed by lower-cased name
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSet(BTreeMap<String, String>);

impl HeaderSet {
    /// The base set every request starts from
    pub fn new() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), JSON_MEDIA_TYPE.to_string());
        Self(headers)
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_ascii_lowercase(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Overlays a parsed headers document, last write wins per name
    pub fn overlay(&mut self, document: Value, source_name: &str) -> Result<(), RunnerError> {
        let entries = serde_json::from_value::<BTreeMap<String, HeaderValueRepr>>(document)
            .map_err(|_| RunnerError::InvalidHeaders {
                source_name: source_name.to_string(),
                reason: "expected a JSON object of string values".to_string(),
            })?;

        for (name, value) in entries {
            self.insert(&name, &value.into_text());
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self::new()
    }
}

pub const NO_NAME: &str = "[no name]";
const FILENAME_PARAM: &str = "filename=";

/// Loose reader for the `content-disposition` response header.
///
/// Only the literal `filename=` parameter is recognised. Everything after it
/// is the name, percent-decoded as UTF-8 with enclosing quotes removed.
#[derive(Debug, Clone, Copy)]
pub struct ContentDisposition<'a> {
    raw: Option<&'a str>,
}

impl<'a> ContentDisposition<'a> {
    pub fn new(raw: Option<&'a str>) -> Self {
        Self { raw }
    }

    pub fn filename(&self) -> String {
        let token = self.raw.and_then(|raw| {
            raw.find(FILENAME_PARAM)
                .map(|at| &raw[at + FILENAME_PARAM.len()..])
        });
        let Some(token) = token else {
            return NO_NAME.to_string();
        };

        let decoded = urlencoding::decode_binary(token.as_bytes());
        let text = String::from_utf8_lossy(&decoded);
        let mut name: &str = &text;
        name = name.strip_prefix('"').unwrap_or(name);
        name = name.strip_suffix('"').unwrap_or(name);

        if name.is_empty() {
            NO_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

/// Lower-cased media type with any parameters dropped
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
