use crate::application::services::RequestValidator;
use crate::domain::entities::Request;
use crate::domain::value_objects::{HeaderSet, Payload, Url};
use anyhow::{Result, anyhow};

pub struct RequestBuilder {
    url: Option<Url>,
    headers: HeaderSet,
    payload: Option<Payload>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            url: None,
            headers: HeaderSet::new(),
            payload: None,
        }
    }

    pub fn url(mut self, raw_url: &str) -> Result<Self> {
        self.url = Some(Url::new(raw_url)?);
        Ok(self)
    }

    pub fn headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Assembles the request and rejects it early if it could never be sent
    pub fn build(self) -> Result<Request> {
        let request = Request {
            url: self.url.ok_or_else(|| anyhow!("URL is required"))?,
            headers: self.headers,
            payload: self.payload.ok_or_else(|| anyhow!("Payload is required"))?,
        };
        RequestValidator::validate(&request)?;
        Ok(request)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
